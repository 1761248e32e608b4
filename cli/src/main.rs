mod charset;
mod dump;
mod error;
mod lang;

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::{CommandFactory, Parser as _};
use codespan_reporting::files::{self, SimpleFiles};
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream, WriteColor};
use log::{debug, warn};

use txtfmt::parser::Parser;
use txtfmt::{Config, Diagnostic, Format, InnerQuotes};

use crate::charset::Charset;
use crate::error::CliError;

#[derive(clap::Parser)]
#[command(
    name = "txtfmt",
    version,
    about = "Typographic normalizer for English, Russian and Ukrainian prose",
    override_usage = "txtfmt -input <file|-> [options]"
)]
struct Cli {
    /// Input source: file path or '-' for stdin
    #[arg(long)]
    input: Option<String>,

    /// Output destination: file path or '-' for stdout
    #[arg(long)]
    output: Option<String>,

    /// Language: auto|en|ru|ua
    #[arg(long, default_value = "auto")]
    lang: String,

    /// Inner quote style: german|english|guillemets
    #[arg(long)]
    inner_quotes: Option<String>,

    /// Bind short words, numbers and initials with non-breaking spaces
    #[arg(long)]
    nbsp: bool,

    /// Print the parsed tree to stderr as JSON before rewriting
    #[arg(long)]
    dump_ast: bool,

    /// Output format: plain|markdown|html|xml
    #[arg(long, default_value = "plain")]
    format: String,

    /// Input charset (utf-8|cp1251|koi8-r|koi8-u|cp866|iso-8859-5|mac-cyrillic)
    #[arg(long, default_value = "utf-8")]
    input_charset: String,

    /// Output charset (utf-8|cp1251|koi8-r|koi8-u|cp866|iso-8859-5|mac-cyrillic)
    #[arg(long, default_value = "utf-8")]
    output_charset: String,

    /// Show diagnostics with source snippets
    #[arg(long)]
    rich_diagnostics: bool,

    /// Disable colored diagnostic output
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse_from(expand_single_dash_flags(std::env::args())) {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 2 } else { 0 };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    let Some(input) = cli.input.as_deref() else {
        eprintln!("{}", Cli::command().render_help());
        return ExitCode::SUCCESS;
    };

    match run(&cli, input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

/// Flags have always been spelled with a single dash (`-input`, `-format`).
/// Rewrite those to the double-dash form before clap sees them.
fn expand_single_dash_flags(args: impl IntoIterator<Item = String>) -> Vec<String> {
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            let single_dash_long = arg.len() > 2 && arg.starts_with('-') && !arg.starts_with("--");
            if i > 0 && single_dash_long {
                format!("-{arg}")
            } else {
                arg
            }
        })
        .collect()
}

fn run(cli: &Cli, input: &str) -> Result<(), CliError> {
    let input_charset: Charset = cli.input_charset.parse()?;
    let output_charset: Charset = cli.output_charset.parse()?;
    let format: Format = cli.format.parse()?;
    let inner = cli
        .inner_quotes
        .as_deref()
        .map(str::parse::<InnerQuotes>)
        .transpose()?;

    let text = input_charset.decode(&read_input(input)?)?;
    let lang = lang::resolve(&cli.lang, &text)?;
    let config = Config::new(lang, inner, cli.nbsp);
    debug!("lang {lang}, format {format:?}, charsets {input_charset} -> {output_charset}");

    let parser = Parser::new(text, &config);
    let mut doc = parser.parse();
    if cli.dump_ast {
        dump::write_ast(&mut io::stderr().lock(), &doc)?;
    }
    rewrite::apply(&mut doc, &config);

    let output = output_charset.encode(&txtfmt::printer::render(&doc, format))?;
    write_output(cli.output.as_deref(), &output)?;

    if cli.rich_diagnostics {
        emit_rich_diagnostics(input, parser.source(), &doc.diagnostics, cli.no_color);
    } else {
        for diag in &doc.diagnostics {
            eprintln!("{diag}");
        }
    }
    Ok(())
}

fn read_input(path: &str) -> Result<Vec<u8>, CliError> {
    if path == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf).map_err(CliError::Read)?;
        return Ok(buf);
    }
    fs::read(path).map_err(CliError::Read)
}

fn write_output(path: Option<&str>, data: &[u8]) -> Result<(), CliError> {
    match path.map(str::trim) {
        None | Some("") | Some("-") => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(data)
                .and_then(|()| stdout.flush())
                .map_err(CliError::Write)
        }
        Some(path) => fs::write(path, data).map_err(CliError::Write),
    }
}

fn emit_rich_diagnostics(name: &str, source: &str, diagnostics: &[Diagnostic], no_color: bool) {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let writer = StandardStream::stderr(color_choice);
    if let Err(err) = write_rich_diagnostics(&mut writer.lock(), name, source, diagnostics) {
        warn!("could not write diagnostics: {err}");
    }
}

fn write_rich_diagnostics<W: WriteColor + ?Sized>(
    writer: &mut W,
    name: &str,
    source: &str,
    diagnostics: &[Diagnostic],
) -> Result<(), files::Error> {
    let mut files = SimpleFiles::new();
    let file_id = files.add(name.to_string(), source.to_string());

    let config = term::Config::default();
    for diag in diagnostics {
        let report = diag.to_codespan(file_id, source);
        term::emit_to_write_style(writer, &config, &files, &report)?;
    }
    Ok(())
}
