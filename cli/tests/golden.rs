//! Runs every `fixtures/**/*.test.md` through the normalizer.
//!
//! A fixture is TOML front matter between `---` lines followed by the input
//! text. The output is compared exactly (ignoring a trailing newline in the
//! expectation), diagnostics by code and optional line, and the plain
//! rendering must survive a second pass unchanged.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use txtfmt::printer::{Format, render};
use txtfmt::{Config, Diagnostic, InnerQuotes, Lang};

#[derive(Debug, Deserialize)]
struct ExpectedDiagnostic {
    /// Diagnostic code, e.g. `PAREN_MISMATCH`.
    code: String,

    /// If set, the diagnostic must point at this 1-based line.
    #[serde(default)]
    line: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct FixtureConfig {
    #[serde(default)]
    description: Option<String>,

    #[serde(default = "default_lang")]
    lang: String,

    #[serde(default)]
    inner_quotes: Option<String>,

    #[serde(default)]
    nbsp: bool,

    #[serde(default)]
    format: String,

    #[serde(default)]
    expect_output: Option<String>,

    /// If present (even empty), the diagnostic list is checked exactly.
    #[serde(default)]
    expect_diagnostics: Option<Vec<ExpectedDiagnostic>>,
}

fn default_lang() -> String {
    "ru".to_string()
}

/// Split a fixture into its front matter and input text.
fn parse_fixture(content: &str) -> Result<(FixtureConfig, &str), String> {
    let content = content.trim_start_matches('\u{feff}');
    let after_open = content
        .strip_prefix("---\n")
        .ok_or("missing opening --- frontmatter delimiter")?;
    let close_pos = after_open
        .find("\n---")
        .ok_or("missing closing --- frontmatter delimiter")?;

    let toml_str = &after_open[..close_pos];
    let rest = &after_open[close_pos + 4..];
    let source = rest.strip_prefix('\n').unwrap_or(rest);

    let config: FixtureConfig =
        toml::from_str(toml_str).map_err(|e| format!("TOML parse error: {e}"))?;
    Ok((config, source))
}

fn build_config(fixture: &FixtureConfig) -> Result<Config, String> {
    let lang: Lang = fixture.lang.parse().map_err(|e| format!("{e}"))?;
    let inner = fixture
        .inner_quotes
        .as_deref()
        .map(str::parse::<InnerQuotes>)
        .transpose()
        .map_err(|e| format!("{e}"))?;
    Ok(Config::new(lang, inner, fixture.nbsp))
}

fn check_diagnostics(actual: &[Diagnostic], expected: &[ExpectedDiagnostic]) -> Result<(), String> {
    let listing = || {
        actual
            .iter()
            .map(|d| format!("    {d}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    if actual.len() != expected.len() {
        return Err(format!(
            "expected {} diagnostic(s), got {}\n{}",
            expected.len(),
            actual.len(),
            listing()
        ));
    }
    for (i, (actual, expected)) in actual.iter().zip(expected).enumerate() {
        if actual.code.as_str() != expected.code {
            return Err(format!("diagnostic[{i}]: expected {}, got {actual}", expected.code));
        }
        if let Some(line) = expected.line {
            let actual_line = actual.position.map(|p| p.line);
            if actual_line != Some(line) {
                return Err(format!("diagnostic[{i}]: expected on line {line}, got {actual}"));
            }
        }
    }
    Ok(())
}

fn run_fixture(path: &Path) -> Result<(), String> {
    let content = std::fs::read_to_string(path).map_err(|e| format!("cannot read file: {e}"))?;
    let (fixture, source) = parse_fixture(&content)?;
    let config = build_config(&fixture)?;
    let format: Format = fixture.format.parse().map_err(|e| format!("{e}"))?;

    let doc = rewrite::normalize(source, &config);

    if let Some(expected) = &fixture.expect_output {
        let expected = expected.strip_suffix('\n').unwrap_or(expected);
        let actual = render(&doc, format);
        if actual != expected {
            return Err(format!(
                "output mismatch\n  expected: {expected:?}\n  actual:   {actual:?}"
            ));
        }
    }

    if let Some(expected) = &fixture.expect_diagnostics {
        check_diagnostics(&doc.diagnostics, expected)?;
    }

    let once = doc.to_string();
    let twice = rewrite::normalize(&once, &config).to_string();
    if once != twice {
        return Err(format!(
            "plain output is not idempotent\n  first:  {once:?}\n  second: {twice:?}"
        ));
    }
    Ok(())
}

/// Fixture files grouped by the folder they live in, relative to `root`.
fn discover(root: &Path) -> BTreeMap<String, Vec<PathBuf>> {
    let mut categories: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    collect(root, root, &mut categories);
    for files in categories.values_mut() {
        files.sort();
    }
    categories
}

fn collect(dir: &Path, root: &Path, out: &mut BTreeMap<String, Vec<PathBuf>>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, root, out);
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(".test.md"))
        {
            let category = path
                .parent()
                .and_then(|p| p.strip_prefix(root).ok())
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .unwrap_or_default();
            out.entry(category).or_default().push(path);
        }
    }
}

#[test]
fn golden_fixtures() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures");
    let categories = discover(&root);
    assert!(!categories.is_empty(), "no fixtures under {}", root.display());

    let mut failures = Vec::new();
    let mut passed = 0usize;
    for files in categories.values() {
        for file in files {
            match run_fixture(file) {
                Ok(()) => passed += 1,
                Err(reason) => failures.push(format!("--- {} ---\n{reason}", file.display())),
            }
        }
    }

    assert!(
        failures.is_empty(),
        "{} passed, {} failed\n\n{}",
        passed,
        failures.len(),
        failures.join("\n\n")
    );
}

#[test]
fn fixture_front_matter_is_parsed() {
    let (config, source) = parse_fixture(
        "---\ndescription = \"x\"\nnbsp = true\nexpect_diagnostics = [{ code = \"PAREN_MISMATCH\", line = 1 }]\n---\nПривет )\n",
    )
    .expect("valid fixture");
    assert_eq!(config.description.as_deref(), Some("x"));
    assert_eq!(config.lang, "ru");
    assert!(config.nbsp);
    assert_eq!(config.format, "");
    assert_eq!(source, "Привет )\n");
    let expected = config.expect_diagnostics.expect("diagnostics");
    assert_eq!(expected[0].code, "PAREN_MISMATCH");
    assert_eq!(expected[0].line, Some(1));
}
