//! Stateless renderers of a finished document.

mod html;
mod markdown;
mod xml;

use std::str::FromStr;

use crate::config::Style;
use crate::document::{Block, Document, Inline, QuoteLevel};
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Plain,
    Markdown,
    Html,
    Xml,
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "plain" => Ok(Format::Plain),
            "markdown" => Ok(Format::Markdown),
            "html" => Ok(Format::Html),
            "xml" => Ok(Format::Xml),
            _ => Err(ConfigError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Render `doc` in the requested format. The result has no trailing newline.
pub fn render(doc: &Document, format: Format) -> String {
    match format {
        Format::Plain => render_plain(doc),
        Format::Markdown => markdown::render(doc),
        Format::Html => html::render(doc),
        Format::Xml => xml::render(doc),
    }
}

fn render_plain(doc: &Document) -> String {
    let text = |content: &[Inline]| render_inlines(content, &doc.style);
    let parts: Vec<String> = doc
        .blocks
        .iter()
        .map(|block| match block {
            Block::Paragraph(content) | Block::Title(content) => text(content),
            Block::Heading { level, content } => {
                format!("{} {}", "#".repeat(usize::from(*level)), text(content))
            }
            Block::Contents { title, entries } => std::iter::once(text(title))
                .chain(entries.iter().map(|e| text(&e.content)))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::MetaLine { key, value } => meta_line(key, &text(value)),
            Block::Dialogue(turns) => turns
                .iter()
                .map(|t| text(&t.content))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::SceneBreak { marker } => marker.clone(),
        })
        .collect();
    parts.join("\n\n")
}

fn meta_line(key: &str, value: &str) -> String {
    if value.is_empty() {
        format!("{key}:")
    } else {
        format!("{key}: {value}")
    }
}

/// Heading level clamped to what markup languages support.
fn clamp_level(level: u8) -> u8 {
    level.clamp(1, 6)
}

/// Flatten inlines to text, emitting quote spans with the style's pairs.
pub fn render_inlines(content: &[Inline], style: &Style) -> String {
    let mut out = String::new();
    write_inlines(&mut out, content, style);
    out
}

fn write_inlines(out: &mut String, content: &[Inline], style: &Style) {
    for inline in content {
        match inline {
            Inline::Word(s) => out.push_str(s),
            Inline::Space(kind) => out.push(kind.as_char()),
            Inline::Punct(p) => out.push(p.as_char()),
            Inline::Dash(d) => out.push(d.as_char()),
            Inline::Ellipsis => out.push('…'),
            Inline::ParenSpan { bracket, content } => {
                out.push(bracket.open());
                write_inlines(out, content, style);
                out.push(bracket.close());
            }
            Inline::QuoteSpan { level, content } => {
                let pair = match level {
                    QuoteLevel::Primary => style.outer,
                    QuoteLevel::Secondary => style.inner,
                };
                out.push(pair.open);
                write_inlines(out, content, style);
                out.push(pair.close);
            }
        }
    }
}
