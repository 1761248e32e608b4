//! JSON view of a document tree for `--dump-ast`.

use std::io::Write;

use serde::Serialize;
use txtfmt::{
    Block, DashKind, Diagnostic, Document, Inline, QuoteLevel, QuotePair, SpaceKind,
};

use crate::error::CliError;

#[derive(Serialize)]
struct DumpDocument<'a> {
    lang: &'static str,
    style: DumpStyle,
    blocks: Vec<DumpBlock<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    diags: Vec<DumpDiag<'a>>,
}

#[derive(Serialize)]
struct DumpStyle {
    outer: DumpPair,
    inner: DumpPair,
}

#[derive(Serialize)]
struct DumpPair {
    open: String,
    close: String,
}

impl From<QuotePair> for DumpPair {
    fn from(pair: QuotePair) -> Self {
        DumpPair {
            open: pair.open.to_string(),
            close: pair.close.to_string(),
        }
    }
}

#[derive(Serialize)]
struct DumpDiag<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    col: Option<usize>,
    code: &'static str,
    message: &'a str,
}

#[derive(Serialize, Default)]
struct DumpBlock<'a> {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    marker: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<&'a str>,
    #[serde(rename = "in", skip_serializing_if = "Vec::is_empty")]
    content: Vec<DumpInline<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    entries: Vec<DumpEntry<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    turns: Vec<DumpTurn<'a>>,
}

#[derive(Serialize)]
struct DumpEntry<'a> {
    level: u8,
    #[serde(rename = "in")]
    content: Vec<DumpInline<'a>>,
}

#[derive(Serialize)]
struct DumpTurn<'a> {
    #[serde(rename = "in")]
    content: Vec<DumpInline<'a>>,
}

#[derive(Serialize, Default)]
struct DumpInline<'a> {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    space: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dash: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    open: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    close: Option<String>,
    #[serde(rename = "in", skip_serializing_if = "Vec::is_empty")]
    content: Vec<DumpInline<'a>>,
}

/// Write `doc` as pretty JSON followed by a newline.
pub fn write_ast<W: Write>(out: &mut W, doc: &Document) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, &dump_document(doc))?;
    writeln!(out).map_err(CliError::Write)
}

fn dump_document(doc: &Document) -> DumpDocument<'_> {
    DumpDocument {
        lang: doc.lang.code(),
        style: DumpStyle {
            outer: doc.style.outer.into(),
            inner: doc.style.inner.into(),
        },
        blocks: doc.blocks.iter().map(dump_block).collect(),
        diags: doc.diagnostics.iter().map(dump_diag).collect(),
    }
}

fn dump_diag(diag: &Diagnostic) -> DumpDiag<'_> {
    DumpDiag {
        line: diag.position.map(|p| p.line),
        col: diag.position.map(|p| p.column),
        code: diag.code.as_str(),
        message: &diag.message,
    }
}

fn dump_block(block: &Block) -> DumpBlock<'_> {
    let kind = block.kind();
    match block {
        Block::Paragraph(content) | Block::Title(content) => DumpBlock {
            kind,
            content: dump_inlines(content),
            ..Default::default()
        },
        Block::Heading { level, content } => DumpBlock {
            kind,
            level: Some(*level),
            content: dump_inlines(content),
            ..Default::default()
        },
        Block::Contents { title, entries } => DumpBlock {
            kind,
            content: dump_inlines(title),
            entries: entries
                .iter()
                .map(|e| DumpEntry {
                    level: e.level,
                    content: dump_inlines(&e.content),
                })
                .collect(),
            ..Default::default()
        },
        Block::MetaLine { key, value } => DumpBlock {
            kind,
            key: Some(key.as_str()),
            content: dump_inlines(value),
            ..Default::default()
        },
        Block::Dialogue(turns) => DumpBlock {
            kind,
            turns: turns
                .iter()
                .map(|t| DumpTurn {
                    content: dump_inlines(&t.content),
                })
                .collect(),
            ..Default::default()
        },
        Block::SceneBreak { marker } => DumpBlock {
            kind,
            marker: Some(marker.as_str()),
            ..Default::default()
        },
    }
}

fn dump_inlines(content: &[Inline]) -> Vec<DumpInline<'_>> {
    content.iter().map(dump_inline).collect()
}

fn dump_inline(inline: &Inline) -> DumpInline<'_> {
    match inline {
        Inline::Word(text) => DumpInline {
            kind: "Word",
            text: Some(text.as_str()),
            ..Default::default()
        },
        Inline::Space(kind) => DumpInline {
            kind: "Space",
            space: Some(match kind {
                SpaceKind::Normal => "Normal",
                SpaceKind::NonBreaking => "NBSP",
                SpaceKind::Thin => "Thin",
            }),
            ..Default::default()
        },
        Inline::Punct(p) => DumpInline {
            kind: "Punct",
            ch: Some(p.as_char().to_string()),
            ..Default::default()
        },
        Inline::Dash(kind) => DumpInline {
            kind: "Dash",
            dash: Some(match kind {
                DashKind::Hyphen => "Hyphen",
                DashKind::EnDash => "NDash",
                DashKind::EmDash => "EmDash",
            }),
            ..Default::default()
        },
        Inline::Ellipsis => DumpInline {
            kind: "Ellipsis",
            ..Default::default()
        },
        Inline::QuoteSpan { level, content } => DumpInline {
            kind: "QuoteSpan",
            level: Some(match level {
                QuoteLevel::Primary => "Primary",
                QuoteLevel::Secondary => "Secondary",
            }),
            content: dump_inlines(content),
            ..Default::default()
        },
        Inline::ParenSpan { bracket, content } => DumpInline {
            kind: "ParenSpan",
            open: Some(bracket.open().to_string()),
            close: Some(bracket.close().to_string()),
            content: dump_inlines(content),
            ..Default::default()
        },
    }
}
