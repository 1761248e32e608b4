mod inline;
mod lines;
mod spans;
mod structural;

pub use lines::{is_invisible, normalize_line_endings};
pub use structural::{is_dialogue_line, is_scene_break};

use log::debug;

use crate::config::Config;
use crate::document::Document;

/// Parser entry point.
pub struct Parser {
    source: String,
    config: Config,
}

impl Parser {
    pub fn new(source: impl Into<String>, config: &Config) -> Self {
        Parser {
            source: normalize_line_endings(&source.into()),
            config: config.clone(),
        }
    }

    /// The input after line-ending normalization. Diagnostic offsets index
    /// into this string.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Segment and tokenize the source into a document tree. Never fails;
    /// bracket and quote problems are recorded as diagnostics.
    pub fn parse(&self) -> Document {
        let lines = lines::prepare_lines(&self.source);
        let (blocks, diagnostics) = structural::parse_blocks(&lines);
        debug!(
            "parsed {} blocks with {} diagnostics",
            blocks.len(),
            diagnostics.len()
        );

        let mut doc = Document::new(self.config.lang, self.config.style);
        doc.blocks = blocks;
        doc.diagnostics = diagnostics;
        doc
    }
}
