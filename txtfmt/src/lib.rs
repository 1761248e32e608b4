pub mod config;
pub mod diagnostic;
pub mod document;
pub mod error;
pub mod parser;
pub mod printer;

pub use config::{Config, InnerQuotes, Lang, QuotePair, Style};
pub use diagnostic::{Diagnostic, DiagnosticCode, Position};
pub use document::{
    Block, Bracket, ContentsEntry, DashKind, DialogueTurn, Document, Inline, Punct, QuoteLevel,
    SpaceKind,
};
pub use error::ConfigError;
pub use printer::Format;
