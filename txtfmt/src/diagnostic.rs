use std::fmt;

use codespan_reporting::diagnostic::{Diagnostic as Report, Label, Severity};

/// Location of a diagnostic in the line-ending-normalized input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in code points.
    pub column: usize,
    /// Byte offset from the start of the input.
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    ParenMismatch,
    ParenUnclosed,
    QuoteMismatch,
    QuoteUnclosed,
    DialogueEmpty,
}

impl DiagnosticCode {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::ParenMismatch => "PAREN_MISMATCH",
            DiagnosticCode::ParenUnclosed => "PAREN_UNCLOSED",
            DiagnosticCode::QuoteMismatch => "QUOTE_MISMATCH",
            DiagnosticCode::QuoteUnclosed => "QUOTE_UNCLOSED",
            DiagnosticCode::DialogueEmpty => "DIALOGUE_EMPTY",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal problem found in the document. The run still succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub position: Option<Position>,
    pub code: DiagnosticCode,
    pub message: String,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, message: impl Into<String>, position: Option<Position>) -> Self {
        Diagnostic {
            position,
            code,
            message: message.into(),
        }
    }

    pub fn at(code: DiagnosticCode, message: impl Into<String>, position: Position) -> Self {
        Self::new(code, message, Some(position))
    }

    /// Convert to a codespan-reporting warning labelled at the offending glyph.
    /// Diagnostics without a position carry no label.
    pub fn to_codespan(&self, file_id: usize, source: &str) -> Report<usize> {
        let report = Report::new(Severity::Warning)
            .with_code(self.code.as_str())
            .with_message(&self.message);

        let Some(pos) = self.position else {
            return report;
        };
        let start = pos.offset.min(source.len());
        let width = source
            .get(start..)
            .and_then(|rest| rest.chars().next())
            .map_or(0, char::len_utf8);
        report.with_labels(vec![Label::primary(file_id, start..start + width)])
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (line, column) = self.position.map_or((0, 0), |p| (p.line, p.column));
        write!(f, "{}:{} {} {}", line, column, self.code, self.message)
    }
}
