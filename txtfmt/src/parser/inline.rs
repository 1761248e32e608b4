//! Inline tokenizer.

use super::lines::{SourceLine, is_invisible};
use crate::diagnostic::Position;
use crate::document::{Bracket, DashKind, Punct};

/// One line of text to tokenize together with where it starts.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Segment<'a> {
    pub text: &'a str,
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl<'a> Segment<'a> {
    /// The line as it stands.
    pub fn whole(line: &'a SourceLine) -> Self {
        Segment {
            text: &line.text,
            line: line.line,
            column: 1,
            offset: line.offset,
        }
    }

    /// The line without leading spaces and tabs, columns shifted accordingly.
    pub fn indented(line: &'a SourceLine) -> Self {
        let rest = line.text.trim_start_matches([' ', '\t']);
        Self::from_lead(line, line.text.len() - rest.len(), rest)
    }

    /// The line with surrounding whitespace removed.
    pub fn trimmed(line: &'a SourceLine) -> Self {
        let rest = line.text.trim_start();
        Self::from_lead(line, line.text.len() - rest.len(), rest.trim_end())
    }

    /// Text derived from the line (normalized whitespace, stripped markers).
    /// Positions point at the start of the line.
    pub fn rewritten(line: &SourceLine, text: &'a str) -> Self {
        Segment {
            text,
            line: line.line,
            column: 1,
            offset: line.offset,
        }
    }

    fn from_lead(line: &'a SourceLine, lead: usize, text: &'a str) -> Self {
        Segment {
            text,
            line: line.line,
            column: 1 + line.text[..lead].chars().count(),
            offset: line.offset + lead,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Word(String),
    Space,
    Punct(Punct),
    Dash(DashKind),
    Ellipsis,
    Quote(char),
    Open(Bracket),
    Close(char),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub pos: Position,
}

impl Token {
    pub fn is_space(&self) -> bool {
        self.kind == TokenKind::Space
    }
}

pub(crate) fn is_quote_char(c: char) -> bool {
    matches!(c, '"' | '«' | '»' | '„' | '“' | '”' | '‟' | '‘' | '’')
}

/// Tokenize consecutive segments. With `join_with_space` a space token
/// separates each segment from the next.
pub(crate) fn tokenize_segments(segments: &[Segment], join_with_space: bool) -> Vec<Token> {
    let mut out = Vec::new();
    for (i, segment) in segments.iter().enumerate() {
        tokenize_into(segment, &mut out);
        if join_with_space && i + 1 < segments.len() {
            push_space(
                &mut out,
                Position {
                    line: segment.line,
                    column: segment.column + segment.text.chars().count(),
                    offset: segment.offset + segment.text.len(),
                },
            );
        }
    }
    out
}

fn push_space(out: &mut Vec<Token>, pos: Position) {
    if out.last().is_some_and(Token::is_space) {
        return;
    }
    out.push(Token {
        kind: TokenKind::Space,
        pos,
    });
}

fn tokenize_into(segment: &Segment, out: &mut Vec<Token>) {
    let chars: Vec<(usize, char)> = segment.text.char_indices().collect();
    let pos_at = |i: usize| Position {
        line: segment.line,
        column: segment.column + i,
        offset: segment.offset + chars.get(i).map_or(segment.text.len(), |&(b, _)| b),
    };

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i].1;
        let pos = pos_at(i);

        if is_invisible(c) {
            i += 1;
            continue;
        }

        if c.is_whitespace() {
            while i < chars.len() && chars[i].1.is_whitespace() {
                i += 1;
            }
            push_space(out, pos);
            continue;
        }

        let kind = if c == '.' && is_char_at(&chars, i + 1, '.') && is_char_at(&chars, i + 2, '.') {
            i += 2;
            Some(TokenKind::Ellipsis)
        } else if c == '…' {
            Some(TokenKind::Ellipsis)
        } else if let Some(dash) = DashKind::from_char(c) {
            Some(TokenKind::Dash(dash))
        } else if let Some(bracket) = Bracket::from_open(c) {
            Some(TokenKind::Open(bracket))
        } else if c == ')' || c == ']' {
            Some(TokenKind::Close(c))
        } else if let Some(punct) = Punct::from_char(c) {
            Some(TokenKind::Punct(punct))
        } else if is_quote_char(c) {
            Some(TokenKind::Quote(c))
        } else {
            None
        };

        if let Some(kind) = kind {
            out.push(Token { kind, pos });
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && is_word_char(&chars, i) {
            i += 1;
        }
        if i == start {
            i += 1;
        }
        let end = chars.get(i).map_or(segment.text.len(), |&(b, _)| b);
        out.push(Token {
            kind: TokenKind::Word(segment.text[chars[start].0..end].to_string()),
            pos,
        });
    }
}

fn is_char_at(chars: &[(usize, char)], i: usize, want: char) -> bool {
    chars.get(i).is_some_and(|&(_, c)| c == want)
}

/// Letters, digits, `'` and `№`. A hyphen only between two letters, and `’`
/// only between two alphanumerics (`don’t`); elsewhere `’` closes a quote.
fn is_word_char(chars: &[(usize, char)], i: usize) -> bool {
    let c = chars[i].1;
    if c.is_alphanumeric() || matches!(c, '\'' | '№') {
        return true;
    }
    if !matches!(c, '-' | '’') || i == 0 || i + 1 >= chars.len() {
        return false;
    }
    let (before, after) = (chars[i - 1].1, chars[i + 1].1);
    match c {
        '-' => before.is_alphabetic() && after.is_alphabetic(),
        _ => before.is_alphanumeric() && after.is_alphanumeric(),
    }
}
