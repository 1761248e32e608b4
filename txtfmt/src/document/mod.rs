mod visit;

use std::fmt;

pub use visit::{for_each_inline_list, for_each_inline_list_mut};

use crate::config::{Lang, Style};
use crate::diagnostic::Diagnostic;

/// A parsed prose document: blocks in input order plus the diagnostics
/// collected while building and rewriting them.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub lang: Lang,
    pub style: Style,
    pub blocks: Vec<Block>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Document {
    pub fn new(lang: Lang, style: Style) -> Self {
        Document {
            lang,
            style,
            blocks: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// A block-level unit recovered from the line layout.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Heading {
        level: u8,
        content: Vec<Inline>,
    },
    Title(Vec<Inline>),
    Contents {
        title: Vec<Inline>,
        entries: Vec<ContentsEntry>,
    },
    MetaLine {
        key: String,
        value: Vec<Inline>,
    },
    Dialogue(Vec<DialogueTurn>),

    // Separator
    SceneBreak {
        marker: String,
    },
}

impl Block {
    /// Stable variant name, used by tree dumps and test failure messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "Paragraph",
            Block::Heading { .. } => "Heading",
            Block::Title(_) => "TitleBlock",
            Block::Contents { .. } => "ContentsBlock",
            Block::MetaLine { .. } => "MetaLineBlock",
            Block::Dialogue(_) => "DialogueBlock",
            Block::SceneBreak { .. } => "SceneBreak",
        }
    }

    pub fn scene_break() -> Self {
        Block::SceneBreak {
            marker: "***".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentsEntry {
    pub level: u8,
    pub content: Vec<Inline>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DialogueTurn {
    pub content: Vec<Inline>,
}

/// Inline elements. Spans own their children.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Word(String),
    Space(SpaceKind),
    Punct(Punct),
    Dash(DashKind),
    Ellipsis,
    QuoteSpan {
        level: QuoteLevel,
        content: Vec<Inline>,
    },
    ParenSpan {
        bracket: Bracket,
        content: Vec<Inline>,
    },
}

impl Inline {
    pub fn word(s: impl Into<String>) -> Self {
        Inline::Word(s.into())
    }

    pub fn space() -> Self {
        Inline::Space(SpaceKind::Normal)
    }

    pub fn is_space(&self) -> bool {
        matches!(self, Inline::Space(_))
    }

    /// Words and spans start and end a run of running text.
    pub fn is_word_like(&self) -> bool {
        matches!(
            self,
            Inline::Word(_) | Inline::QuoteSpan { .. } | Inline::ParenSpan { .. }
        )
    }

    /// A non-empty word made only of decimal digits.
    pub fn is_numeric_word(&self) -> bool {
        match self {
            Inline::Word(s) => !s.is_empty() && s.chars().all(|c| c.is_numeric()),
            _ => false,
        }
    }

    pub fn as_word(&self) -> Option<&str> {
        match self {
            Inline::Word(s) => Some(s),
            _ => None,
        }
    }

    pub fn children(&self) -> Option<&[Inline]> {
        match self {
            Inline::QuoteSpan { content, .. } | Inline::ParenSpan { content, .. } => {
                Some(content)
            }
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Inline>> {
        match self {
            Inline::QuoteSpan { content, .. } | Inline::ParenSpan { content, .. } => {
                Some(content)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceKind {
    Normal,
    NonBreaking,
    Thin,
}

impl SpaceKind {
    pub fn as_char(self) -> char {
        match self {
            SpaceKind::Normal => ' ',
            SpaceKind::NonBreaking => '\u{00A0}',
            SpaceKind::Thin => '\u{2009}',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashKind {
    Hyphen,
    EnDash,
    EmDash,
}

impl DashKind {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '-' => Some(DashKind::Hyphen),
            '–' => Some(DashKind::EnDash),
            '—' => Some(DashKind::EmDash),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            DashKind::Hyphen => '-',
            DashKind::EnDash => '–',
            DashKind::EmDash => '—',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punct {
    Comma,
    Period,
    Semicolon,
    Colon,
    Exclamation,
    Question,
}

impl Punct {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ',' => Some(Punct::Comma),
            '.' => Some(Punct::Period),
            ';' => Some(Punct::Semicolon),
            ':' => Some(Punct::Colon),
            '!' => Some(Punct::Exclamation),
            '?' => Some(Punct::Question),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Punct::Comma => ',',
            Punct::Period => '.',
            Punct::Semicolon => ';',
            Punct::Colon => ':',
            Punct::Exclamation => '!',
            Punct::Question => '?',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteLevel {
    Primary,
    Secondary,
}

impl QuoteLevel {
    /// Odd nesting depths (counting from 1) are primary.
    pub fn for_depth(depth: usize) -> Self {
        if depth % 2 == 1 {
            QuoteLevel::Primary
        } else {
            QuoteLevel::Secondary
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    Round,
    Square,
}

impl Bracket {
    pub fn from_open(c: char) -> Option<Self> {
        match c {
            '(' => Some(Bracket::Round),
            '[' => Some(Bracket::Square),
            _ => None,
        }
    }

    pub fn open(self) -> char {
        match self {
            Bracket::Round => '(',
            Bracket::Square => '[',
        }
    }

    pub fn close(self) -> char {
        match self {
            Bracket::Round => ')',
            Bracket::Square => ']',
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::printer::render(self, crate::printer::Format::Plain))
    }
}
