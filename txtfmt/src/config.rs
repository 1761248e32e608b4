use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Natural language whose typographic conventions are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    En,
    Ru,
    Ua,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ru => "ru",
            Lang::Ua => "ua",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Lang::En),
            "ru" => Ok(Lang::Ru),
            "ua" => Ok(Lang::Ua),
            _ => Err(ConfigError::UnsupportedLang(s.to_string())),
        }
    }
}

/// Named inner quotation style, overriding the language default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InnerQuotes {
    German,
    English,
    Guillemets,
}

impl InnerQuotes {
    pub fn pair(self) -> QuotePair {
        match self {
            InnerQuotes::German => QuotePair::new('„', '“'),
            InnerQuotes::English => QuotePair::new('‘', '’'),
            InnerQuotes::Guillemets => QuotePair::new('«', '»'),
        }
    }
}

impl FromStr for InnerQuotes {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "german" => Ok(InnerQuotes::German),
            "english" => Ok(InnerQuotes::English),
            "guillemets" => Ok(InnerQuotes::Guillemets),
            _ => Err(ConfigError::UnsupportedInnerQuotes(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotePair {
    pub open: char,
    pub close: char,
}

impl QuotePair {
    pub const fn new(open: char, close: char) -> Self {
        QuotePair { open, close }
    }
}

/// Outer (primary) and inner (secondary) quotation pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub outer: QuotePair,
    pub inner: QuotePair,
}

impl Style {
    pub fn for_lang(lang: Lang) -> Self {
        match lang {
            Lang::En => Style {
                outer: QuotePair::new('“', '”'),
                inner: QuotePair::new('‘', '’'),
            },
            Lang::Ru | Lang::Ua => Style {
                outer: QuotePair::new('«', '»'),
                inner: QuotePair::new('„', '“'),
            },
        }
    }
}

/// Resolved normalizer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub lang: Lang,
    pub inner_quotes: InnerQuotes,
    pub use_nbsp: bool,
    pub style: Style,
}

impl Config {
    /// Build a config for `lang`. An explicit `inner` style replaces only the
    /// inner pair of the language default.
    pub fn new(lang: Lang, inner: Option<InnerQuotes>, use_nbsp: bool) -> Self {
        let mut style = Style::for_lang(lang);
        if let Some(inner) = inner {
            style.inner = inner.pair();
        }
        Config {
            lang,
            inner_quotes: inner.unwrap_or(InnerQuotes::German),
            use_nbsp,
            style,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(Lang::Ru, None, false)
    }
}
