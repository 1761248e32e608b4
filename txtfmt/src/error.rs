use thiserror::Error;

/// Rejected option values. These surface as usage errors at the CLI boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported --lang value \"{0}\" (expected en|ru|ua)")]
    UnsupportedLang(String),

    #[error("unsupported --inner-quotes value \"{0}\" (expected german|english|guillemets)")]
    UnsupportedInnerQuotes(String),

    #[error("unsupported -format value \"{0}\" (expected plain|markdown|html|xml)")]
    UnsupportedFormat(String),
}
