use std::io;

use thiserror::Error;
use txtfmt::ConfigError;

use crate::charset::CharsetError;

/// A failure that ends the run. Document diagnostics are never errors.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unsupported --lang value \"{0}\" (expected auto|en|ru|ua)")]
    UnsupportedLang(String),

    #[error(transparent)]
    Charset(#[from] CharsetError),

    #[error("read input: {0}")]
    Read(#[source] io::Error),

    #[error("write output: {0}")]
    Write(#[source] io::Error),

    #[error("dump ast: {0}")]
    Dump(#[from] serde_json::Error),
}

impl CliError {
    /// 2 for invalid arguments, 1 for I/O and codec failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Config(_) | CliError::UnsupportedLang(_) => 2,
            CliError::Charset(CharsetError::Unsupported(_)) => 2,
            CliError::Charset(_) | CliError::Read(_) | CliError::Write(_) | CliError::Dump(_) => 1,
        }
    }
}
