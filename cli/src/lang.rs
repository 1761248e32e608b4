use txtfmt::Lang;
use whatlang::{Detector, Lang as Detected};

use crate::error::CliError;

/// Resolve a `--lang` value. `auto` (or nothing) detects the language from
/// the text; anything else must name a language exactly.
pub fn resolve(raw: &str, text: &str) -> Result<Lang, CliError> {
    match raw.trim().to_lowercase().as_str() {
        "" | "auto" => Ok(detect(text)),
        _ => raw
            .parse()
            .map_err(|_| CliError::UnsupportedLang(raw.to_string())),
    }
}

/// Detect the language among English, Russian and Ukrainian. Text with no
/// usable signal is English.
pub fn detect(text: &str) -> Lang {
    let detector = Detector::with_allowlist(vec![Detected::Eng, Detected::Rus, Detected::Ukr]);
    match detector.detect_lang(text) {
        Some(Detected::Rus) => Lang::Ru,
        Some(Detected::Ukr) => Lang::Ua,
        _ => Lang::En,
    }
}
