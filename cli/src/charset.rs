//! Byte-level text codecs for the input and output streams.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use encoding_rs::{
    Encoding, IBM866, ISO_8859_5, KOI8_R, KOI8_U, UTF_8, WINDOWS_1251, X_MAC_CYRILLIC,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CharsetError {
    #[error("unsupported charset \"{0}\" (examples: utf-8, cp1251, koi8-r, koi8-u, cp866, iso-8859-5, mac-cyrillic)")]
    Unsupported(String),

    #[error("decode {0}: invalid input")]
    Decode(&'static str),

    #[error("encode {0}: text has characters the charset cannot represent")]
    Encode(&'static str),
}

/// A named encoding backed by `encoding_rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset {
    name: &'static str,
    encoding: &'static Encoding,
}

static REGISTRY: LazyLock<HashMap<&'static str, Charset>> = LazyLock::new(|| {
    let table: [(&'static str, &'static Encoding, &[&'static str]); 7] = [
        ("utf-8", UTF_8, &["", "utf", "utf8"]),
        ("windows-1251", WINDOWS_1251, &["windows1251", "cp1251", "win1251", "1251"]),
        ("koi8-r", KOI8_R, &["koi8r"]),
        ("koi8-u", KOI8_U, &["koi8u"]),
        ("ibm866", IBM866, &["ibm866", "cp866", "866", "dos866", "ibmcodepage866"]),
        ("iso-8859-5", ISO_8859_5, &["iso88595", "latincyrillic"]),
        (
            "mac-cyrillic",
            X_MAC_CYRILLIC,
            &["maccyrillic", "xmaccyrillic", "msmaccyrillic", "cp10007", "macintoshcyrillic"],
        ),
    ];

    let mut registry = HashMap::new();
    for (name, encoding, keys) in table {
        for &key in keys {
            registry.insert(key, Charset { name, encoding });
        }
    }
    registry
});

/// Lower-case letters and digits only, so `KOI8-R`, `koi8_r` and `koi8r`
/// share a key.
fn normalize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

impl Charset {
    pub fn name(self) -> &'static str {
        self.name
    }

    /// Decode `bytes`, rejecting malformed sequences instead of substituting
    /// replacement characters.
    pub fn decode(self, bytes: &[u8]) -> Result<String, CharsetError> {
        self.encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
            .ok_or(CharsetError::Decode(self.name))
    }

    /// Encode `text`, failing on characters the target cannot represent.
    pub fn encode(self, text: &str) -> Result<Vec<u8>, CharsetError> {
        let (bytes, _, unmappable) = self.encoding.encode(text);
        if unmappable {
            return Err(CharsetError::Encode(self.name));
        }
        Ok(bytes.into_owned())
    }
}

impl Default for Charset {
    fn default() -> Self {
        Charset {
            name: "utf-8",
            encoding: UTF_8,
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl FromStr for Charset {
    type Err = CharsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(charset) = REGISTRY.get(normalize_name(s).as_str()) {
            return Ok(*charset);
        }
        // Any other single-byte WHATWG label, e.g. windows-1252.
        match Encoding::for_label(s.trim().as_bytes()) {
            Some(encoding) if encoding.is_single_byte() => Ok(Charset {
                name: encoding.name(),
                encoding,
            }),
            _ => Err(CharsetError::Unsupported(s.to_string())),
        }
    }
}
