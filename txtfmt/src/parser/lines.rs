//! Line preparation: invisible-rune stripping and scene-break tail splitting.

use std::sync::LazyLock;

use regex::Regex;

use super::structural::{is_scene_break, is_scene_break_char, is_x_like};

const DECORATION_OPEN: char = '\u{14}';
const DECORATION_CLOSE: char = '\u{15}';

/// A logical input line after cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceLine {
    pub text: String,
    /// 1-based physical line number.
    pub line: usize,
    /// Byte offset of `text` in the normalized input.
    pub offset: usize,
    /// The raw line was wrapped in U+0014 / U+0015 markers.
    pub decorated: bool,
}

/// Collapse `\r\n` pairs to `\n`.
pub fn normalize_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n")
}

/// Split normalized input into cleaned logical lines.
pub(crate) fn prepare_lines(source: &str) -> Vec<SourceLine> {
    let mut out = Vec::new();
    let mut line_start = 0;

    for (idx, raw) in source.split('\n').enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        let decorated =
            trimmed.starts_with(DECORATION_OPEN) || trimmed.ends_with(DECORATION_CLOSE);
        let cleaned = strip_invisible(raw);

        match split_trailing_scene_break(&cleaned) {
            Some((lead, tail, tail_at)) => {
                out.push(SourceLine {
                    text: lead,
                    line,
                    offset: line_start,
                    decorated,
                });
                out.push(SourceLine {
                    text: tail,
                    line,
                    offset: line_start + tail_at,
                    decorated: false,
                });
            }
            None => out.push(SourceLine {
                text: cleaned,
                line,
                offset: line_start,
                decorated,
            }),
        }

        line_start += raw.len() + 1;
    }

    out
}

/// Control (Cc) and format (Cf) characters, minus whitespace.
static INVISIBLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{Cc}\p{Cf}&&\S]").expect("invisible rune regex"));

pub fn is_invisible(c: char) -> bool {
    INVISIBLE_RE.is_match(c.encode_utf8(&mut [0; 4]))
}

pub(crate) fn strip_invisible(s: &str) -> String {
    INVISIBLE_RE.replace_all(s, "").into_owned()
}

/// Split `text -----` into (`text`, `-----`, byte offset of the tail).
///
/// The tail is everything after the last letter or digit, provided it is a
/// scene break of at least six visible glyphs. An x-like letter glued to a
/// preceding letter belongs to the word, not the tail.
fn split_trailing_scene_break(line: &str) -> Option<(String, String, usize)> {
    let chars: Vec<(usize, char)> = line.trim_end().char_indices().collect();
    if chars.is_empty() {
        return None;
    }

    let mut i = chars.len();
    while i > 0 {
        let c = chars[i - 1].1;
        if !(c.is_whitespace() || is_scene_break_char(c)) {
            break;
        }
        if is_x_like(c) && i >= 2 && chars[i - 2].1.is_alphabetic() {
            break;
        }
        i -= 1;
    }
    if i == chars.len() {
        return None;
    }

    let split_at = chars[i].0;
    let prefix = line[..split_at].trim();
    let raw_suffix = line[split_at..].trim_end();
    let suffix = raw_suffix.trim_start();
    if prefix.is_empty() || suffix.is_empty() {
        return None;
    }
    if !is_scene_break(suffix) || visible_count(suffix) < 6 {
        return None;
    }

    let tail_at = split_at + (raw_suffix.len() - suffix.len());
    Some((prefix.to_string(), suffix.to_string(), tail_at))
}

fn visible_count(s: &str) -> usize {
    s.chars().filter(|c| !c.is_whitespace()).count()
}
