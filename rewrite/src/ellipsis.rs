use txtfmt::{Inline, Punct};

use crate::walk;

/// Fold `. . .` punctuation runs and `...`/`…` inside words into
/// [`Inline::Ellipsis`].
pub fn normalize_list(list: &mut Vec<Inline>) {
    walk::each_child_list(list, normalize_list);

    for inline in std::mem::take(list) {
        match inline {
            Inline::Word(word) => list.extend(split_word(word)),
            Inline::Punct(Punct::Period) => {
                list.push(inline);
                if ends_with_three_periods(list) {
                    list.truncate(list.len() - 3);
                    list.push(Inline::Ellipsis);
                }
            }
            other => list.push(other),
        }
    }
}

fn ends_with_three_periods(list: &[Inline]) -> bool {
    list.len() >= 3
        && list[list.len() - 3..]
            .iter()
            .all(|inline| matches!(inline, Inline::Punct(Punct::Period)))
}

/// Split a word at every ellipsis it contains. Empty fragments are dropped.
fn split_word(word: String) -> Vec<Inline> {
    if !word.contains('…') && !word.contains("...") {
        return vec![Inline::Word(word)];
    }

    let mut out = Vec::new();
    let mut rest = word.as_str();
    while let Some((at, len)) = next_ellipsis(rest) {
        if at > 0 {
            out.push(Inline::word(&rest[..at]));
        }
        out.push(Inline::Ellipsis);
        rest = &rest[at + len..];
    }
    if !rest.is_empty() {
        out.push(Inline::word(rest));
    }
    out
}

/// Byte position and length of the leftmost ellipsis in `s`.
fn next_ellipsis(s: &str) -> Option<(usize, usize)> {
    let glyph = s.find('…').map(|at| (at, '…'.len_utf8()));
    let dots = s.find("...").map(|at| (at, 3));
    match (glyph, dots) {
        (Some(g), Some(d)) => Some(if g.0 < d.0 { g } else { d }),
        (g, d) => g.or(d),
    }
}
