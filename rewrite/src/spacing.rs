use txtfmt::{DashKind, Inline};

use crate::walk;

/// Drop every space in the list and re-insert single normal spaces where
/// running text needs them.
pub fn normalize_list(list: &mut Vec<Inline>) {
    walk::each_child_list(list, normalize_list);

    for inline in std::mem::take(list) {
        if inline.is_space() {
            continue;
        }
        if list.last().is_some_and(|prev| needs_space(prev, &inline)) {
            list.push(Inline::space());
        }
        list.push(inline);
    }
}

/// Whether a space belongs between two adjacent non-space inlines.
pub fn needs_space(prev: &Inline, cur: &Inline) -> bool {
    if is_tight_right(cur) {
        return false;
    }
    if is_joining_dash(prev) || is_joining_dash(cur) {
        return false;
    }
    if is_em_dash(cur) || is_em_dash(prev) {
        return true;
    }
    match prev {
        Inline::Punct(_) | Inline::Ellipsis => cur.is_word_like(),
        _ => prev.is_word_like() && cur.is_word_like(),
    }
}

/// Sentence punctuation and ellipses attach to whatever precedes them.
fn is_tight_right(inline: &Inline) -> bool {
    matches!(inline, Inline::Punct(_) | Inline::Ellipsis)
}

fn is_joining_dash(inline: &Inline) -> bool {
    matches!(inline, Inline::Dash(DashKind::Hyphen | DashKind::EnDash))
}

fn is_em_dash(inline: &Inline) -> bool {
    matches!(inline, Inline::Dash(DashKind::EmDash))
}
