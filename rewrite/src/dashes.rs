use txtfmt::{DashKind, Inline};

use crate::walk;

/// Decide the kind of every dash from its surroundings.
///
/// A dash glued on both sides to word-like neighbors joins them: an en dash
/// between two numbers, a hyphen otherwise. Every other dash is an em dash.
pub fn classify_list(list: &mut Vec<Inline>) {
    walk::each_child_list(list, classify_list);

    for idx in 0..list.len() {
        if matches!(list[idx], Inline::Dash(_)) {
            list[idx] = Inline::Dash(classify_at(list, idx));
        }
    }
}

fn classify_at(list: &[Inline], idx: usize) -> DashKind {
    let space_left = idx > 0 && list[idx - 1].is_space();
    let space_right = list.get(idx + 1).is_some_and(Inline::is_space);
    let left = walk::prev_non_space(list, idx).map(|i| &list[i]);
    let right = walk::next_non_space(list, idx).map(|i| &list[i]);

    match (left, right) {
        (Some(left), Some(right))
            if !space_left && !space_right && left.is_word_like() && right.is_word_like() =>
        {
            if left.is_numeric_word() && right.is_numeric_word() {
                DashKind::EnDash
            } else {
                DashKind::Hyphen
            }
        }
        _ => DashKind::EmDash,
    }
}
