use txtfmt::{Inline, QuoteLevel};

/// Reassign quote levels from nesting depth. Parentheses do not count as a
/// level; `depth` is the number of quote spans enclosing `list`.
pub fn assign_levels(list: &mut [Inline], depth: usize) {
    for inline in list {
        match inline {
            Inline::QuoteSpan { level, content } => {
                *level = QuoteLevel::for_depth(depth + 1);
                assign_levels(content, depth + 1);
            }
            Inline::ParenSpan { content, .. } => assign_levels(content, depth),
            _ => {}
        }
    }
}
