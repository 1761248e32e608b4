use super::{Block, Document, Inline};

/// Call `f` on every top-level inline list of the document, in block order.
/// Span children are left to the callback.
pub fn for_each_inline_list_mut<F>(doc: &mut Document, mut f: F)
where
    F: FnMut(&mut Vec<Inline>),
{
    for block in &mut doc.blocks {
        match block {
            Block::Paragraph(content) | Block::Title(content) => f(content),
            Block::Heading { content, .. } => f(content),
            Block::Contents { title, entries } => {
                f(title);
                for entry in entries {
                    f(&mut entry.content);
                }
            }
            Block::MetaLine { value, .. } => f(value),
            Block::Dialogue(turns) => {
                for turn in turns {
                    f(&mut turn.content);
                }
            }
            Block::SceneBreak { .. } => {}
        }
    }
}

/// Read-only counterpart of [`for_each_inline_list_mut`].
pub fn for_each_inline_list<'a, F>(doc: &'a Document, mut f: F)
where
    F: FnMut(&'a [Inline]),
{
    for block in &doc.blocks {
        match block {
            Block::Paragraph(content) | Block::Title(content) => f(content),
            Block::Heading { content, .. } => f(content),
            Block::Contents { title, entries } => {
                f(title);
                for entry in entries {
                    f(&entry.content);
                }
            }
            Block::MetaLine { value, .. } => f(value),
            Block::Dialogue(turns) => {
                for turn in turns {
                    f(&turn.content);
                }
            }
            Block::SceneBreak { .. } => {}
        }
    }
}
