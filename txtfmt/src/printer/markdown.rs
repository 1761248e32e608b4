use super::{clamp_level, render_inlines};
use crate::document::{Block, Document, Inline};

pub(super) fn render(doc: &Document) -> String {
    let text = |content: &[Inline]| render_inlines(content, &doc.style);
    let parts: Vec<String> = doc
        .blocks
        .iter()
        .map(|block| match block {
            Block::Title(content) => format!("# {}", text(content)),
            Block::Paragraph(content) => text(content),
            Block::Heading { level, content } => {
                let hashes = "#".repeat(usize::from(clamp_level(*level)));
                format!("{hashes} {}", text(content))
            }
            Block::Contents { title, entries } => {
                let mut lines = vec![format!("## {}", text(title))];
                for entry in entries {
                    let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
                    lines.push(format!("{indent}- {}", text(&entry.content)));
                }
                lines.join("\n")
            }
            Block::MetaLine { key, value } => {
                let value = text(value);
                if value.is_empty() {
                    format!("- **{key}:**")
                } else {
                    format!("- **{key}:** {value}")
                }
            }
            // One paragraph per turn; no blockquote markers.
            Block::Dialogue(turns) => turns
                .iter()
                .map(|t| text(&t.content))
                .collect::<Vec<_>>()
                .join("\n\n"),
            Block::SceneBreak { .. } => "---".to_string(),
        })
        .collect();
    parts.join("\n\n")
}
