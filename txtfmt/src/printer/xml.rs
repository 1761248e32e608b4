use quick_xml::escape::{escape, partial_escape};

use super::render_inlines;
use crate::document::{Block, Document, Inline};

pub(super) fn render(doc: &Document) -> String {
    let text = |content: &[Inline]| partial_escape(render_inlines(content, &doc.style)).into_owned();

    let mut lines = vec![format!("<document lang=\"{}\">", escape(doc.lang.code()))];
    for block in &doc.blocks {
        match block {
            Block::Title(content) => lines.push(format!("  <title>{}</title>", text(content))),
            Block::Paragraph(content) => {
                lines.push(format!("  <paragraph>{}</paragraph>", text(content)))
            }
            Block::Heading { level, content } => lines.push(format!(
                "  <heading level=\"{}\">{}</heading>",
                (*level).max(1),
                text(content)
            )),
            Block::Contents { title, entries } => {
                lines.push("  <contents>".to_string());
                lines.push(format!("    <title>{}</title>", text(title)));
                for entry in entries {
                    lines.push(format!(
                        "    <entry level=\"{}\">{}</entry>",
                        entry.level.max(1),
                        text(&entry.content)
                    ));
                }
                lines.push("  </contents>".to_string());
            }
            Block::MetaLine { key, value } => lines.push(format!(
                "  <meta key=\"{}\">{}</meta>",
                escape(key.as_str()),
                text(value)
            )),
            Block::Dialogue(turns) => {
                lines.push("  <dialogue>".to_string());
                for turn in turns {
                    lines.push(format!("    <turn>{}</turn>", text(&turn.content)));
                }
                lines.push("  </dialogue>".to_string());
            }
            Block::SceneBreak { marker } => lines.push(format!(
                "  <scene-break marker=\"{}\" />",
                escape(marker.as_str())
            )),
        }
    }
    lines.push("</document>".to_string());
    lines.join("\n")
}
