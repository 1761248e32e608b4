//! HTML output, produced as a pulldown-cmark event stream so text is escaped
//! by the same writer that renders Markdown elsewhere.

use pulldown_cmark::{CowStr, Event, HeadingLevel, Tag, TagEnd, html};

use super::{clamp_level, render_inlines};
use crate::config::Style;
use crate::document::{Block, ContentsEntry, Document, Inline};

pub(super) fn render(doc: &Document) -> String {
    let mut events: Vec<Event<'static>> = vec![raw("<article>\n")];
    for block in &doc.blocks {
        block_events(block, &doc.style, &mut events);
    }
    events.push(raw("</article>"));

    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    out
}

fn raw(html: &str) -> Event<'static> {
    Event::Html(CowStr::from(html.to_string()))
}

fn text(content: &[Inline], style: &Style) -> Event<'static> {
    Event::Text(CowStr::from(render_inlines(content, style)))
}

fn heading_level(level: u8) -> HeadingLevel {
    match clamp_level(level) {
        1 => HeadingLevel::H1,
        2 => HeadingLevel::H2,
        3 => HeadingLevel::H3,
        4 => HeadingLevel::H4,
        5 => HeadingLevel::H5,
        _ => HeadingLevel::H6,
    }
}

fn heading(level: HeadingLevel, body: Event<'static>, events: &mut Vec<Event<'static>>) {
    events.push(Event::Start(Tag::Heading {
        level,
        id: None,
        classes: Vec::new(),
        attrs: Vec::new(),
    }));
    events.push(body);
    events.push(Event::End(TagEnd::Heading(level)));
}

fn paragraph(body: Event<'static>, events: &mut Vec<Event<'static>>) {
    events.push(Event::Start(Tag::Paragraph));
    events.push(body);
    events.push(Event::End(TagEnd::Paragraph));
}

fn block_events(block: &Block, style: &Style, events: &mut Vec<Event<'static>>) {
    match block {
        Block::Title(content) => heading(HeadingLevel::H1, text(content, style), events),
        Block::Paragraph(content) => paragraph(text(content, style), events),
        Block::Heading { level, content } => {
            heading(heading_level(*level), text(content, style), events)
        }
        Block::Contents { title, entries } => {
            events.push(raw("<section class=\"contents\">\n"));
            heading(HeadingLevel::H2, text(title, style), events);
            if !entries.is_empty() {
                contents_list(&contents_tree(entries), style, events);
            }
            events.push(raw("</section>\n"));
        }
        Block::MetaLine { key, value } => {
            events.push(raw("<p class=\"meta\"><span class=\"key\">"));
            events.push(Event::Text(CowStr::from(format!("{key}:"))));
            events.push(raw("</span> "));
            events.push(text(value, style));
            events.push(raw("</p>\n"));
        }
        Block::Dialogue(turns) => {
            events.push(raw("<div class=\"dialogue\">\n"));
            for turn in turns {
                paragraph(text(&turn.content, style), events);
            }
            events.push(raw("</div>\n"));
        }
        Block::SceneBreak { .. } => events.push(Event::Rule),
    }
}

/// A contents entry with the entries nested under it.
struct ContentsNode<'a> {
    entry: &'a ContentsEntry,
    children: Vec<ContentsNode<'a>>,
}

/// Nest entries by level, relative to the shallowest level present.
fn contents_tree(entries: &[ContentsEntry]) -> Vec<ContentsNode<'_>> {
    let min_level = entries.iter().map(|e| e.level.max(1)).min().unwrap_or(1);

    let mut roots: Vec<ContentsNode> = Vec::new();
    // Open nodes from the outermost list inwards.
    let mut path: Vec<ContentsNode> = Vec::new();

    for entry in entries {
        let depth = usize::from(entry.level.max(1) - min_level) + 1;
        while path.len() >= depth {
            close_node(&mut path, &mut roots);
        }
        path.push(ContentsNode {
            entry,
            children: Vec::new(),
        });
    }
    while !path.is_empty() {
        close_node(&mut path, &mut roots);
    }
    roots
}

fn close_node<'a>(path: &mut Vec<ContentsNode<'a>>, roots: &mut Vec<ContentsNode<'a>>) {
    if let Some(node) = path.pop() {
        match path.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}

fn contents_list(nodes: &[ContentsNode], style: &Style, events: &mut Vec<Event<'static>>) {
    events.push(Event::Start(Tag::List(None)));
    for node in nodes {
        events.push(Event::Start(Tag::Item));
        events.push(text(&node.entry.content, style));
        if !node.children.is_empty() {
            contents_list(&node.children, style, events);
        }
        events.push(Event::End(TagEnd::Item));
    }
    events.push(Event::End(TagEnd::List(false)));
}
