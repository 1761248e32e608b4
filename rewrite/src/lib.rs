//! Typographic rewrite passes over a parsed document.
//!
//! The passes run in a fixed order. Ellipses and dashes are settled before
//! spacing is rebuilt, dialogue turns are normalized after spacing because they
//! insert their own canonical space, and non-breaking spaces come last so the
//! earlier passes stay language-agnostic.

pub mod dashes;
pub mod dialogue;
pub mod ellipsis;
pub mod nbsp;
pub mod quotes;
pub mod spacing;
mod walk;

use log::{debug, trace};
use txtfmt::document::for_each_inline_list_mut;
use txtfmt::parser::Parser;
use txtfmt::{Config, Document};

/// Run every rewrite pass over `doc`, in order.
pub fn apply(doc: &mut Document, config: &Config) {
    for_each_inline_list_mut(doc, ellipsis::normalize_list);
    trace!("ellipsis pass done");
    for_each_inline_list_mut(doc, dashes::classify_list);
    trace!("dash pass done");
    for_each_inline_list_mut(doc, |list| quotes::assign_levels(list, 0));
    trace!("quote level pass done");
    for_each_inline_list_mut(doc, spacing::normalize_list);
    trace!("spacing pass done");

    let empty_turns = dialogue::normalize_document(doc);
    trace!("dialogue pass done, {empty_turns} empty turns");

    if config.use_nbsp {
        let lang = config.lang;
        for_each_inline_list_mut(doc, |list| nbsp::apply_list(list, lang));
        trace!("nbsp pass done for {lang}");
    }
}

/// Parse `source` and apply every pass.
pub fn normalize(source: &str, config: &Config) -> Document {
    let mut doc = Parser::new(source, config).parse();
    apply(&mut doc, config);
    debug!(
        "normalized {} blocks, {} diagnostics",
        doc.blocks.len(),
        doc.diagnostics.len()
    );
    doc
}
