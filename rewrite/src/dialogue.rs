use txtfmt::{Block, DashKind, Diagnostic, DiagnosticCode, Document, Inline};

/// Give every dialogue turn the canonical `— ` lead. Returns the number of
/// turns that turned out empty; each one is also recorded as a diagnostic.
pub fn normalize_document(doc: &mut Document) -> usize {
    let mut empty = 0;
    for block in doc.blocks.iter_mut() {
        let Block::Dialogue(turns) = block else {
            continue;
        };
        for turn in turns {
            if !normalize_turn(&mut turn.content) {
                empty += 1;
                doc.diagnostics.push(Diagnostic::new(
                    DiagnosticCode::DialogueEmpty,
                    "empty dialogue turn after dash marker",
                    None,
                ));
            }
        }
    }
    empty
}

/// Rewrite one turn to `[EmDash, Space, rest..]`, or `[EmDash]` when nothing
/// follows the marker. Returns false for the empty case.
pub fn normalize_turn(content: &mut Vec<Inline>) -> bool {
    let mut items = std::mem::take(content)
        .into_iter()
        .skip_while(Inline::is_space)
        .peekable();
    // The marker dash is replaced by the canonical one below.
    items.next_if(|inline| matches!(inline, Inline::Dash(_)));
    let rest: Vec<Inline> = items.skip_while(Inline::is_space).collect();

    content.push(Inline::Dash(DashKind::EmDash));
    if rest.is_empty() {
        return false;
    }
    content.push(Inline::space());
    content.extend(rest);
    true
}
