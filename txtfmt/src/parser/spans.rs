//! Span building: bracket pairing first, then quotation pairing.
//!
//! Both passes keep an explicit stack of open frames; each frame owns the
//! nodes collected since its opener until it is closed or reified.

use super::inline::{Token, TokenKind};
use crate::diagnostic::{Diagnostic, DiagnosticCode, Position};
use crate::document::{Bracket, DashKind, Inline, Punct, QuoteLevel, SpaceKind};

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    pos: Position,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Word(String),
    Space,
    Punct(Punct),
    Dash(DashKind),
    Ellipsis,
    QuoteMark(char),
    ParenSpan { bracket: Bracket, children: Vec<Node> },
    QuoteSpan { level: QuoteLevel, children: Vec<Node> },
}

impl Node {
    fn word(text: impl Into<String>, pos: Position) -> Self {
        Node {
            kind: NodeKind::Word(text.into()),
            pos,
        }
    }

    fn is_space(&self) -> bool {
        matches!(self.kind, NodeKind::Space)
    }
}

/// Fold a token stream into inlines with paired spans.
pub(crate) fn build_spans(tokens: Vec<Token>) -> (Vec<Inline>, Vec<Diagnostic>) {
    let mut diags = Vec::new();
    let nodes = build_paren_nodes(&tokens, &mut diags);
    let nodes = build_quote_nodes(nodes, &mut diags);
    (to_inlines(nodes), diags)
}

// ---------------------------------------------------------------------------
// Parentheses
// ---------------------------------------------------------------------------

struct ParenFrame {
    bracket: Bracket,
    pos: Position,
    nodes: Vec<Node>,
}

fn current<'a>(root: &'a mut Vec<Node>, stack: &'a mut [ParenFrame]) -> &'a mut Vec<Node> {
    match stack.last_mut() {
        Some(frame) => &mut frame.nodes,
        None => root,
    }
}

fn build_paren_nodes(tokens: &[Token], diags: &mut Vec<Diagnostic>) -> Vec<Node> {
    let mut root = Vec::with_capacity(tokens.len());
    let mut stack: Vec<ParenFrame> = Vec::new();

    for (idx, token) in tokens.iter().enumerate() {
        match &token.kind {
            TokenKind::Open(bracket) => stack.push(ParenFrame {
                bracket: *bracket,
                pos: token.pos,
                nodes: Vec::new(),
            }),
            TokenKind::Close(close) => {
                let close = *close;
                match stack.last().map(|frame| frame.bracket.close()) {
                    None if is_enumerator_close(tokens, idx) => {
                        let glued = idx > 0 && matches!(tokens[idx - 1].kind, TokenKind::Word(_));
                        let target = current(&mut root, &mut stack);
                        if let (true, Some(Node { kind: NodeKind::Word(text), .. })) =
                            (glued, target.last_mut())
                        {
                            text.push(close);
                        } else {
                            target.push(Node::word(close, token.pos));
                        }
                    }
                    None => {
                        diags.push(Diagnostic::at(
                            DiagnosticCode::ParenMismatch,
                            "unexpected closing parenthesis",
                            token.pos,
                        ));
                        current(&mut root, &mut stack).push(Node::word(close, token.pos));
                    }
                    Some(expected) if expected != close => {
                        diags.push(Diagnostic::at(
                            DiagnosticCode::ParenMismatch,
                            "mismatched closing parenthesis",
                            token.pos,
                        ));
                        current(&mut root, &mut stack).push(Node::word(close, token.pos));
                    }
                    Some(_) => {
                        if let Some(frame) = stack.pop() {
                            current(&mut root, &mut stack).push(Node {
                                kind: NodeKind::ParenSpan {
                                    bracket: frame.bracket,
                                    children: frame.nodes,
                                },
                                pos: frame.pos,
                            });
                        }
                    }
                }
            }
            _ => current(&mut root, &mut stack).push(token_to_node(token)),
        }
    }

    while let Some(frame) = stack.pop() {
        diags.push(Diagnostic::at(
            DiagnosticCode::ParenUnclosed,
            "unclosed parenthesis",
            frame.pos,
        ));
        let target = current(&mut root, &mut stack);
        target.push(Node::word(frame.bracket.open(), frame.pos));
        target.extend(frame.nodes);
    }

    root
}

fn token_to_node(token: &Token) -> Node {
    let kind = match &token.kind {
        TokenKind::Word(text) => NodeKind::Word(text.clone()),
        TokenKind::Space => NodeKind::Space,
        TokenKind::Punct(p) => NodeKind::Punct(*p),
        TokenKind::Dash(d) => NodeKind::Dash(*d),
        TokenKind::Ellipsis => NodeKind::Ellipsis,
        TokenKind::Quote(c) => NodeKind::QuoteMark(*c),
        TokenKind::Open(b) => NodeKind::Word(b.open().to_string()),
        TokenKind::Close(c) => NodeKind::Word(c.to_string()),
    };
    Node {
        kind,
        pos: token.pos,
    }
}

/// A stray `)` after a list marker such as `1)` or `IV)`.
fn is_enumerator_close(tokens: &[Token], idx: usize) -> bool {
    if tokens[idx].kind != TokenKind::Close(')') {
        return false;
    }
    let prev = tokens[..idx].iter().rev().find(|t| !t.is_space());
    let Some(Token { kind: TokenKind::Word(text), .. }) = prev else {
        return false;
    };
    if !is_enumeration_word(text) {
        return false;
    }
    match tokens[idx + 1..].iter().find(|t| !t.is_space()) {
        None => true,
        Some(next) => match next.kind {
            TokenKind::Word(_) | TokenKind::Quote(_) | TokenKind::Open(_) => {
                tokens.get(idx + 1).is_some_and(Token::is_space)
            }
            _ => true,
        },
    }
}

fn is_enumeration_word(s: &str) -> bool {
    !s.is_empty()
        && (s.chars().all(char::is_numeric)
            || s.chars()
                .all(|c| matches!(c.to_ascii_uppercase(), 'I' | 'V' | 'X' | 'L' | 'C' | 'D' | 'M')))
}

// ---------------------------------------------------------------------------
// Quotations
// ---------------------------------------------------------------------------

struct QuoteFrame {
    quote: char,
    pos: Position,
    level: QuoteLevel,
    nodes: Vec<Node>,
}

fn is_explicit_open(c: char) -> bool {
    matches!(c, '«' | '„' | '‘')
}

fn is_explicit_close(c: char) -> bool {
    matches!(c, '»' | '”' | '’')
}

fn is_symmetric(c: char) -> bool {
    matches!(c, '"' | '“' | '‟')
}

/// What the nearest non-space sibling on one side looks like.
#[derive(Debug, Clone, Copy)]
struct Neighbor {
    suggests_open: bool,
    suggests_close: bool,
}

/// Local typography around a symmetric quote mark.
#[derive(Debug, Clone, Copy)]
struct QuoteContext {
    space_before: bool,
    space_after: bool,
    prev: Option<Neighbor>,
    next: Option<Neighbor>,
}

impl QuoteContext {
    fn at(nodes: &[Node], idx: usize) -> Self {
        let prev = nodes[..idx].iter().rev().find(|n| !n.is_space());
        let next = nodes[idx + 1..].iter().find(|n| !n.is_space());
        QuoteContext {
            space_before: idx > 0 && nodes[idx - 1].is_space(),
            space_after: nodes.get(idx + 1).is_some_and(Node::is_space),
            prev: prev.map(|n| Neighbor {
                suggests_open: prev_suggests_open(n),
                suggests_close: prev_suggests_close(n),
            }),
            next: next.map(|n| Neighbor {
                suggests_open: next_suggests_open(n),
                suggests_close: next_suggests_close(n),
            }),
        }
    }

    fn should_close(&self, depth: usize) -> bool {
        if depth == 0 {
            return false;
        }
        let Some(prev) = self.prev else {
            return false;
        };
        let Some(next) = self.next else {
            return true;
        };
        let (before, after) = (self.space_before, self.space_after);

        if before && !after && next.suggests_open {
            return false;
        }
        if !before && after {
            return true;
        }
        if prev.suggests_close {
            return !(before && next.suggests_open);
        }
        next.suggests_close
    }

    fn should_open(&self, depth: usize) -> bool {
        if !self.next.is_some_and(|n| n.suggests_open) {
            return false;
        }
        let Some(prev) = self.prev else {
            return true;
        };
        let (before, after) = (self.space_before, self.space_after);

        if !before && after {
            return false;
        }
        if prev.suggests_open {
            return true;
        }
        if depth > 0 && before && !after {
            return true;
        }
        if prev.suggests_close && !before {
            return false;
        }
        before
    }
}

fn build_quote_nodes(nodes: Vec<Node>, diags: &mut Vec<Diagnostic>) -> Vec<Node> {
    let prepared: Vec<Node> = nodes
        .into_iter()
        .map(|mut node| {
            if let NodeKind::ParenSpan { children, .. } = &mut node.kind {
                *children = build_quote_nodes(std::mem::take(children), diags);
            }
            node
        })
        .collect();

    let contexts: Vec<Option<QuoteContext>> = (0..prepared.len())
        .map(|i| match prepared[i].kind {
            NodeKind::QuoteMark(c) if is_symmetric(c) => Some(QuoteContext::at(&prepared, i)),
            _ => None,
        })
        .collect();

    let mut root = Vec::with_capacity(prepared.len());
    let mut stack: Vec<QuoteFrame> = Vec::new();

    for (node, context) in prepared.into_iter().zip(contexts) {
        let c = match node.kind {
            NodeKind::QuoteMark(c) => c,
            _ => {
                push_quoted(&mut root, &mut stack, node);
                continue;
            }
        };

        if is_explicit_open(c) {
            open_quote(&mut stack, c, node.pos);
        } else if is_explicit_close(c) {
            if stack.is_empty() {
                diags.push(Diagnostic::at(
                    DiagnosticCode::QuoteMismatch,
                    "unexpected closing quote",
                    node.pos,
                ));
                push_quoted(&mut root, &mut stack, Node::word(c, node.pos));
            } else {
                close_quote(&mut root, &mut stack);
            }
        } else if let Some(context) = context {
            if context.should_close(stack.len()) {
                close_quote(&mut root, &mut stack);
            } else if context.should_open(stack.len()) {
                open_quote(&mut stack, c, node.pos);
            } else {
                push_quoted(&mut root, &mut stack, Node::word(c, node.pos));
            }
        } else {
            push_quoted(&mut root, &mut stack, Node::word(c, node.pos));
        }
    }

    while let Some(frame) = stack.pop() {
        if !is_symmetric(frame.quote) {
            diags.push(Diagnostic::at(
                DiagnosticCode::QuoteUnclosed,
                "unclosed quote",
                frame.pos,
            ));
        }
        let target = match stack.last_mut() {
            Some(parent) => &mut parent.nodes,
            None => &mut root,
        };
        target.push(Node::word(frame.quote, frame.pos));
        target.extend(frame.nodes);
    }

    root
}

fn push_quoted(root: &mut Vec<Node>, stack: &mut [QuoteFrame], node: Node) {
    match stack.last_mut() {
        Some(frame) => frame.nodes.push(node),
        None => root.push(node),
    }
}

fn open_quote(stack: &mut Vec<QuoteFrame>, quote: char, pos: Position) {
    let level = QuoteLevel::for_depth(stack.len() + 1);
    stack.push(QuoteFrame {
        quote,
        pos,
        level,
        nodes: Vec::new(),
    });
}

fn close_quote(root: &mut Vec<Node>, stack: &mut Vec<QuoteFrame>) {
    if let Some(frame) = stack.pop() {
        let span = Node {
            kind: NodeKind::QuoteSpan {
                level: frame.level,
                children: frame.nodes,
            },
            pos: frame.pos,
        };
        push_quoted(root, stack, span);
    }
}

fn prev_suggests_close(node: &Node) -> bool {
    match &node.kind {
        NodeKind::ParenSpan { .. } | NodeKind::QuoteSpan { .. } | NodeKind::Ellipsis => true,
        NodeKind::Punct(_) => true,
        NodeKind::Word(text) => text
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || matches!(c, ')' | ']' | '»' | '”' | '’')),
        _ => false,
    }
}

fn prev_suggests_open(node: &Node) -> bool {
    match &node.kind {
        NodeKind::Dash(_) => true,
        NodeKind::Punct(p) => matches!(p, Punct::Colon | Punct::Semicolon | Punct::Comma),
        NodeKind::Word(text) => text
            .chars()
            .next_back()
            .is_some_and(|c| matches!(c, ':' | ';' | ',' | '(' | '[' | '-' | '—')),
        _ => false,
    }
}

fn next_suggests_close(node: &Node) -> bool {
    match &node.kind {
        NodeKind::Punct(_) | NodeKind::Ellipsis => true,
        NodeKind::Word(text) => text.chars().next().is_some_and(|c| {
            matches!(c, ')' | ']' | '»' | '”' | '’' | ',' | '.' | ';' | ':' | '!' | '?')
        }),
        _ => false,
    }
}

fn next_suggests_open(node: &Node) -> bool {
    match &node.kind {
        NodeKind::ParenSpan { .. } | NodeKind::QuoteSpan { .. } => true,
        NodeKind::Word(text) => text.chars().next().is_some_and(char::is_alphanumeric),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

fn to_inlines(nodes: Vec<Node>) -> Vec<Inline> {
    nodes
        .into_iter()
        .filter_map(|node| match node.kind {
            NodeKind::Word(text) if text.is_empty() => None,
            NodeKind::Word(text) => Some(Inline::Word(text)),
            NodeKind::Space => Some(Inline::Space(SpaceKind::Normal)),
            NodeKind::Punct(p) => Some(Inline::Punct(p)),
            NodeKind::Dash(d) => Some(Inline::Dash(d)),
            NodeKind::Ellipsis => Some(Inline::Ellipsis),
            NodeKind::QuoteMark(c) => Some(Inline::Word(c.to_string())),
            NodeKind::ParenSpan { bracket, children } => Some(Inline::ParenSpan {
                bracket,
                content: to_inlines(children),
            }),
            NodeKind::QuoteSpan { level, children } => Some(Inline::QuoteSpan {
                level,
                content: to_inlines(children),
            }),
        })
        .collect()
}
