use txtfmt::parser::Parser;
use txtfmt::{Block, Config, DiagnosticCode, Document, Inline, Position, QuoteLevel};

fn parse(source: &str) -> Document {
    Parser::new(source, &Config::default()).parse()
}

fn paragraph(doc: &Document) -> &[Inline] {
    match doc.blocks.first() {
        Some(Block::Paragraph(content)) => content,
        other => panic!("expected a paragraph, got {other:?}"),
    }
}

fn codes(doc: &Document) -> Vec<DiagnosticCode> {
    doc.diagnostics.iter().map(|d| d.code).collect()
}

fn word(s: &str) -> Inline {
    Inline::word(s)
}

#[test]
fn symmetric_quotes_close_at_end() {
    let doc = parse("\"abc\"");
    assert!(doc.diagnostics.is_empty());
    assert_eq!(
        paragraph(&doc),
        &[Inline::QuoteSpan {
            level: QuoteLevel::Primary,
            content: vec![word("abc")],
        }]
    );
}

#[test]
fn symmetric_quote_before_punct_closes() {
    let doc = parse("\"abc\",");
    assert!(doc.diagnostics.is_empty());
    let content = paragraph(&doc);
    assert_eq!(content.len(), 2);
    assert!(matches!(content[0], Inline::QuoteSpan { .. }));
    assert_eq!(content[1], Inline::Punct(txtfmt::Punct::Comma));
}

#[test]
fn symmetric_quote_after_ellipsis_closes() {
    let doc = parse("\"Обнять...\"");
    assert!(doc.diagnostics.is_empty());
    let content = paragraph(&doc);
    assert_eq!(content.len(), 1);
    assert!(matches!(content[0], Inline::QuoteSpan { .. }));
}

#[test]
fn nested_symmetric_quote_after_space_opens() {
    let doc = parse("\"А что такое \"координаты\"? - подумал он.\"");
    assert!(doc.diagnostics.is_empty());
    let content = paragraph(&doc);
    assert_eq!(content.len(), 1);
    let Inline::QuoteSpan { content: outer, .. } = &content[0] else {
        panic!("expected outer quote, got {:?}", content[0]);
    };
    let nested: Vec<&Inline> = outer
        .iter()
        .filter(|i| matches!(i, Inline::QuoteSpan { .. }))
        .collect();
    assert_eq!(nested.len(), 1);
    assert!(matches!(
        nested[0],
        Inline::QuoteSpan { level: QuoteLevel::Secondary, .. }
    ));
}

#[test]
fn quote_at_line_end_closes_before_next_line() {
    let doc = parse("Он подумал: \"Обнять...\"\nПотом отвернулся.");
    assert!(doc.diagnostics.is_empty());
    let content = paragraph(&doc);
    let quote_index = content
        .iter()
        .position(|i| matches!(i, Inline::QuoteSpan { .. }))
        .expect("quote span");
    assert_eq!(content.last(), Some(&Inline::Punct(txtfmt::Punct::Period)));
    assert!(quote_index < content.len() - 1);
}

#[test]
fn enumerator_parens_are_not_mismatches() {
    let doc = parse("\"I) 5 лет назад, 2) 2 года назад, 3) год назад\"");
    assert!(!codes(&doc).contains(&DiagnosticCode::ParenMismatch));
    let Inline::QuoteSpan { content, .. } = &paragraph(&doc)[0] else {
        panic!("expected the sentence to be quoted");
    };
    assert_eq!(content[0], word("I)"));
}

#[test]
fn stray_closing_paren_is_reported_and_kept() {
    let doc = parse("Привет )");
    assert_eq!(codes(&doc), vec![DiagnosticCode::ParenMismatch]);
    assert_eq!(
        doc.diagnostics[0].position,
        Some(Position { line: 1, column: 8, offset: 13 })
    );
    assert_eq!(paragraph(&doc).last(), Some(&word(")")));
}

#[test]
fn mismatched_bracket_kind_is_reported() {
    let doc = parse("список (черновик] дальше");
    assert_eq!(
        codes(&doc),
        vec![DiagnosticCode::ParenMismatch, DiagnosticCode::ParenUnclosed]
    );
    assert_eq!(doc.diagnostics[0].message, "mismatched closing parenthesis");
}

#[test]
fn unclosed_paren_splices_children() {
    let doc = parse("текст (без конца");
    assert_eq!(codes(&doc), vec![DiagnosticCode::ParenUnclosed]);
    let content = paragraph(&doc);
    assert!(content.iter().all(|i| !matches!(i, Inline::ParenSpan { .. })));
    assert!(content.contains(&word("(")));
    assert!(content.contains(&word("конца")));
}

#[test]
fn brackets_pair_into_spans() {
    let doc = parse("список[черновик ]");
    assert!(doc.diagnostics.is_empty());
    assert!(matches!(
        paragraph(&doc)[1],
        Inline::ParenSpan { bracket: txtfmt::Bracket::Square, .. }
    ));
}

#[test]
fn stray_symmetric_quote_between_words_stays_literal() {
    let doc = parse("чуть пологи\" склон");
    assert!(doc.diagnostics.is_empty());
    assert!(paragraph(&doc).contains(&word("\"")));
}

#[test]
fn unclosed_symmetric_quote_is_silent() {
    let doc = parse("\"незакрытая цитата");
    assert!(doc.diagnostics.is_empty());
}

#[test]
fn radiogram_with_inner_name_is_silent() {
    let doc = parse(
        "Он записал: \"Радиограмма. Срочно. Командир судна \"Вектор\". Проверьте линию и подтвердите прием.",
    );
    assert!(!codes(&doc).contains(&DiagnosticCode::QuoteUnclosed));

    let doc = parse("Ответ был: \"Ждем. Поздравляем экипаж \"Вектора\" и научную группу.");
    assert!(!codes(&doc).contains(&DiagnosticCode::QuoteUnclosed));
}

#[test]
fn directional_quotes_are_reported() {
    let doc = parse("Он сказал » и ушел");
    assert_eq!(codes(&doc), vec![DiagnosticCode::QuoteMismatch]);

    let doc = parse("Он сказал «и ушел");
    assert_eq!(codes(&doc), vec![DiagnosticCode::QuoteUnclosed]);
    assert_eq!(doc.diagnostics[0].to_string(), "1:11 QUOTE_UNCLOSED unclosed quote");
}

#[test]
fn quotes_inside_parentheses_pair_locally() {
    let doc = parse("Слово («цитата») конец");
    assert!(doc.diagnostics.is_empty());
    let Inline::ParenSpan { content, .. } = &paragraph(&doc)[2] else {
        panic!("expected paren span");
    };
    assert!(matches!(content[0], Inline::QuoteSpan { .. }));
}
