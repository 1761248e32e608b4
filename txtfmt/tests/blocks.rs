use txtfmt::parser::Parser;
use txtfmt::{Block, Config, Document, Lang};

fn parse(source: &str) -> Document {
    Parser::new(source, &Config::default()).parse()
}

fn parse_lang(source: &str, lang: Lang) -> Document {
    Parser::new(source, &Config::new(lang, None, false)).parse()
}

fn kinds(doc: &Document) -> Vec<&'static str> {
    doc.blocks.iter().map(Block::kind).collect()
}

fn turn_count(block: &Block) -> usize {
    match block {
        Block::Dialogue(turns) => turns.len(),
        other => panic!("expected DialogueBlock, got {}", other.kind()),
    }
}

fn entry_count(block: &Block) -> usize {
    match block {
        Block::Contents { entries, .. } => entries.len(),
        other => panic!("expected ContentsBlock, got {}", other.kind()),
    }
}

#[test]
fn indented_lines_start_new_paragraphs() {
    let doc = parse(concat!(
        "     Первый сектор молчал, но индикатор мигал.\n",
        "на столе лежал чертеж и карандаш.\n",
        "     Второй сектор ответил позже.\n",
        "оператор сделал заметку."
    ));
    assert_eq!(kinds(&doc), vec!["Paragraph", "Paragraph"]);
}

#[test]
fn mixed_layout() {
    let doc = parse(concat!(
        "# Журнал  ночной смены\n",
        "\n",
        "     В мастерской  пахло озоном, и на табло мигало \"режим 3\"...\n",
        "техник сверял 1990-2000 на шкале, а рядом лежал список[черновик ].\n",
        "     Дежурный отметил: \"пуск - через минуту\", но таймер   молчал.\n",
        "\n",
        "-  Кто-то видел ключ?\n",
        "—  Нет , но я слышал: \"щелк\" - и тишина...\n",
        "- Тогда  проверим  второй  шкаф.\n",
        "\n",
        "* * *\n",
        "\n",
        "     После проверки команда  вернулась в зал, и кто-то сказал :\n",
        "\"Все  в порядке !\""
    ));
    assert_eq!(
        kinds(&doc),
        vec!["Heading", "Paragraph", "Paragraph", "DialogueBlock", "SceneBreak", "Paragraph"]
    );
    assert_eq!(turn_count(&doc.blocks[3]), 3);
}

#[test]
fn book_layout_without_blank_lines() {
    let doc = parse(concat!(
        "\u{1}СОДЕРЖАНИЕ\u{2}\n",
        "Глава I Пролог\n",
        "Глава II Развязка\n",
        "\n",
        "Первая строка абзаца -----------------------------------------\n",
        "Вторая строка абзаца.\n",
        "x x x\n",
        "После разделителя."
    ));
    assert_eq!(
        kinds(&doc),
        vec!["ContentsBlock", "Paragraph", "SceneBreak", "Paragraph", "SceneBreak", "Paragraph"]
    );
    assert_eq!(entry_count(&doc.blocks[0]), 2);
}

#[test]
fn standalone_meta_lines_with_separator_tail() {
    let doc = parse(concat!(
        "OCR: Василий Новиков\n",
        "Spellcheck: Евгений Морозов -----------------------------------------"
    ));
    assert_eq!(kinds(&doc), vec!["MetaLineBlock", "MetaLineBlock", "SceneBreak"]);
    let keys: Vec<&str> = doc
        .blocks
        .iter()
        .filter_map(|b| match b {
            Block::MetaLine { key, .. } => Some(key.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(keys, vec!["OCR", "Spellcheck"]);
}

#[test]
fn decorated_title_before_meta_and_headings() {
    let doc = parse(concat!(
        "\u{14}Ирина Ветрова. Сигнал с ледяной орбиты\u{15}\n",
        "---------------------------------------------------------------\n",
        "OCR: Алексей Протасов\n",
        "Spellcheck: Марина Логинова ---------------------------------------------------------------\n",
        "\n",
        "\u{14} * ЧАСТЬ ПЕРВАЯ * \u{15}\n"
    ));
    assert_eq!(
        kinds(&doc),
        vec!["TitleBlock", "SceneBreak", "MetaLineBlock", "MetaLineBlock", "SceneBreak", "Heading"]
    );
    assert!(matches!(doc.blocks[5], Block::Heading { level: 1, .. }));
}

#[test]
fn title_followed_by_scene_break_then_body() {
    let doc = parse(
        "Ирина Ветрова. Сигнал с ледяной орбиты\n\
         ---------------------------------------------------------------\n\
         \n\
         Первый абзац основного текста.",
    );
    assert_eq!(kinds(&doc), vec!["TitleBlock", "SceneBreak", "Paragraph"]);
}

#[test]
fn two_line_title_in_one_candidate() {
    let doc = parse("АВТОР\nНАЗВАНИЕ КНИГИ\n\nOCR: Test\n# ЧАСТЬ ПЕРВАЯ");
    assert_eq!(kinds(&doc), vec!["TitleBlock", "MetaLineBlock", "Heading"]);
    assert_eq!(doc.to_string(), "АВТОР НАЗВАНИЕ КНИГИ\n\nOCR: Test\n\n# ЧАСТЬ ПЕРВАЯ");
}

#[test]
fn two_line_title_in_separate_candidates() {
    let doc = parse("НАЗВАНИЕ КНИГИ\n\nАВТОР\n\nSpellcheck: Test\n### Пролог");
    assert_eq!(kinds(&doc), vec!["TitleBlock", "MetaLineBlock", "Heading"]);
}

#[test]
fn plain_leading_line_without_structure_stays_paragraph() {
    let doc = parse("Короткая строка\n\nЕще один абзац.");
    assert_eq!(kinds(&doc), vec!["Paragraph", "Paragraph"]);
}

#[test]
fn long_indented_lines_split_into_paragraphs() {
    let long1 = format!(" {}сердце сжималось.", "Павлик думал о команде и о возвращении домой, ".repeat(4));
    let long2 = format!(" {}и молчал.", "Он шел по коридору и видел усталые лица товарищей, ".repeat(4));
    let long3 = format!(
        " {}не находя слов.",
        "После смены он долго смотрел в иллюминатор на темную воду, ".repeat(4)
    );
    let input = [
        long1.as_str(),
        long2.as_str(),
        " - Марат, ты слышишь меня?",
        " - Слышу, Павлик.",
        long3.as_str(),
    ]
    .join("\n");

    let doc = parse(&input);
    assert_eq!(kinds(&doc), vec!["Paragraph", "Paragraph", "DialogueBlock", "Paragraph"]);
    assert_eq!(turn_count(&doc.blocks[2]), 2);
}

#[test]
fn long_chapter_chunk_keeps_continuations() {
    let first = format!(
        " {}дежурный молчал.",
        "Смена тянулась медленно, приборы мерцали в полутьме, ".repeat(4)
    );
    let second = format!(
        " {}никто не спорил.",
        "Под утро команда слышала только шаги в коридоре и звук насосов, ".repeat(4)
    );
    let third = format!(
        " {}работа продолжалась.",
        "Когда тревога утихла, механик снова проверил схему и кивнул, ".repeat(4)
    );
    let input = [
        first.as_str(),
        "а в журнале копились короткие заметки о режиме и давлении.",
        second.as_str(),
        "и каждый думал о том, как завершить рейс без потерь.",
        "— Доклад готов?",
        "— Готов, передаю в центральный пост.",
        third.as_str(),
        "но в голосах оставалась усталость после длинного дня.",
    ]
    .join("\n");

    let doc = parse(&input);
    assert_eq!(kinds(&doc), vec!["Paragraph", "Paragraph", "DialogueBlock", "Paragraph"]);
    assert_eq!(turn_count(&doc.blocks[2]), 2);
}

#[test]
fn dialogue_split_by_narration() {
    let doc = parse(concat!(
        "— Первая реплика.\n",
        "— Вторая реплика.\n",
        "Связующий авторский абзац между репликами.\n",
        "— Третья реплика.\n",
        "— Четвертая реплика."
    ));
    assert_eq!(kinds(&doc), vec!["DialogueBlock", "Paragraph", "DialogueBlock"]);
    assert_eq!(turn_count(&doc.blocks[0]), 2);
    assert_eq!(turn_count(&doc.blocks[2]), 2);
}

#[test]
fn structural_lines_with_control_artifacts() {
    let doc = parse(concat!(
        "\u{3}СОДЕРЖАНИЕ\u{7f}\n",
        "\u{3}Глава I. Вводная часть\u{7f}\n",
        "\u{3}x x x\u{7f}\n",
        "Текст после разделителя."
    ));
    assert_eq!(kinds(&doc), vec!["ContentsBlock", "SceneBreak", "Paragraph"]);
    assert_eq!(entry_count(&doc.blocks[0]), 1);
}

#[test]
fn english_book_layout() {
    let input = [
        "CONTENTS",
        "Chapter I. Interrupted Conversation",
        "",
        "    Before dawn there was almost no time left,",
        "and only the pumps could be heard in the corridor.",
        "",
        "- Are we ready?",
        "- Yes, almost.",
        "",
        "x x x",
        "",
        "After the break the team returned to work.",
    ]
    .join("\n");

    let doc = parse_lang(&input, Lang::En);
    assert_eq!(
        kinds(&doc),
        vec!["ContentsBlock", "Paragraph", "DialogueBlock", "SceneBreak", "Paragraph"]
    );
    assert_eq!(entry_count(&doc.blocks[0]), 1);
    assert_eq!(turn_count(&doc.blocks[2]), 2);
}

#[test]
fn ukrainian_book_layout() {
    let input = [
        "ЗМІСТ",
        "Розділ I. Перерваний діалог",
        "",
        "    До світанку лишалося вже зовсім трохи,",
        "і в коридорі чулося лише гудіння насосів.",
        "",
        "- Ти готовий?",
        "- Так, починаємо.",
        "",
        "х х х",
        "",
        "Після перерви команда повернулася до роботи.",
    ]
    .join("\n");

    let doc = parse_lang(&input, Lang::Ua);
    assert_eq!(
        kinds(&doc),
        vec!["ContentsBlock", "Paragraph", "DialogueBlock", "SceneBreak", "Paragraph"]
    );
    assert_eq!(entry_count(&doc.blocks[0]), 1);
}

#[test]
fn contents_entry_levels_follow_keywords() {
    let doc = parse("Оглавление\nЧасть первая\nГлава 1\nГлава 2");
    match &doc.blocks[0] {
        Block::Contents { entries, .. } => {
            let levels: Vec<u8> = entries.iter().map(|e| e.level).collect();
            assert_eq!(levels, vec![1, 2, 2]);
        }
        other => panic!("expected ContentsBlock, got {}", other.kind()),
    }
}

#[test]
fn scene_break_marker_is_canonical() {
    let doc = parse("Текст.\n\n— * —\n\nЕще текст.");
    assert_eq!(
        doc.blocks[1],
        Block::SceneBreak {
            marker: "***".to_string()
        }
    );
}

#[test]
fn crlf_input_is_normalized() {
    let doc = parse("Первый абзац.\r\n\r\nВторой абзац.");
    assert_eq!(kinds(&doc), vec!["Paragraph", "Paragraph"]);
}
