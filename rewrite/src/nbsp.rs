use txtfmt::{Inline, Lang, Punct, SpaceKind};

use crate::walk;

const SHORT_WORDS_RU: &[&str] = &["в", "к", "с", "у", "о", "и", "а"];
const SHORT_WORDS_UA: &[&str] = &["в", "у", "з", "із", "й", "і"];

/// Promote normal spaces to non-breaking ones where a line break would
/// separate words that belong together: short prepositions and
/// conjunctions, `№ 5`, `стр. 12` and initials.
pub fn apply_list(list: &mut Vec<Inline>, lang: Lang) {
    walk::each_child_list(list, |children| apply_list(children, lang));

    for idx in 0..list.len() {
        if !matches!(list[idx], Inline::Space(SpaceKind::Normal)) {
            continue;
        }
        let (Some(prev), Some(next)) = (
            walk::prev_non_space(list, idx),
            walk::next_non_space(list, idx),
        ) else {
            continue;
        };
        if binds(list, prev, next, lang) {
            list[idx] = Inline::Space(SpaceKind::NonBreaking);
        }
    }
}

fn binds(list: &[Inline], prev: usize, next: usize, lang: Lang) -> bool {
    binds_short_word(&list[prev], &list[next], lang)
        || binds_numero(&list[prev], &list[next])
        || binds_page(list, prev, next)
        || binds_initials(list, prev, next)
}

fn binds_short_word(prev: &Inline, next: &Inline, lang: Lang) -> bool {
    let short_words = match lang {
        Lang::En => return false,
        Lang::Ru => SHORT_WORDS_RU,
        Lang::Ua => SHORT_WORDS_UA,
    };
    match (prev.as_word(), next.as_word()) {
        (Some(word), Some(next)) if !next.is_empty() => {
            short_words.contains(&word.to_lowercase().as_str())
        }
        _ => false,
    }
}

fn binds_numero(prev: &Inline, next: &Inline) -> bool {
    prev.as_word() == Some("№") && next.is_numeric_word()
}

fn binds_page(list: &[Inline], prev: usize, next: usize) -> bool {
    prev >= 1
        && is_period(&list[prev])
        && list[prev - 1]
            .as_word()
            .is_some_and(|word| word.to_lowercase() == "стр")
        && list[next].is_numeric_word()
}

fn binds_initials(list: &[Inline], prev: usize, next: usize) -> bool {
    if !initial_ends_at(list, prev) {
        return false;
    }
    initial_starts_at(list, next)
        || list[next]
            .as_word()
            .is_some_and(|word| word.chars().count() > 1)
}

fn initial_ends_at(list: &[Inline], idx: usize) -> bool {
    idx >= 1
        && is_period(&list[idx])
        && list[idx - 1].as_word().is_some_and(is_upper_single_letter)
}

fn initial_starts_at(list: &[Inline], idx: usize) -> bool {
    list[idx].as_word().is_some_and(is_upper_single_letter)
        && list.get(idx + 1).is_some_and(is_period)
}

fn is_period(inline: &Inline) -> bool {
    matches!(inline, Inline::Punct(Punct::Period))
}

fn is_upper_single_letter(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(c), None) if c.is_alphabetic() && c.is_uppercase()
    )
}
