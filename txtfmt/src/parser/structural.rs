//! Block segmentation: candidates, structural line recognition and block
//! classification.

use std::sync::LazyLock;

use log::{debug, trace};
use regex::Regex;

use super::inline::{Segment, tokenize_segments};
use super::lines::SourceLine;
use super::spans::build_spans;
use crate::diagnostic::Diagnostic;
use crate::document::{Block, ContentsEntry, DialogueTurn, Inline};

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(\S.*)$").expect("heading regex"));

static BOOK_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(глава|chapter|часть|частина|part|раздел|section|книга|book|том|volume|розділ)\s+(.+)$",
    )
    .expect("book heading regex")
});

static CONTENTS_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(содержание|оглавление|contents|зміст)$").expect("contents regex")
});

static X_SCENE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[xXхХ](?:\s+[xXхХ]){2,}$").expect("x scene break regex"));

static META_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\p{L}[\p{L}\p{N}_-]{1,30}):\s+(\S.*)$").expect("meta line regex")
});

const TITLE_MAX_CANDIDATES: usize = 3;
const TITLE_MAX_LINES: usize = 3;
const TITLE_MAX_CHARS: usize = 100;

const LONG_LINE_CHARS: usize = 120;
const LONG_AVERAGE_CHARS: usize = 140;
const LONG_LINE_PERCENT: usize = 60;

// ---------------------------------------------------------------------------
// Line recognizers
// ---------------------------------------------------------------------------

/// Collapse every whitespace run to a single space and trim.
pub(crate) fn normalize_structure_line(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn is_scene_break_char(c: char) -> bool {
    matches!(
        c,
        '*' | '-' | '—' | '–' | '_' | '=' | '~' | '·' | '•' | 'x' | 'X' | 'х' | 'Х'
    )
}

pub(crate) fn is_x_like(c: char) -> bool {
    matches!(c, 'x' | 'X' | 'х' | 'Х')
}

fn is_heading_decoration_char(c: char) -> bool {
    is_scene_break_char(c) && !is_x_like(c)
}

/// Strip decoration glyphs that wrap the text on both sides, repeatedly.
pub(crate) fn trim_heading_decorations(s: &str) -> &str {
    let mut t = s.trim();
    loop {
        let mut chars = t.chars();
        let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
            return t;
        };
        if !is_heading_decoration_char(first) || !is_heading_decoration_char(last) {
            return t;
        }
        t = t[first.len_utf8()..t.len() - last.len_utf8()].trim();
    }
}

/// Three or more spaced x-like letters, or a run of at least three
/// ornamental glyphs that is not made of x-like letters alone.
pub fn is_scene_break(line: &str) -> bool {
    let t = normalize_structure_line(line);
    if t.is_empty() {
        return false;
    }
    if X_SCENE_BREAK_RE.is_match(&t) {
        return true;
    }

    let compact: Vec<char> = t.chars().filter(|&c| c != ' ').collect();
    if compact.len() < 3 || !compact.iter().all(|&c| is_scene_break_char(c)) {
        return false;
    }
    !compact.iter().all(|&c| is_x_like(c))
}

/// A line whose first non-indent glyph is a dash followed by whitespace.
pub fn is_dialogue_line(line: &str) -> bool {
    let mut chars = line.trim_start_matches([' ', '\t']).chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('—' | '-'), Some(c)) if c.is_whitespace()
    )
}

pub(crate) fn has_leading_indent(line: &str) -> bool {
    line.starts_with([' ', '\t'])
}

pub(crate) fn parse_meta_line(line: &str) -> Option<(String, String)> {
    let t = normalize_structure_line(line);
    let caps = META_LINE_RE.captures(&t)?;
    let key = caps[1].trim();
    let value = caps[2].trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key.to_string(), value.to_string()))
}

/// Heading level and body text. Markdown `#` headings keep only the text
/// after the hashes; keyword headings keep the whole line.
pub(crate) fn parse_heading(line: &str) -> Option<(u8, String)> {
    let t = normalize_structure_line(line);
    if t.is_empty() {
        return None;
    }
    if let Some(caps) = HEADING_RE.captures(&t) {
        let body = caps[2].trim();
        if body.is_empty() {
            return None;
        }
        return Some((caps[1].len() as u8, body.to_string()));
    }
    parse_book_heading(trim_heading_decorations(&t))
}

fn parse_book_heading(t: &str) -> Option<(u8, String)> {
    if t.is_empty() {
        return None;
    }
    let caps = BOOK_HEADING_RE.captures(t)?;
    if caps[2].trim().is_empty() {
        return None;
    }
    Some((level_for_keyword(&caps[1].to_lowercase()), t.to_string()))
}

fn level_for_keyword(keyword: &str) -> u8 {
    match keyword {
        "часть" | "частина" | "part" | "книга" | "book" | "том" | "volume" => 1,
        _ => 2,
    }
}

pub(crate) fn parse_contents_line(line: &str) -> Option<String> {
    let t = normalize_structure_line(line);
    if t.is_empty() {
        return None;
    }
    if CONTENTS_HEADING_RE.is_match(&t) {
        return Some(t);
    }
    let trimmed = trim_heading_decorations(&t);
    CONTENTS_HEADING_RE
        .is_match(trimmed)
        .then(|| trimmed.to_string())
}

pub(crate) fn parse_contents_entry_line(line: &str) -> Option<(u8, String)> {
    let t = normalize_structure_line(line);
    parse_book_heading(trim_heading_decorations(&t))
}

/// Lines that always form a candidate of their own.
pub(crate) fn is_standalone_structural(line: &str) -> bool {
    if line.trim().is_empty() {
        return false;
    }
    is_scene_break(line)
        || parse_meta_line(line).is_some()
        || parse_contents_line(line).is_some()
        || parse_heading(line).is_some()
}

// ---------------------------------------------------------------------------
// Candidates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub(crate) struct Candidate {
    pub lines: Vec<SourceLine>,
}

impl Candidate {
    fn single(line: &SourceLine) -> Self {
        Candidate {
            lines: vec![line.clone()],
        }
    }

    fn single_text(&self) -> Option<&str> {
        match self.lines.as_slice() {
            [only] => Some(&only.text),
            _ => None,
        }
    }

    fn is_structural(&self) -> bool {
        self.single_text().is_some_and(is_standalone_structural)
    }

    fn is_dialogue(&self) -> bool {
        !self.lines.is_empty() && self.lines.iter().all(|l| is_dialogue_line(&l.text))
    }

    fn is_title_like(&self) -> bool {
        !self.is_structural()
            && self.lines.len() <= TITLE_MAX_LINES
            && self.lines.iter().all(|l| {
                let trimmed = l.text.trim();
                !is_dialogue_line(&l.text)
                    && !has_leading_indent(&l.text)
                    && trimmed.chars().count() <= TITLE_MAX_CHARS
                    && !trimmed.ends_with(['.', ',', ';', ':'])
            })
    }
}

/// Group non-blank lines; structural lines stand alone.
pub(crate) fn split_candidates(lines: &[SourceLine]) -> Vec<Candidate> {
    let mut out = Vec::new();
    let mut current = Candidate::default();

    for line in lines {
        if line.text.trim().is_empty() {
            flush(&mut out, &mut current);
            continue;
        }
        if is_standalone_structural(&line.text) {
            flush(&mut out, &mut current);
            out.push(Candidate::single(line));
            continue;
        }
        current.lines.push(line.clone());
    }
    flush(&mut out, &mut current);

    out
}

fn flush(out: &mut Vec<Candidate>, current: &mut Candidate) {
    if !current.lines.is_empty() {
        out.push(std::mem::take(current));
    }
}

/// Number of leading candidates that merge into a title block.
fn leading_title_run(candidates: &[Candidate]) -> usize {
    let run = candidates
        .iter()
        .take(TITLE_MAX_CANDIDATES)
        .take_while(|c| c.is_title_like())
        .count();
    if run == 0 {
        return 0;
    }
    let decorated = candidates[..run]
        .iter()
        .flat_map(|c| &c.lines)
        .any(|l| l.decorated);
    let before_structure = candidates.get(run).is_some_and(Candidate::is_structural);
    if decorated || before_structure { run } else { 0 }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Segment prepared lines into blocks, collecting span diagnostics.
pub(crate) fn parse_blocks(lines: &[SourceLine]) -> (Vec<Block>, Vec<Diagnostic>) {
    let candidates = split_candidates(lines);
    debug!("segmented {} lines into {} candidates", lines.len(), candidates.len());

    let mut blocks = Vec::with_capacity(candidates.len());
    let mut diags = Vec::new();

    let title_run = leading_title_run(&candidates);
    if title_run > 0 {
        let title_lines: Vec<&SourceLine> = candidates[..title_run]
            .iter()
            .flat_map(|c| &c.lines)
            .collect();
        let segments: Vec<Segment> = title_lines
            .iter()
            .map(|l| Segment::trimmed(l))
            .collect();
        blocks.push(Block::Title(inlines(&segments, true, &mut diags)));
        trace!("merged {} leading candidates into a title", title_run);
    }

    let mut i = title_run;
    while i < candidates.len() {
        let candidate = &candidates[i];

        if let Some(title) = contents_title(candidate, &mut diags) {
            let mut entries = Vec::new();
            let mut j = i + 1;
            while let Some(entry) = candidates.get(j).and_then(|c| contents_entry(c, &mut diags)) {
                entries.push(entry);
                j += 1;
            }
            blocks.push(Block::Contents { title, entries });
            i = j;
            continue;
        }

        parse_candidate(candidate, &mut blocks, &mut diags);
        i += 1;
    }

    (blocks, diags)
}

fn contents_title(candidate: &Candidate, diags: &mut Vec<Diagnostic>) -> Option<Vec<Inline>> {
    let line = single_line(candidate)?;
    let body = parse_contents_line(&line.text)?;
    Some(inlines(&[Segment::rewritten(line, &body)], false, diags))
}

fn contents_entry(candidate: &Candidate, diags: &mut Vec<Diagnostic>) -> Option<ContentsEntry> {
    let line = single_line(candidate)?;
    let (level, body) = parse_contents_entry_line(&line.text)?;
    Some(ContentsEntry {
        level,
        content: inlines(&[Segment::rewritten(line, &body)], false, diags),
    })
}

fn single_line(candidate: &Candidate) -> Option<&SourceLine> {
    match candidate.lines.as_slice() {
        [only] => Some(only),
        _ => None,
    }
}

fn parse_candidate(candidate: &Candidate, blocks: &mut Vec<Block>, diags: &mut Vec<Diagnostic>) {
    if let Some(line) = single_line(candidate) {
        if is_scene_break(&line.text) {
            blocks.push(Block::scene_break());
            return;
        }
        if let Some((key, value)) = parse_meta_line(&line.text) {
            let value = inlines(&[Segment::rewritten(line, &value)], false, diags);
            blocks.push(Block::MetaLine { key, value });
            return;
        }
        if let Some((level, body)) = parse_heading(&line.text) {
            let content = inlines(&[Segment::rewritten(line, &body)], false, diags);
            blocks.push(Block::Heading { level, content });
            return;
        }
    }

    if candidate.is_dialogue() {
        blocks.push(dialogue_block(&candidate.lines, diags));
        return;
    }

    for part in split_paragraph(&candidate.lines) {
        if part.is_dialogue() {
            blocks.push(dialogue_block(&part.lines, diags));
            continue;
        }
        let segments: Vec<Segment> = part.lines.iter().map(Segment::whole).collect();
        blocks.push(Block::Paragraph(inlines(&segments, true, diags)));
    }
}

fn dialogue_block(lines: &[SourceLine], diags: &mut Vec<Diagnostic>) -> Block {
    let turns = lines
        .iter()
        .map(|line| DialogueTurn {
            content: inlines(&[Segment::indented(line)], false, diags),
        })
        .collect();
    Block::Dialogue(turns)
}

fn inlines(segments: &[Segment], join_with_space: bool, diags: &mut Vec<Diagnostic>) -> Vec<Inline> {
    let tokens = tokenize_segments(segments, join_with_space);
    let (content, span_diags) = build_spans(tokens);
    diags.extend(span_diags);
    content
}

// ---------------------------------------------------------------------------
// Paragraph splitting
// ---------------------------------------------------------------------------

fn split_paragraph(lines: &[SourceLine]) -> Vec<Candidate> {
    if lines.is_empty() {
        return Vec::new();
    }
    if should_split_long_indented(lines) {
        return split_long_indented(lines);
    }

    let mut out = Vec::new();
    let mut start = 0;
    for i in 1..lines.len() {
        if should_split_between(&lines[i - 1].text, &lines[i].text) {
            out.push(Candidate {
                lines: lines[start..i].to_vec(),
            });
            start = i;
        }
    }
    out.push(Candidate {
        lines: lines[start..].to_vec(),
    });
    out
}

fn should_split_between(prev: &str, cur: &str) -> bool {
    if is_dialogue_line(prev) != is_dialogue_line(cur) {
        return true;
    }
    has_leading_indent(cur) && !has_leading_indent(prev)
}

/// Every line indented and the lines are long enough to be whole paragraphs.
fn should_split_long_indented(lines: &[SourceLine]) -> bool {
    if lines.len() < 2 || !lines.iter().all(|l| has_leading_indent(&l.text)) {
        return false;
    }
    let lengths: Vec<usize> = lines.iter().map(|l| l.text.trim().chars().count()).collect();
    let average = lengths.iter().sum::<usize>() / lengths.len();
    let long = lengths.iter().filter(|&&n| n >= LONG_LINE_CHARS).count();
    average >= LONG_AVERAGE_CHARS || long * 100 / lengths.len() >= LONG_LINE_PERCENT
}

fn split_long_indented(lines: &[SourceLine]) -> Vec<Candidate> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let mut j = i + 1;
        if is_dialogue_line(&lines[i].text) {
            while j < lines.len() && is_dialogue_line(&lines[j].text) {
                j += 1;
            }
        } else {
            while j < lines.len()
                && !is_dialogue_line(&lines[j].text)
                && starts_like_continuation(&lines[j].text)
            {
                j += 1;
            }
        }
        out.push(Candidate {
            lines: lines[i..j].to_vec(),
        });
        i = j;
    }
    out
}

fn starts_like_continuation(line: &str) -> bool {
    let Some(first) = line.trim().chars().next() else {
        return false;
    };
    first.is_lowercase()
        || first.is_numeric()
        || matches!(first, ',' | '.' | ';' | ':' | '!' | '?' | '…' | ')' | ']' | '}' | '»')
}
