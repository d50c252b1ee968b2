//! Rule-based tokenizer and sentence splitter.
//!
//! Offsets are in characters, not bytes, so they line up with how
//! clients index the returned `text`.

use std::sync::LazyLock;

use regex::Regex;

use super::types::Span;

/// Decimal numbers (`3.5`, `1,000`), words with inner apostrophes or
/// hyphens, or any other single non-space character. Alternation is
/// leftmost-first, so numbers must come before words.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\p{N}+(?:[.,]\p{N}+)+|[\p{L}\p{M}\p{N}_]+(?:['’\-][\p{L}\p{M}\p{N}_]+)*|\S",
    )
    .unwrap()
});

/// A token slice of the input text with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme<'a> {
    pub id: usize,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl Lexeme<'_> {
    pub fn is_punct(&self) -> bool {
        !self.text.chars().any(char::is_alphanumeric)
    }

    fn ends_sentence(&self) -> bool {
        matches!(self.text, "." | "!" | "?" | "…")
    }
}

/// Split `text` into lexemes in reading order.
pub fn tokenize(text: &str) -> Vec<Lexeme<'_>> {
    let mut lexemes = Vec::new();
    // Running byte -> char offset conversion; matches are in order.
    let mut byte_cursor = 0;
    let mut char_cursor = 0;

    for m in TOKEN_PATTERN.find_iter(text) {
        char_cursor += text[byte_cursor..m.start()].chars().count();
        let start = char_cursor;
        let len = m.as_str().chars().count();
        char_cursor += len;
        byte_cursor = m.end();

        lexemes.push(Lexeme {
            id: lexemes.len(),
            text: m.as_str(),
            start,
            end: start + len,
        });
    }

    lexemes
}

/// Sentence spans: a sentence ends after `.`, `!`, `?` or `…`, and the
/// final sentence runs to the last token even without terminal punctuation.
pub fn sentences(lexemes: &[Lexeme<'_>]) -> Vec<Span> {
    let mut sents = Vec::new();
    let mut open: Option<usize> = None;

    for lx in lexemes {
        let start = *open.get_or_insert(lx.start);
        if lx.ends_sentence() {
            sents.push(Span { start, end: lx.end });
            open = None;
        }
    }

    if let (Some(start), Some(last)) = (open, lexemes.last()) {
        sents.push(Span {
            start,
            end: last.end,
        });
    }

    sents
}
