use regex::Regex;
use std::sync::LazyLock;

/// Characters that close a sentence. Covers the Arabic question mark.
pub const SENTENCE_TERMINALS: [char; 4] = ['.', '!', '؟', '?'];

// A run of non-terminal characters followed by exactly one terminal
static SENTENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!؟?]+[.!؟?]").unwrap());

/// Split text into trimmed sentence-like units.
///
/// Each unit keeps its terminal symbol. Text after the last terminal symbol is
/// dropped, and runs of terminals (`"..."`) never start a unit of their own.
pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_REGEX
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// First sentence of `text`, or `text` unchanged if it has no terminal symbol.
pub fn extract_first_sentence(text: &str) -> String {
    SENTENCE_REGEX
        .find(text)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| text.to_string())
}
