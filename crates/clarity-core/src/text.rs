//! Text processing utilities for rule evaluation
//!
//! Two tokenization schemes coexist here on purpose. Rule semantics
//! (`word_count`, `cosine_sim`) are defined over plain whitespace
//! splitting, while the capability providers work over alphanumeric
//! tokens with stop words removed.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Common English stop words to filter out during tokenization
static STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();

fn get_stop_words() -> &'static HashSet<&'static str> {
    STOP_WORDS.get_or_init(|| {
        [
            "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into",
            "is", "it", "no", "not", "of", "on", "or", "such", "that", "the", "their", "then",
            "there", "these", "they", "this", "to", "was", "will", "with",
        ]
        .iter()
        .copied()
        .collect()
    })
}

/// Whitespace-delimited word count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Unique lowercase whitespace-delimited words
pub fn unique_words(text: &str) -> HashSet<String> {
    text.split_whitespace().map(|w| w.to_lowercase()).collect()
}

/// Split text into sentences on terminal punctuation
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Simple word-based tokenizer splitting on non-alphanumeric characters with stop word removal
pub fn tokenize(text: &str) -> Vec<String> {
    let stop_words = get_stop_words();
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .filter(|s| !stop_words.contains(s))
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_whitespace() {
        assert_eq!(word_count("one two  three\nfour"), 4);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn test_unique_words_dedups() {
        let set = unique_words("python Python PYTHON java");
        assert_eq!(set.len(), 2);
        assert!(set.contains("python"));
        assert!(set.contains("java"));
    }

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("First one. Second one! Third? ");
        assert_eq!(sentences, vec!["First one", "Second one", "Third"]);
    }

    #[test]
    fn test_split_sentences_no_terminal_punctuation() {
        assert_eq!(split_sentences("just a fragment"), vec!["just a fragment"]);
    }

    #[test]
    fn test_tokenize_removes_stop_words() {
        let tokens = tokenize("The quick brown fox");
        assert_eq!(tokens, vec!["quick", "brown", "fox"]);
    }

    #[test]
    fn test_tokenize_splits_punctuation() {
        let tokens = tokenize("clear, step-by-step advice");
        assert_eq!(tokens, vec!["clear", "step", "step", "advice"]);
    }
}
