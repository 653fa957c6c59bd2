//! Capability providers for advanced rules
//!
//! An advanced rule declares the analysis capability it needs and is
//! handed a [`CapabilitySet`] at construction. A missing capability is
//! not an error: the rule degrades to a fixed low-confidence fallback
//! explanation. `CapabilitySet::default()` wires the built-in
//! providers; `CapabilitySet::none()` disables everything, which is
//! how degraded mode is exercised in tests and by embedders that want
//! the cheap path.

use std::collections::HashMap;
use std::sync::Arc;

use crate::text;

/// An injectable, optionally-unavailable analysis dependency
pub trait Capability: Send + Sync {
    /// Short capability name used in fallback explanations
    fn name(&self) -> &'static str;

    /// Whether the capability can be used for analysis
    fn is_available(&self) -> bool;
}

/// Readability metrics over English text.
///
/// Flesch Reading Ease and Flesch-Kincaid grade level computed from
/// word, sentence, and estimated syllable counts.
#[derive(Debug, Default)]
pub struct ReadabilityProvider;

impl Capability for ReadabilityProvider {
    fn name(&self) -> &'static str {
        "readability-metrics"
    }

    fn is_available(&self) -> bool {
        true
    }
}

impl ReadabilityProvider {
    /// Flesch Reading Ease: higher is easier (can exceed [0, 100] on edge inputs)
    pub fn flesch_reading_ease(&self, text: &str) -> f64 {
        let (words, sentences, syllables) = counts(text);
        if words == 0 || sentences == 0 {
            return 0.0;
        }
        206.835 - 1.015 * (words as f64 / sentences as f64)
            - 84.6 * (syllables as f64 / words as f64)
    }

    /// Flesch-Kincaid grade level
    pub fn flesch_kincaid_grade(&self, text: &str) -> f64 {
        let (words, sentences, syllables) = counts(text);
        if words == 0 || sentences == 0 {
            return 0.0;
        }
        0.39 * (words as f64 / sentences as f64) + 11.8 * (syllables as f64 / words as f64)
            - 15.59
    }
}

fn counts(text: &str) -> (usize, usize, usize) {
    let words = text::word_count(text);
    let sentences = text::split_sentences(text).len();
    let syllables: usize = text.split_whitespace().map(estimate_syllables).sum();
    (words, sentences, syllables)
}

/// Estimate syllables by counting vowel groups, discounting a silent
/// trailing 'e'. Never returns less than 1 for a non-empty word.
fn estimate_syllables(word: &str) -> usize {
    let lower: Vec<char> = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphabetic())
        .collect();
    if lower.is_empty() {
        return 0;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut groups: usize = 0;
    let mut previous_was_vowel = false;
    for &c in &lower {
        let vowel = is_vowel(c);
        if vowel && !previous_was_vowel {
            groups += 1;
        }
        previous_was_vowel = vowel;
    }

    // Silent trailing 'e' as in "sentence", "provide"
    if lower.len() > 2 && lower.ends_with(&['e']) && !is_vowel(lower[lower.len() - 2]) {
        groups = groups.saturating_sub(1);
        // Consonant + "le" endings keep their syllable ("table", "simple")
        if lower.ends_with(&['l', 'e']) && lower.len() > 3 && !is_vowel(lower[lower.len() - 3]) {
            groups += 1;
        }
    }

    groups.max(1)
}

/// Sentence vectors for coherence analysis.
///
/// Term-frequency vectors over stop-word-filtered tokens, compared
/// with cosine similarity.
#[derive(Debug, Default)]
pub struct SentenceVectorProvider;

impl Capability for SentenceVectorProvider {
    fn name(&self) -> &'static str {
        "sentence-vectors"
    }

    fn is_available(&self) -> bool {
        true
    }
}

impl SentenceVectorProvider {
    /// One term-frequency vector per sentence. Sentences with no
    /// content tokens are dropped.
    pub fn sentence_vectors(&self, text: &str) -> Vec<HashMap<String, f64>> {
        text::split_sentences(text)
            .iter()
            .map(|sentence| {
                let mut vector: HashMap<String, f64> = HashMap::new();
                for token in text::tokenize(sentence) {
                    *vector.entry(token).or_insert(0.0) += 1.0;
                }
                vector
            })
            .filter(|v| !v.is_empty())
            .collect()
    }

    /// Cosine similarity between two term-frequency vectors
    pub fn cosine(&self, a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
        let dot: f64 = a
            .iter()
            .filter_map(|(term, weight)| b.get(term).map(|other| weight * other))
            .sum();
        let norm_a: f64 = a.values().map(|w| w * w).sum::<f64>().sqrt();
        let norm_b: f64 = b.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        dot / (norm_a * norm_b)
    }
}

/// The capability providers available to advanced rules.
///
/// `None` for a slot means the capability is unavailable and rules
/// requiring it return their fallback explanation.
#[derive(Debug, Clone)]
pub struct CapabilitySet {
    readability: Option<Arc<ReadabilityProvider>>,
    sentence_vectors: Option<Arc<SentenceVectorProvider>>,
}

impl Default for CapabilitySet {
    fn default() -> Self {
        Self {
            readability: Some(Arc::new(ReadabilityProvider)),
            sentence_vectors: Some(Arc::new(SentenceVectorProvider)),
        }
    }
}

impl CapabilitySet {
    /// A set with every capability disabled
    pub fn none() -> Self {
        Self {
            readability: None,
            sentence_vectors: None,
        }
    }

    /// Readability provider, if available
    pub fn readability(&self) -> Option<Arc<ReadabilityProvider>> {
        self.readability
            .as_ref()
            .filter(|p| p.is_available())
            .cloned()
    }

    /// Sentence-vector provider, if available
    pub fn sentence_vectors(&self) -> Option<Arc<SentenceVectorProvider>> {
        self.sentence_vectors
            .as_ref()
            .filter(|p| p.is_available())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syllable_estimates() {
        assert_eq!(estimate_syllables("cat"), 1);
        assert_eq!(estimate_syllables("table"), 2);
        assert_eq!(estimate_syllables("provide"), 2);
        assert_eq!(estimate_syllables("readability"), 5);
        assert_eq!(estimate_syllables("a"), 1);
    }

    #[test]
    fn test_flesch_reading_ease_simple_sentence() {
        let provider = ReadabilityProvider;
        // 3 words, 1 sentence, 3 syllables:
        // 206.835 - 1.015 * 3 - 84.6 * 1 = 119.19
        let score = provider.flesch_reading_ease("The cat sat.");
        assert!((score - 119.19).abs() < 0.01);
    }

    #[test]
    fn test_flesch_kincaid_grade_simple_sentence() {
        let provider = ReadabilityProvider;
        // 0.39 * 3 + 11.8 * 1 - 15.59 = -2.62
        let grade = provider.flesch_kincaid_grade("The cat sat.");
        assert!((grade - (-2.62)).abs() < 0.01);
    }

    #[test]
    fn test_readability_empty_text() {
        let provider = ReadabilityProvider;
        assert_eq!(provider.flesch_reading_ease(""), 0.0);
        assert_eq!(provider.flesch_kincaid_grade(""), 0.0);
    }

    #[test]
    fn test_complex_text_has_higher_grade() {
        let provider = ReadabilityProvider;
        let simple = "The dog ran. The cat sat. We had fun.";
        let complex = "Organizational infrastructure modernization necessitates \
                       comprehensive architectural evaluation methodologies.";
        assert!(
            provider.flesch_kincaid_grade(complex) > provider.flesch_kincaid_grade(simple)
        );
    }

    #[test]
    fn test_identical_sentences_fully_coherent() {
        let provider = SentenceVectorProvider;
        let vectors = provider.sentence_vectors("Dogs chase cats. Dogs chase cats.");
        assert_eq!(vectors.len(), 2);
        assert!((provider.cosine(&vectors[0], &vectors[1]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_sentences_zero_similarity() {
        let provider = SentenceVectorProvider;
        let vectors = provider.sentence_vectors("Apples grow slowly. Rockets fly fast.");
        assert_eq!(vectors.len(), 2);
        assert_eq!(provider.cosine(&vectors[0], &vectors[1]), 0.0);
    }

    #[test]
    fn test_capability_set_none_reports_unavailable() {
        let caps = CapabilitySet::none();
        assert!(caps.readability().is_none());
        assert!(caps.sentence_vectors().is_none());
    }

    #[test]
    fn test_default_capability_set_available() {
        let caps = CapabilitySet::default();
        assert!(caps.readability().is_some());
        assert!(caps.sentence_vectors().is_some());
    }
}
