//! Basic rule evaluators
//!
//! Dependency-free scoring units with exact, deterministic semantics.
//! Parameters are validated when the evaluator is built; evaluation
//! itself cannot fail.

use std::collections::HashSet;

use regex::Regex;

use crate::capability::CapabilitySet;
use crate::error::{ClarityError, Result};
use crate::explain::Explanation;
use crate::text;

use super::{Evaluate, ParamReader, Params};

/// Positive-word lexicon for `sentiment_positive`
const POSITIVE_WORDS: [&str; 6] = ["good", "great", "excellent", "positive", "helpful", "clear"];

/// Three lexicon hits saturate the score
const SENTIMENT_SATURATION: f64 = 3.0;

/// Case-insensitive phrase presence. With a `phrases` list, scores
/// 1.0 when at least `min_matches` of the phrases occur.
#[derive(Debug)]
pub struct ContainsPhrase {
    phrases: Vec<String>,
    min_matches: usize,
}

impl ContainsPhrase {
    fn score(&self, text: &str) -> f64 {
        let haystack = text.to_lowercase();
        let matches = self
            .phrases
            .iter()
            .filter(|phrase| haystack.contains(phrase.as_str()))
            .count();
        if matches >= self.min_matches {
            1.0
        } else {
            0.0
        }
    }
}

impl Evaluate for ContainsPhrase {
    fn kind(&self) -> &'static str {
        "contains_phrase"
    }

    fn evaluate(&self, text: &str) -> Result<f64> {
        Ok(self.score(text))
    }

    fn explain(&self, text: &str) -> Result<Explanation> {
        Ok(Explanation::basic(self.kind(), self.score(text)))
    }
}

pub(super) fn build_contains_phrase(
    params: &Params,
    _caps: &CapabilitySet,
) -> Result<Box<dyn Evaluate>> {
    let reader = ParamReader::new("contains_phrase", params);
    if reader.has("phrase") && reader.has("phrases") {
        return Err(ClarityError::invalid_rule(
            "contains_phrase",
            "specify either phrase or phrases, not both",
        ));
    }

    let phrases: Vec<String> = if let Some(phrase) = reader.opt_str("phrase")? {
        vec![phrase]
    } else if let Some(list) = reader.opt_str_list("phrases")? {
        list
    } else {
        return Err(ClarityError::invalid_rule(
            "contains_phrase",
            "missing required param: phrase (or phrases)",
        ));
    };

    if phrases.iter().any(|p| p.trim().is_empty()) {
        return Err(ClarityError::invalid_rule(
            "contains_phrase",
            "phrase must not be empty",
        ));
    }

    let min_matches = reader.opt_usize("min_matches")?.unwrap_or(1);
    if min_matches == 0 || min_matches > phrases.len() {
        return Err(ClarityError::invalid_rule(
            "contains_phrase",
            format!(
                "min_matches must be between 1 and {} (the phrase count)",
                phrases.len()
            ),
        ));
    }

    Ok(Box::new(ContainsPhrase {
        phrases: phrases.iter().map(|p| p.to_lowercase()).collect(),
        min_matches,
    }))
}

/// Case-insensitive regex search anywhere in the text
#[derive(Debug)]
pub struct RegexMatch {
    pattern: Regex,
}

impl Evaluate for RegexMatch {
    fn kind(&self) -> &'static str {
        "regex_match"
    }

    fn evaluate(&self, text: &str) -> Result<f64> {
        Ok(if self.pattern.is_match(text) { 1.0 } else { 0.0 })
    }

    fn explain(&self, text: &str) -> Result<Explanation> {
        Ok(Explanation::basic(self.kind(), self.evaluate(text)?))
    }
}

pub(super) fn build_regex_match(params: &Params, _caps: &CapabilitySet) -> Result<Box<dyn Evaluate>> {
    let reader = ParamReader::new("regex_match", params);
    let raw = reader.required_str("pattern")?;
    let pattern = Regex::new(&format!("(?i){}", raw))
        .map_err(|e| ClarityError::invalid_rule("regex_match", format!("bad pattern: {}", e)))?;
    Ok(Box::new(RegexMatch { pattern }))
}

/// Whitespace word count within inclusive bounds
#[derive(Debug)]
pub struct WordCount {
    min_words: usize,
    max_words: Option<usize>,
}

impl Evaluate for WordCount {
    fn kind(&self) -> &'static str {
        "word_count"
    }

    fn evaluate(&self, text: &str) -> Result<f64> {
        let count = text::word_count(text);
        let in_range = count >= self.min_words && self.max_words.is_none_or(|max| count <= max);
        Ok(if in_range { 1.0 } else { 0.0 })
    }

    fn explain(&self, text: &str) -> Result<Explanation> {
        Ok(Explanation::basic(self.kind(), self.evaluate(text)?))
    }
}

pub(super) fn build_word_count(params: &Params, _caps: &CapabilitySet) -> Result<Box<dyn Evaluate>> {
    let reader = ParamReader::new("word_count", params);
    let min_words = reader.opt_usize("min_words")?.unwrap_or(0);
    let max_words = reader.opt_usize("max_words")?;
    if let Some(max) = max_words {
        if max < min_words {
            return Err(ClarityError::invalid_rule(
                "word_count",
                format!("max_words ({}) is less than min_words ({})", max, min_words),
            ));
        }
    }
    Ok(Box::new(WordCount {
        min_words,
        max_words,
    }))
}

/// Fixed positive-lexicon detection scaled to [0, 1]
#[derive(Debug)]
pub struct SentimentPositive;

impl Evaluate for SentimentPositive {
    fn kind(&self) -> &'static str {
        "sentiment_positive"
    }

    fn evaluate(&self, text: &str) -> Result<f64> {
        let haystack = text.to_lowercase();
        let matches = POSITIVE_WORDS
            .iter()
            .filter(|word| haystack.contains(*word))
            .count();
        Ok((matches as f64 / SENTIMENT_SATURATION).min(1.0))
    }

    fn explain(&self, text: &str) -> Result<Explanation> {
        Ok(Explanation::basic(self.kind(), self.evaluate(text)?))
    }
}

pub(super) fn build_sentiment_positive(
    _params: &Params,
    _caps: &CapabilitySet,
) -> Result<Box<dyn Evaluate>> {
    Ok(Box::new(SentimentPositive))
}

/// Unique-word-set overlap against a target phrase
#[derive(Debug)]
pub struct CosineSim {
    target_words: HashSet<String>,
}

impl Evaluate for CosineSim {
    fn kind(&self) -> &'static str {
        "cosine_sim"
    }

    fn evaluate(&self, text: &str) -> Result<f64> {
        if self.target_words.is_empty() {
            return Ok(0.0);
        }
        let text_words = text::unique_words(text);
        let overlap = self
            .target_words
            .iter()
            .filter(|word| text_words.contains(*word))
            .count();
        Ok((overlap as f64 / self.target_words.len() as f64).min(1.0))
    }

    fn explain(&self, text: &str) -> Result<Explanation> {
        Ok(Explanation::basic(self.kind(), self.evaluate(text)?))
    }
}

pub(super) fn build_cosine_sim(params: &Params, _caps: &CapabilitySet) -> Result<Box<dyn Evaluate>> {
    let reader = ParamReader::new("cosine_sim", params);
    let target = reader.required_str("target")?;
    Ok(Box::new(CosineSim {
        target_words: text::unique_words(&target),
    }))
}
