//! Citation quality rule: source-reference density

use regex::Regex;

use crate::capability::CapabilitySet;
use crate::error::{ClarityError, Result};
use crate::explain::Explanation;
use crate::rules::{Evaluate, Params};
use crate::text;

use super::guard_no_content;

/// Below this citations-per-word ratio the text is barely sourced
const LOW_DENSITY: f64 = 0.01;
/// Below this ratio sourcing is adequate but thin
const MEDIUM_DENSITY: f64 = 0.05;

/// Recognized reference shapes: (Author, 2023), [1], URLs, DOIs
const CITATION_PATTERNS: [&str; 4] = [
    r"\([A-Za-z]+,?\s+\d{4}\)",
    r"\[[0-9]+\]",
    r"https?://[^\s]+",
    r"doi:\s*[^\s]+",
];

/// Scores the presence and density of citations. The score is banded
/// on citations-per-word rather than raw counts so long texts need
/// proportionally more sourcing.
#[derive(Debug)]
pub struct CitationQuality {
    patterns: Vec<Regex>,
}

impl Evaluate for CitationQuality {
    fn kind(&self) -> &'static str {
        "citation_quality"
    }

    fn explain(&self, text_input: &str) -> Result<Explanation> {
        if let Some(explanation) = guard_no_content(text_input) {
            return Ok(explanation);
        }

        let mut citations: Vec<&str> = Vec::new();
        for pattern in &self.patterns {
            citations.extend(pattern.find_iter(text_input).map(|m| m.as_str()));
        }

        let word_count = text::word_count(text_input);
        let density = if word_count > 0 {
            citations.len() as f64 / word_count as f64
        } else {
            0.0
        };

        let (score, reasoning, suggestions) = if citations.is_empty() {
            (
                0.0,
                "No citations found in text",
                vec![
                    "Add credible sources to support claims".to_string(),
                    "Include academic references where appropriate".to_string(),
                    "Cite relevant research or documentation".to_string(),
                ],
            )
        } else if density < LOW_DENSITY {
            (
                0.3,
                "Very few citations relative to text length",
                vec![
                    "Increase citation frequency for better support".to_string(),
                    "Cite sources for key claims and statistics".to_string(),
                ],
            )
        } else if density < MEDIUM_DENSITY {
            (
                0.7,
                "Moderate citation density",
                vec!["Consider adding more sources for comprehensive coverage".to_string()],
            )
        } else {
            (1.0, "Good citation density and source support", Vec::new())
        };

        let sample = if citations.is_empty() {
            "None".to_string()
        } else {
            citations
                .iter()
                .take(3)
                .copied()
                .collect::<Vec<_>>()
                .join(", ")
        };
        let evidence = vec![
            format!("Citations found: {}", citations.len()),
            format!("Citation density: {:.4} per word", density),
            format!("Sample citations: {}", sample),
        ];

        Ok(Explanation {
            score,
            reasoning: reasoning.to_string(),
            evidence,
            confidence: 0.9,
            suggestions,
        })
    }
}

pub(crate) fn build_citation_quality(
    _params: &Params,
    _caps: &CapabilitySet,
) -> Result<Box<dyn Evaluate>> {
    let patterns = CITATION_PATTERNS
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|err| {
                ClarityError::invalid_rule("citation_quality", err.to_string())
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Box::new(CitationQuality { patterns }))
}
