//! Argument structure rule: claim/evidence/counter-argument indicators

use crate::capability::CapabilitySet;
use crate::error::Result;
use crate::explain::Explanation;
use crate::rules::{Evaluate, Params};

use super::guard_no_content;

const CLAIM_INDICATORS: [&str; 5] = ["therefore", "thus", "hence", "consequently", "as a result"];
const EVIDENCE_INDICATORS: [&str; 6] = [
    "because",
    "since",
    "given that",
    "due to",
    "for example",
    "such as",
];
const COUNTER_INDICATORS: [&str; 5] = [
    "however",
    "but",
    "although",
    "despite",
    "on the other hand",
];

const CLAIM_WEIGHT: f64 = 0.3;
const EVIDENCE_WEIGHT: f64 = 0.4;
const COUNTER_WEIGHT: f64 = 0.3;
/// Bonus when both a claim and supporting evidence are present
const BALANCE_BONUS: f64 = 0.1;

/// Scores the presence of argumentative structure: fixed sub-weights
/// for claim, evidence, and counter-argument indicator words, plus a
/// small bonus for claims backed by evidence.
#[derive(Debug)]
pub struct ArgumentStructure;

impl ArgumentStructure {
    fn count_indicators(haystack: &str, indicators: &[&str]) -> usize {
        indicators
            .iter()
            .filter(|indicator| haystack.contains(*indicator))
            .count()
    }
}

impl Evaluate for ArgumentStructure {
    fn kind(&self) -> &'static str {
        "argument_structure"
    }

    fn explain(&self, text: &str) -> Result<Explanation> {
        if let Some(explanation) = guard_no_content(text) {
            return Ok(explanation);
        }

        let haystack = text.to_lowercase();
        let claims = Self::count_indicators(&haystack, &CLAIM_INDICATORS);
        let evidence_hits = Self::count_indicators(&haystack, &EVIDENCE_INDICATORS);
        let counters = Self::count_indicators(&haystack, &COUNTER_INDICATORS);

        let mut score = 0.0;
        let mut evidence = Vec::new();
        let mut suggestions = Vec::new();

        if claims > 0 {
            score += CLAIM_WEIGHT;
            evidence.push(format!("Found {} claim indicators", claims));
        } else {
            suggestions
                .push("Add clear conclusions or claims (use 'therefore', 'thus', etc.)".to_string());
        }

        if evidence_hits > 0 {
            score += EVIDENCE_WEIGHT;
            evidence.push(format!("Found {} evidence indicators", evidence_hits));
        } else {
            suggestions.push(
                "Provide supporting evidence (use 'because', 'for example', etc.)".to_string(),
            );
        }

        if counters > 0 {
            score += COUNTER_WEIGHT;
            evidence.push(format!("Found {} counter-argument indicators", counters));
        } else {
            suggestions
                .push("Consider counter-arguments (use 'however', 'although', etc.)".to_string());
        }

        if claims > 0 && evidence_hits > 0 {
            score = (score + BALANCE_BONUS).min(1.0);
        }

        let reasoning = if score >= 0.8 {
            "Text demonstrates strong argumentative structure"
        } else if score >= 0.5 {
            "Text shows moderate argumentative structure"
        } else {
            "Text lacks clear argumentative structure"
        };

        Ok(Explanation {
            score,
            reasoning: reasoning.to_string(),
            evidence,
            confidence: 0.7,
            suggestions,
        })
    }
}

pub(crate) fn build_argument_structure(
    _params: &Params,
    _caps: &CapabilitySet,
) -> Result<Box<dyn Evaluate>> {
    Ok(Box::new(ArgumentStructure))
}
