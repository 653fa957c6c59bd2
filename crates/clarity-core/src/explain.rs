//! Explanations and overall feedback synthesis
//!
//! Every rule can justify its score: advanced rules produce rich
//! explanations directly, basic rules synthesize a minimal one on
//! demand. The synthesizer folds per-rule explanations into an
//! overall feedback block with a banded interpretation of the
//! aggregate score.

use serde::{Deserialize, Serialize};

/// Structured justification for a rule's score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    /// Score in [0.0, 1.0]
    pub score: f64,
    /// Why the rule produced this score
    pub reasoning: String,
    /// Concrete, test-visible observations supporting the score
    pub evidence: Vec<String>,
    /// Confidence in the assessment, in [0.0, 1.0]
    pub confidence: f64,
    /// Actionable improvements
    pub suggestions: Vec<String>,
}

impl Explanation {
    /// Minimal explanation for a basic rule's score
    pub fn basic(rule_type: &str, score: f64) -> Self {
        Self {
            score,
            reasoning: format!("Basic {} rule evaluation", rule_type),
            evidence: vec![format!("Score: {}", score)],
            confidence: 0.8,
            suggestions: Vec::new(),
        }
    }

    /// Fixed low-confidence fallback when a capability is unavailable.
    /// This is a first-class result, never an error.
    pub fn missing_capability(capability: &str) -> Self {
        Self {
            score: 0.5,
            reasoning: format!("{} capability not available for analysis", capability),
            evidence: vec!["Fallback scoring applied".to_string()],
            confidence: 0.1,
            suggestions: vec![format!("Enable the {} capability provider", capability)],
        }
    }

    /// Full-confidence zero for empty or whitespace-only input,
    /// returned before any capability check.
    pub fn no_content() -> Self {
        Self {
            score: 0.0,
            reasoning: "No content provided for evaluation".to_string(),
            evidence: vec!["Input text is empty".to_string()],
            confidence: 1.0,
            suggestions: Vec::new(),
        }
    }
}

/// Overall feedback synthesized from per-rule explanations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallFeedback {
    /// Rules scoring >= 0.7, as "type: reasoning" lines
    pub strengths: Vec<String>,
    /// Rules scoring < 0.4, as "type: reasoning" lines
    pub weaknesses: Vec<String>,
    /// Deduplicated union of all rules' suggestions
    pub suggestions: Vec<String>,
    /// Banded interpretation of the aggregate score
    pub score_interpretation: String,
}

/// Score threshold at or above which a rule counts as a strength
pub const STRENGTH_THRESHOLD: f64 = 0.7;
/// Score threshold below which a rule counts as a weakness
pub const WEAKNESS_THRESHOLD: f64 = 0.4;

/// Human-readable interpretation of an aggregate score
pub fn interpret_score(score: f64) -> String {
    let interpretation = if score >= 0.9 {
        "Excellent - text meets or exceeds all quality criteria"
    } else if score >= 0.7 {
        "Good - text meets most quality criteria with minor areas for improvement"
    } else if score >= 0.5 {
        "Moderate - text meets some criteria but has significant room for improvement"
    } else if score >= 0.3 {
        "Poor - text fails to meet most quality criteria and needs substantial revision"
    } else {
        "Very Poor - text fails to meet basic quality standards and requires complete revision"
    };
    interpretation.to_string()
}

/// Fold per-rule `(rule_type, explanation)` pairs into overall feedback
pub fn synthesize_feedback<'a>(
    explanations: impl IntoIterator<Item = (&'a str, &'a Explanation)>,
    total_score: f64,
) -> OverallFeedback {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();
    let mut suggestions: Vec<String> = Vec::new();

    for (rule_type, explanation) in explanations {
        if explanation.score >= STRENGTH_THRESHOLD {
            strengths.push(format!("{}: {}", rule_type, explanation.reasoning));
        } else if explanation.score < WEAKNESS_THRESHOLD {
            weaknesses.push(format!("{}: {}", rule_type, explanation.reasoning));
        }
        for suggestion in &explanation.suggestions {
            if !suggestions.contains(suggestion) {
                suggestions.push(suggestion.clone());
            }
        }
    }

    OverallFeedback {
        strengths,
        weaknesses,
        suggestions,
        score_interpretation: interpret_score(total_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bands() {
        assert!(interpret_score(0.95).starts_with("Excellent"));
        assert!(interpret_score(0.9).starts_with("Excellent"));
        assert!(interpret_score(0.7).starts_with("Good"));
        assert!(interpret_score(0.5).starts_with("Moderate"));
        assert!(interpret_score(0.3).starts_with("Poor"));
        assert!(interpret_score(0.29).starts_with("Very Poor"));
        assert!(interpret_score(0.0).starts_with("Very Poor"));
    }

    #[test]
    fn test_fallback_explanation_shape() {
        let explanation = Explanation::missing_capability("readability-metrics");
        assert_eq!(explanation.score, 0.5);
        assert_eq!(explanation.confidence, 0.1);
        assert!(explanation.reasoning.contains("readability-metrics"));
        assert!(!explanation.suggestions.is_empty());
    }

    #[test]
    fn test_no_content_explanation_shape() {
        let explanation = Explanation::no_content();
        assert_eq!(explanation.score, 0.0);
        assert_eq!(explanation.confidence, 1.0);
        assert!(!explanation.reasoning.is_empty());
    }

    #[test]
    fn test_synthesize_buckets_and_dedup() {
        let strong = Explanation {
            score: 0.9,
            reasoning: "matched".to_string(),
            evidence: vec![],
            confidence: 0.8,
            suggestions: vec!["add examples".to_string()],
        };
        let weak = Explanation {
            score: 0.1,
            reasoning: "missed".to_string(),
            evidence: vec![],
            confidence: 0.8,
            suggestions: vec!["add examples".to_string(), "shorten".to_string()],
        };
        let middling = Explanation {
            score: 0.5,
            reasoning: "partial".to_string(),
            evidence: vec![],
            confidence: 0.8,
            suggestions: vec![],
        };

        let feedback = synthesize_feedback(
            [
                ("contains_phrase", &strong),
                ("readability", &weak),
                ("word_count", &middling),
            ],
            0.55,
        );

        assert_eq!(feedback.strengths, vec!["contains_phrase: matched"]);
        assert_eq!(feedback.weaknesses, vec!["readability: missed"]);
        assert_eq!(feedback.suggestions, vec!["add examples", "shorten"]);
        assert!(feedback.score_interpretation.starts_with("Moderate"));
    }
}
