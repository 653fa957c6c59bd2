//! Templates: named collections of weighted rules
//!
//! Aggregation is a weighted mean over the rules that evaluated
//! successfully. A failed rule is excluded from both the numerator
//! and the denominator, so one broken rule never drags the score
//! toward zero; it surfaces as an error entry in detailed output.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::capability::CapabilitySet;
use crate::error::{ClarityError, Result};
use crate::explain::{interpret_score, synthesize_feedback, Explanation, OverallFeedback};
use crate::rules::{Params, Rule};

/// A named collection of weighted scoring rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    /// Template name
    #[serde(default = "default_name")]
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Rules applied in order
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(skip)]
    capabilities: Arc<CapabilitySet>,
}

fn default_name() -> String {
    "default".to_string()
}

/// Per-rule contribution in a detailed breakdown
#[derive(Debug, Clone, Serialize)]
pub struct RuleBreakdown {
    pub rule_type: String,
    pub weight: f64,
    pub raw_score: f64,
    pub weighted_score: f64,
    pub params: Params,
}

/// A rule that failed to build or evaluate
#[derive(Debug, Clone, Serialize)]
pub struct RuleFailure {
    pub rule_type: String,
    pub weight: f64,
    pub error: String,
    pub params: Params,
}

/// Outcome of one rule in a detailed breakdown
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RuleOutcome {
    Scored(RuleBreakdown),
    Failed(RuleFailure),
}

/// Detailed scoring result with per-rule contributions
#[derive(Debug, Clone, Serialize)]
pub struct DetailedScore {
    pub total_score: f64,
    pub total_weight: f64,
    pub rule_scores: Vec<RuleOutcome>,
}

/// Per-rule entry in an explained report
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ExplainedOutcome {
    Explained {
        rule_type: String,
        weight: f64,
        raw_score: f64,
        weighted_score: f64,
        reasoning: String,
        evidence: Vec<String>,
        confidence: f64,
        suggestions: Vec<String>,
        params: Params,
    },
    Failed(RuleFailure),
}

/// Full scoring report: per-rule explanations plus synthesized feedback
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub total_score: f64,
    pub total_weight: f64,
    pub rule_explanations: Vec<ExplainedOutcome>,
    pub overall_feedback: OverallFeedback,
}

impl Template {
    /// Create an empty template with the built-in capability providers
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_capabilities(name, CapabilitySet::default())
    }

    /// Create an empty template with an explicit capability set
    pub fn with_capabilities(name: impl Into<String>, capabilities: CapabilitySet) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            rules: Vec::new(),
            capabilities: Arc::new(capabilities),
        }
    }

    /// Append a rule
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// The capability set rules are evaluated against
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Evaluate all rules and return the weighted mean score in [0.0, 1.0]
    pub fn evaluate(&self, text: &str) -> f64 {
        self.evaluate_detailed(text).total_score
    }

    /// Evaluate with a per-rule breakdown
    pub fn evaluate_detailed(&self, text: &str) -> DetailedScore {
        let mut rule_scores = Vec::with_capacity(self.rules.len());
        let mut total_score = 0.0;
        let mut total_weight = 0.0;

        for rule in &self.rules {
            match rule.evaluate(text, &self.capabilities) {
                Ok(raw_score) => {
                    let weighted_score = raw_score * rule.weight;
                    total_score += weighted_score;
                    total_weight += rule.weight;
                    rule_scores.push(RuleOutcome::Scored(RuleBreakdown {
                        rule_type: rule.rule_type.clone(),
                        weight: rule.weight,
                        raw_score,
                        weighted_score,
                        params: rule.params.clone(),
                    }));
                }
                Err(err) => {
                    tracing::warn!(
                        rule_type = %rule.rule_type,
                        error = %err,
                        "rule failed, excluding from aggregate"
                    );
                    rule_scores.push(RuleOutcome::Failed(RuleFailure {
                        rule_type: rule.rule_type.clone(),
                        weight: rule.weight,
                        error: err.to_string(),
                        params: rule.params.clone(),
                    }));
                }
            }
        }

        let final_score = if total_weight > 0.0 {
            total_score / total_weight
        } else {
            0.0
        };

        DetailedScore {
            total_score: final_score,
            total_weight,
            rule_scores,
        }
    }

    /// Evaluate with rich per-rule explanations and overall feedback
    pub fn evaluate_with_explanations(&self, text: &str) -> ScoreReport {
        if self.rules.is_empty() {
            return ScoreReport {
                total_score: 0.0,
                total_weight: 0.0,
                rule_explanations: Vec::new(),
                overall_feedback: OverallFeedback {
                    strengths: Vec::new(),
                    weaknesses: vec!["No evaluation rules defined".to_string()],
                    suggestions: vec!["Add scoring rules to evaluate text quality".to_string()],
                    score_interpretation: interpret_score(0.0),
                },
            };
        }

        let mut rule_explanations = Vec::with_capacity(self.rules.len());
        let mut explained: Vec<(String, Explanation)> = Vec::new();
        let mut total_score = 0.0;
        let mut total_weight = 0.0;

        for rule in &self.rules {
            match rule.explain(text, &self.capabilities) {
                Ok(explanation) => {
                    total_score += explanation.score * rule.weight;
                    total_weight += rule.weight;
                    rule_explanations.push(ExplainedOutcome::Explained {
                        rule_type: rule.rule_type.clone(),
                        weight: rule.weight,
                        raw_score: explanation.score,
                        weighted_score: explanation.score * rule.weight,
                        reasoning: explanation.reasoning.clone(),
                        evidence: explanation.evidence.clone(),
                        confidence: explanation.confidence,
                        suggestions: explanation.suggestions.clone(),
                        params: rule.params.clone(),
                    });
                    explained.push((rule.rule_type.clone(), explanation));
                }
                Err(err) => {
                    tracing::warn!(
                        rule_type = %rule.rule_type,
                        error = %err,
                        "rule failed, excluding from aggregate"
                    );
                    rule_explanations.push(ExplainedOutcome::Failed(RuleFailure {
                        rule_type: rule.rule_type.clone(),
                        weight: rule.weight,
                        error: err.to_string(),
                        params: rule.params.clone(),
                    }));
                }
            }
        }

        let final_score = if total_weight > 0.0 {
            total_score / total_weight
        } else {
            0.0
        };

        let overall_feedback = synthesize_feedback(
            explained
                .iter()
                .map(|(rule_type, explanation)| (rule_type.as_str(), explanation)),
            final_score,
        );

        ScoreReport {
            total_score: final_score,
            total_weight,
            rule_explanations,
            overall_feedback,
        }
    }

    /// Parse a template from YAML, validating rule weights
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let template: Template = serde_yaml::from_str(yaml)?;
        for rule in &template.rules {
            if rule.weight < 0.0 {
                return Err(ClarityError::InvalidWeight {
                    rule_type: rule.rule_type.clone(),
                    weight: rule.weight,
                });
            }
        }
        Ok(template)
    }

    /// Serialize this template to YAML
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load a template from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ClarityError::TemplateNotFound {
                path: path.to_path_buf(),
            });
        }
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Save this template to a YAML file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_yaml_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::params;
    use serde_yaml::Value;

    fn phrase_rule(phrase: &str, weight: f64) -> Rule {
        Rule::new(
            "contains_phrase",
            weight,
            params([("phrase", Value::from(phrase))]),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_template_scores_zero() {
        let template = Template::new("empty");
        assert_eq!(template.evaluate("anything at all"), 0.0);
        let detailed = template.evaluate_detailed("anything at all");
        assert_eq!(detailed.total_score, 0.0);
        assert_eq!(detailed.total_weight, 0.0);
        assert!(detailed.rule_scores.is_empty());
    }

    #[test]
    fn test_weighted_mean_aggregation() {
        let mut template = Template::new("mixed");
        template.add_rule(phrase_rule("present", 2.0));
        template.add_rule(phrase_rule("absent", 1.0));
        // (1.0 * 2 + 0.0 * 1) / 3
        let score = template.evaluate("the word present appears here");
        assert!((score - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_failed_rule_excluded_from_denominator() {
        let mut template = Template::new("broken");
        template.add_rule(phrase_rule("helpful", 1.0));
        template.add_rule(Rule::new("no_such_rule", 5.0, Params::new()).unwrap());

        // Exclusion, not zeroing: score is 1/1, not 1/6.
        let detailed = template.evaluate_detailed("a helpful answer");
        assert_eq!(detailed.total_score, 1.0);
        assert_eq!(detailed.total_weight, 1.0);
        assert_eq!(detailed.rule_scores.len(), 2);
        match &detailed.rule_scores[1] {
            RuleOutcome::Failed(failure) => {
                assert_eq!(failure.rule_type, "no_such_rule");
                assert_eq!(failure.weight, 5.0);
                assert!(failure.error.contains("no_such_rule"));
            }
            other => panic!("expected failure entry, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_total_weight_scores_zero() {
        let mut template = Template::new("weightless");
        template.add_rule(phrase_rule("present", 0.0));
        let detailed = template.evaluate_detailed("present and accounted for");
        assert_eq!(detailed.total_score, 0.0);
        assert_eq!(detailed.total_weight, 0.0);
    }

    #[test]
    fn test_all_rules_failed_scores_zero() {
        let mut template = Template::new("all-broken");
        template.add_rule(Rule::new("no_such_rule", 1.0, Params::new()).unwrap());
        assert_eq!(template.evaluate("text"), 0.0);
    }

    #[test]
    fn test_evaluate_matches_detailed_total() {
        let mut template = Template::new("consistency");
        template.add_rule(phrase_rule("alpha", 1.5));
        template.add_rule(
            Rule::new(
                "word_count",
                1.0,
                params([("min_words", Value::from(2)), ("max_words", Value::from(20))]),
            )
            .unwrap(),
        );
        let text = "alpha beta gamma";
        assert_eq!(template.evaluate(text), template.evaluate_detailed(text).total_score);
    }

    #[test]
    fn test_explained_report_buckets_feedback() {
        let mut template = Template::new("feedback");
        template.add_rule(phrase_rule("helpful", 1.0));
        template.add_rule(phrase_rule("missing", 1.0));

        let report = template.evaluate_with_explanations("a helpful answer");
        assert!((report.total_score - 0.5).abs() < 1e-9);
        assert_eq!(report.rule_explanations.len(), 2);
        assert_eq!(report.overall_feedback.strengths.len(), 1);
        assert_eq!(report.overall_feedback.weaknesses.len(), 1);
        assert!(report
            .overall_feedback
            .score_interpretation
            .starts_with("Moderate"));
    }

    #[test]
    fn test_empty_template_report_names_the_gap() {
        let report = Template::new("empty").evaluate_with_explanations("text");
        assert_eq!(report.total_score, 0.0);
        assert_eq!(
            report.overall_feedback.weaknesses,
            vec!["No evaluation rules defined"]
        );
        assert_eq!(
            report.overall_feedback.suggestions,
            vec!["Add scoring rules to evaluate text quality"]
        );
        assert!(report
            .overall_feedback
            .score_interpretation
            .starts_with("Very Poor"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut template = Template::new("demo");
        template.description = "example".to_string();
        template.add_rule(phrase_rule("helpful", 2.0));
        template.add_rule(
            Rule::new(
                "word_count",
                1.0,
                params([("min_words", Value::from(10)), ("max_words", Value::from(50))]),
            )
            .unwrap(),
        );
        template.add_rule(Rule::new("argument_structure", 1.5, Params::new()).unwrap());

        let yaml = template.to_yaml_string().unwrap();
        let parsed = Template::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed.name, "demo");
        assert_eq!(parsed.description, "example");
        assert_eq!(parsed.rules.len(), 3);
        assert_eq!(parsed.rules[0].rule_type, "contains_phrase");
        assert_eq!(parsed.rules[1].weight, 1.0);
        assert_eq!(parsed.rules[2].rule_type, "argument_structure");

        let battery = [
            "",
            "short text",
            "this helpful answer uses enough words to satisfy the bounds of the count rule",
            "The premise is that caching helps. Therefore lookups get faster, \
             because repeated terms hit memory. In conclusion, the evidence \
             supports enabling it.",
        ];
        for text in battery {
            assert_eq!(template.evaluate(text), parsed.evaluate(text), "text: {text:?}");
        }
    }

    #[test]
    fn test_parse_defaults() {
        let template = Template::from_yaml_str(
            "rules:\n  - type: sentiment_positive\n",
        )
        .unwrap();
        assert_eq!(template.name, "default");
        assert_eq!(template.description, "");
        assert_eq!(template.rules[0].weight, 1.0);
    }

    #[test]
    fn test_negative_weight_rejected_at_load() {
        let err = Template::from_yaml_str(
            "name: bad\nrules:\n  - type: contains_phrase\n    weight: -2.0\n",
        )
        .unwrap_err();
        match err {
            ClarityError::InvalidWeight { rule_type, weight } => {
                assert_eq!(rule_type, "contains_phrase");
                assert_eq!(weight, -2.0);
            }
            other => panic!("expected InvalidWeight, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_path_is_typed_error() {
        let err = Template::load(Path::new("/nonexistent/template.yaml")).unwrap_err();
        assert!(matches!(err, ClarityError::TemplateNotFound { .. }));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deep/template.yaml");
        let mut template = Template::new("saved");
        template.add_rule(phrase_rule("x", 1.0));
        template.save(&path).unwrap();

        let loaded = Template::load(&path).unwrap();
        assert_eq!(loaded.name, "saved");
        assert_eq!(loaded.rules.len(), 1);
    }

    #[test]
    fn test_end_to_end_quality_scenario() {
        let mut template = Template::new("quality");
        template.add_rule(phrase_rule("helpful", 2.0));
        template.add_rule(
            Rule::new(
                "word_count",
                1.0,
                params([("min_words", Value::from(10)), ("max_words", Value::from(50))]),
            )
            .unwrap(),
        );
        template.add_rule(Rule::new("sentiment_positive", 1.5, Params::new()).unwrap());

        let text = "This helpful guide provides clear, step-by-step instructions with \
                    practical examples and actionable advice for success.";
        // phrase 2.0 + count 1.0 + sentiment 1.5 * 2/3 over weight 4.5
        let score = template.evaluate(text);
        assert!((score - 4.0 / 4.5).abs() < 1e-9);
        assert!(score > 0.8, "score was {}", score);
    }
}
