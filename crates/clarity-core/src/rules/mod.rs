//! Rule data model, evaluation dispatch, and the rule registry
//!
//! A [`Rule`] is a declarative unit: a type tag, a non-negative
//! weight, and a parameter map. The registry maps type tags to
//! builders that validate parameters and return a boxed evaluator.
//! Builders run lazily on first evaluation, so a template holding an
//! unknown rule type loads fine and fails only when that rule is
//! evaluated - the aggregator isolates the failure.

pub mod advanced;
pub mod basic;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::capability::CapabilitySet;
use crate::error::{ClarityError, Result};
use crate::explain::Explanation;

/// Rule parameters: string keys to YAML scalars/sequences
pub type Params = BTreeMap<String, Value>;

/// Build a parameter map from key/value pairs
pub fn params<I, V>(entries: I) -> Params
where
    I: IntoIterator<Item = (&'static str, V)>,
    V: Into<Value>,
{
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.into()))
        .collect()
}

/// A constructed rule evaluator.
///
/// `explain` is the primary entry point; `evaluate` derives the
/// scalar from it. Implementations must return scores in [0.0, 1.0].
pub trait Evaluate: fmt::Debug + Send + Sync {
    /// The rule's type tag
    fn kind(&self) -> &'static str;

    /// Evaluate and justify the score
    fn explain(&self, text: &str) -> Result<Explanation>;

    /// Evaluate to a scalar score
    fn evaluate(&self, text: &str) -> Result<f64> {
        Ok(self.explain(text)?.score)
    }
}

type Builder = fn(&Params, &CapabilitySet) -> Result<Box<dyn Evaluate>>;

/// Registry entry for one rule kind
pub struct RuleSpec {
    /// Type tag
    pub rule_type: &'static str,
    /// Capability the rule degrades without, if any
    pub capability: Option<&'static str>,
    /// Whether the rule produces rich explanations directly
    pub advanced: bool,
    builder: Builder,
}

static REGISTRY: OnceLock<Vec<RuleSpec>> = OnceLock::new();

/// All registered rule kinds, in display order
pub fn rule_specs() -> &'static [RuleSpec] {
    REGISTRY.get_or_init(|| {
        vec![
            RuleSpec {
                rule_type: "contains_phrase",
                capability: None,
                advanced: false,
                builder: basic::build_contains_phrase,
            },
            RuleSpec {
                rule_type: "regex_match",
                capability: None,
                advanced: false,
                builder: basic::build_regex_match,
            },
            RuleSpec {
                rule_type: "word_count",
                capability: None,
                advanced: false,
                builder: basic::build_word_count,
            },
            RuleSpec {
                rule_type: "sentiment_positive",
                capability: None,
                advanced: false,
                builder: basic::build_sentiment_positive,
            },
            RuleSpec {
                rule_type: "cosine_sim",
                capability: None,
                advanced: false,
                builder: basic::build_cosine_sim,
            },
            RuleSpec {
                rule_type: "readability",
                capability: Some("readability-metrics"),
                advanced: true,
                builder: advanced::build_readability,
            },
            RuleSpec {
                rule_type: "semantic_coherence",
                capability: Some("sentence-vectors"),
                advanced: true,
                builder: advanced::build_semantic_coherence,
            },
            RuleSpec {
                rule_type: "argument_structure",
                capability: None,
                advanced: true,
                builder: advanced::build_argument_structure,
            },
            RuleSpec {
                rule_type: "domain_expertise",
                capability: None,
                advanced: true,
                builder: advanced::build_domain_expertise,
            },
            RuleSpec {
                rule_type: "citation_quality",
                capability: None,
                advanced: true,
                builder: advanced::build_citation_quality,
            },
            RuleSpec {
                rule_type: "vocabulary_coverage",
                capability: None,
                advanced: true,
                builder: advanced::build_vocabulary_coverage,
            },
        ]
    })
}

/// Type tags of all registered rule kinds
pub fn supported_types() -> Vec<&'static str> {
    rule_specs().iter().map(|spec| spec.rule_type).collect()
}

/// Construct an evaluator for a type tag, validating parameters
pub fn build(rule_type: &str, params: &Params, caps: &CapabilitySet) -> Result<Box<dyn Evaluate>> {
    let spec = rule_specs()
        .iter()
        .find(|spec| spec.rule_type == rule_type)
        .ok_or_else(|| ClarityError::UnknownRuleType {
            rule_type: rule_type.to_string(),
            supported: supported_types().join(", "),
        })?;
    (spec.builder)(params, caps)
}

/// A single scoring rule: type tag, weight, parameters.
///
/// The evaluator is built lazily on first use and cached for the
/// lifetime of the rule, so capability initialization happens once
/// per rule instance, not once per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Type tag resolved through the registry
    #[serde(rename = "type")]
    pub rule_type: String,
    /// Non-negative contribution weight
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Rule-specific parameters
    #[serde(default)]
    pub params: Params,
    #[serde(skip)]
    evaluator: OnceLock<Arc<dyn Evaluate>>,
}

fn default_weight() -> f64 {
    1.0
}

impl Rule {
    /// Create a rule. Negative weight is rejected immediately.
    pub fn new(rule_type: impl Into<String>, weight: f64, params: Params) -> Result<Self> {
        let rule_type = rule_type.into();
        if weight < 0.0 {
            return Err(ClarityError::InvalidWeight { rule_type, weight });
        }
        Ok(Self {
            rule_type,
            weight,
            params,
            evaluator: OnceLock::new(),
        })
    }

    fn evaluator(&self, caps: &CapabilitySet) -> Result<Arc<dyn Evaluate>> {
        if let Some(evaluator) = self.evaluator.get() {
            return Ok(evaluator.clone());
        }
        // Failed construction is not cached; unknown types and bad
        // params re-report on every call, which the aggregator isolates.
        let built: Arc<dyn Evaluate> = build(&self.rule_type, &self.params, caps)?.into();
        Ok(self.evaluator.get_or_init(|| built).clone())
    }

    /// Evaluate this rule against the text, returning a score in [0.0, 1.0]
    pub fn evaluate(&self, text: &str, caps: &CapabilitySet) -> Result<f64> {
        self.evaluator(caps)?.evaluate(text)
    }

    /// Evaluate with a structured explanation
    pub fn explain(&self, text: &str, caps: &CapabilitySet) -> Result<Explanation> {
        self.evaluator(caps)?.explain(text)
    }
}

/// Typed access to a rule's parameter map, reporting construction
/// errors against the owning rule type.
pub(crate) struct ParamReader<'a> {
    rule_type: &'static str,
    params: &'a Params,
}

impl<'a> ParamReader<'a> {
    pub fn new(rule_type: &'static str, params: &'a Params) -> Self {
        Self { rule_type, params }
    }

    pub fn has(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn opt_str(&self, key: &str) -> Result<Option<String>> {
        match self.params.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| self.type_error(key, "a string")),
        }
    }

    pub fn required_str(&self, key: &str) -> Result<String> {
        self.opt_str(key)?
            .ok_or_else(|| self.missing_error(key))
    }

    pub fn opt_f64(&self, key: &str) -> Result<Option<f64>> {
        match self.params.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.type_error(key, "a number")),
        }
    }

    pub fn opt_usize(&self, key: &str) -> Result<Option<usize>> {
        match self.params.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .map(|n| Some(n as usize))
                .ok_or_else(|| self.type_error(key, "a non-negative integer")),
        }
    }

    pub fn opt_str_list(&self, key: &str) -> Result<Option<Vec<String>>> {
        match self.params.get(key) {
            None => Ok(None),
            Some(value) => {
                let sequence = value
                    .as_sequence()
                    .ok_or_else(|| self.type_error(key, "a list of strings"))?;
                let mut items = Vec::with_capacity(sequence.len());
                for item in sequence {
                    let s = item
                        .as_str()
                        .ok_or_else(|| self.type_error(key, "a list of strings"))?;
                    items.push(s.to_string());
                }
                Ok(Some(items))
            }
        }
    }

    fn missing_error(&self, key: &str) -> ClarityError {
        ClarityError::invalid_rule(self.rule_type, format!("missing required param: {}", key))
    }

    fn type_error(&self, key: &str, expected: &str) -> ClarityError {
        ClarityError::invalid_rule(
            self.rule_type,
            format!("param {} must be {}", key, expected),
        )
    }
}
