//! Vocabulary coverage rule: built-in categorized term sets

use crate::cache::{TermCache, DEFAULT_CAPACITY};
use crate::capability::CapabilitySet;
use crate::error::{ClarityError, Result};
use crate::explain::Explanation;
use crate::rules::{Evaluate, ParamReader, Params};
use crate::text;

use super::guard_no_content;

const COVERAGE_WEIGHT: f64 = 0.7;
const DENSITY_WEIGHT: f64 = 0.3;
const DENSITY_SCALE: f64 = 10.0;

const SECURITY_TERMS: [&str; 8] = [
    "encryption",
    "authentication",
    "vulnerability",
    "firewall",
    "access control",
    "threat",
    "audit",
    "compliance",
];
const LEGAL_TERMS: [&str; 8] = [
    "contract",
    "liability",
    "jurisdiction",
    "statute",
    "regulation",
    "clause",
    "indemnity",
    "compliance",
];
const MEDICAL_TERMS: [&str; 8] = [
    "diagnosis",
    "treatment",
    "dosage",
    "symptoms",
    "healthcare provider",
    "side effects",
    "clinical",
    "patient",
];
const FINANCIAL_TERMS: [&str; 8] = [
    "portfolio",
    "liquidity",
    "interest rate",
    "diversification",
    "asset",
    "equity",
    "balance sheet",
    "audit",
];
const ACCESSIBILITY_TERMS: [&str; 8] = [
    "screen reader",
    "alt text",
    "contrast",
    "keyboard navigation",
    "aria",
    "assistive",
    "captions",
    "wcag",
];

/// Built-in vocabulary categories and their term sets
pub fn builtin_categories() -> &'static [(&'static str, &'static [&'static str])] {
    &[
        ("security", &SECURITY_TERMS),
        ("legal", &LEGAL_TERMS),
        ("medical", &MEDICAL_TERMS),
        ("financial", &FINANCIAL_TERMS),
        ("accessibility", &ACCESSIBILITY_TERMS),
    ]
}

/// Scores how well the text covers the requested vocabulary
/// categories: category coverage dominates, raw term density adds a
/// smaller density component. Term lookups are memoized per instance.
#[derive(Debug)]
pub struct VocabularyCoverage {
    categories: Vec<(String, Vec<String>)>,
    cache: TermCache,
}

impl Evaluate for VocabularyCoverage {
    fn kind(&self) -> &'static str {
        "vocabulary_coverage"
    }

    fn explain(&self, text_input: &str) -> Result<Explanation> {
        if let Some(explanation) = guard_no_content(text_input) {
            return Ok(explanation);
        }

        let mut categories_hit = 0usize;
        let mut total_hits = 0usize;
        let mut category_evidence = Vec::new();
        let mut missing = Vec::new();

        for (name, terms) in &self.categories {
            let found = self.cache.find_terms(text_input, terms);
            if found.is_empty() {
                missing.push(name.clone());
            } else {
                categories_hit += 1;
                total_hits += found.len();
                category_evidence.push(format!("{}: {}", name, found.join(", ")));
            }
        }

        let word_count = text::word_count(text_input);
        let coverage = categories_hit as f64 / self.categories.len() as f64;
        let density = if word_count > 0 {
            (total_hits as f64 / word_count as f64 * DENSITY_SCALE).min(1.0)
        } else {
            0.0
        };
        let score = (COVERAGE_WEIGHT * coverage + DENSITY_WEIGHT * density).clamp(0.0, 1.0);

        let mut evidence = vec![
            format!(
                "Categories covered: {}/{}",
                categories_hit,
                self.categories.len()
            ),
            format!("Terms found: {}", total_hits),
        ];
        evidence.extend(category_evidence);

        let (reasoning, suggestions) = if score >= 0.7 {
            (
                "Text covers the requested vocabulary categories well".to_string(),
                Vec::new(),
            )
        } else if score >= 0.4 {
            (
                "Text covers some requested vocabulary categories".to_string(),
                missing
                    .iter()
                    .map(|name| format!("Add {} terminology", name))
                    .collect(),
            )
        } else {
            (
                "Text covers few of the requested vocabulary categories".to_string(),
                missing
                    .iter()
                    .map(|name| format!("Add {} terminology", name))
                    .collect(),
            )
        };

        Ok(Explanation {
            score,
            reasoning,
            evidence,
            confidence: 0.8,
            suggestions,
        })
    }
}

pub(crate) fn build_vocabulary_coverage(
    params: &Params,
    _caps: &CapabilitySet,
) -> Result<Box<dyn Evaluate>> {
    let reader = ParamReader::new("vocabulary_coverage", params);
    let requested = reader.opt_str_list("categories")?;

    let categories = match requested {
        None => builtin_categories()
            .iter()
            .map(|(name, terms)| {
                (
                    (*name).to_string(),
                    terms.iter().map(|t| (*t).to_string()).collect(),
                )
            })
            .collect(),
        Some(names) => {
            if names.is_empty() {
                return Err(ClarityError::invalid_rule(
                    "vocabulary_coverage",
                    "categories must not be empty",
                ));
            }
            let mut selected = Vec::with_capacity(names.len());
            for name in &names {
                let Some((_, terms)) = builtin_categories()
                    .iter()
                    .find(|(candidate, _)| candidate == name)
                else {
                    let known = builtin_categories()
                        .iter()
                        .map(|(candidate, _)| *candidate)
                        .collect::<Vec<_>>()
                        .join(", ");
                    return Err(ClarityError::invalid_rule(
                        "vocabulary_coverage",
                        format!("unknown category '{}' (known: {})", name, known),
                    ));
                };
                selected.push((
                    name.clone(),
                    terms.iter().map(|t| (*t).to_string()).collect(),
                ));
            }
            selected
        }
    };

    Ok(Box::new(VocabularyCoverage {
        categories,
        cache: TermCache::new(DEFAULT_CAPACITY),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::params;
    use serde_yaml::Value;

    fn rule_for(categories: &[&str]) -> Box<dyn Evaluate> {
        let values = Value::from(
            categories
                .iter()
                .map(|c| Value::from(*c))
                .collect::<Vec<_>>(),
        );
        build_vocabulary_coverage(
            &params([("categories", values)]),
            &CapabilitySet::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_unknown_category_rejected() {
        let err = build_vocabulary_coverage(
            &params([("categories", Value::from(vec![Value::from("nautical")]))]),
            &CapabilitySet::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ClarityError::InvalidRule { .. }));
        assert!(err.to_string().contains("nautical"));
        assert!(err.to_string().contains("security"));
    }

    #[test]
    fn test_empty_category_list_rejected() {
        let err = build_vocabulary_coverage(
            &params([("categories", Value::from(Vec::<Value>::new()))]),
            &CapabilitySet::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ClarityError::InvalidRule { .. }));
    }

    #[test]
    fn test_defaults_to_all_categories() {
        let rule = build_vocabulary_coverage(&Params::new(), &CapabilitySet::default()).unwrap();
        let explanation = rule.explain("encryption protects the patient portfolio").unwrap();
        assert!(explanation
            .evidence
            .contains(&"Categories covered: 3/5".to_string()));
    }

    #[test]
    fn test_full_coverage_scores_high() {
        let rule = rule_for(&["security", "accessibility"]);
        let text = "Enable encryption and audit logging; verify the screen reader \
                    announces alt text with sufficient contrast.";
        let explanation = rule.explain(text).unwrap();
        assert!(explanation.score >= 0.7, "score was {}", explanation.score);
        assert!(explanation
            .evidence
            .contains(&"Categories covered: 2/2".to_string()));
        assert!(explanation.suggestions.is_empty());
    }

    #[test]
    fn test_missing_category_suggested_by_name() {
        let rule = rule_for(&["security", "legal"]);
        let explanation = rule
            .explain("The firewall blocks each threat before authentication.")
            .unwrap();
        assert!(explanation
            .evidence
            .contains(&"Categories covered: 1/2".to_string()));
        assert!(explanation
            .suggestions
            .contains(&"Add legal terminology".to_string()));
    }

    #[test]
    fn test_no_coverage_scores_low() {
        let rule = rule_for(&["medical"]);
        let explanation = rule.explain("Sunny weather all week long.").unwrap();
        assert_eq!(explanation.score, 0.0);
        assert!(explanation.reasoning.contains("few"));
    }

    #[test]
    fn test_multiword_terms_match() {
        let rule = rule_for(&["financial"]);
        let explanation = rule
            .explain("Review the balance sheet before adjusting the interest rate.")
            .unwrap();
        assert!(explanation
            .evidence
            .iter()
            .any(|e| e.starts_with("financial:") && e.contains("balance sheet")));
    }
}
