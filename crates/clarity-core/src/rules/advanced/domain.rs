//! Domain expertise rule: configured terminology coverage and density

use crate::cache::{TermCache, DEFAULT_CAPACITY};
use crate::capability::CapabilitySet;
use crate::error::Result;
use crate::explain::Explanation;
use crate::rules::{Evaluate, ParamReader, Params};
use crate::text;

use super::guard_no_content;

/// Density contribution is scaled up before averaging with coverage
const DENSITY_SCALE: f64 = 10.0;

/// Scores how strongly the text signals expertise in a configured
/// domain: the average of term-set coverage and scaled term density.
/// Term lookups are memoized per rule instance.
#[derive(Debug)]
pub struct DomainExpertise {
    domain: String,
    expertise_terms: Vec<String>,
    cache: TermCache,
}

impl Evaluate for DomainExpertise {
    fn kind(&self) -> &'static str {
        "domain_expertise"
    }

    fn explain(&self, text_input: &str) -> Result<Explanation> {
        if let Some(explanation) = guard_no_content(text_input) {
            return Ok(explanation);
        }

        if self.expertise_terms.is_empty() {
            return Ok(Explanation {
                score: 0.5,
                reasoning: "No domain expertise terms specified".to_string(),
                evidence: vec!["Default scoring applied".to_string()],
                confidence: 0.1,
                suggestions: vec!["Configure domain-specific expertise terms".to_string()],
            });
        }

        let found = self.cache.find_terms(text_input, &self.expertise_terms);
        let word_count = text::word_count(text_input);
        let term_density = if word_count > 0 {
            found.len() as f64 / word_count as f64
        } else {
            0.0
        };
        let coverage = found.len() as f64 / self.expertise_terms.len() as f64;
        let score = ((term_density * DENSITY_SCALE + coverage) / 2.0).min(1.0);

        let evidence = vec![
            format!(
                "Domain expertise terms found: {}/{}",
                found.len(),
                self.expertise_terms.len()
            ),
            format!("Term density: {:.4}", term_density),
            format!(
                "Found terms: {}",
                if found.is_empty() {
                    "None".to_string()
                } else {
                    found.join(", ")
                }
            ),
        ];

        let (reasoning, suggestions) = if score >= 0.7 {
            (
                format!("Text demonstrates strong {} domain expertise", self.domain),
                Vec::new(),
            )
        } else if score >= 0.4 {
            (
                format!("Text shows moderate {} domain knowledge", self.domain),
                vec![
                    format!("Include more {}-specific terminology", self.domain),
                    "Demonstrate deeper technical understanding".to_string(),
                    "Reference domain-specific concepts or frameworks".to_string(),
                ],
            )
        } else {
            (
                format!("Text lacks {} domain expertise indicators", self.domain),
                vec![
                    format!("Research and include {}-specific terms", self.domain),
                    "Consult domain experts for technical accuracy".to_string(),
                    "Add technical depth and specificity".to_string(),
                ],
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

pub(crate) fn build_domain_expertise(
    params: &Params,
    _caps: &CapabilitySet,
) -> Result<Box<dyn Evaluate>> {
    let reader = ParamReader::new("domain_expertise", params);
    let domain = reader.opt_str("domain")?.unwrap_or_else(|| "general".to_string());
    let expertise_terms = reader.opt_str_list("expertise_terms")?.unwrap_or_default();
    Ok(Box::new(DomainExpertise {
        domain,
        expertise_terms,
        cache: TermCache::new(DEFAULT_CAPACITY),
    }))
}
