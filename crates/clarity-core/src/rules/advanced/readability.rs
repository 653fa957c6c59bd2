//! Readability rule: grade-level proximity scoring

use std::sync::Arc;

use crate::capability::{CapabilitySet, ReadabilityProvider};
use crate::error::{ClarityError, Result};
use crate::explain::Explanation;
use crate::rules::{Evaluate, ParamReader, Params};

use super::guard_no_content;

const DEFAULT_TARGET_GRADE: f64 = 8.0;
const DEFAULT_TOLERANCE: f64 = 2.0;

/// Scores how close the text's Flesch-Kincaid grade level sits to a
/// target audience grade. Within tolerance the score decays gently
/// (down to 0.7 at the tolerance edge), beyond it steeply.
#[derive(Debug)]
pub struct Readability {
    target_grade: f64,
    tolerance: f64,
    provider: Option<Arc<ReadabilityProvider>>,
}

impl Evaluate for Readability {
    fn kind(&self) -> &'static str {
        "readability"
    }

    fn explain(&self, text: &str) -> Result<Explanation> {
        if let Some(explanation) = guard_no_content(text) {
            return Ok(explanation);
        }
        let Some(provider) = &self.provider else {
            return Ok(Explanation::missing_capability("readability-metrics"));
        };

        let flesch_score = provider.flesch_reading_ease(text);
        let grade = provider.flesch_kincaid_grade(text);
        let grade_diff = (grade - self.target_grade).abs();

        let score = if grade_diff <= self.tolerance {
            1.0 - (grade_diff / self.tolerance) * 0.3
        } else {
            (0.7 - (grade_diff - self.tolerance) * 0.1).max(0.0)
        };

        let evidence = vec![
            format!("Flesch Reading Ease: {:.1}", flesch_score),
            format!("Flesch-Kincaid Grade Level: {:.1}", grade),
            format!("Target Grade Level: {}", self.target_grade),
        ];

        let (reasoning, suggestions) = if grade_diff <= self.tolerance {
            (
                format!(
                    "Text readability is appropriate for target audience (grade {})",
                    self.target_grade
                ),
                Vec::new(),
            )
        } else if grade > self.target_grade {
            (
                format!(
                    "Text is too complex for target audience (grade {:.1} vs {})",
                    grade, self.target_grade
                ),
                vec![
                    "Use shorter sentences".to_string(),
                    "Replace complex words with simpler alternatives".to_string(),
                    "Break up long paragraphs".to_string(),
                ],
            )
        } else {
            (
                format!(
                    "Text may be too simple for target audience (grade {:.1} vs {})",
                    grade, self.target_grade
                ),
                vec![
                    "Add more sophisticated vocabulary".to_string(),
                    "Include more complex sentence structures".to_string(),
                    "Provide deeper analysis".to_string(),
                ],
            )
        };

        Ok(Explanation {
            score: score.clamp(0.0, 1.0),
            reasoning,
            evidence,
            confidence: 0.9,
            suggestions,
        })
    }
}

pub(crate) fn build_readability(params: &Params, caps: &CapabilitySet) -> Result<Box<dyn Evaluate>> {
    let reader = ParamReader::new("readability", params);
    let target_grade = reader
        .opt_f64("target_grade_level")?
        .unwrap_or(DEFAULT_TARGET_GRADE);
    let tolerance = reader.opt_f64("tolerance")?.unwrap_or(DEFAULT_TOLERANCE);
    if tolerance <= 0.0 {
        return Err(ClarityError::invalid_rule(
            "readability",
            "tolerance must be positive",
        ));
    }
    Ok(Box::new(Readability {
        target_grade,
        tolerance,
        provider: caps.readability(),
    }))
}
