//! Semantic coherence rule: topic consistency across sentences

use std::sync::Arc;

use crate::capability::{CapabilitySet, SentenceVectorProvider};
use crate::error::Result;
use crate::explain::Explanation;
use crate::rules::{Evaluate, Params};

use super::guard_no_content;

const HIGH_THRESHOLD: f64 = 0.7;
const MEDIUM_THRESHOLD: f64 = 0.4;

/// Scores the mean pairwise cosine similarity between sentence
/// vectors, scaled by 2 and clamped to [0, 1]. A single sentence is
/// not penalized: coherence is simply not applicable.
#[derive(Debug)]
pub struct SemanticCoherence {
    provider: Option<Arc<SentenceVectorProvider>>,
}

impl Evaluate for SemanticCoherence {
    fn kind(&self) -> &'static str {
        "semantic_coherence"
    }

    fn explain(&self, text: &str) -> Result<Explanation> {
        if let Some(explanation) = guard_no_content(text) {
            return Ok(explanation);
        }
        let Some(provider) = &self.provider else {
            return Ok(Explanation::missing_capability("sentence-vectors"));
        };

        let vectors = provider.sentence_vectors(text);
        if vectors.len() < 2 {
            return Ok(Explanation {
                score: 0.8,
                reasoning: "Single sentence - coherence not applicable".to_string(),
                evidence: vec![format!("Text contains {} sentence", vectors.len().max(1))],
                confidence: 0.9,
                suggestions: Vec::new(),
            });
        }

        let mut similarities = Vec::new();
        for i in 0..vectors.len() {
            for j in (i + 1)..vectors.len() {
                similarities.push(provider.cosine(&vectors[i], &vectors[j]));
            }
        }

        let average = similarities.iter().sum::<f64>() / similarities.len() as f64;
        let score = (average * 2.0).clamp(0.0, 1.0);
        let lowest = similarities.iter().cloned().fold(f64::INFINITY, f64::min);
        let highest = similarities.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let evidence = vec![
            format!("Average sentence similarity: {:.3}", average),
            format!("Number of sentences analyzed: {}", vectors.len()),
            format!("Similarity range: {:.3} - {:.3}", lowest, highest),
        ];

        let (reasoning, suggestions) = if score >= HIGH_THRESHOLD {
            (
                "Text shows strong semantic coherence between sentences".to_string(),
                Vec::new(),
            )
        } else if score >= MEDIUM_THRESHOLD {
            (
                "Text shows moderate semantic coherence with some topic drift".to_string(),
                vec![
                    "Strengthen connections between sentences".to_string(),
                    "Use more consistent terminology".to_string(),
                    "Add transitional phrases".to_string(),
                ],
            )
        } else {
            (
                "Text lacks semantic coherence - sentences seem disconnected".to_string(),
                vec![
                    "Focus on a single main topic".to_string(),
                    "Add clear topic sentences".to_string(),
                    "Remove off-topic content".to_string(),
                    "Use consistent vocabulary throughout".to_string(),
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

pub(crate) fn build_semantic_coherence(
    _params: &Params,
    caps: &CapabilitySet,
) -> Result<Box<dyn Evaluate>> {
    Ok(Box::new(SemanticCoherence {
        provider: caps.sentence_vectors(),
    }))
}
