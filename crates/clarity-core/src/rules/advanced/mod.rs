//! Advanced rule evaluators
//!
//! These rules produce rich explanations directly and may depend on a
//! capability provider. Two contracts hold for every kind here:
//!
//! - empty or whitespace-only input returns `score = 0.0` at full
//!   confidence before any capability check;
//! - a missing capability returns the fixed low-confidence fallback
//!   explanation instead of an error.

mod argument;
mod citation;
mod coherence;
mod domain;
mod readability;
mod vocabulary;

pub(super) use argument::build_argument_structure;
pub(super) use citation::build_citation_quality;
pub(super) use coherence::build_semantic_coherence;
pub(super) use domain::build_domain_expertise;
pub(super) use readability::build_readability;
pub(super) use vocabulary::build_vocabulary_coverage;

pub use vocabulary::builtin_categories;

use crate::explain::Explanation;

/// Empty-input guard shared by all advanced rules
fn guard_no_content(text: &str) -> Option<Explanation> {
    if text.trim().is_empty() {
        Some(Explanation::no_content())
    } else {
        None
    }
}
