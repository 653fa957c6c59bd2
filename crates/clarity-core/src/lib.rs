//! Clarity Core Library
//!
//! Rubric scoring engine: weighted declarative rules evaluated against
//! text, producing a normalized score with structured explanations.

pub mod cache;
pub mod capability;
pub mod error;
pub mod explain;
pub mod format;
pub mod logging;
pub mod rules;
pub mod scorer;
pub mod template;
pub mod text;

pub use error::{ClarityError, Result};
pub use scorer::{score, score_detailed, score_with_explanations, TemplateSource};
pub use template::Template;
