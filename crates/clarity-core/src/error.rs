//! Error types and exit codes for clarity
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (missing template, parse error, invalid weight, I/O)
//! - 2: Usage error (bad flags/args)
//!
//! Rule-level evaluation failures never surface here: the aggregator
//! converts them into error entries in detailed/explained output.

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the clarity CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during clarity operations
#[derive(Error, Debug)]
pub enum ClarityError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    // Template errors (exit code 1)
    #[error("template file not found: {path:?}")]
    TemplateNotFound { path: PathBuf },

    #[error("rule weight must be non-negative: {rule_type} has weight {weight}")]
    InvalidWeight { rule_type: String, weight: f64 },

    #[error("unknown rule type: {rule_type} (supported: {supported})")]
    UnknownRuleType { rule_type: String, supported: String },

    #[error("invalid {rule_type} rule: {reason}")]
    InvalidRule { rule_type: String, reason: String },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl ClarityError {
    /// Create an error for invalid rule parameters
    pub fn invalid_rule(rule_type: &str, reason: impl std::fmt::Display) -> Self {
        ClarityError::InvalidRule {
            rule_type: rule_type.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        ClarityError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ClarityError::UnknownFormat(_) | ClarityError::UsageError(_) => ExitCode::Usage,

            ClarityError::TemplateNotFound { .. }
            | ClarityError::InvalidWeight { .. }
            | ClarityError::UnknownRuleType { .. }
            | ClarityError::InvalidRule { .. }
            | ClarityError::NotFound { .. }
            | ClarityError::Io(_)
            | ClarityError::Yaml(_)
            | ClarityError::Json(_)
            | ClarityError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier for structured output
    fn error_type(&self) -> &'static str {
        match self {
            ClarityError::UnknownFormat(_) => "unknown_format",
            ClarityError::UsageError(_) => "usage_error",
            ClarityError::TemplateNotFound { .. } => "template_not_found",
            ClarityError::InvalidWeight { .. } => "invalid_weight",
            ClarityError::UnknownRuleType { .. } => "unknown_rule_type",
            ClarityError::InvalidRule { .. } => "invalid_rule",
            ClarityError::NotFound { .. } => "not_found",
            ClarityError::Io(_) => "io_error",
            ClarityError::Yaml(_) => "yaml_error",
            ClarityError::Json(_) => "json_error",
            ClarityError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for clarity operations
pub type Result<T> = std::result::Result<T, ClarityError>;
