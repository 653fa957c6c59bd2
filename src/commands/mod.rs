//! Command implementations for clarity

pub mod create_template;
pub mod dispatch;
pub mod rules;
pub mod score;
