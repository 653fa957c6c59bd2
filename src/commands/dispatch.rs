//! Command dispatch logic for clarity

use std::time::Instant;

use crate::cli::{Cli, Commands};
use crate::commands;
use clarity_core::error::{ClarityError, Result};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    match &cli.command {
        None => Err(ClarityError::UsageError(
            "no command provided (see --help)".to_string(),
        )),

        Some(Commands::Score {
            text_file,
            text,
            template,
            detailed,
            explain,
        }) => commands::score::run(
            cli,
            text_file.as_deref(),
            text.as_deref(),
            template,
            *detailed,
            *explain,
            start,
        ),

        Some(Commands::CreateTemplate {
            name,
            description,
            output,
        }) => commands::create_template::run(cli, name, description.as_deref(), output),

        Some(Commands::Rules) => commands::rules::run(cli),
    }
}
