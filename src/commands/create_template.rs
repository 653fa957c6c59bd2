//! `clarity create-template` - write a starter template file

use std::path::Path;

use serde_yaml::Value;

use crate::cli::Cli;
use clarity_core::error::Result;
use clarity_core::format::OutputFormat;
use clarity_core::rules::{params, Rule};
use clarity_core::template::Template;

pub fn run(cli: &Cli, name: &str, description: Option<&str>, output: &Path) -> Result<()> {
    let mut template = Template::new(name);
    template.description = description
        .map(str::to_string)
        .unwrap_or_else(|| format!("Template: {}", name));

    // Starter rules to edit
    template.add_rule(Rule::new(
        "contains_phrase",
        1.0,
        params([("phrase", Value::from("example"))]),
    )?);
    template.add_rule(Rule::new(
        "word_count",
        1.0,
        params([("min_words", Value::from(5)), ("max_words", Value::from(100))]),
    )?);

    template.save(output)?;

    match cli.format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "created": output.display().to_string(),
                "name": name,
                "rules": template.rules.len(),
            }))?
        ),
        OutputFormat::Human => {
            println!("Template created: {}", output.display());
            if !cli.quiet {
                println!("Edit the file to customize your scoring rules.");
            }
        }
    }

    Ok(())
}
