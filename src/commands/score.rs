//! `clarity score` - score text against a template

use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::cli::Cli;
use clarity_core::error::{ClarityError, Result};
use clarity_core::format::OutputFormat;
use clarity_core::template::{ExplainedOutcome, RuleOutcome, Template};

pub fn run(
    cli: &Cli,
    text_file: Option<&Path>,
    text: Option<&str>,
    template_path: &Path,
    detailed: bool,
    explain: bool,
    start: Instant,
) -> Result<()> {
    let text = read_input(text_file, text)?;
    let template = Template::load(template_path)?;

    tracing::debug!(
        template = %template.name,
        rules = template.rules.len(),
        elapsed = ?start.elapsed(),
        "load_template"
    );

    if explain {
        let report = template.evaluate_with_explanations(&text);
        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Human => print_report(cli, &report),
        }
    } else if detailed {
        let result = template.evaluate_detailed(&text);
        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            OutputFormat::Human => {
                println!("Overall Score: {:.3}", result.total_score);
                println!("Total Weight: {}", result.total_weight);
                if !cli.quiet {
                    println!();
                    println!("Rule Breakdown:");
                    for outcome in &result.rule_scores {
                        match outcome {
                            RuleOutcome::Scored(breakdown) => println!(
                                "  {} (weight: {}): {:.3} -> {:.3}",
                                breakdown.rule_type,
                                breakdown.weight,
                                breakdown.raw_score,
                                breakdown.weighted_score
                            ),
                            RuleOutcome::Failed(failure) => println!(
                                "  {} (weight: {}): ERROR - {}",
                                failure.rule_type, failure.weight, failure.error
                            ),
                        }
                    }
                }
            }
        }
    } else {
        let score = template.evaluate(&text);
        match cli.format {
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "score": score }))?
            ),
            OutputFormat::Human => println!("Score: {:.3}", score),
        }
    }

    tracing::debug!(elapsed = ?start.elapsed(), "score");
    Ok(())
}

fn read_input(text_file: Option<&Path>, text: Option<&str>) -> Result<String> {
    match (text_file, text) {
        (Some(path), _) => {
            if !path.exists() {
                return Err(ClarityError::not_found("text file", path.display()));
            }
            Ok(fs::read_to_string(path)?.trim().to_string())
        }
        (None, Some(text)) => Ok(text.to_string()),
        (None, None) => Err(ClarityError::UsageError(
            "must provide either a text file or --text".to_string(),
        )),
    }
}

fn print_report(cli: &Cli, report: &clarity_core::template::ScoreReport) {
    println!("Overall Score: {:.3}", report.total_score);
    println!("{}", report.overall_feedback.score_interpretation);
    if cli.quiet {
        return;
    }

    if !report.overall_feedback.strengths.is_empty() {
        println!();
        println!("Strengths:");
        for strength in &report.overall_feedback.strengths {
            println!("  + {}", strength);
        }
    }
    if !report.overall_feedback.weaknesses.is_empty() {
        println!();
        println!("Weaknesses:");
        for weakness in &report.overall_feedback.weaknesses {
            println!("  - {}", weakness);
        }
    }
    if !report.overall_feedback.suggestions.is_empty() {
        println!();
        println!("Suggestions:");
        for suggestion in &report.overall_feedback.suggestions {
            println!("  * {}", suggestion);
        }
    }

    println!();
    println!("Rule Explanations:");
    for outcome in &report.rule_explanations {
        match outcome {
            ExplainedOutcome::Explained {
                rule_type,
                weight,
                raw_score,
                reasoning,
                evidence,
                confidence,
                ..
            } => {
                println!(
                    "  {} (weight: {}): {:.3} [confidence {:.1}]",
                    rule_type, weight, raw_score, confidence
                );
                println!("    {}", reasoning);
                for item in evidence {
                    println!("    - {}", item);
                }
            }
            ExplainedOutcome::Failed(failure) => println!(
                "  {} (weight: {}): ERROR - {}",
                failure.rule_type, failure.weight, failure.error
            ),
        }
    }
}
