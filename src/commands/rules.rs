//! `clarity rules` - list supported rule types

use crate::cli::Cli;
use clarity_core::capability::CapabilitySet;
use clarity_core::error::Result;
use clarity_core::format::OutputFormat;
use clarity_core::rules::rule_specs;

pub fn run(cli: &Cli) -> Result<()> {
    let caps = CapabilitySet::default();

    match cli.format {
        OutputFormat::Json => {
            let entries: Vec<_> = rule_specs()
                .iter()
                .map(|spec| {
                    serde_json::json!({
                        "type": spec.rule_type,
                        "advanced": spec.advanced,
                        "capability": spec.capability,
                        "available": capability_available(&caps, spec.capability),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Human => {
            for spec in rule_specs() {
                let mut line = spec.rule_type.to_string();
                if spec.advanced {
                    line.push_str(" (advanced)");
                }
                if let Some(capability) = spec.capability {
                    if capability_available(&caps, Some(capability)) {
                        line.push_str(&format!(" [requires {}]", capability));
                    } else {
                        line.push_str(&format!(" [requires {} - unavailable]", capability));
                    }
                }
                println!("{}", line);
            }
        }
    }

    Ok(())
}

fn capability_available(caps: &CapabilitySet, capability: Option<&str>) -> bool {
    match capability {
        None => true,
        Some("readability-metrics") => caps.readability().is_some(),
        Some("sentence-vectors") => caps.sentence_vectors().is_some(),
        Some(_) => false,
    }
}
