//! `shipwright list` command

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use crate::cli::ListArgs;
use crate::commands::load_registry;
use shipwright::util::diagnostic::suggestions;

pub fn execute(args: ListArgs, project: Option<&Path>) -> Result<()> {
    let registry = load_registry(project)?;

    if args.json {
        let chains: Vec<_> = registry
            .iter()
            .map(|tc| {
                json!({
                    "name": tc.name(),
                    "type": tc.type_name(),
                    "display_name": tc.display_name(),
                    "output_type": tc.output_type(),
                    "os": tc.operating_system().name(),
                    "targets": tc.targets(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&chains)?);
        return Ok(());
    }

    if registry.is_empty() {
        eprintln!("No tool chains declared");
        eprintln!("{}", suggestions::NO_TOOLCHAINS);
        return Ok(());
    }

    for tc in registry.iter() {
        let targets = if tc.targets().is_empty() {
            "any platform".to_string()
        } else {
            tc.targets().join(", ")
        };
        println!(
            "{:<16} {:<16} {:<20} {}",
            tc.name(),
            tc.type_name(),
            tc.output_type(),
            targets
        );
    }

    Ok(())
}
