//! `shipwright show` command
//!
//! Selects one tool chain for a platform and prints the resulting tools.

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use crate::cli::ShowArgs;
use crate::commands::{find, load_registry};
use shipwright::core::os::OsFamily;
use shipwright::core::platform::TargetPlatform;

pub fn execute(args: ShowArgs, project: Option<&Path>) -> Result<()> {
    let registry = load_registry(project)?;
    let toolchain = find(&registry, &args.name)?;

    let platform = target_platform(&args);
    let view = toolchain.select(&platform)?;

    if args.json {
        let tools: Vec<_> = view
            .tools()
            .map(|tool| {
                let empty: [&str; 0] = [];
                let cmd = tool.command(empty);
                json!({
                    "kind": tool.kind().as_str(),
                    "executable": tool.executable(),
                    "args": cmd.args,
                    "env": cmd.env.into_iter().collect::<std::collections::BTreeMap<_, _>>(),
                    "located": view.locate(tool.kind()),
                })
            })
            .collect();

        let out = json!({
            "name": toolchain.name(),
            "display_name": toolchain.display_name(),
            "output_type": toolchain.output_type(),
            "platform": {
                "name": platform.name,
                "os": platform.os.as_str(),
                "arch": platform.arch,
            },
            "search_path": view.search_path(),
            "tools": tools,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", toolchain.display_name());
    println!("  Output type: {}", toolchain.output_type());
    println!("  Platform:    {}", platform);

    if !view.search_path().is_empty() {
        println!("  Search path:");
        for dir in view.search_path() {
            println!("    {}", dir.display());
        }
    }

    println!();
    println!("Tools:");
    for tool in view.tools() {
        let empty: [&str; 0] = [];
        let cmd = tool.command(empty);
        let mut line = format!("  {:<26} {}", tool.kind().as_str(), tool.executable());
        for arg in &cmd.args {
            line.push(' ');
            line.push_str(arg);
        }
        println!("{}", line);

        for (key, value) in &cmd.env {
            println!("  {:<26} {}={}", "", key, value);
        }

        match view.locate(tool.kind()) {
            Some(path) => println!("  {:<26} found at {}", "", path.display()),
            None => println!("  {:<26} not found", ""),
        }
    }

    Ok(())
}

fn target_platform(args: &ShowArgs) -> TargetPlatform {
    let host = TargetPlatform::host();
    let os = args
        .os
        .as_deref()
        .map(OsFamily::for_name)
        .unwrap_or(host.os);
    let arch = args.arch.clone().unwrap_or(host.arch.clone());

    match &args.platform {
        Some(name) => TargetPlatform::new(name.clone(), os, arch),
        None if args.os.is_none() && args.arch.is_none() => host,
        None => TargetPlatform::new(
            format!("{}_{}", os.as_str(), arch.replace('_', "-")),
            os,
            arch,
        ),
    }
}
