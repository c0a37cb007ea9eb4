//! Shipwright CLI - Inspect native tool chain declarations

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use shipwright::util::diagnostic;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli) {
        diagnostic::emit(&diagnostic::from_error(&e), color);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("shipwright=debug")
    } else {
        EnvFilter::new("shipwright=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let project = cli.project;

    // Execute command
    match cli.command {
        Commands::List(args) => commands::list::execute(args, project.as_deref()),
        Commands::Show(args) => commands::show::execute(args, project.as_deref()),
        Commands::Names(args) => commands::names::execute(args, project.as_deref()),
        Commands::SwiftVersion(args) => commands::swift_version::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
