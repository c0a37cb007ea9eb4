//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Shipwright - Inspect the native tool chains declared for a project
#[derive(Parser)]
#[command(name = "shipwright")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Project directory (defaults to current directory)
    #[arg(long, global = true, env = "SHIPWRIGHT_PROJECT")]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List declared tool chains
    List(ListArgs),

    /// Show a tool chain configured for a platform
    Show(ShowArgs),

    /// Show the artifact file names for a base name
    Names(NamesArgs),

    /// Classify a Swift compiler version
    SwiftVersion(SwiftVersionArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Tool chain name
    pub name: String,

    /// Target platform name (defaults to the host platform)
    #[arg(long)]
    pub platform: Option<String>,

    /// Target platform operating system (defaults to the host)
    #[arg(long)]
    pub os: Option<String>,

    /// Target platform architecture (defaults to the host)
    #[arg(long)]
    pub arch: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct NamesArgs {
    /// Base artifact name (e.g. `foo` or `lib/foo`)
    pub base: String,

    /// Use the naming of a declared tool chain
    #[arg(long, conflicts_with = "os")]
    pub toolchain: Option<String>,

    /// Use the naming of an operating system (defaults to the host)
    #[arg(long)]
    pub os: Option<String>,
}

#[derive(Args)]
pub struct SwiftVersionArgs {
    /// Compiler version (e.g. `4.2.1` or `5`)
    pub version: String,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
