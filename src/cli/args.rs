//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Cachet asset publisher CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Template source directory (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub template: Option<PathBuf>,

    /// Config file path (default: cachet.toml)
    #[arg(short = 'C', long, default_value = "cachet.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Fingerprint assets and publish them into the output root
    #[command(visible_alias = "p")]
    Publish {
        #[command(flatten)]
        publish_args: PublishArgs,
    },
}

/// Publish command arguments
#[derive(clap::Args, Debug, Clone)]
pub struct PublishArgs {
    /// Environment root directory containing the compiled bundle
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub env: Option<PathBuf>,

    /// Entry-point filename inside the template directory
    #[arg(short, long)]
    pub entry_point: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}
