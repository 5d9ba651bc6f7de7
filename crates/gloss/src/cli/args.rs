//! Clap argument definitions for the `gloss` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Default output root for `gloss generate`.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "gloss")]
#[command(about = "Extract and refine terminology glossaries from business documents")]
pub struct Cli {
    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `gloss generate`.
#[derive(Args, Debug, Clone)]
pub struct GenerateCommand {
    /// Resources directory with one subdirectory per entity
    pub resources: PathBuf,

    /// Output directory for the per-entity artifacts
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,
}

/// Arguments for `gloss refine`.
#[derive(Args, Debug, Clone)]
pub struct RefineCommand {
    /// Output directory written by `gloss generate`
    pub output: PathBuf,
}

/// Arguments for `gloss inspect`.
#[derive(Args, Debug, Clone)]
pub struct InspectCommand {
    /// Document to inspect
    pub file: PathBuf,

    /// Entity name used by the entity rules [default: from the parent directory]
    #[arg(long)]
    pub entity: Option<String>,

    /// Show rejected candidates only
    #[arg(long)]
    pub rejected: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `gloss init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `gloss` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Extract glossaries for every entity in a resources directory
    #[command(after_help = "\
LAYOUT:
  <RESOURCES>/1_ExampleCo/report.pdf     one folder per entity
  <OUTPUT>/1_ExampleCo/wordList/wordList.txt
  <OUTPUT>/1_ExampleCo/metadata/wordList.jsonl
  <OUTPUT>/1_ExampleCo/worklog.md")]
    Generate(GenerateCommand),

    /// Re-filter generated glossaries in place
    Refine(RefineCommand),

    /// Show how gloss scores the candidates of one document
    Inspect(InspectCommand),

    /// Initialize gloss configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,
}

/// Parses CLI arguments, exiting with usage on error.
pub fn parse_cli() -> Cli {
    Cli::parse()
}
