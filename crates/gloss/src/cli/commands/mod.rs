//! Command implementations and dispatch.

pub mod config;
pub mod generate;
pub mod init;
pub mod inspect;
pub mod refine;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Generate(cmd) => generate::run(ctx, &cmd),
        Commands::Refine(cmd) => refine::run(ctx, &cmd),
        Commands::Inspect(cmd) => inspect::run(ctx, &cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
    }
}
