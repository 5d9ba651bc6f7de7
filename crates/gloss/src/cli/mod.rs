//! CLI support for the `gloss` binary.

pub mod args;
pub mod commands;
pub mod context;

pub use args::parse_cli;
pub use context::CommandContext;
