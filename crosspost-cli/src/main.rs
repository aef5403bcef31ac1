//! Crosspost — publish a website's articles to Medium as drafts.
//!
//! # Usage
//!
//! ```text
//! crosspost run [--env-file <path>] [--dry-run]
//! crosspost status [--env-file <path>] [--json]
//! ```
//!
//! Configuration comes from environment variables, optionally loaded from an
//! env file; see `crosspost-core::config` for the recognized names.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{run::RunArgs, status::StatusArgs};

#[derive(Parser, Debug)]
#[command(
    name = "crosspost",
    version,
    about = "Cross-post website articles to Medium as drafts",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Publish every index article that has no publish record yet.
    Run(RunArgs),

    /// Show the published records currently in the state store.
    Status(StatusArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => args.run(),
        Commands::Status(args) => args.run(),
    }
}
