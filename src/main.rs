mod citations;
mod cli;
mod commands;
mod corpus;
mod diff;
mod export;
mod model;
mod normalize;
mod parser;
mod summary;
mod util;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Inventory(args) => commands::inventory::run(args),
        Commands::Normalize(args) => commands::normalize::run(args),
        Commands::Sections(args) => commands::sections::run(args),
        Commands::Citations(args) => commands::citations::run(args),
        Commands::Search(args) => commands::search::run(args),
        Commands::Compare(args) => commands::compare::run(args),
        Commands::Export(args) => commands::export::run(args),
        Commands::Summarize(args) => commands::summarize::run(args),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
