//! Batch harness for the skillpath planner.
//!
//! Parses the command line, loads datasets and configuration through
//! `skillpath-state`, runs the engine and prints text or JSON.

mod cli;
mod commands;

pub use cli::{Cli, Commands, OutputFormat};

use anyhow::Result;
use clap::Parser;
use commands::{
    handle_gaps_command, handle_plan_command, handle_similar_command, handle_vectors_command,
};
use skillpath_state::Overrides;

/// Entry point used by the `skillpath` binary.
pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Plan {
            learner,
            goal,
            data_dir,
            strategy,
            order,
            format,
        } => handle_plan_command(
            &learner,
            &goal,
            Overrides {
                data_dir,
                strategy,
                order,
            },
            format,
        ),
        Commands::Gaps {
            learner,
            goal,
            format,
        } => handle_gaps_command(&learner, &goal, format),
        Commands::Similar {
            course,
            top,
            data_dir,
            format,
        } => handle_similar_command(&course, top, data_dir, format),
        Commands::Vectors { data_dir, format } => handle_vectors_command(data_dir, format),
    }
}
