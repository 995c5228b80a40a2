use clap::{Parser, Subcommand, ValueEnum};
use skillpath_engine::{OptimizerStrategy, PathOrder};
use std::path::PathBuf;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Command-line interface for the `skillpath` application.
#[derive(Debug, Parser)]
#[command(
    name = "skillpath",
    version,
    about = "Plans time-budgeted learning paths toward career goals"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available `skillpath` commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Recommends an ordered course path for a learner and goal.
    Plan {
        /// Learner profile JSON file.
        #[arg(long, value_name = "FILE")]
        learner: PathBuf,
        /// Career goal JSON file.
        #[arg(long, value_name = "FILE")]
        goal: PathBuf,
        /// Directory holding catalog.json and demand.json (overrides `SKILLPATH_DATA_DIR`).
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,
        /// Optimizer: exact or compact (overrides `SKILLPATH_STRATEGY`).
        #[arg(long)]
        strategy: Option<OptimizerStrategy>,
        /// Path order: insertion or prerequisites (overrides `SKILLPATH_ORDER`).
        #[arg(long)]
        order: Option<PathOrder>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Shows the normalized skill gaps between a learner and a goal.
    Gaps {
        /// Learner profile JSON file.
        #[arg(long, value_name = "FILE")]
        learner: PathBuf,
        /// Career goal JSON file.
        #[arg(long, value_name = "FILE")]
        goal: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Lists the catalog courses most similar to a course.
    Similar {
        /// Course id to compare against.
        #[arg(long, value_name = "ID")]
        course: String,
        /// Number of courses to show.
        #[arg(long, default_value_t = 5)]
        top: usize,
        /// Directory holding catalog.json and demand.json (overrides `SKILLPATH_DATA_DIR`).
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Prints the skill feature vectors built from demand data.
    Vectors {
        /// Directory holding catalog.json and demand.json (overrides `SKILLPATH_DATA_DIR`).
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_plan_parses_strategy_and_order() {
        let cli = Cli::try_parse_from([
            "skillpath",
            "plan",
            "--learner",
            "l.json",
            "--goal",
            "g.json",
            "--strategy",
            "compact",
            "--order",
            "prerequisites",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Plan {
                strategy,
                order,
                format,
                data_dir,
                ..
            } => {
                assert_eq!(strategy, Some(OptimizerStrategy::Compact));
                assert_eq!(order, Some(PathOrder::Prerequisites));
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(data_dir, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let result = Cli::try_parse_from([
            "skillpath",
            "plan",
            "--learner",
            "l.json",
            "--goal",
            "g.json",
            "--strategy",
            "greedy",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_similar_defaults_to_top_five() {
        let cli = Cli::try_parse_from(["skillpath", "similar", "--course", "PY101"]).unwrap();
        assert!(matches!(cli.command, Commands::Similar { top: 5, .. }));
    }
}
