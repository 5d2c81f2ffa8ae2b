//! archlint CLI tool.
//!
//! Usage:
//! ```bash
//! archlint check [OPTIONS] <FILE>
//! archlint list-rules
//! archlint init
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

use commands::check::{CheckArgs, FailOn};

/// Linter for declarative architecture descriptions
#[derive(Parser)]
#[command(name = "archlint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to rule-set file (YAML or TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an architecture file and run rules against it
    Check {
        /// Architecture YAML file
        file: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Lowest severity that makes the command fail
        #[arg(long, default_value = "error")]
        fail_on: FailOn,

        /// Only run specific rules (comma-separated identifiers)
        #[arg(long, value_delimiter = ',')]
        rules: Vec<String>,
    },

    /// List available rules
    ListRules,

    /// Write a starter rule-set file
    Init {
        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

/// Output format for findings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated lines.
    #[default]
    Text,
    /// JSON array.
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "debug" } else { "warn" })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check {
            file,
            format,
            fail_on,
            rules,
        } => commands::check::run(&CheckArgs {
            file,
            format,
            fail_on,
            rules,
            config: cli.config,
        })
        .map(|failed| {
            if failed {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }),
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { force } => commands::init::run(force).map(|()| ExitCode::SUCCESS),
    };

    result.unwrap_or_else(|err| {
        commands::output::print_error(&err);
        ExitCode::from(2)
    })
}
