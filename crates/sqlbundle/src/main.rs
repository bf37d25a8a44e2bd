//! sqlbundle command-line interface
//!
//! Subcommands:
//! - `build`: bundle every `.sql` file under a root into one aggregate
//! - `scan`: preview which files a build would include
//! - `config`: show resolved paths

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

mod cli;

#[derive(Parser, Debug)]
#[command(name = "sqlbundle", about = "Bundle .sql files into a single aggregate")]
struct Cli {
    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Bundle every .sql file under a root directory into one aggregate
    Build {
        /// Directory containing the .sql sources
        root: PathBuf,

        /// Name of the aggregate file, written into the root
        #[arg(short = 'o', long, default_value = sqlbundle::DEFAULT_OUTPUT_NAME)]
        output: String,

        /// Verify the existing aggregate instead of writing it
        #[arg(long)]
        check: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Suppress non-error output
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the .sql files a build would include (nothing is written)
    Scan {
        /// Directory to scan
        root: PathBuf,

        /// Aggregate filename to exclude from discovery
        #[arg(short = 'o', long, default_value = sqlbundle::DEFAULT_OUTPUT_NAME)]
        output: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Show statistics summary only
        #[arg(long)]
        stats: bool,

        /// Output file paths only (quiet mode)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show current configuration and paths
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn command_wants_json(command: &Commands) -> bool {
    match command {
        Commands::Build { json, .. } => *json,
        Commands::Scan { json, .. } => *json,
        Commands::Config { json } => *json,
    }
}

fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Build {
            root,
            output,
            check,
            json,
            quiet,
        } => cli::build::run(cli::build::BuildArgs {
            root,
            output,
            check,
            json,
            quiet,
        }),

        Commands::Scan {
            root,
            output,
            json,
            stats,
            quiet,
        } => cli::scan::run(cli::scan::ScanArgs {
            root,
            output,
            json,
            stats,
            quiet,
        }),

        Commands::Config { json } => cli::config::run(cli::config::ConfigArgs { json }),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let json_mode = command_wants_json(&cli.command);
    let default_filter = if cli.verbose {
        "sqlbundle=debug"
    } else {
        "sqlbundle=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let mut _log_guard: Option<tracing_appender::non_blocking::WorkerGuard> = None;
    let file_layer = match cli::config::ensure_logs_dir() {
        Ok(log_dir) => {
            let file_appender = tracing_appender::rolling::daily(log_dir, "sqlbundle.log");
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            _log_guard = Some(guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(file_writer)
                    .with_ansi(false)
                    .with_filter(env_filter.clone()),
            )
        }
        Err(err) => {
            eprintln!("Warning: failed to create logs directory: {}", err);
            None
        }
    };

    // Console logs go to stderr in json mode so machine consumers get
    // clean JSON on stdout.
    let console_writer = if json_mode {
        tracing_subscriber::fmt::writer::BoxMakeWriter::new(std::io::stderr)
    } else {
        tracing_subscriber::fmt::writer::BoxMakeWriter::new(std::io::stdout)
    };
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(console_writer)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if json_mode {
                cli::error::print_json_error(&err);
            } else {
                eprintln!("{:?}", err);
            }
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_wants_json() {
        let cli = Cli::try_parse_from(["sqlbundle", "build", "/tmp", "--json"]).unwrap();
        assert!(command_wants_json(&cli.command));

        let cli = Cli::try_parse_from(["sqlbundle", "scan", "/tmp"]).unwrap();
        assert!(!command_wants_json(&cli.command));
    }

    #[test]
    fn test_build_output_defaults_to_db_sql() {
        let cli = Cli::try_parse_from(["sqlbundle", "build", "/tmp"]).unwrap();
        match cli.command {
            Commands::Build { output, .. } => assert_eq!(output, sqlbundle::DEFAULT_OUTPUT_NAME),
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_check_flag_parses() {
        let cli = Cli::try_parse_from(["sqlbundle", "build", "/tmp", "--check"]).unwrap();
        match cli.command {
            Commands::Build { check, .. } => assert!(check),
            _ => panic!("expected build command"),
        }
    }
}
