//! trk CLI - Command-line interface for the trk change tracker.

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use std::path::Path;
use std::process::ExitCode;
use trk_core::TrkError;

mod commands;
mod resolve;

#[derive(Parser)]
#[command(name = "trk")]
#[command(about = "Minimal local change tracking", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new repository in the current directory
    Init,
    /// Add file(s) to the staging area
    Add {
        /// Files, directories or glob patterns
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Commit staged changes
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,
    },
    /// Show commit history, newest first
    Log {
        /// Maximum number of commits to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Show one line per commit
        #[arg(long)]
        oneline: bool,
    },
    /// Show the staging area
    Status,
    /// Verify commit chain integrity
    Verify,
}

fn main() -> ExitCode {
    // Respects RUST_LOG environment variable (e.g., RUST_LOG=debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli.command, Path::new(".")) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, root: &Path) -> Result<()> {
    match command {
        Commands::Init => commands::init::run(root),
        Commands::Add { paths } => commands::add::run(root, &paths),
        Commands::Commit { message } => commands::commit::run(root, &message),
        Commands::Log { limit, oneline } => commands::log::run(root, limit, oneline),
        Commands::Status => commands::status::run(root),
        Commands::Verify => commands::verify::run(root),
    }
}

fn report_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", style("Error:").red().bold(), err);

    let hint = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<TrkError>())
        .and_then(TrkError::recovery_suggestion);
    if let Some(hint) = hint {
        eprintln!("  {} {}", style("→").cyan(), hint);
    }
}
