//! marklint CLI
//!
//! Pluggable, AST-based Markdown linter.

mod cli;
mod commands;
mod files;
mod output;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{ast::run_ast, lint::run_lint, rules::run_rules};

/// Stack size of the lint worker threads, the same as the main thread's.
const WORKER_STACK_SIZE: usize = 8 * 1024 * 1024;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .stack_size(WORKER_STACK_SIZE)
        .thread_name(|index| format!("marklint-worker-{index}"))
        .build_global()
    {
        warn!("Could not configure worker threads: {}", e);
    }

    match run(&cli) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Commands::Lint {
            patterns,
            format,
            timings,
        } => run_lint(cli, patterns, *format, *timings),
        Commands::Ast { file } => run_ast(cli, file),
        Commands::Rules => run_rules(),
    }
}
