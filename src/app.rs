pub mod cli;
pub mod config;
pub mod formatter;
pub mod models;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use self::cli::Cli;
use self::config::resolve_config;
use self::formatter::OutputGenerator;
use self::scanner::Scanner;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    let args = Cli::parse();
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    run_with(args, current_dir, &mut io::stdout().lock())
}

/// Runs one snapshot, printing the skip and completion notices to `out`.
pub fn run_with(args: Cli, current_dir: PathBuf, out: &mut impl Write) -> Result<()> {
    let config = resolve_config(args, current_dir)?;
    log::debug!("Resolved configuration: {:?}", config);

    let snapshot = Scanner::new(&config).scan();
    for target in &snapshot.skipped {
        writeln!(out, "{}", OutputGenerator::skip_notice(target))?;
    }

    let report = OutputGenerator::render(&snapshot);
    OutputGenerator::write_report(&config.output, &report, config.encoding)?;

    writeln!(out, "{}", OutputGenerator::completion_notice(&config.output))?;
    Ok(())
}
