//! NuScene CLI - Command-line interface for `.gsc` scene containers

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::Commands;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(name = "nuscene")]
#[command(about = "NuScene: .gsc scene container tools", long_about = None)]
#[command(version)]
struct Cli {
    /// Log every chunk offset, buffer allocation and reuse
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Run the NuScene CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    cli.command.execute()?;

    Ok(())
}
