//! reqlock - verify that generated requirement lock files are up to date
//!
//! Lock files carry a `# SHA1:` comment with the hash of the input they
//! were generated from; `reqlock verify` fails when any input changed since.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "reqlock")]
#[command(about = "Verify requirement lock files against their inputs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file path (default: ./reqlock.toml or ~/.config/reqlock/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Check that every lock file was generated from its current input
    Verify(cmd::verify::VerifyArgs),
    /// Print raw and robust hashes of input files
    Hash(cmd::hash::HashArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    reqlock_core::init_logging(cli.quiet, cli.debug);

    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Command::Verify(args) => cmd::verify::run(args, &config),
        Command::Hash(args) => cmd::hash::run(args),
        Command::Config => {
            cmd::show_config(&config);
            Ok(ExitCode::SUCCESS)
        }
    }
}
