//! `reqlock verify` - check lock files against their inputs

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use reqlock_core::{DiscoverOptions, Environment, VerifyReport};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Input files to verify (default: discover in --directory)
    pub inputs: Vec<PathBuf>,

    /// Directory containing input files
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Input file extension
    #[arg(short, long)]
    pub in_ext: Option<String>,

    /// Output file extension
    #[arg(short, long)]
    pub out_ext: Option<String>,

    /// Parallel workers
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Print the report as JSON to stdout
    #[arg(long)]
    pub json: bool,
}

impl VerifyArgs {
    /// Config file defaults with CLI overrides applied.
    fn discover_options(&self, config: &Config) -> DiscoverOptions {
        let base = &config.discover;
        DiscoverOptions {
            directory: self.directory.clone().unwrap_or_else(|| base.directory.clone()),
            in_ext: self.in_ext.clone().unwrap_or_else(|| base.in_ext.clone()),
            out_ext: self.out_ext.clone().unwrap_or_else(|| base.out_ext.clone()),
        }
    }

    fn environments(&self, opts: &DiscoverOptions) -> Result<Vec<Environment>> {
        if !self.inputs.is_empty() {
            return Ok(reqlock_core::from_inputs(&self.inputs, &opts.out_ext));
        }
        let envs = reqlock_core::discover(opts).context("Failed to discover input files")?;
        if envs.is_empty() {
            log::warn!("No input files match {}", opts.pattern());
        }
        Ok(envs)
    }
}

pub fn run(args: VerifyArgs, config: &Config) -> Result<ExitCode> {
    let report = execute(&args, config)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{json}");
    }

    Ok(exit_code(&report))
}

fn execute(args: &VerifyArgs, config: &Config) -> Result<VerifyReport> {
    let opts = args.discover_options(config);
    let envs = args.environments(&opts)?;
    let jobs = args.jobs.unwrap_or(config.verify.jobs).max(1);

    reqlock_core::verify_parallel(&envs, jobs).context("Verification aborted")
}

fn exit_code(report: &VerifyReport) -> ExitCode {
    if report.success() {
        log::debug!("{} environments verified", report.len());
        ExitCode::SUCCESS
    } else {
        log::debug!(
            "{} of {} environments are stale",
            report.failed().count(),
            report.len()
        );
        ExitCode::FAILURE
    }
}
