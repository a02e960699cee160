//! # Racer
//!
//! Headless entry point: parse the command line, resolve the configuration,
//! and run episodes with the chosen built-in policy.

use anyhow::Result;
use clap::Parser;
use racer::app::{self, RunPlan};
use racer::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    app::init_tracing();

    let plan = RunPlan::from_cli(&cli)?;
    app::run(&plan)?;
    Ok(())
}
