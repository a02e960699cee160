use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use drive::Variant;

/// Which built-in action source drives the vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyKind {
    /// Uniformly random turns.
    Random,
    /// Steers towards the centerline using the boundary distances.
    Center,
}

/// Headless driver for the track racer simulation.
#[derive(Parser, Debug, Clone)]
#[command(name = "racer", version, about)]
pub struct Cli {
    /// Track and rule preset: bounded, straight or segmented.
    #[arg(long)]
    pub variant: Option<Variant>,

    /// JSON file with `variant`, `track` and/or `drive` sections.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Episodes per worker.
    #[arg(long, default_value_t = 5)]
    pub episodes: usize,

    /// Tick limit per episode.
    #[arg(long, default_value_t = 500)]
    pub max_steps: usize,

    /// Independent simulations run in parallel.
    #[arg(long, default_value_t = 1)]
    pub workers: usize,

    /// Base seed for random tracks and the random policy.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = PolicyKind::Center)]
    pub policy: PolicyKind,

    /// Redraw random segmented tracks before every episode.
    #[arg(long)]
    pub regenerate: bool,
}
