//! # Racer Application Logic
//!
//! Runs episodes against the simulation core. Each worker thread owns its
//! own [`Simulation`] and policy; nothing is shared between workers, and the
//! reports are gathered once every worker has finished.

use std::thread;

use anyhow::{anyhow, ensure, Context, Result};
use drive::{DriveError, SimConfig, Simulation, StepOutcome};

use crate::cli::{Cli, PolicyKind};
use crate::policy::{self, Policy};
use crate::settings::ConfigFile;

/// Outcome of one episode.
#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeReport {
    pub worker: usize,
    pub episode: usize,
    pub steps: usize,
    pub total_reward: f64,
    pub off_track: usize,
    pub finished: bool,
    pub final_x: f64,
}

/// Parameters shared by every worker.
#[derive(Clone, Debug)]
pub struct RunPlan {
    pub config: SimConfig,
    pub policy: PolicyKind,
    pub episodes: usize,
    pub max_steps: usize,
    pub workers: usize,
    pub seed: Option<u64>,
    pub regenerate: bool,
}

impl RunPlan {
    /// Resolves the command line and optional config file into a plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the
    /// configuration does not build a simulation.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        ensure!(cli.workers > 0, "at least one worker is required");
        let file = match &cli.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        let config = file.resolve(cli.variant);
        // fail before any thread is spawned
        config.build().context("invalid simulation config")?;
        Ok(Self {
            config,
            policy: cli.policy,
            episodes: cli.episodes,
            max_steps: cli.max_steps,
            workers: cli.workers,
            seed: cli.seed,
            regenerate: cli.regenerate,
        })
    }

    fn worker_seed(&self, worker: usize) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(worker as u64))
    }
}

/// Initialise logging, honouring `RUST_LOG` and defaulting to `info`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Drives one episode from `reset` until it terminates or hits `max_steps`.
///
/// # Errors
///
/// Only fails if the simulation rejects a step, which means a bug in the loop.
pub fn run_episode(
    sim: &mut Simulation,
    policy: &mut dyn Policy,
    max_steps: usize,
) -> Result<EpisodeReport, DriveError> {
    let mut observation = sim.reset();
    let mut report = EpisodeReport {
        worker: 0,
        episode: 0,
        steps: 0,
        total_reward: 0.0,
        off_track: 0,
        finished: false,
        final_x: observation.position.x,
    };

    while report.steps < max_steps {
        let action = policy.act(&observation);
        let step = sim.step(action)?;
        report.steps += 1;
        report.total_reward += step.reward;
        match step.outcome {
            StepOutcome::OffTrack => report.off_track += 1,
            StepOutcome::Finished => report.finished = true,
            StepOutcome::Progress => {}
        }
        observation = step.observation;
        if step.terminal {
            break;
        }
    }
    report.final_x = sim.position().x;
    Ok(report)
}

/// Runs every episode of one worker.
///
/// # Errors
///
/// Returns an error if the simulation cannot be built or a step fails.
pub fn run_worker(plan: &RunPlan, worker: usize) -> Result<Vec<EpisodeReport>> {
    let seed = plan.worker_seed(worker);
    let track = match seed {
        Some(seed) => plan.config.track.clone().with_seed(seed),
        None => plan.config.track.clone(),
    };
    let mut sim = SimConfig { track, drive: plan.config.drive.clone() }.build()?;
    let mut policy = policy::build(plan.policy, seed);
    let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);

    let mut reports = Vec::with_capacity(plan.episodes);
    for episode in 0..plan.episodes {
        if plan.regenerate && episode > 0 && sim.regenerate_track(&mut rng) {
            tracing::debug!(worker, episode, "regenerated track");
        }
        let mut report = run_episode(&mut sim, policy.as_mut(), plan.max_steps)?;
        report.worker = worker;
        report.episode = episode;
        tracing::info!(
            worker,
            episode,
            steps = report.steps,
            reward = report.total_reward,
            off_track = report.off_track,
            finished = report.finished,
            final_x = report.final_x,
            "episode complete"
        );
        reports.push(report);
    }
    Ok(reports)
}

/// Runs the plan on `plan.workers` threads and returns every report,
/// ordered by worker then episode.
///
/// # Errors
///
/// Returns the first worker error, or an error if a worker panicked.
pub fn run(plan: &RunPlan) -> Result<Vec<EpisodeReport>> {
    tracing::info!(
        track = plan.config.track.shape.name(),
        workers = plan.workers,
        episodes = plan.episodes,
        policy = ?plan.policy,
        "starting episodes"
    );

    let results: Vec<Result<Vec<EpisodeReport>>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..plan.workers)
            .map(|worker| scope.spawn(move || run_worker(plan, worker)))
            .collect();
        handles
            .into_iter()
            .enumerate()
            .map(|(worker, handle)| {
                handle
                    .join()
                    .map_err(|_| anyhow!("worker {worker} panicked"))
                    .and_then(|result| result)
            })
            .collect()
    });

    let mut reports = Vec::new();
    for result in results {
        reports.extend(result?);
    }
    log_summary(&reports);
    Ok(reports)
}

#[allow(clippy::cast_precision_loss)]
fn log_summary(reports: &[EpisodeReport]) {
    if reports.is_empty() {
        tracing::info!("no episodes were run");
        return;
    }
    let finished = reports.iter().filter(|r| r.finished).count();
    let mean_reward = reports.iter().map(|r| r.total_reward).sum::<f64>() / reports.len() as f64;
    let mean_steps = reports.iter().map(|r| r.steps).sum::<usize>() as f64 / reports.len() as f64;
    tracing::info!(
        episodes = reports.len(),
        finished,
        mean_reward,
        mean_steps,
        "run complete"
    );
}
