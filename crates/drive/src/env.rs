use crate::error::DriveError;
use crate::observation::OBSERVATION_DIM;
use crate::simulation::Simulation;
use crate::types::{Action, ACTION_COUNT};

/// Reinforcement learning environment trait.
///
/// The vector-level view of an environment, in the shape most learners
/// expect. Each call to [`step`] advances the simulation by one discrete
/// action and returns the new observation vector, a reward signal, and
/// whether the episode has terminated.
///
/// [`step`]: Env::step
pub trait Env {
    /// Advance the environment by one action index.
    ///
    /// # Errors
    ///
    /// Fails if `action` is not a valid index or the episode already ended.
    fn step(&mut self, action: usize) -> Result<(Vec<f64>, f64, bool), DriveError>;

    /// Reset the environment to its starting state and return the initial
    /// observation vector.
    fn reset(&mut self) -> Vec<f64>;

    /// Size of the observation vector.
    fn obs_size(&self) -> usize;

    /// Number of discrete actions.
    fn action_size(&self) -> usize;
}

impl Env for Simulation {
    fn step(&mut self, action: usize) -> Result<(Vec<f64>, f64, bool), DriveError> {
        let result = Simulation::step(self, Action::try_from(action)?)?;
        Ok((result.observation.to_vec(), result.reward, result.terminal))
    }

    fn reset(&mut self) -> Vec<f64> {
        Simulation::reset(self).to_vec()
    }

    fn obs_size(&self) -> usize {
        OBSERVATION_DIM
    }

    fn action_size(&self) -> usize {
        ACTION_COUNT
    }
}
