//! Built-in action sources.
//!
//! These stand in for an external learner: they see only the observation
//! and answer with an action.

use std::f64::consts::{FRAC_PI_4, PI, TAU};

use drive::{Action, Observation};

use crate::cli::PolicyKind;

pub trait Policy {
    fn act(&mut self, observation: &Observation) -> Action;
}

pub struct RandomPolicy {
    rng: fastrand::Rng,
}

impl RandomPolicy {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        Self { rng }
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, _observation: &Observation) -> Action {
        if self.rng.bool() {
            Action::TurnLeft
        } else {
            Action::TurnRight
        }
    }
}

/// Proportional steering towards the middle of the lane.
///
/// The lateral error is half the difference of the two boundary distances;
/// it is mapped to a desired heading, and the policy turns towards it.
pub struct CenterPolicy {
    gain: f64,
    max_heading: f64,
}

impl CenterPolicy {
    #[must_use]
    pub fn new(gain: f64, max_heading: f64) -> Self {
        Self { gain, max_heading }
    }
}

impl Default for CenterPolicy {
    fn default() -> Self {
        Self::new(0.8, FRAC_PI_4)
    }
}

impl Policy for CenterPolicy {
    fn act(&mut self, observation: &Observation) -> Action {
        let error = (observation.distance_to_right - observation.distance_to_left) / 2.0;
        let desired = (self.gain * error).atan().clamp(-self.max_heading, self.max_heading);
        // headings arrive in [0, 2π); compare in (-π, π]
        let heading = if observation.heading > PI {
            observation.heading - TAU
        } else {
            observation.heading
        };
        if heading < desired {
            Action::TurnLeft
        } else {
            Action::TurnRight
        }
    }
}

/// Builds the requested policy.
#[must_use]
pub fn build(kind: PolicyKind, seed: Option<u64>) -> Box<dyn Policy + Send> {
    match kind {
        PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
        PolicyKind::Center => Box::new(CenterPolicy::default()),
    }
}
