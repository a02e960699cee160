//! # Vehicle Step Engine
//!
//! [`Simulation`] owns one track and one vehicle. Each call to
//! [`Simulation::step`] turns the vehicle, predicts where the current speed
//! would carry it, checks that prediction against the track boundaries, and
//! then commits exactly one of three outcomes in a fixed priority order:
//!
//! 1. **Off-track:** the prediction left the lane. The vehicle is clamped to
//!    the crossed boundary, stopped, and penalised. `x` does not advance.
//! 2. **Finished:** the committed `x` (before this tick) is at or past the
//!    finish line. The episode ends and the vehicle stays where it was: the
//!    finishing tick does not move it, so the final position is the first
//!    committed position past the line.
//! 3. **Progress:** speed recovers, and the vehicle moves along its heading
//!    at the recovered speed.
//!
//! The order matters: a vehicle past the finish line that steers off the
//! lane is penalised rather than rewarded.

use glam::DVec2;
use track::{Track, TrackGeometry};

use crate::config::{DriveConfig, RewardBase, SimConfig, Variant};
use crate::error::DriveError;
use crate::observation::{Observation, ObservationBounds};
use crate::types::{wrap_heading, Action, StepOutcome, VehicleState};

/// Result of a single tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f64,
    pub terminal: bool,
    pub outcome: StepOutcome,
}

/// Branch chosen for a tick, with the data that branch needs.
enum Resolution {
    OffTrack { boundary: f64 },
    Finished,
    Progress,
}

/// A single vehicle on a single track.
#[derive(Clone, Debug)]
pub struct Simulation {
    track: Track,
    config: DriveConfig,
    state: VehicleState,
    finish_line: f64,
}

impl Simulation {
    /// Creates a simulation and places the vehicle at its start state.
    ///
    /// # Errors
    ///
    /// Returns [`DriveError::InvalidConfig`] if the drive rules are unusable.
    pub fn new(track: Track, config: DriveConfig) -> Result<Self, DriveError> {
        config.validate()?;
        let finish_line = config.finish_line.unwrap_or_else(|| track.length());
        let state = initial_state(&track, &config);
        Ok(Self { track, config, state, finish_line })
    }

    /// Builds one of the preset variants.
    ///
    /// # Errors
    ///
    /// Presets are valid, so this only fails if the defaults are broken.
    pub fn preset(variant: Variant) -> Result<Self, DriveError> {
        SimConfig::preset(variant).build()
    }

    /// Restores the start state and returns the initial observation.
    pub fn reset(&mut self) -> Observation {
        self.state = initial_state(&self.track, &self.config);
        tracing::debug!(track = self.track.kind(), "episode reset");
        self.observe_at(self.state.position)
    }

    /// Starts an episode from an explicit vehicle state.
    ///
    /// The heading is wrapped, the speed clamped to `[0, max_speed]` and the
    /// terminal flag cleared.
    pub fn reset_with(&mut self, state: VehicleState) -> Observation {
        self.state = VehicleState {
            position: state.position,
            heading: wrap_heading(state.heading),
            speed: state.speed.clamp(0.0, self.config.max_speed),
            terminal: false,
        };
        tracing::debug!(x = state.position.x, y = state.position.y, "episode reset to explicit state");
        self.observe_at(self.state.position)
    }

    /// Advances the simulation by one tick.
    ///
    /// # Errors
    ///
    /// Returns [`DriveError::EpisodeTerminated`] if the episode already ended.
    /// No other error is possible; leaving the lane and finishing are
    /// ordinary outcomes.
    pub fn step(&mut self, action: Action) -> Result<StepResult, DriveError> {
        if self.state.terminal {
            return Err(DriveError::EpisodeTerminated);
        }
        let prev_x = self.state.position.x;

        self.state.heading = wrap_heading(self.state.heading + action.turn_sign() * self.config.turn_delta);
        let direction = self.state.direction();
        let predicted = self.state.position + direction * self.state.speed;
        let (left, right) = self.track.boundaries(predicted.x);

        let mut reward = self.base_reward(predicted.y, left, right) + self.progress_shaping(prev_x, predicted.x);

        let outcome = match self.resolve(predicted.y, left, right) {
            Resolution::OffTrack { boundary } => {
                self.state.position.y = boundary;
                self.state.speed = 0.0;
                self.state.terminal = self.config.off_track_terminal;
                reward = self.config.off_track_reward;
                tracing::debug!(x = prev_x, boundary, terminal = self.state.terminal, "vehicle left the track");
                StepOutcome::OffTrack
            }
            Resolution::Finished => {
                self.state.terminal = true;
                if let Some(finish_reward) = self.config.finish_reward {
                    reward = finish_reward;
                }
                tracing::debug!(x = prev_x, finish_line = self.finish_line, "vehicle crossed the finish line");
                StepOutcome::Finished
            }
            Resolution::Progress => {
                self.state.speed = (self.state.speed + self.config.speed_recovery).min(self.config.max_speed);
                self.state.position += direction * self.state.speed;
                StepOutcome::Progress
            }
        };

        tracing::trace!(
            ?action,
            x = self.state.position.x,
            y = self.state.position.y,
            heading = self.state.heading,
            speed = self.state.speed,
            reward,
            "step"
        );

        Ok(StepResult {
            observation: Observation {
                position: self.state.position,
                heading: self.state.heading,
                distance_to_left: predicted.y - left,
                distance_to_right: right - predicted.y,
            },
            reward,
            terminal: self.state.terminal,
            outcome,
        })
    }

    /// Ordered boundary / finish / progress decision for a predicted lateral position.
    fn resolve(&self, predicted_y: f64, left: f64, right: f64) -> Resolution {
        if predicted_y < left {
            Resolution::OffTrack { boundary: left }
        } else if predicted_y > right {
            Resolution::OffTrack { boundary: right }
        } else if self.state.position.x >= self.finish_line {
            Resolution::Finished
        } else {
            Resolution::Progress
        }
    }

    fn base_reward(&self, predicted_y: f64, left: f64, right: f64) -> f64 {
        match self.config.reward_base {
            RewardBase::Flat { value } => value,
            RewardBase::Centerline => {
                let center = (left + right) / 2.0;
                let half_width = self.track.width() / 2.0;
                (1.0 - (predicted_y - center).abs() / half_width).max(0.0)
            }
        }
    }

    fn progress_shaping(&self, prev_x: f64, predicted_x: f64) -> f64 {
        if predicted_x > prev_x {
            self.config.forward_bonus
        } else if predicted_x < prev_x {
            -self.config.backward_penalty
        } else {
            0.0
        }
    }

    fn observe_at(&self, position: DVec2) -> Observation {
        let (left, right) = self.track.boundaries(position.x);
        Observation {
            position,
            heading: self.state.heading,
            distance_to_left: position.y - left,
            distance_to_right: right - position.y,
        }
    }

    /// Redraws a random segmented track. The vehicle state is left alone,
    /// call [`Simulation::reset`] afterwards to start on the new track.
    pub fn regenerate_track(&mut self, rng: &mut fastrand::Rng) -> bool {
        self.track.regenerate(rng)
    }

    #[must_use]
    pub fn observation_bounds(&self) -> ObservationBounds {
        ObservationBounds::for_track(&self.track)
    }

    #[must_use]
    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    #[must_use]
    pub fn position(&self) -> DVec2 {
        self.state.position
    }

    #[must_use]
    pub fn heading(&self) -> f64 {
        self.state.heading
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.state.speed
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state.terminal
    }

    #[must_use]
    pub fn track(&self) -> &Track {
        &self.track
    }

    #[must_use]
    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    #[must_use]
    pub fn finish_line(&self) -> f64 {
        self.finish_line
    }
}

fn initial_state(track: &Track, config: &DriveConfig) -> VehicleState {
    VehicleState::new(DVec2::new(0.0, track.centerline(0.0)), config.start_heading, config.max_speed)
}
