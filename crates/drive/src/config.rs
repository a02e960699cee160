//! Drive parameters and the three variant presets.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use track::TrackSpec;

use crate::error::DriveError;
use crate::simulation::Simulation;

/// Per-tick reward before progress shaping.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RewardBase {
    /// Same reward on every tick.
    Flat { value: f64 },
    /// `max(0, 1 - |y - center| / (width / 2))` at the predicted position.
    Centerline,
}

/// Configuration for the vehicle step engine
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriveConfig {
    /// Heading at episode start (radians)
    pub start_heading: f64,
    /// Heading change per turn action (radians)
    pub turn_delta: f64,
    /// Speed at episode start and upper speed bound
    pub max_speed: f64,
    /// Speed regained per on-track tick
    pub speed_recovery: f64,
    pub reward_base: RewardBase,
    /// Added when the predicted x is ahead of the previous x
    pub forward_bonus: f64,
    /// Subtracted when the predicted x is behind the previous x; must exceed
    /// `forward_bonus` so reversing never pays
    pub backward_penalty: f64,
    /// Replaces the reward on an off-track tick
    pub off_track_reward: f64,
    /// Whether leaving the lane ends the episode
    pub off_track_terminal: bool,
    /// Replaces the reward on the finishing tick; `None` keeps the shaped reward
    #[serde(default)]
    pub finish_reward: Option<f64>,
    /// Longitudinal finish position; `None` means the track length
    #[serde(default)]
    pub finish_line: Option<f64>,
}

impl DriveConfig {
    /// Corridor rules: start at 45°, 10° turns, slow recovery, leaving the
    /// corridor ends the episode.
    #[must_use]
    pub fn bounded() -> Self {
        Self {
            start_heading: PI / 4.0,
            turn_delta: PI / 18.0,
            speed_recovery: 0.05,
            off_track_terminal: true,
            ..Self::straight()
        }
    }

    /// Sloped-track rules: 5° turns, flat reward, large finish bonus.
    #[must_use]
    pub fn straight() -> Self {
        Self {
            start_heading: 0.0,
            turn_delta: PI / 36.0,
            max_speed: 1.0,
            speed_recovery: 0.1,
            reward_base: RewardBase::Flat { value: 1.0 },
            forward_bonus: 2.0,
            backward_penalty: 3.0,
            off_track_reward: -10.0,
            off_track_terminal: false,
            finish_reward: Some(100.0),
            finish_line: None,
        }
    }

    /// Curved-track rules: reward for hugging the centerline, finishing keeps
    /// the shaped reward.
    #[must_use]
    pub fn segmented() -> Self {
        Self {
            reward_base: RewardBase::Centerline,
            finish_reward: None,
            ..Self::straight()
        }
    }

    /// # Errors
    ///
    /// Returns [`DriveError::InvalidConfig`] naming the first unusable field.
    pub fn validate(&self) -> Result<(), DriveError> {
        finite("start_heading", self.start_heading)?;
        positive("turn_delta", self.turn_delta)?;
        positive("max_speed", self.max_speed)?;
        non_negative("speed_recovery", self.speed_recovery)?;
        if let RewardBase::Flat { value } = self.reward_base {
            finite("reward_base", value)?;
        }
        non_negative("forward_bonus", self.forward_bonus)?;
        non_negative("backward_penalty", self.backward_penalty)?;
        if self.backward_penalty <= self.forward_bonus {
            return Err(DriveError::InvalidConfig { field: "backward_penalty", value: self.backward_penalty });
        }
        finite("off_track_reward", self.off_track_reward)?;
        if let Some(reward) = self.finish_reward {
            finite("finish_reward", reward)?;
        }
        if let Some(line) = self.finish_line {
            positive("finish_line", line)?;
        }
        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), DriveError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DriveError::InvalidConfig { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), DriveError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DriveError::InvalidConfig { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), DriveError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DriveError::InvalidConfig { field, value })
    }
}

/// The three track/rule combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Flat corridor, leaving it ends the episode.
    Bounded,
    /// Straight section followed by a slope.
    Straight,
    /// Two-segment random curvature.
    Segmented,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Bounded, Variant::Straight, Variant::Segmented];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Variant::Bounded => "bounded",
            Variant::Straight => "straight",
            Variant::Segmented => "segmented",
        }
    }

    #[must_use]
    pub fn track(self) -> TrackSpec {
        match self {
            Variant::Bounded => TrackSpec::bounded(),
            Variant::Straight => TrackSpec::straight(),
            Variant::Segmented => TrackSpec::segmented_random(None),
        }
    }

    #[must_use]
    pub fn drive(self) -> DriveConfig {
        match self {
            Variant::Bounded => DriveConfig::bounded(),
            Variant::Straight => DriveConfig::straight(),
            Variant::Segmented => DriveConfig::segmented(),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = DriveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|variant| variant.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| DriveError::UnknownVariant(s.to_owned()))
    }
}

/// Track plus drive rules, everything needed to build a [`Simulation`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub track: TrackSpec,
    pub drive: DriveConfig,
}

impl SimConfig {
    #[must_use]
    pub fn preset(variant: Variant) -> Self {
        Self { track: variant.track(), drive: variant.drive() }
    }

    /// # Errors
    ///
    /// Returns an error if either the track or the drive rules are invalid.
    pub fn build(&self) -> Result<Simulation, DriveError> {
        Simulation::new(self.track.build()?, self.drive.clone())
    }
}
