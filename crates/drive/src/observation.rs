use std::f64::consts::TAU;

use glam::DVec2;
use track::{Track, TrackGeometry};

/// Number of fields in an observation vector.
pub const OBSERVATION_DIM: usize = 5;

/// What the learning side sees after `reset` or `step`.
///
/// `position` and `heading` are the committed vehicle state. The two
/// distances are measured from the position the vehicle tried to reach on
/// the last tick, so they go negative on the side that was crossed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observation {
    pub position: DVec2,
    pub heading: f64,
    pub distance_to_left: f64,
    pub distance_to_right: f64,
}

impl Observation {
    /// `[x, y, heading, distance_to_left, distance_to_right]`
    #[must_use]
    pub fn to_array(&self) -> [f64; OBSERVATION_DIM] {
        [
            self.position.x,
            self.position.y,
            self.heading,
            self.distance_to_left,
            self.distance_to_right,
        ]
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.to_array().to_vec()
    }
}

/// Per-field `[low, high]` of the observation vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObservationBounds {
    pub low: [f64; OBSERVATION_DIM],
    pub high: [f64; OBSERVATION_DIM],
}

impl ObservationBounds {
    /// Bounds derived from the track dimensions.
    ///
    /// The distance fields cover the on-track range `[0, width]`; an
    /// observation taken on an off-track tick falls outside it.
    #[must_use]
    pub fn for_track(track: &Track) -> Self {
        let (lateral_low, lateral_high) = track.lateral_extent();
        let width = track.width();
        Self {
            low: [0.0, lateral_low, 0.0, 0.0, 0.0],
            high: [track.length(), lateral_high, TAU, width, width],
        }
    }

    #[must_use]
    pub fn contains(&self, observation: &Observation) -> bool {
        observation
            .to_array()
            .iter()
            .zip(self.low.iter().zip(self.high.iter()))
            .all(|(value, (low, high))| value >= low && value <= high)
    }
}
