//! # Track Construction Parameters
//!
//! [`TrackSpec`] is the serialisable description of a track. Nothing is
//! validated until [`TrackSpec::build`], which either returns a ready
//! [`Track`] or a [`TrackError`] explaining which parameter is unusable.

use serde::{Deserialize, Serialize};

use crate::error::TrackError;
use crate::shapes::{BoundedTrack, SegmentedTrack, StraightTrack};
use crate::Track;

pub const DEFAULT_LENGTH: f64 = 100.0;
pub const DEFAULT_WIDTH: f64 = 5.0;
pub const DEFAULT_STRAIGHT_LENGTH: f64 = 50.0;
pub const DEFAULT_SLOPE: f64 = 0.5;

/// Closed interval a random curvature is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurvatureRange {
    pub low: f64,
    pub high: f64,
}

impl CurvatureRange {
    /// Curvature range of the first half of a random track.
    pub const RISING: Self = Self { low: 0.05, high: 0.2 };
    /// Curvature range of the second half of a random track.
    pub const FALLING: Self = Self { low: -0.2, high: -0.05 };

    #[must_use]
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub(crate) fn sample(self, rng: &mut fastrand::Rng) -> f64 {
        self.low + (self.high - self.low) * rng.f64()
    }

    fn validate(self, name: &'static str) -> Result<(), TrackError> {
        let invalid = |reason| TrackError::InvalidRange { name, low: self.low, high: self.high, reason };
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(invalid("bounds must be finite"));
        }
        if self.low > self.high {
            return Err(invalid("low exceeds high"));
        }
        Ok(())
    }
}

/// How the curvature table of a segmented track is obtained.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurvatureSpec {
    /// Explicit per-unit table.
    Fixed { table: Vec<f64> },
    /// One curvature per half, drawn uniformly at construction.
    Random {
        #[serde(default = "rising")]
        first: CurvatureRange,
        #[serde(default = "falling")]
        second: CurvatureRange,
        #[serde(default)]
        seed: Option<u64>,
    },
}

fn rising() -> CurvatureRange {
    CurvatureRange::RISING
}

fn falling() -> CurvatureRange {
    CurvatureRange::FALLING
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeSpec {
    Bounded,
    Straight { straight_length: f64, slope: f64 },
    Segmented { curvature: CurvatureSpec },
}

impl ShapeSpec {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ShapeSpec::Bounded => "bounded",
            ShapeSpec::Straight { .. } => "straight",
            ShapeSpec::Segmented { .. } => "segmented",
        }
    }
}

/// Immutable description of a track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackSpec {
    pub length: f64,
    pub width: f64,
    pub shape: ShapeSpec,
}

impl TrackSpec {
    /// 100 x 5 corridor.
    #[must_use]
    pub fn bounded() -> Self {
        Self { length: DEFAULT_LENGTH, width: DEFAULT_WIDTH, shape: ShapeSpec::Bounded }
    }

    /// 100-long track, flat for 50 units, then slope 0.5.
    #[must_use]
    pub fn straight() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            width: DEFAULT_WIDTH,
            shape: ShapeSpec::Straight {
                straight_length: DEFAULT_STRAIGHT_LENGTH,
                slope: DEFAULT_SLOPE,
            },
        }
    }

    /// 100-long two-segment random track.
    #[must_use]
    pub fn segmented_random(seed: Option<u64>) -> Self {
        Self {
            length: DEFAULT_LENGTH,
            width: DEFAULT_WIDTH,
            shape: ShapeSpec::Segmented {
                curvature: CurvatureSpec::Random {
                    first: CurvatureRange::RISING,
                    second: CurvatureRange::FALLING,
                    seed,
                },
            },
        }
    }

    /// Segmented track over an explicit curvature table, one entry per unit
    /// of `length`.
    #[must_use]
    pub fn segmented_fixed(length: f64, width: f64, table: Vec<f64>) -> Self {
        Self {
            length,
            width,
            shape: ShapeSpec::Segmented { curvature: CurvatureSpec::Fixed { table } },
        }
    }

    /// Replaces the seed of a random segmented spec. Other shapes are returned unchanged.
    #[must_use]
    pub fn with_seed(mut self, new_seed: u64) -> Self {
        if let ShapeSpec::Segmented { curvature: CurvatureSpec::Random { seed, .. } } = &mut self.shape {
            *seed = Some(new_seed);
        }
        self
    }

    /// Checks every parameter without building anything.
    ///
    /// # Errors
    ///
    /// Returns the first parameter that is out of its domain.
    pub fn validate(&self) -> Result<(), TrackError> {
        positive("length", self.length)?;
        positive("width", self.width)?;
        match &self.shape {
            ShapeSpec::Bounded => Ok(()),
            ShapeSpec::Straight { straight_length, slope } => {
                finite("straight_length", *straight_length)?;
                finite("slope", *slope)
            }
            ShapeSpec::Segmented { curvature: CurvatureSpec::Fixed { table } } => {
                if table.is_empty() {
                    return Err(TrackError::EmptyCurvature);
                }
                if let Some(index) = table.iter().position(|c| !c.is_finite()) {
                    return Err(TrackError::InvalidCurvature { index, value: table[index] });
                }
                let expected = table_entries(self.length);
                if table.len() != expected {
                    return Err(TrackError::CurvatureLength { expected, actual: table.len() });
                }
                Ok(())
            }
            ShapeSpec::Segmented { curvature: CurvatureSpec::Random { first, second, .. } } => {
                first.validate("first")?;
                second.validate("second")?;
                if first.low <= 0.0 {
                    return Err(TrackError::InvalidRange {
                        name: "first",
                        low: first.low,
                        high: first.high,
                        reason: "first-half curvature must be strictly positive",
                    });
                }
                if second.high >= 0.0 {
                    return Err(TrackError::InvalidRange {
                        name: "second",
                        low: second.low,
                        high: second.high,
                        reason: "second-half curvature must be strictly negative",
                    });
                }
                Ok(())
            }
        }
    }

    /// Validates and builds the track, seeding random curvature from the spec.
    ///
    /// # Errors
    ///
    /// See [`TrackSpec::validate`].
    pub fn build(&self) -> Result<Track, TrackError> {
        let mut rng = match &self.shape {
            ShapeSpec::Segmented { curvature: CurvatureSpec::Random { seed: Some(seed), .. } } => {
                fastrand::Rng::with_seed(*seed)
            }
            _ => fastrand::Rng::new(),
        };
        self.build_with_rng(&mut rng)
    }

    /// Validates and builds the track, drawing random curvature from `rng`.
    ///
    /// # Errors
    ///
    /// See [`TrackSpec::validate`].
    pub fn build_with_rng(&self, rng: &mut fastrand::Rng) -> Result<Track, TrackError> {
        self.validate()?;
        let track = match &self.shape {
            ShapeSpec::Bounded => Track::Bounded(BoundedTrack::new(self.length, self.width)),
            ShapeSpec::Straight { straight_length, slope } => Track::Straight(StraightTrack::new(
                self.length,
                self.width,
                *straight_length,
                *slope,
            )),
            ShapeSpec::Segmented { curvature: CurvatureSpec::Fixed { table } } => {
                Track::Segmented(SegmentedTrack::from_table(self.length, self.width, table))
            }
            ShapeSpec::Segmented { curvature: CurvatureSpec::Random { first, second, .. } } => {
                Track::Segmented(SegmentedTrack::two_segment(self.length, self.width, *first, *second, rng))
            }
        };
        tracing::debug!(kind = track.kind(), length = self.length, width = self.width, "built track");
        Ok(track)
    }
}

/// Entries in a per-unit curvature table for a track of `length`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn table_entries(length: f64) -> usize {
    (length.floor() as usize).max(1)
}

fn positive(name: &'static str, value: f64) -> Result<(), TrackError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TrackError::InvalidDimension { name, value })
    }
}

fn finite(name: &'static str, value: f64) -> Result<(), TrackError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TrackError::InvalidParameter { name, value })
    }
}
