#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Track Geometry
//!
//! Lateral lane geometry for the racer simulation.
//!
//! A track is a lane of constant width laid along a longitudinal axis `x`.
//! Given `x`, a track reports its centerline and left/right boundaries. The
//! vehicle step engine in the `drive` crate only ever talks to a track
//! through the [`TrackGeometry`] trait.
//!
//! ## Variants
//!
//! -   **Bounded:** a flat corridor from `y = 0` to `y = width`.
//! -   **Straight:** flat up to a break point, then a constant slope.
//! -   **Segmented:** shaped by a per-unit curvature table, either given
//!     explicitly or drawn at random for two halves.
//!
//! ## Usage
//!
//! ```rust
//! use track::{TrackGeometry, TrackSpec};
//!
//! let track = TrackSpec::straight().build()?;
//! let (left, right) = track.boundaries(75.0);
//! assert!((right - left - track.width()).abs() < 1e-9);
//! # Ok::<(), track::TrackError>(())
//! ```

pub mod error;
pub mod geometry;
pub mod shapes;
pub mod spec;

pub use error::TrackError;
pub use geometry::{ProfilePoint, TrackGeometry};
pub use shapes::{BoundedTrack, CurvatureRun, SegmentedTrack, StraightTrack};
pub use spec::{CurvatureRange, CurvatureSpec, ShapeSpec, TrackSpec};

/// A built track, one of the three lane shapes.
#[derive(Clone, Debug, PartialEq)]
pub enum Track {
    Bounded(BoundedTrack),
    Straight(StraightTrack),
    Segmented(SegmentedTrack),
}

impl Track {
    /// Short name of the variant, used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Track::Bounded(_) => "bounded",
            Track::Straight(_) => "straight",
            Track::Segmented(_) => "segmented",
        }
    }

    /// Redraws the curvature of a random segmented track.
    ///
    /// Returns `false` for every other track, which is left unchanged.
    pub fn regenerate(&mut self, rng: &mut fastrand::Rng) -> bool {
        match self {
            Track::Segmented(track) => track.regenerate(rng),
            Track::Bounded(_) | Track::Straight(_) => false,
        }
    }
}

impl TrackGeometry for Track {
    fn centerline(&self, x: f64) -> f64 {
        match self {
            Track::Bounded(t) => t.centerline(x),
            Track::Straight(t) => t.centerline(x),
            Track::Segmented(t) => t.centerline(x),
        }
    }

    fn width(&self) -> f64 {
        match self {
            Track::Bounded(t) => t.width(),
            Track::Straight(t) => t.width(),
            Track::Segmented(t) => t.width(),
        }
    }

    fn length(&self) -> f64 {
        match self {
            Track::Bounded(t) => t.length(),
            Track::Straight(t) => t.length(),
            Track::Segmented(t) => t.length(),
        }
    }

    fn centerline_range(&self) -> (f64, f64) {
        match self {
            Track::Bounded(t) => t.centerline_range(),
            Track::Straight(t) => t.centerline_range(),
            Track::Segmented(t) => t.centerline_range(),
        }
    }
}
