//! The three lane shapes.
//!
//! [`BoundedTrack`] is a flat corridor whose lower edge sits on `y = 0`,
//! [`StraightTrack`] is flat up to a break point and then climbs with a fixed
//! slope, and [`SegmentedTrack`] is built from a per-unit curvature table.

use crate::geometry::TrackGeometry;
use crate::spec::{table_entries, CurvatureRange};

/// Flat corridor spanning `0..=width` laterally.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundedTrack {
    length: f64,
    width: f64,
}

impl BoundedTrack {
    pub(crate) fn new(length: f64, width: f64) -> Self {
        Self { length, width }
    }
}

impl TrackGeometry for BoundedTrack {
    fn centerline(&self, _x: f64) -> f64 {
        self.width / 2.0
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn length(&self) -> f64 {
        self.length
    }
}

/// Flat for `x <= straight_length`, then rising linearly with `slope`.
#[derive(Clone, Debug, PartialEq)]
pub struct StraightTrack {
    length: f64,
    width: f64,
    straight_length: f64,
    slope: f64,
}

impl StraightTrack {
    pub(crate) fn new(length: f64, width: f64, straight_length: f64, slope: f64) -> Self {
        Self { length, width, straight_length, slope }
    }

    #[must_use]
    pub fn straight_length(&self) -> f64 {
        self.straight_length
    }

    #[must_use]
    pub fn slope(&self) -> f64 {
        self.slope
    }
}

impl TrackGeometry for StraightTrack {
    fn centerline(&self, x: f64) -> f64 {
        if x <= self.straight_length {
            0.0
        } else {
            self.slope * (x - self.straight_length)
        }
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn centerline_range(&self) -> (f64, f64) {
        let corner = self.straight_length.clamp(0.0, self.length);
        [0.0, corner, self.length]
            .into_iter()
            .map(|x| self.centerline(x))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), y| (low.min(y), high.max(y)))
    }
}

/// Stretch of the curvature table with a single value, starting at table
/// index `start` and running up to the next run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvatureRun {
    pub start: usize,
    pub curvature: f64,
}

/// Lane shaped by a per-unit curvature table.
///
/// Below the midpoint `length / 2` the centerline is `curvature(x) * x`.
/// From the midpoint on, `x` is re-based to `x - midpoint` and the summed
/// curvature of the first half is added as a constant carry. The seam this
/// produces at the midpoint is part of the observable geometry and is kept
/// as is.
///
/// The table is stored as runs of equal curvature, so a two-segment track
/// costs the same however long it is.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentedTrack {
    length: f64,
    width: f64,
    runs: Vec<CurvatureRun>,
    entries: usize,
    midpoint: f64,
    carry: f64,
    /// Ranges the table was drawn from, `None` for an explicit table.
    ranges: Option<(CurvatureRange, CurvatureRange)>,
}

impl SegmentedTrack {
    /// Wraps an explicit, already validated, non-empty table.
    pub(crate) fn from_table(length: f64, width: f64, table: &[f64]) -> Self {
        let mut runs: Vec<CurvatureRun> = Vec::new();
        for (index, &curvature) in table.iter().enumerate() {
            if runs.last().map(|run| run.curvature.to_bits()) != Some(curvature.to_bits()) {
                runs.push(CurvatureRun { start: index, curvature });
            }
        }
        Self::from_runs(length, width, runs, table.len())
    }

    /// Draws one curvature for each half of a `floor(length)`-entry table.
    pub(crate) fn two_segment(
        length: f64,
        width: f64,
        first: CurvatureRange,
        second: CurvatureRange,
        rng: &mut fastrand::Rng,
    ) -> Self {
        let entries = table_entries(length);
        let runs = draw_runs(entries, first, second, rng);
        let mut track = Self::from_runs(length, width, runs, entries);
        track.ranges = Some((first, second));
        track
    }

    fn from_runs(length: f64, width: f64, runs: Vec<CurvatureRun>, entries: usize) -> Self {
        let midpoint = length / 2.0;
        let mut track = Self { length, width, runs, entries, midpoint, carry: 0.0, ranges: None };
        track.carry = track.first_half_sum();
        track
    }

    /// Sum of the table entries whose index lies below the midpoint.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn first_half_sum(&self) -> f64 {
        let limit = self.midpoint.ceil() as usize;
        self.spans()
            .map(|(run, end)| {
                let count = end.min(limit).saturating_sub(run.start);
                run.curvature * count as f64
            })
            .sum()
    }

    /// Each run with the table index it ends at (exclusive).
    fn spans(&self) -> impl Iterator<Item = (CurvatureRun, usize)> + '_ {
        self.runs.iter().enumerate().map(|(i, run)| {
            let end = self.runs.get(i + 1).map_or(self.entries, |next| next.start);
            (*run, end)
        })
    }

    /// Draws a fresh curvature pair from the configured ranges.
    ///
    /// Returns `false` and leaves the table untouched for explicit tables.
    pub fn regenerate(&mut self, rng: &mut fastrand::Rng) -> bool {
        let Some((first, second)) = self.ranges else {
            return false;
        };
        self.runs = draw_runs(self.entries, first, second, rng);
        self.carry = self.first_half_sum();
        true
    }

    /// Curvature at `x`, indexed by `floor(x)` and clamped into the table.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn curvature(&self, x: f64) -> f64 {
        let last = self.entries - 1;
        let index = if x <= 0.0 { 0 } else { (x.floor() as usize).min(last) };
        // the first run always starts at index 0
        let run = self.runs.partition_point(|run| run.start <= index) - 1;
        self.runs[run].curvature
    }

    /// Runs of equal curvature, in table order.
    #[must_use]
    pub fn runs(&self) -> &[CurvatureRun] {
        &self.runs
    }

    /// Number of per-unit table entries.
    #[must_use]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Position at which coordinates are re-based.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        self.midpoint
    }

    /// Summed curvature of the first half.
    #[must_use]
    pub fn carry(&self) -> f64 {
        self.carry
    }

    #[must_use]
    pub fn is_random(&self) -> bool {
        self.ranges.is_some()
    }

    fn offset(&self, curvature: f64, x: f64, upper: bool) -> f64 {
        if upper {
            curvature * (x - self.midpoint) + self.carry
        } else {
            curvature * x
        }
    }
}

impl TrackGeometry for SegmentedTrack {
    fn centerline(&self, x: f64) -> f64 {
        self.offset(self.curvature(x), x, x >= self.midpoint)
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn length(&self) -> f64 {
        self.length
    }

    /// Linear between run boundaries and the midpoint, so the ends of each
    /// piece bound it. Run ends are taken as one-sided limits.
    #[allow(clippy::cast_precision_loss)]
    fn centerline_range(&self) -> (f64, f64) {
        let mut low = f64::INFINITY;
        let mut high = f64::NEG_INFINITY;
        let last = self.runs.len() - 1;
        for (i, (run, end)) in self.spans().enumerate() {
            let a = (run.start as f64).min(self.length);
            let b = if i == last { self.length } else { (end as f64).min(self.length) };
            let mut pieces = Vec::with_capacity(2);
            if a < self.midpoint {
                pieces.push((a, b.min(self.midpoint), false));
            }
            if b >= self.midpoint {
                pieces.push((a.max(self.midpoint), b, true));
            }
            for (from, to, upper) in pieces {
                for x in [from, to] {
                    let value = self.offset(run.curvature, x, upper);
                    low = low.min(value);
                    high = high.max(value);
                }
            }
        }
        (low, high)
    }
}

fn draw_runs(
    entries: usize,
    first: CurvatureRange,
    second: CurvatureRange,
    rng: &mut fastrand::Rng,
) -> Vec<CurvatureRun> {
    let head = first.sample(rng);
    let tail = second.sample(rng);
    let split = entries / 2;
    tracing::debug!(head, tail, entries, "drew two-segment curvature");
    if split == 0 {
        vec![CurvatureRun { start: 0, curvature: tail }]
    } else {
        vec![
            CurvatureRun { start: 0, curvature: head },
            CurvatureRun { start: split, curvature: tail },
        ]
    }
}
