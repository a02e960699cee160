//! # Track Geometry Contract
//!
//! Every track variant answers the same question: where is the lane at a
//! given longitudinal position? Implementors only supply the centerline and
//! the two constant dimensions; the boundary queries are derived from those
//! so the lane width is the same everywhere along the track.

/// A sampled slice of the track, handy for drawing boundaries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfilePoint {
    pub x: f64,
    pub left: f64,
    pub right: f64,
}

/// Lateral geometry of a lane parameterised by longitudinal position `x`.
///
/// All queries are total. Positions outside `[0, length)` are answered by
/// whatever clamping rule the variant uses, never by an error.
pub trait TrackGeometry {
    /// Lateral offset of the lane centerline at `x`.
    fn centerline(&self, x: f64) -> f64;

    /// Lane width, constant along the whole track.
    fn width(&self) -> f64;

    /// Total longitudinal extent.
    fn length(&self) -> f64;

    /// Lower lateral limit at `x`.
    fn left_boundary(&self, x: f64) -> f64 {
        self.centerline(x) - self.width() / 2.0
    }

    /// Upper lateral limit at `x`.
    fn right_boundary(&self, x: f64) -> f64 {
        self.centerline(x) + self.width() / 2.0
    }

    /// `(left, right)` at `x` with a single centerline evaluation.
    fn boundaries(&self, x: f64) -> (f64, f64) {
        let center = self.centerline(x);
        let half = self.width() / 2.0;
        (center - half, center + half)
    }

    /// Whether the point `(x, y)` lies on the lane. Boundaries are inclusive.
    fn contains(&self, x: f64, y: f64) -> bool {
        let (left, right) = self.boundaries(x);
        y >= left && y <= right
    }

    /// Lowest and highest centerline offset over `[0, length]`.
    ///
    /// The default evaluates both ends, which is exact for a centerline that
    /// is linear over the whole track. Piecewise shapes override it with
    /// their own breakpoints.
    fn centerline_range(&self) -> (f64, f64) {
        let start = self.centerline(0.0);
        let end = self.centerline(self.length());
        (start.min(end), start.max(end))
    }

    /// Smallest left boundary and largest right boundary over `[0, length]`.
    fn lateral_extent(&self) -> (f64, f64) {
        let (low, high) = self.centerline_range();
        let half = self.width() / 2.0;
        (low - half, high + half)
    }

    /// `samples + 1` evenly spaced points from `0` to `length` inclusive.
    #[allow(clippy::cast_precision_loss)]
    fn profile(&self, samples: usize) -> Vec<ProfilePoint> {
        let samples = samples.max(1);
        let length = self.length();
        (0..=samples)
            .map(|i| {
                let x = length * i as f64 / samples as f64;
                let (left, right) = self.boundaries(x);
                ProfilePoint { x, left, right }
            })
            .collect()
    }
}
