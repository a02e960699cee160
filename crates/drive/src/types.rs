use std::f64::consts::TAU;

use glam::DVec2;

use crate::error::DriveError;

/// Number of discrete actions.
pub const ACTION_COUNT: usize = 2;

/// Discrete steering input applied once per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Rotate the heading counter-clockwise by the turn increment.
    TurnLeft,
    /// Rotate the heading clockwise by the turn increment.
    TurnRight,
}

impl Action {
    pub const ALL: [Action; ACTION_COUNT] = [Action::TurnLeft, Action::TurnRight];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Action::TurnLeft => 0,
            Action::TurnRight => 1,
        }
    }

    /// Sign applied to the turn increment.
    #[must_use]
    pub const fn turn_sign(self) -> f64 {
        match self {
            Action::TurnLeft => 1.0,
            Action::TurnRight => -1.0,
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = DriveError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Action::TurnLeft),
            1 => Ok(Action::TurnRight),
            other => Err(DriveError::InvalidAction(other)),
        }
    }
}

/// Kinematic state of the single vehicle on a track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleState {
    /// `x` is longitudinal, `y` lateral.
    pub position: DVec2,
    /// Radians in `[0, 2π)`.
    pub heading: f64,
    pub speed: f64,
    pub terminal: bool,
}

impl VehicleState {
    #[must_use]
    pub fn new(position: DVec2, heading: f64, speed: f64) -> Self {
        Self { position, heading: wrap_heading(heading), speed, terminal: false }
    }

    /// Unit vector along the current heading.
    #[must_use]
    pub fn direction(&self) -> DVec2 {
        DVec2::new(self.heading.cos(), self.heading.sin())
    }
}

/// Wraps an angle into `[0, 2π)`.
#[must_use]
pub fn wrap_heading(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Which branch of the tick resolution was taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The predicted position left the lane; the vehicle was clamped and stopped.
    OffTrack,
    /// The committed position had already crossed the finish line.
    Finished,
    /// The vehicle advanced along its heading.
    Progress,
}
