#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Drive
//!
//! The vehicle step engine of the racer simulation.
//!
//! A point-mass vehicle drives along a [`track::Track`] at a bounded speed.
//! Every tick it receives one of two steering actions and the engine decides,
//! in a fixed order, whether the vehicle left the lane, reached the finish
//! line, or simply made progress. The result is an [`Observation`], a scalar
//! reward and a terminal flag for whatever learner is driving.
//!
//! ## Key Components
//!
//! -   **[`Simulation`]:** owns the track and the [`VehicleState`] and exposes
//!     `reset`, `reset_with` and `step`, plus read-only accessors for
//!     renderers.
//! -   **[`DriveConfig`] / [`SimConfig`]:** the configuration surface, with
//!     presets for each [`Variant`].
//! -   **[`Env`]:** the vector-level view for learning code.
//!
//! ## Usage
//!
//! ```rust
//! use drive::{Action, Simulation, Variant};
//!
//! let mut sim = Simulation::preset(Variant::Straight)?;
//! let obs = sim.reset();
//! assert_eq!(obs.position.x, 0.0);
//! let step = sim.step(Action::TurnRight)?;
//! assert!(!step.terminal);
//! # Ok::<(), drive::DriveError>(())
//! ```

pub mod config;
pub mod env;
pub mod error;
pub mod observation;
pub mod simulation;
pub mod types;

pub use config::{DriveConfig, RewardBase, SimConfig, Variant};
pub use env::Env;
pub use error::DriveError;
pub use observation::{Observation, ObservationBounds, OBSERVATION_DIM};
pub use simulation::{Simulation, StepResult};
pub use types::{wrap_heading, Action, StepOutcome, VehicleState, ACTION_COUNT};

pub use glam::DVec2;
pub use track;
