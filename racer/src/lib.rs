#![deny(clippy::all, clippy::pedantic)]
//! # Racer
//!
//! Entry point for the racer workspace: a point-mass vehicle steering along a
//! bounded track, one discrete action per tick.
//!
//! ## Project Architecture
//!
//! -   **[`track`]:** lane geometry. Given a longitudinal position it returns
//!     the centerline and the left/right boundaries for one of three shapes.
//! -   **[`drive`]:** the vehicle step engine. It owns the vehicle state and
//!     resolves each tick into off-track, finished or progress, producing an
//!     observation and a reward.
//! -   **`racer`:** this crate. It loads configuration, runs episodes with a
//!     simple built-in [`policy`] on one or more worker threads, and logs the
//!     results. A real learner plugs in at the same seam as the built-in
//!     policies.
//!
//! ## Usage
//!
//! ```text
//! racer --variant segmented --episodes 20 --workers 4 --seed 7
//! RUST_LOG=drive=debug racer --config my_track.json
//! ```

pub mod app;
pub mod cli;
pub mod policy;
pub mod settings;

pub use drive;
pub use track;
