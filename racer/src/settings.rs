//! Optional JSON configuration file.
//!
//! Every section is optional. Missing sections fall back to the preset of
//! the chosen variant, so a file can override just the track or just the
//! drive rules:
//!
//! ```json
//! {
//!   "variant": "straight",
//!   "track": { "length": 60.0, "width": 4.0,
//!              "shape": { "kind": "straight", "straight_length": 20.0, "slope": 0.25 } }
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use drive::{DriveConfig, SimConfig, Variant};
use serde::Deserialize;
use track::TrackSpec;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub variant: Option<Variant>,
    #[serde(default)]
    pub track: Option<TrackSpec>,
    #[serde(default)]
    pub drive: Option<DriveConfig>,
}

impl ConfigFile {
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a config file.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&json).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Fills missing sections from a preset.
    ///
    /// `override_variant` (from the command line) wins over the file's own
    /// `variant`; with neither, the straight preset is used.
    #[must_use]
    pub fn resolve(self, override_variant: Option<Variant>) -> SimConfig {
        let variant = override_variant.or(self.variant).unwrap_or(Variant::Straight);
        SimConfig {
            track: self.track.unwrap_or_else(|| variant.track()),
            drive: self.drive.unwrap_or_else(|| variant.drive()),
        }
    }
}
