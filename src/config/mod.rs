//! Configuration for daylightr.
//!
//! Settings live in `daylightr.toml` under `$XDG_CONFIG_HOME/daylightr/` (or the
//! directory passed with `--config`). A commented default file is written on first
//! run; reports need `latitude` and `longitude` to be filled in.
//!
//! ```toml
//! #[Location]
//! latitude = 44.9778             # Geographic latitude (-90 to 90)
//! longitude = -93.2650           # Geographic longitude (-180 to 180)
//! timezone = "America/Chicago"   # IANA timezone, detected from the coordinates when omitted
//!
//! #[Milestones]
//! daylight_hours = [10, 12]      # Daylight duration milestones in hours (1-23)
//! gain_minutes = [60, 120]       # Gain since the solstice milestones in minutes (1-600)
//! track_equinox = true           # Report the spring equinox as a milestone
//! search_window_days = 180       # Days to look ahead for duration milestones (30-366)
//!
//! #[Storage]
//! state_dir = "/path/to/state"   # Where reference snapshots are kept
//! ```
//!
//! Loading parses with `toml`, then [`validation::validate_config`] rejects values
//! outside their documented ranges with a message naming the field.

pub mod builder;
pub mod loading;
pub mod validation;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::PathBuf;

use crate::common::constants::*;
use crate::milestones::MilestoneSettings;
use crate::solar::{GeoCoordinate, determine_timezone_from_coordinates, timezone::parse_timezone};

// Re-export public API
pub use builder::create_default_config;
pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};

/// Contents of `daylightr.toml`. Missing optional fields take their defaults.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
    pub search_window_days: Option<u32>,
    pub daylight_hours: Option<Vec<u32>>,
    pub gain_minutes: Option<Vec<u32>>,
    pub track_equinox: Option<bool>,
    pub state_dir: Option<PathBuf>,
}

impl Config {
    /// Load from the default location, creating a default file when none exists.
    pub fn load() -> Result<Self> {
        loading::load()
    }

    /// The configured location.
    pub fn coordinate(&self) -> Result<GeoCoordinate> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => GeoCoordinate::new(latitude, longitude)
                .context("Invalid coordinates in configuration"),
            _ => anyhow::bail!(
                "No location configured. Set latitude and longitude in {}",
                get_config_path()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|_| CONFIG_FILE_NAME.to_string())
            ),
        }
    }

    /// The configured timezone, or the one containing the coordinates.
    pub fn resolve_timezone(&self, coordinate: GeoCoordinate) -> Result<Tz> {
        match self.timezone.as_deref() {
            Some(name) => parse_timezone(name),
            None => {
                let tz = determine_timezone_from_coordinates(
                    coordinate.latitude(),
                    coordinate.longitude(),
                );
                log_debug!("Detected timezone {} from {}", tz.name(), coordinate);
                Ok(tz)
            }
        }
    }

    pub fn search_window_days(&self) -> u32 {
        self.search_window_days.unwrap_or(DEFAULT_SEARCH_WINDOW_DAYS)
    }

    pub fn milestone_settings(&self) -> MilestoneSettings {
        MilestoneSettings {
            daylight_hours: self
                .daylight_hours
                .clone()
                .unwrap_or_else(|| DEFAULT_DAYLIGHT_HOURS.to_vec()),
            gain_minutes: self
                .gain_minutes
                .clone()
                .unwrap_or_else(|| DEFAULT_GAIN_MINUTES.to_vec()),
            track_equinox: self.track_equinox.unwrap_or(DEFAULT_TRACK_EQUINOX),
            search_window_days: self.search_window_days(),
        }
    }

    /// Print the effective configuration as a log block.
    pub fn log_config(&self, resolved_path: Option<&std::path::Path>) {
        log_block_start!("Loaded configuration");
        if let Some(path) = resolved_path {
            log_indented!("Path: {}", path.display());
        }
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => log_indented!("Location: {lat:.4}, {lon:.4}"),
            _ => log_indented!("Location: not set"),
        }
        log_indented!(
            "Timezone: {}",
            self.timezone.as_deref().unwrap_or("detected from location")
        );
        let settings = self.milestone_settings();
        log_indented!("Daylight milestones: {:?} hours", settings.daylight_hours);
        log_indented!("Gain milestones: {:?} minutes", settings.gain_minutes);
        log_indented!("Track equinox: {}", settings.track_equinox);
        log_indented!("Search window: {} days", settings.search_window_days);
    }
}

#[cfg(test)]
mod tests;
