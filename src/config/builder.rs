//! Default configuration file creation.
//!
//! The generated file lists every setting with its default and allowed range as an
//! aligned trailing comment. Location settings start commented out since they
//! cannot be guessed.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::common::constants::*;

/// Write a commented default configuration to `path`.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    fs::write(path, default_config_content())
        .with_context(|| format!("Failed to write default config to {}", path.display()))?;

    log_block_start!("Created default configuration");
    log_indented!("{}", path.display());
    log_indented!("Set latitude and longitude to start tracking daylight");
    Ok(())
}

/// Contents of a freshly created configuration file.
pub fn default_config_content() -> String {
    let list = |values: &[u32]| {
        let items: Vec<String> = values.iter().map(u32::to_string).collect();
        format!("[{}]", items.join(", "))
    };

    let content = ConfigBuilder::new()
        .add_section("Location")
        .add_commented_setting("latitude", "44.9778", "Geographic latitude (-90 to 90)")
        .add_commented_setting("longitude", "-93.2650", "Geographic longitude (-180 to 180)")
        .add_commented_setting(
            "timezone",
            "\"America/Chicago\"",
            "IANA timezone, detected from the coordinates when omitted",
        )
        .add_section("Milestones")
        .add_setting(
            "daylight_hours",
            &list(DEFAULT_DAYLIGHT_HOURS),
            &format!(
                "Daylight duration milestones in hours ({MINIMUM_DAYLIGHT_HOURS}-{MAXIMUM_DAYLIGHT_HOURS})"
            ),
        )
        .add_setting(
            "gain_minutes",
            &list(DEFAULT_GAIN_MINUTES),
            &format!(
                "Gain since the solstice milestones in minutes ({MINIMUM_GAIN_MINUTES}-{MAXIMUM_GAIN_MINUTES})"
            ),
        )
        .add_setting(
            "track_equinox",
            &DEFAULT_TRACK_EQUINOX.to_string(),
            "Report the spring equinox as a milestone",
        )
        .add_setting(
            "search_window_days",
            &DEFAULT_SEARCH_WINDOW_DAYS.to_string(),
            &format!(
                "Days to look ahead for duration milestones ({MINIMUM_SEARCH_WINDOW_DAYS}-{MAXIMUM_SEARCH_WINDOW_DAYS})"
            ),
        )
        .build();

    format!("{content}\n")
}

struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry::Section(format!("#[{title}]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    /// A setting written as a comment for the user to enable.
    fn add_commented_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("# {key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    fn build(self) -> String {
        // Align trailing comments one space past the longest setting
        let width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                ConfigEntry::Setting { line, .. } => Some(line.len()),
                ConfigEntry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut lines = Vec::new();
        for entry in self.entries {
            match entry {
                ConfigEntry::Section(title) => {
                    if !lines.is_empty() {
                        lines.push(String::new());
                    }
                    lines.push(title);
                }
                ConfigEntry::Setting { line, comment } => {
                    lines.push(format!("{line:<width$}{comment}"));
                }
            }
        }
        lines.join("\n")
    }
}
