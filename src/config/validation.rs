//! Configuration validation functionality.
//!
//! Rejects values outside their documented ranges before anything is computed
//! from them.

use anyhow::Result;

use super::Config;
use crate::common::constants::*;
use crate::solar::timezone::parse_timezone;

/// Validate every field that is present.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(lat) = config.latitude
        && !(-90.0..=90.0).contains(&lat)
    {
        anyhow::bail!("latitude must be between -90 and 90 degrees (got {})", lat);
    }

    if let Some(lon) = config.longitude
        && !(-180.0..=180.0).contains(&lon)
    {
        anyhow::bail!(
            "longitude must be between -180 and 180 degrees (got {})",
            lon
        );
    }

    if config.latitude.is_some() != config.longitude.is_some() {
        anyhow::bail!("latitude and longitude must be set together");
    }

    if let Some(name) = config.timezone.as_deref() {
        parse_timezone(name)?;
    }

    if let Some(days) = config.search_window_days
        && !(MINIMUM_SEARCH_WINDOW_DAYS..=MAXIMUM_SEARCH_WINDOW_DAYS).contains(&days)
    {
        anyhow::bail!(
            "search_window_days ({}) must be between {} and {} days",
            days,
            MINIMUM_SEARCH_WINDOW_DAYS,
            MAXIMUM_SEARCH_WINDOW_DAYS
        );
    }

    if let Some(hours) = &config.daylight_hours {
        validate_thresholds(
            "daylight_hours",
            hours,
            MINIMUM_DAYLIGHT_HOURS,
            MAXIMUM_DAYLIGHT_HOURS,
            "hours",
        )?;
    }

    if let Some(minutes) = &config.gain_minutes {
        validate_thresholds(
            "gain_minutes",
            minutes,
            MINIMUM_GAIN_MINUTES,
            MAXIMUM_GAIN_MINUTES,
            "minutes",
        )?;
    }

    Ok(())
}

/// Each threshold must be in range and appear only once.
fn validate_thresholds(field: &str, values: &[u32], min: u32, max: u32, unit: &str) -> Result<()> {
    for (index, &value) in values.iter().enumerate() {
        if !(min..=max).contains(&value) {
            anyhow::bail!("{field} value {value} must be between {min} and {max} {unit}");
        }
        if values[..index].contains(&value) {
            anyhow::bail!("{field} lists {value} more than once");
        }
    }
    Ok(())
}
