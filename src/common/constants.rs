//! Application-wide constants.
//!
//! Astronomical constants, search bounds and configuration defaults/limits live here
//! so the core, config validation and the CLI agree on the same numbers.

// # Solar geometry

/// Zenith angle of visible sunrise/sunset in degrees (refraction plus solar radius).
pub const OFFICIAL_ZENITH: f64 = 90.833;

/// Zenith angle of civil twilight in degrees (sun 6° below the horizon).
pub const CIVIL_TWILIGHT_ZENITH: f64 = 96.0;

/// Julian day of the Unix epoch (1970-01-01T00:00:00Z).
pub const UNIX_EPOCH_JULIAN_DAY: f64 = 2_440_587.5;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Cached snapshots only count for a location within this many degrees.
pub const COORDINATE_TOLERANCE_DEGREES: f64 = 1e-6;

// # Milestone projection

/// Default number of days the duration milestone search walks forward.
pub const DEFAULT_SEARCH_WINDOW_DAYS: u32 = 180;

/// Cumulative-gain estimates at or beyond this many days are not reported.
pub const MAXIMUM_ESTIMATE_DAYS: f64 = 365.0;

// # Configuration defaults

pub const DEFAULT_DAYLIGHT_HOURS: &[u32] = &[10, 12];
pub const DEFAULT_GAIN_MINUTES: &[u32] = &[60, 120];
pub const DEFAULT_TRACK_EQUINOX: bool = true;

// # Configuration limits

pub const MINIMUM_SEARCH_WINDOW_DAYS: u32 = 30;
pub const MAXIMUM_SEARCH_WINDOW_DAYS: u32 = 366;
pub const MINIMUM_DAYLIGHT_HOURS: u32 = 1;
pub const MAXIMUM_DAYLIGHT_HOURS: u32 = 23;
pub const MINIMUM_GAIN_MINUTES: u32 = 1;
pub const MAXIMUM_GAIN_MINUTES: u32 = 600;

// # Files

pub const CONFIG_FILE_NAME: &str = "daylightr.toml";
pub const APP_DIR_NAME: &str = "daylightr";

// # Exit codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
