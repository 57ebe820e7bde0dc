//! Error taxonomy for the daylight core.
//!
//! The solar engine, seasonal calendar, comparison engine and milestone projector
//! report failures through [`DaylightError`]. Application layers (config, store,
//! commands) wrap these in `anyhow::Error` with additional context.

use chrono::NaiveDate;
use thiserror::Error;

/// Result alias used throughout the daylight core.
pub type Result<T> = std::result::Result<T, DaylightError>;

/// Which daylight reference a comparison was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// The day the comparison is made for.
    Today,
    /// The calendar day immediately preceding the comparison date.
    PreviousDay,
    /// The day following the comparison date (velocity only).
    NextDay,
    /// The most recent solstice before the comparison date.
    Solstice,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceKind::Today => write!(f, "today"),
            ReferenceKind::PreviousDay => write!(f, "previous day"),
            ReferenceKind::NextDay => write!(f, "next day"),
            ReferenceKind::Solstice => write!(f, "solstice"),
        }
    }
}

/// Errors produced by the daylight core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DaylightError {
    /// The sun never crosses the requested zenith angle on this date (polar day or night).
    #[error("no sunrise or sunset on {date} at {latitude:.4}°, {longitude:.4}°")]
    UndefinedCrossing {
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
    },

    /// A comparison needed a snapshot that is neither cached nor computable.
    #[error("no daylight data for the {kind} reference ({date})")]
    MissingReference { kind: ReferenceKind, date: NaiveDate },

    /// Latitude or longitude outside the valid domain.
    #[error("{field} {value} is out of range (must be between {min} and {max} degrees)")]
    OutOfBoundsInput {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A milestone projection exhausted its search window without a crossing.
    #[error("no crossing found within {horizon_days} days")]
    ProjectionHorizonExceeded { horizon_days: u32 },
}

impl DaylightError {
    /// Reinterpret an undefined crossing as a missing comparison reference.
    ///
    /// Other variants pass through unchanged.
    pub(crate) fn into_missing(self, kind: ReferenceKind) -> Self {
        match self {
            DaylightError::UndefinedCrossing { date, .. } => {
                DaylightError::MissingReference { kind, date }
            }
            other => other,
        }
    }

    /// True when the error means "this number is not available today" rather than a caller bug.
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, DaylightError::OutOfBoundsInput { .. })
    }
}
