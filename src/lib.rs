//! # Daylightr Library
//!
//! Internal library for the daylightr binary application.
//!
//! This library exists to enable testing of the calculations and provide clean
//! separation between CLI dispatch (main.rs) and application logic.
//!
//! ## Architecture
//!
//! - **Astronomy**: `solar` computes sunrise, sunset and daylight for a date and
//!   location; `season` approximates solstices and equinoxes and classifies dates
//!   into the gaining or losing half-year
//! - **Analysis**: `comparison` measures day-over-day and since-solstice change;
//!   `milestones` projects thresholds of the gaining half-year; `summary` gathers
//!   everything into one serializable report
//! - **State**: `store` persists reference snapshots between runs; `tracker` ties
//!   the store to the comparison
//! - **Application**: `args`, `commands` and `config` for the CLI
//! - **Infrastructure**: `logger`, `time_source` and `error`

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod commands;
pub mod common;
pub mod comparison;
pub mod config;
pub mod error;
pub mod milestones;
pub mod season;
pub mod solar;
pub mod store;
pub mod summary;
pub mod time_source;
pub mod tracker;

pub use comparison::{ComparisonResult, compare};
pub use error::{DaylightError, ReferenceKind};
pub use milestones::{Milestone, MilestoneKind, MilestoneState, update_milestones};
pub use season::{SeasonClassification, SeasonalCalendar, SolarEventKind};
pub use solar::{DaylightSnapshot, GeoCoordinate, calculate_daylight};
pub use summary::{WidgetSummary, summarize};
pub use tracker::DaylightTracker;
