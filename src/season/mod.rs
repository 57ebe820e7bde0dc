//! Solstices, equinoxes and the two daylight half-years.
//!
//! This module approximates the four cardinal solar instants of a year and answers
//! "where in the year are we" questions: which half-year a date belongs to, which
//! solstice anchors it, how far through it we are, and how long until the next
//! equinox or solstice.
//!
//! ## Module Structure
//!
//! - [`window`]: Ordered candidate events spanning the previous, current and next year
//! - [`calendar`]: Date-level queries in a location's timezone
//!
//! ## Naming
//!
//! Event kinds carry their northern-hemisphere names (the "winter" solstice is the
//! December one). [`classify_at`] uses the same convention; [`Hemisphere`] flips the
//! classification for southern locations.
//!
//! ## Boundaries
//!
//! An instant that exactly equals an event belongs to the period starting at that
//! event: lower bounds are inclusive, upper bounds exclusive.

pub mod calendar;
pub mod window;

pub use calendar::{Countdown, DatedEvent, SeasonalCalendar};
pub use window::EventWindow;

use chrono::{DateTime, Datelike, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::constants::{SECONDS_PER_DAY, UNIX_EPOCH_JULIAN_DAY};

/// The four cardinal solar events of a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolarEventKind {
    SpringEquinox,
    SummerSolstice,
    FallEquinox,
    WinterSolstice,
}

impl SolarEventKind {
    pub const ALL: [SolarEventKind; 4] = [
        SolarEventKind::SpringEquinox,
        SolarEventKind::SummerSolstice,
        SolarEventKind::FallEquinox,
        SolarEventKind::WinterSolstice,
    ];

    pub fn is_solstice(&self) -> bool {
        matches!(self, Self::SummerSolstice | Self::WinterSolstice)
    }

    pub fn is_equinox(&self) -> bool {
        matches!(self, Self::SpringEquinox | Self::FallEquinox)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SpringEquinox => "Spring equinox",
            Self::SummerSolstice => "Summer solstice",
            Self::FallEquinox => "Fall equinox",
            Self::WinterSolstice => "Winter solstice",
        }
    }

    /// Second-order Julian ephemeris day polynomial coefficients, Y = (year - 2000) / 1000.
    fn coefficients(&self) -> (f64, f64, f64) {
        match self {
            Self::SpringEquinox => (2_451_623.809_84, 365_242.374_04, 0.051_69),
            Self::SummerSolstice => (2_451_716.567_67, 365_241.626_03, 0.003_25),
            Self::FallEquinox => (2_451_810.217_15, 365_242.017_67, -0.115_75),
            Self::WinterSolstice => (2_451_900.059_52, 365_242.740_49, -0.062_23),
        }
    }

    /// Approximate Julian ephemeris day of this event in `year`.
    pub fn julian_day(&self, year: i32) -> f64 {
        let y = (f64::from(year) - 2000.0) / 1000.0;
        let (a, b, c) = self.coefficients();
        a + b * y + c * y * y
    }
}

impl fmt::Display for SolarEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Convert a Julian day into a UTC instant (second precision).
///
/// Saturates at chrono's representable range instead of panicking.
pub fn julian_day_to_utc(julian_day: f64) -> DateTime<Utc> {
    let seconds = ((julian_day - UNIX_EPOCH_JULIAN_DAY) * SECONDS_PER_DAY).round() as i64;
    DateTime::from_timestamp(seconds, 0).unwrap_or(if seconds < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// One solar event at a specific instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolarEvent {
    pub kind: SolarEventKind,
    pub at: DateTime<Utc>,
}

/// The four cardinal instants of one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalYear {
    pub year: i32,
    pub spring_equinox: DateTime<Utc>,
    pub summer_solstice: DateTime<Utc>,
    pub fall_equinox: DateTime<Utc>,
    pub winter_solstice: DateTime<Utc>,
}

impl SeasonalYear {
    pub fn new(year: i32) -> Self {
        let at = |kind: SolarEventKind| julian_day_to_utc(kind.julian_day(year));
        Self {
            year,
            spring_equinox: at(SolarEventKind::SpringEquinox),
            summer_solstice: at(SolarEventKind::SummerSolstice),
            fall_equinox: at(SolarEventKind::FallEquinox),
            winter_solstice: at(SolarEventKind::WinterSolstice),
        }
    }

    pub fn instant(&self, kind: SolarEventKind) -> DateTime<Utc> {
        match kind {
            SolarEventKind::SpringEquinox => self.spring_equinox,
            SolarEventKind::SummerSolstice => self.summer_solstice,
            SolarEventKind::FallEquinox => self.fall_equinox,
            SolarEventKind::WinterSolstice => self.winter_solstice,
        }
    }

    /// Events of this year in chronological order.
    pub fn events(&self) -> [SolarEvent; 4] {
        SolarEventKind::ALL.map(|kind| SolarEvent {
            kind,
            at: self.instant(kind),
        })
    }
}

/// Cardinal instants for `year`.
pub fn seasonal_year(year: i32) -> SeasonalYear {
    SeasonalYear::new(year)
}

/// Whether days are getting longer or shorter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonClassification {
    GainingDaylight,
    LosingDaylight,
}

impl SeasonClassification {
    pub fn opposite(&self) -> Self {
        match self {
            Self::GainingDaylight => Self::LosingDaylight,
            Self::LosingDaylight => Self::GainingDaylight,
        }
    }

    pub fn is_gaining(&self) -> bool {
        matches!(self, Self::GainingDaylight)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::GainingDaylight => "Gaining daylight",
            Self::LosingDaylight => "Losing daylight",
        }
    }
}

impl fmt::Display for SeasonClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Hemisphere of a location, used to orient the season classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    Northern,
    Southern,
}

impl Hemisphere {
    /// The equator counts as northern.
    pub fn from_latitude(latitude: f64) -> Self {
        if latitude < 0.0 {
            Hemisphere::Southern
        } else {
            Hemisphere::Northern
        }
    }

    /// Orient a northern-convention classification for this hemisphere.
    pub fn orient(&self, season: SeasonClassification) -> SeasonClassification {
        match self {
            Hemisphere::Northern => season,
            Hemisphere::Southern => season.opposite(),
        }
    }
}

/// Most recent solstice at or before `at`.
pub fn most_recent_solstice_at(at: DateTime<Utc>) -> SolarEvent {
    EventWindow::around(at.year())
        .latest_at_or_before(at, SolarEventKind::is_solstice)
        .unwrap_or_else(|| fallback_event(at, SolarEventKind::WinterSolstice, -1))
}

/// First solstice strictly after `at`.
pub fn next_solstice_at(at: DateTime<Utc>) -> SolarEvent {
    EventWindow::around(at.year())
        .first_after(at, SolarEventKind::is_solstice)
        .unwrap_or_else(|| fallback_event(at, SolarEventKind::SummerSolstice, 1))
}

/// First equinox strictly after `at`.
pub fn next_equinox_at(at: DateTime<Utc>) -> Option<SolarEvent> {
    EventWindow::around(at.year()).first_after(at, SolarEventKind::is_equinox)
}

/// Northern-convention season of the instant `at`.
///
/// Gaining from a winter solstice (inclusive) to the following summer solstice
/// (exclusive), losing otherwise.
pub fn classify_at(at: DateTime<Utc>) -> SeasonClassification {
    match most_recent_solstice_at(at).kind {
        SolarEventKind::WinterSolstice => SeasonClassification::GainingDaylight,
        _ => SeasonClassification::LosingDaylight,
    }
}

/// Fraction of the current half-year elapsed at `at`, clamped to [0, 1].
pub fn progress_at(at: DateTime<Utc>) -> f64 {
    let start = most_recent_solstice_at(at).at;
    let end = next_solstice_at(at).at;
    let total = (end - start).num_seconds() as f64;
    if total <= 0.0 {
        return 0.0;
    }
    let elapsed = (at - start).num_seconds() as f64;
    (elapsed / total).clamp(0.0, 1.0)
}

/// Half a year away from `at`; only reachable at the edge of chrono's range.
fn fallback_event(at: DateTime<Utc>, kind: SolarEventKind, direction: i64) -> SolarEvent {
    SolarEvent {
        kind,
        at: at
            .checked_add_signed(TimeDelta::days(182 * direction))
            .unwrap_or(at),
    }
}
