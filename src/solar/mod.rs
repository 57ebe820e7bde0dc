//! Sunrise, sunset and civil twilight for a calendar date and location.
//!
//! This module is the solar position engine of daylightr. Every function here is pure:
//! the same date, coordinate and timezone offset always produce the same instants.
//!
//! ## Module Structure
//!
//! - [`noaa`]: NOAA Fourier-series approximation (equation of time, declination, hour angle)
//! - [`timezone`]: Timezone detection from coordinates and per-date UTC offsets
//!
//! ## Polar day and night
//!
//! When the sun never crosses the requested zenith angle the engine reports a
//! [`Crossing::AlwaysAbove`] or [`Crossing::AlwaysBelow`] outcome instead of an instant.
//! [`calculate_daylight`] returns `None` on those days; callers treat that as a valid
//! answer, not a failure.

pub(crate) mod noaa;
pub mod timezone;

pub use timezone::{determine_timezone_from_coordinates, offset_on};

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::constants::{
    CIVIL_TWILIGHT_ZENITH, COORDINATE_TOLERANCE_DEGREES, OFFICIAL_ZENITH,
};
use crate::error::{DaylightError, Result};
use noaa::{HourAngle, SolarDay};

/// A validated geographic coordinate.
///
/// Construction through [`GeoCoordinate::new`] is the only way to obtain one, so every
/// coordinate that reaches the solar engine is within the documented domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    /// Create a coordinate, rejecting latitude outside [-90, 90] or longitude outside [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(DaylightError::OutOfBoundsInput {
                field: "latitude",
                value: latitude,
                min: -90.0,
                max: 90.0,
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(DaylightError::OutOfBoundsInput {
                field: "longitude",
                value: longitude,
                min: -180.0,
                max: 180.0,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Whether `other` is the same place, within [`COORDINATE_TOLERANCE_DEGREES`].
    pub fn is_near(&self, other: &GeoCoordinate) -> bool {
        (self.latitude - other.latitude).abs() <= COORDINATE_TOLERANCE_DEGREES
            && (self.longitude - other.longitude).abs() <= COORDINATE_TOLERANCE_DEGREES
    }
}

/// Unvalidated coordinate fields as stored on disk.
#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for GeoCoordinate {
    type Error = DaylightError;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        GeoCoordinate::new(raw.latitude, raw.longitude)
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat_dir = if self.latitude >= 0.0 { "N" } else { "S" };
        let lon_dir = if self.longitude >= 0.0 { "E" } else { "W" };
        write!(
            f,
            "{:.3}°{}, {:.3}°{}",
            self.latitude.abs(),
            lat_dir,
            self.longitude.abs(),
            lon_dir
        )
    }
}

/// Zenith angle that defines a rising/setting event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Zenith {
    /// Visible sunrise/sunset (upper limb on the horizon, standard refraction)
    Official,
    /// Civil twilight, sun 6° below the horizon
    Civil,
    /// Custom zenith angle in degrees
    Custom(f64),
}

impl Zenith {
    pub fn degrees(&self) -> f64 {
        match self {
            Zenith::Official => OFFICIAL_ZENITH,
            Zenith::Civil => CIVIL_TWILIGHT_ZENITH,
            Zenith::Custom(angle) => *angle,
        }
    }
}

/// Outcome of solving for the two crossings of a zenith angle on one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Crossing {
    /// The sun crosses the zenith angle going up at `rise` and going down at `set`.
    Crossing {
        rise: DateTime<FixedOffset>,
        set: DateTime<FixedOffset>,
    },
    /// The sun stays above the zenith angle for the whole day (polar day).
    AlwaysAbove,
    /// The sun never reaches the zenith angle (polar night).
    AlwaysBelow,
}

impl Crossing {
    pub fn rise(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Crossing::Crossing { rise, .. } => Some(*rise),
            _ => None,
        }
    }

    pub fn set(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Crossing::Crossing { set, .. } => Some(*set),
            _ => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Crossing::Crossing { .. })
    }
}

/// Daylight measurement for one calendar day at one location.
///
/// `daylight_seconds` is always `sunset - sunrise`; a snapshot only exists on days
/// with both a sunrise and a sunset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaylightSnapshot {
    pub date: NaiveDate,
    pub location: GeoCoordinate,
    pub sunrise: DateTime<FixedOffset>,
    pub sunset: DateTime<FixedOffset>,
    pub daylight_seconds: i64,
}

impl DaylightSnapshot {
    fn from_instants(
        date: NaiveDate,
        location: GeoCoordinate,
        sunrise: DateTime<FixedOffset>,
        sunset: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            date,
            location,
            sunrise,
            sunset,
            daylight_seconds: (sunset - sunrise).num_seconds().max(0),
        }
    }

    /// Daylight duration in fractional minutes.
    pub fn daylight_minutes(&self) -> f64 {
        self.daylight_seconds as f64 / 60.0
    }

    /// Whether this snapshot describes the given calendar day.
    pub fn is_for(&self, date: NaiveDate) -> bool {
        self.date == date
    }

    /// Whether this snapshot was computed for `date` at `coordinate`.
    pub fn describes(&self, date: NaiveDate, coordinate: GeoCoordinate) -> bool {
        self.is_for(date) && self.location.is_near(&coordinate)
    }
}

/// All daily solar events at one location.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarEvents {
    pub date: NaiveDate,
    pub solar_noon: DateTime<FixedOffset>,
    pub daylight: Crossing,
    pub civil_twilight: Crossing,
}

impl SolarEvents {
    pub fn sunrise(&self) -> Option<DateTime<FixedOffset>> {
        self.daylight.rise()
    }

    pub fn sunset(&self) -> Option<DateTime<FixedOffset>> {
        self.daylight.set()
    }

    pub fn civil_dawn(&self) -> Option<DateTime<FixedOffset>> {
        self.civil_twilight.rise()
    }

    pub fn civil_dusk(&self) -> Option<DateTime<FixedOffset>> {
        self.civil_twilight.set()
    }
}

/// Convert minutes after UTC midnight of `date` into an instant in the given offset.
fn instant_at(date: NaiveDate, utc_minutes: f64, offset: FixedOffset) -> DateTime<FixedOffset> {
    let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
    let seconds = (utc_minutes * 60.0).round() as i64;
    (midnight + TimeDelta::seconds(seconds)).with_timezone(&offset)
}

/// Solve for the rising and setting crossings of `zenith` on `date`.
pub fn crossing<Tz: TimeZone>(
    date: NaiveDate,
    coordinate: GeoCoordinate,
    tz: &Tz,
    zenith: Zenith,
) -> Crossing {
    let day = SolarDay::for_ordinal(date.ordinal());
    match day.hour_angle(coordinate.latitude(), zenith.degrees()) {
        HourAngle::AlwaysAbove => Crossing::AlwaysAbove,
        HourAngle::AlwaysBelow => Crossing::AlwaysBelow,
        HourAngle::Degrees(h) => {
            let offset = offset_on(tz, date);
            Crossing::Crossing {
                rise: instant_at(date, day.utc_minutes(coordinate.longitude(), -h), offset),
                set: instant_at(date, day.utc_minutes(coordinate.longitude(), h), offset),
            }
        }
    }
}

/// Sunrise, sunset, civil twilight and solar noon for one day.
pub fn solar_events<Tz: TimeZone>(date: NaiveDate, coordinate: GeoCoordinate, tz: &Tz) -> SolarEvents {
    let day = SolarDay::for_ordinal(date.ordinal());
    let offset = offset_on(tz, date);
    SolarEvents {
        date,
        solar_noon: instant_at(date, day.utc_minutes(coordinate.longitude(), 0.0), offset),
        daylight: crossing(date, coordinate, tz, Zenith::Official),
        civil_twilight: crossing(date, coordinate, tz, Zenith::Civil),
    }
}

/// Daylight snapshot for `date`, or `None` during polar day or night.
pub fn calculate_daylight<Tz: TimeZone>(
    date: NaiveDate,
    coordinate: GeoCoordinate,
    tz: &Tz,
) -> Option<DaylightSnapshot> {
    match crossing(date, coordinate, tz, Zenith::Official) {
        Crossing::Crossing { rise, set } => Some(DaylightSnapshot::from_instants(date, coordinate, rise, set)),
        Crossing::AlwaysAbove | Crossing::AlwaysBelow => None,
    }
}

/// Like [`calculate_daylight`] but reports polar days as [`DaylightError::UndefinedCrossing`].
pub fn require_daylight<Tz: TimeZone>(
    date: NaiveDate,
    coordinate: GeoCoordinate,
    tz: &Tz,
) -> Result<DaylightSnapshot> {
    calculate_daylight(date, coordinate, tz).ok_or(DaylightError::UndefinedCrossing {
        date,
        latitude: coordinate.latitude(),
        longitude: coordinate.longitude(),
    })
}

#[cfg(test)]
mod tests;
