//! Bounded day-by-day look-ahead.

use chrono::{NaiveDate, TimeZone};

use crate::error::{DaylightError, Result};
use crate::solar::{Crossing, GeoCoordinate, Zenith, crossing};

const FULL_DAY_SECONDS: i64 = 86_400;

/// Daylight seconds on `date`, counting polar day as a full day and polar night as none.
pub fn effective_daylight_seconds<Tz: TimeZone>(
    date: NaiveDate,
    coordinate: GeoCoordinate,
    tz: &Tz,
) -> i64 {
    match crossing(date, coordinate, tz, Zenith::Official) {
        Crossing::Crossing { rise, set } => (set - rise).num_seconds().max(0),
        Crossing::AlwaysAbove => FULL_DAY_SECONDS,
        Crossing::AlwaysBelow => 0,
    }
}

/// One day of a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayEvaluation {
    pub date: NaiveDate,
    /// Days after the first forecast day.
    pub offset: u32,
    pub daylight_seconds: i64,
}

/// Lazily evaluated daylight for consecutive days, at most `horizon` of them.
pub struct Forecast<'a, Tz: TimeZone> {
    coordinate: GeoCoordinate,
    tz: &'a Tz,
    next: Option<NaiveDate>,
    offset: u32,
    horizon: u32,
}

impl<'a, Tz: TimeZone> Forecast<'a, Tz> {
    pub fn new(start: NaiveDate, coordinate: GeoCoordinate, tz: &'a Tz, horizon: u32) -> Self {
        Self {
            coordinate,
            tz,
            next: Some(start),
            offset: 0,
            horizon,
        }
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    /// First day whose daylight satisfies `reached`.
    pub fn first_where(mut self, reached: impl Fn(i64) -> bool) -> Result<DayEvaluation> {
        let horizon_days = self.horizon;
        self.find(|day| reached(day.daylight_seconds))
            .ok_or(DaylightError::ProjectionHorizonExceeded { horizon_days })
    }
}

impl<Tz: TimeZone> Iterator for Forecast<'_, Tz> {
    type Item = DayEvaluation;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.horizon {
            return None;
        }
        let date = self.next?;
        let evaluation = DayEvaluation {
            date,
            offset: self.offset,
            daylight_seconds: effective_daylight_seconds(date, self.coordinate, self.tz),
        };
        self.next = date.succ_opt();
        self.offset += 1;
        Some(evaluation)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.next.is_some() {
            (self.horizon - self.offset) as usize
        } else {
            0
        };
        (0, Some(remaining))
    }
}
