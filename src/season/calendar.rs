//! Date-level seasonal queries in a location's timezone.
//!
//! Calendar dates are evaluated at local noon. A solstice or equinox that falls in
//! the morning therefore already counts for its own date, and one that falls in
//! the afternoon is still reported as upcoming "today".

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::Serialize;

use super::window::EventWindow;
use super::{
    SeasonClassification, SolarEvent, SolarEventKind, SeasonalYear, classify_at,
    most_recent_solstice_at, next_equinox_at, progress_at,
};

/// A solar event together with the local calendar date it falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatedEvent {
    pub kind: SolarEventKind,
    pub at: DateTime<Utc>,
    pub date: NaiveDate,
}

/// Whole days until an upcoming solar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub days: i64,
    pub kind: SolarEventKind,
    pub date: NaiveDate,
}

/// Seasonal queries for calendar dates in one timezone.
#[derive(Debug, Clone)]
pub struct SeasonalCalendar<Tz: TimeZone> {
    tz: Tz,
}

impl<Tz: TimeZone> SeasonalCalendar<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// The instant that stands for `date`: local noon.
    pub fn moment(&self, date: NaiveDate) -> DateTime<Utc> {
        let noon = date.and_time(NaiveTime::MIN) + TimeDelta::hours(12);
        self.tz
            .from_local_datetime(&noon)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&noon))
    }

    /// Local calendar date of an instant.
    pub fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.tz).date_naive()
    }

    fn dated(&self, event: SolarEvent) -> DatedEvent {
        DatedEvent {
            kind: event.kind,
            at: event.at,
            date: self.local_date(event.at),
        }
    }

    pub fn seasonal_year(&self, year: i32) -> SeasonalYear {
        SeasonalYear::new(year)
    }

    /// The year's events with their local dates.
    pub fn events_of(&self, year: i32) -> [DatedEvent; 4] {
        SeasonalYear::new(year).events().map(|event| self.dated(event))
    }

    pub fn classify(&self, date: NaiveDate) -> SeasonClassification {
        classify_at(self.moment(date))
    }

    pub fn most_recent_solstice(&self, date: NaiveDate) -> DatedEvent {
        self.dated(most_recent_solstice_at(self.moment(date)))
    }

    pub fn days_until_equinox(&self, date: NaiveDate) -> Option<Countdown> {
        next_equinox_at(self.moment(date)).map(|event| self.countdown(date, event))
    }

    pub fn days_until_solstice(&self, date: NaiveDate) -> Option<Countdown> {
        let at = self.moment(date);
        EventWindow::around(at.year())
            .first_after(at, SolarEventKind::is_solstice)
            .map(|event| self.countdown(date, event))
    }

    pub fn progress_through_half_year(&self, date: NaiveDate) -> f64 {
        progress_at(self.moment(date))
    }

    fn countdown(&self, from: NaiveDate, event: SolarEvent) -> Countdown {
        let date = self.local_date(event.at);
        Countdown {
            days: (date - from).num_days(),
            kind: event.kind,
            date,
        }
    }
}
