//! Everything a widget or status line shows, in one serializable value.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use serde::Serialize;

use crate::comparison::{self, ComparisonResult};
use crate::milestones::{self, Milestone, MilestoneSettings};
use crate::season::{Countdown, DatedEvent, Hemisphere, SeasonClassification, SeasonalCalendar};
use crate::solar::{GeoCoordinate, solar_events};

/// A day's daylight report. Numbers that are unavailable serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetSummary {
    pub date: NaiveDate,
    pub location: GeoCoordinate,
    pub timezone: String,
    pub sunrise: Option<DateTime<FixedOffset>>,
    pub sunset: Option<DateTime<FixedOffset>>,
    pub civil_dawn: Option<DateTime<FixedOffset>>,
    pub civil_dusk: Option<DateTime<FixedOffset>>,
    pub solar_noon: DateTime<FixedOffset>,
    pub daylight_seconds: Option<i64>,
    pub daily_change_seconds: Option<i64>,
    pub cumulative_change_seconds: Option<i64>,
    pub velocity_seconds_per_day: Option<i64>,
    pub season: SeasonClassification,
    pub reference_solstice: DatedEvent,
    pub progress: f64,
    pub next_equinox: Option<Countdown>,
    pub next_solstice: Option<Countdown>,
    pub milestones: Vec<Milestone>,
}

/// Build the report for `date`.
///
/// `comparison` is the tracker's result when one is available; without it the
/// changes are computed directly and left empty on days without a sunrise.
pub fn summarize<Tz: TimeZone>(
    date: NaiveDate,
    coordinate: GeoCoordinate,
    tz: &Tz,
    timezone: &str,
    comparison: Option<&ComparisonResult>,
    settings: &MilestoneSettings,
) -> WidgetSummary {
    let calendar = SeasonalCalendar::new(tz.clone());
    let events = solar_events(date, coordinate, tz);
    let reference_solstice = calendar.most_recent_solstice(date);

    let daily_change_seconds = match comparison {
        Some(result) => Some(result.daily_change_seconds),
        None => date
            .pred_opt()
            .and_then(|yesterday| {
                comparison::daily_change_seconds(yesterday, date, coordinate, tz).ok()
            }),
    };
    let cumulative_change_seconds = match comparison {
        Some(result) => result.cumulative_change_seconds,
        None => comparison::cumulative_change_seconds(
            reference_solstice.date,
            date,
            coordinate,
            tz,
        )
        .ok(),
    };
    let season = comparison.map(|result| result.season).unwrap_or_else(|| {
        Hemisphere::from_latitude(coordinate.latitude()).orient(calendar.classify(date))
    });

    WidgetSummary {
        date,
        location: coordinate,
        timezone: timezone.to_string(),
        sunrise: events.sunrise(),
        sunset: events.sunset(),
        civil_dawn: events.civil_dawn(),
        civil_dusk: events.civil_dusk(),
        solar_noon: events.solar_noon,
        daylight_seconds: events
            .sunrise()
            .zip(events.sunset())
            .map(|(rise, set)| (set - rise).num_seconds()),
        daily_change_seconds,
        cumulative_change_seconds,
        velocity_seconds_per_day: comparison::daylight_velocity(date, coordinate, tz).ok(),
        season,
        reference_solstice,
        progress: calendar.progress_through_half_year(date),
        next_equinox: calendar.days_until_equinox(date),
        next_solstice: calendar.days_until_solstice(date),
        milestones: milestones::update_milestones_with(date, coordinate, tz, settings),
    }
}

/// Format a signed number of seconds as "+1m 23s" / "-45s".
pub fn format_change(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "+" };
    let magnitude = seconds.unsigned_abs();
    let (hours, minutes, secs) = (magnitude / 3600, (magnitude % 3600) / 60, magnitude % 60);
    if hours > 0 {
        format!("{sign}{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{sign}{minutes}m {secs}s")
    } else {
        format!("{sign}{secs}s")
    }
}

/// Format a duration in seconds as "9h 19m".
pub fn format_duration(seconds: i64) -> String {
    let minutes = seconds.max(0) / 60;
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}
