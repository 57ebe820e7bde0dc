//! Seasons command - the solstices and equinoxes of a year in local time.
//!
//! Only a timezone is needed here. Without a configured location or timezone
//! the events are shown in UTC.

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use serde::Serialize;

use super::{print_json, report_date};
use crate::args::GlobalOptions;
use crate::config::Config;
use crate::season::{Countdown, DatedEvent, SeasonalCalendar};
use crate::solar::timezone::parse_timezone;

#[derive(Debug, Serialize)]
struct SeasonsReport {
    year: i32,
    timezone: &'static str,
    events: [DatedEvent; 4],
    next_equinox: Option<Countdown>,
    next_solstice: Option<Countdown>,
}

/// Handle the seasons command for `year`, or the current year.
pub fn handle_seasons_command(options: &GlobalOptions, year: Option<i32>) -> Result<()> {
    let config = Config::load()?;
    let tz = resolve_display_timezone(&config)?;
    let today = report_date(options.date, &tz);
    let year = year.unwrap_or_else(|| today.year());

    let calendar = SeasonalCalendar::new(tz);
    let report = SeasonsReport {
        year,
        timezone: tz.name(),
        events: calendar.events_of(year),
        next_equinox: calendar.days_until_equinox(today),
        next_solstice: calendar.days_until_solstice(today),
    };

    if options.json {
        return print_json(&report);
    }

    log_version!();
    log_block_start!("Solar events of {} ({})", report.year, report.timezone);
    for event in &report.events {
        log_decorated!(
            "{:<16} {}{}",
            event.kind.display_name(),
            event.at.with_timezone(&tz).format("%a %Y-%m-%d %H:%M %Z"),
            relative_to(event.date, today)
        );
    }
    log_end!();
    Ok(())
}

fn resolve_display_timezone(config: &Config) -> Result<Tz> {
    match (config.coordinate(), config.timezone.as_deref()) {
        (Ok(coordinate), _) => config.resolve_timezone(coordinate),
        (Err(_), Some(name)) => parse_timezone(name),
        (Err(_), None) => {
            log_debug!("No location configured, showing UTC");
            Ok(Tz::UTC)
        }
    }
}

fn relative_to(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "  (today)".to_string(),
        days if days > 0 => format!("  (in {days} days)"),
        _ => String::new(),
    }
}
