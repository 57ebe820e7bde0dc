//! Command-line command handlers for daylightr.
//!
//! Each report command lives in its own submodule. They share the same setup:
//! load the configuration, resolve location and timezone, pin the clock when a
//! `--date` was given, and decide which calendar day to report on.

pub mod help;
pub mod milestones;
pub mod seasons;
pub mod status;

use anyhow::Result;
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;
use std::sync::Arc;

use crate::args::GlobalOptions;
use crate::config::{self, Config};
use crate::solar::GeoCoordinate;
use crate::time_source::{self, FixedTimeSource};

/// Everything a report command needs to know about where and when.
pub(crate) struct ReportContext {
    pub config: Config,
    pub coordinate: GeoCoordinate,
    pub tz: Tz,
    pub date: NaiveDate,
}

impl ReportContext {
    /// Load the configuration and settle on the day to report.
    pub fn prepare(options: &GlobalOptions) -> Result<Self> {
        let config = Config::load()?;
        if options.debug_enabled {
            config.log_config(config::get_config_path().ok().as_deref());
        }

        let coordinate = config.coordinate()?;
        let tz = config.resolve_timezone(coordinate)?;
        let date = report_date(options.date, &tz);
        log_debug!("Reporting {date} at {coordinate} in {}", tz.name());

        Ok(Self {
            config,
            coordinate,
            tz,
            date,
        })
    }

    pub fn timezone_name(&self) -> &'static str {
        self.tz.name()
    }
}

/// Pin the clock to `pinned` when given, then read today's date in `tz`.
pub(crate) fn report_date(pinned: Option<NaiveDate>, tz: &Tz) -> NaiveDate {
    if let Some(date) = pinned {
        time_source::init_time_source(Arc::new(FixedTimeSource::at_local_noon(date, tz)));
        log_debug!("Clock pinned to {date}");
    }
    time_source::today_in(tz)
}

/// Print `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
