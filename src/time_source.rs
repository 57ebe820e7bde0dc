//! Clock abstraction for real and pinned time.
//!
//! Reports are computed for "today" at the configured location. The global time
//! source decides what "now" is: the system clock normally, or a fixed instant when
//! `--date` is given or a test needs a deterministic day.

use anyhow::Context;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Global time source instance, defaults to RealTimeSource
static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Trait for abstracting the current instant
pub trait TimeSource: Send + Sync {
    /// Get the current instant
    fn now(&self) -> DateTime<Utc>;

    /// Whether the clock is pinned to a fixed instant
    fn is_pinned(&self) -> bool;
}

/// Real-time implementation that reads the system clock
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn is_pinned(&self) -> bool {
        false
    }
}

/// A clock that always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource {
    at: DateTime<Utc>,
}

impl FixedTimeSource {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at }
    }

    /// Pin the clock to local noon of `date` in `tz`.
    pub fn at_local_noon<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Self {
        Self::new(crate::season::SeasonalCalendar::new(tz.clone()).moment(date))
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }

    fn is_pinned(&self) -> bool {
        true
    }
}

/// Initialize the global time source (call once at startup)
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

/// Check if the time source has been initialized
pub fn is_initialized() -> bool {
    TIME_SOURCE.get().is_some()
}

/// Get the current instant from the global time source
pub fn now() -> DateTime<Utc> {
    TIME_SOURCE.get_or_init(|| Arc::new(RealTimeSource)).now()
}

/// Check if the clock is pinned
pub fn is_pinned() -> bool {
    TIME_SOURCE
        .get_or_init(|| Arc::new(RealTimeSource))
        .is_pinned()
}

/// Today's calendar date in `tz`
pub fn today_in<Tz: TimeZone>(tz: &Tz) -> NaiveDate {
    now().with_timezone(tz).date_naive()
}

/// Parse a date given as "YYYY-MM-DD"
pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{s}'. Use YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_fixed_source_is_pinned() {
        let at = Utc.with_ymd_and_hms(2025, 1, 21, 18, 0, 0).unwrap();
        let source = FixedTimeSource::new(at);
        assert_eq!(source.now(), at);
        assert!(source.is_pinned());
        assert!(!RealTimeSource.is_pinned());
    }

    #[test]
    fn test_local_noon_pin() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 21).unwrap();
        let source = FixedTimeSource::at_local_noon(date, &chrono_tz::America::Chicago);
        // CST is UTC-6
        assert_eq!(source.now().hour(), 18);
        assert_eq!(source.now().with_timezone(&chrono_tz::America::Chicago).date_naive(), date);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            parse_date(" 2025-06-21 ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 21).unwrap()
        );
        assert!(parse_date("2025-02-29").is_err());
        assert!(parse_date("21/06/2025").is_err());
    }
}
