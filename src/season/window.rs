//! Ordered candidate events around a year.
//!
//! Season boundaries cross the calendar year (the gaining half-year starts in
//! December), so every query looks at the events of the previous, current and
//! next year as one sorted list.

use chrono::{DateTime, Utc};

use super::{SeasonalYear, SolarEvent, SolarEventKind};

/// Twelve cardinal events for `year - 1 ..= year + 1`, in chronological order.
#[derive(Debug, Clone)]
pub struct EventWindow {
    events: Vec<SolarEvent>,
}

impl EventWindow {
    pub fn around(year: i32) -> Self {
        let mut events: Vec<SolarEvent> = (year.saturating_sub(1)..=year.saturating_add(1))
            .flat_map(|y| SeasonalYear::new(y).events())
            .collect();
        events.sort_by_key(|event| event.at);
        Self { events }
    }

    pub fn events(&self) -> &[SolarEvent] {
        &self.events
    }

    /// Latest matching event at or before `at`.
    pub fn latest_at_or_before(
        &self,
        at: DateTime<Utc>,
        matches: impl Fn(&SolarEventKind) -> bool,
    ) -> Option<SolarEvent> {
        self.events
            .iter()
            .rev()
            .find(|event| event.at <= at && matches(&event.kind))
            .copied()
    }

    /// First matching event strictly after `at`.
    pub fn first_after(
        &self,
        at: DateTime<Utc>,
        matches: impl Fn(&SolarEventKind) -> bool,
    ) -> Option<SolarEvent> {
        self.events
            .iter()
            .find(|event| event.at > at && matches(&event.kind))
            .copied()
    }
}
