//! Milestones of the gaining half-year.
//!
//! While days are lengthening, the projector reports which thresholds have been
//! reached (and when) and projects a date for the ones still ahead:
//!
//! - **Daylight duration**: found by walking forward day by day through a bounded
//!   [`Forecast`].
//! - **Cumulative gain since the solstice**: estimated from the current velocity
//!   (`remaining / velocity`), reported only when the estimate is under a year.
//! - **Spring equinox**: the equinox halfway through the location's gaining half-year.
//!
//! During the losing half-year there is nothing to look forward to and the list is
//! empty. A milestone whose date cannot be determined is left out.

pub mod forecast;

pub use forecast::{DayEvaluation, Forecast, effective_daylight_seconds};

use chrono::{Datelike, NaiveDate, TimeDelta, TimeZone};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use crate::common::constants::{
    DEFAULT_DAYLIGHT_HOURS, DEFAULT_GAIN_MINUTES, DEFAULT_SEARCH_WINDOW_DAYS,
    DEFAULT_TRACK_EQUINOX, MAXIMUM_ESTIMATE_DAYS,
};
use crate::comparison::daylight_velocity;
use crate::error::{DaylightError, Result};
use crate::season::{EventWindow, Hemisphere, SeasonalCalendar, SolarEventKind};
use crate::solar::GeoCoordinate;

/// What a milestone measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MilestoneKind {
    /// Daylight reaches `hours` hours.
    DaylightDuration { hours: u32 },
    /// Daylight has grown by `minutes` minutes since the solstice.
    CumulativeGain { minutes: u32 },
    /// The equinox inside the gaining half-year has passed.
    SpringEquinox,
}

impl fmt::Display for MilestoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MilestoneKind::DaylightDuration { hours } => write!(f, "{hours} hours of daylight"),
            MilestoneKind::CumulativeGain { minutes } if minutes % 60 == 0 => {
                let hours = minutes / 60;
                let unit = if hours == 1 { "hour" } else { "hours" };
                write!(f, "{hours} {unit} gained since the solstice")
            }
            MilestoneKind::CumulativeGain { minutes } => {
                write!(f, "{minutes} minutes gained since the solstice")
            }
            MilestoneKind::SpringEquinox => write!(f, "Spring equinox"),
        }
    }
}

/// Whether a milestone has been reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MilestoneState {
    Achieved { achieved_date: NaiveDate },
    Upcoming { target_date: NaiveDate, days_until: u32 },
}

/// One milestone and its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub kind: MilestoneKind,
    #[serde(flatten)]
    pub state: MilestoneState,
}

impl Milestone {
    pub fn is_achieved(&self) -> bool {
        matches!(self.state, MilestoneState::Achieved { .. })
    }

    pub fn achieved_date(&self) -> Option<NaiveDate> {
        match self.state {
            MilestoneState::Achieved { achieved_date } => Some(achieved_date),
            MilestoneState::Upcoming { .. } => None,
        }
    }

    pub fn target_date(&self) -> Option<NaiveDate> {
        match self.state {
            MilestoneState::Upcoming { target_date, .. } => Some(target_date),
            MilestoneState::Achieved { .. } => None,
        }
    }

    pub fn days_until(&self) -> Option<u32> {
        match self.state {
            MilestoneState::Upcoming { days_until, .. } => Some(days_until),
            MilestoneState::Achieved { .. } => None,
        }
    }
}

/// Which milestones to evaluate and how far ahead to look.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneSettings {
    pub daylight_hours: Vec<u32>,
    pub gain_minutes: Vec<u32>,
    pub track_equinox: bool,
    pub search_window_days: u32,
}

impl Default for MilestoneSettings {
    fn default() -> Self {
        Self {
            daylight_hours: DEFAULT_DAYLIGHT_HOURS.to_vec(),
            gain_minutes: DEFAULT_GAIN_MINUTES.to_vec(),
            track_equinox: DEFAULT_TRACK_EQUINOX,
            search_window_days: DEFAULT_SEARCH_WINDOW_DAYS,
        }
    }
}

impl MilestoneSettings {
    pub fn kinds(&self) -> Vec<MilestoneKind> {
        let mut kinds: Vec<MilestoneKind> = self
            .daylight_hours
            .iter()
            .map(|&hours| MilestoneKind::DaylightDuration { hours })
            .collect();
        kinds.extend(
            self.gain_minutes
                .iter()
                .map(|&minutes| MilestoneKind::CumulativeGain { minutes }),
        );
        if self.track_equinox {
            kinds.push(MilestoneKind::SpringEquinox);
        }
        kinds
    }
}

/// Milestones for `date` with the default settings.
pub fn update_milestones<Tz: TimeZone>(
    date: NaiveDate,
    coordinate: GeoCoordinate,
    tz: &Tz,
) -> Vec<Milestone> {
    update_milestones_with(date, coordinate, tz, &MilestoneSettings::default())
}

/// Milestones for `date`, ordered achieved (most recent first) then upcoming (soonest first).
pub fn update_milestones_with<Tz: TimeZone>(
    date: NaiveDate,
    coordinate: GeoCoordinate,
    tz: &Tz,
    settings: &MilestoneSettings,
) -> Vec<Milestone> {
    let calendar = SeasonalCalendar::new(tz.clone());
    let season = Hemisphere::from_latitude(coordinate.latitude()).orient(calendar.classify(date));
    if !season.is_gaining() {
        log_debug!("Losing daylight on {date}, no milestones to project");
        return Vec::new();
    }

    let projector = Projector {
        date,
        coordinate,
        tz,
        calendar,
        horizon: settings.search_window_days,
    };

    let mut milestones: Vec<Milestone> = settings
        .kinds()
        .into_iter()
        .filter_map(|kind| match projector.evaluate(kind) {
            Ok(state) => Some(Milestone { kind, state }),
            Err(e) => {
                log_debug!("Omitting milestone '{kind}': {e}");
                None
            }
        })
        .collect();

    sort_milestones(&mut milestones);
    milestones
}

/// Achieved before upcoming; achieved most recent first, upcoming soonest first.
pub fn sort_milestones(milestones: &mut [Milestone]) {
    use MilestoneState::{Achieved, Upcoming};

    milestones.sort_by(|a, b| match (a.state, b.state) {
        (Achieved { achieved_date: x }, Achieved { achieved_date: y }) => y.cmp(&x),
        (Upcoming { target_date: x, .. }, Upcoming { target_date: y, .. }) => x.cmp(&y),
        (Achieved { .. }, Upcoming { .. }) => Ordering::Less,
        (Upcoming { .. }, Achieved { .. }) => Ordering::Greater,
    });
}

struct Projector<'a, Tz: TimeZone> {
    date: NaiveDate,
    coordinate: GeoCoordinate,
    tz: &'a Tz,
    calendar: SeasonalCalendar<Tz>,
    horizon: u32,
}

impl<Tz: TimeZone> Projector<'_, Tz> {
    fn evaluate(&self, kind: MilestoneKind) -> Result<MilestoneState> {
        match kind {
            MilestoneKind::DaylightDuration { hours } => {
                self.duration_milestone(i64::from(hours) * 3600)
            }
            MilestoneKind::CumulativeGain { minutes } => {
                self.gain_milestone(i64::from(minutes) * 60)
            }
            MilestoneKind::SpringEquinox => self.equinox_milestone(),
        }
    }

    fn daylight(&self, date: NaiveDate) -> i64 {
        effective_daylight_seconds(date, self.coordinate, self.tz)
    }

    /// Start of the current gaining half-year.
    fn solstice_date(&self) -> NaiveDate {
        self.calendar.most_recent_solstice(self.date).date
    }

    fn days_since_solstice(&self) -> u32 {
        u32::try_from((self.date - self.solstice_date()).num_days() + 1).unwrap_or(1)
    }

    /// First day since the solstice on which `reached` held.
    fn achieved_since_solstice(&self, reached: impl Fn(i64) -> bool) -> MilestoneState {
        let since = self.days_since_solstice();
        let achieved_date = Forecast::new(self.solstice_date(), self.coordinate, self.tz, since)
            .first_where(reached)
            .map(|day| day.date)
            .unwrap_or(self.date);
        MilestoneState::Achieved { achieved_date }
    }

    fn upcoming(&self, target_date: NaiveDate) -> MilestoneState {
        MilestoneState::Upcoming {
            target_date,
            days_until: u32::try_from((target_date - self.date).num_days()).unwrap_or(0),
        }
    }

    fn duration_milestone(&self, threshold: i64) -> Result<MilestoneState> {
        if self.daylight(self.date) >= threshold {
            return Ok(self.achieved_since_solstice(|seconds| seconds >= threshold));
        }

        let tomorrow = self.date.succ_opt().ok_or(DaylightError::ProjectionHorizonExceeded {
            horizon_days: self.horizon,
        })?;
        let day = Forecast::new(tomorrow, self.coordinate, self.tz, self.horizon)
            .first_where(|seconds| seconds >= threshold)?;
        Ok(self.upcoming(day.date))
    }

    fn gain_milestone(&self, threshold: i64) -> Result<MilestoneState> {
        let solstice = self.solstice_date();
        let reference = self.daylight(solstice);
        let gained = self.daylight(self.date) - reference;

        if gained >= threshold {
            return Ok(self.achieved_since_solstice(|seconds| seconds - reference >= threshold));
        }

        let velocity = daylight_velocity(self.date, self.coordinate, self.tz)?;
        let not_determinable = DaylightError::ProjectionHorizonExceeded {
            horizon_days: MAXIMUM_ESTIMATE_DAYS as u32,
        };
        if velocity <= 0 {
            return Err(not_determinable);
        }

        let estimate = (threshold - gained) as f64 / velocity as f64;
        if !(estimate > 0.0 && estimate < MAXIMUM_ESTIMATE_DAYS) {
            return Err(not_determinable);
        }

        let days = estimate.ceil() as i64;
        let target_date = self
            .date
            .checked_add_signed(TimeDelta::days(days))
            .ok_or(not_determinable)?;
        Ok(self.upcoming(target_date))
    }

    fn equinox_milestone(&self) -> Result<MilestoneState> {
        let solstice = self.calendar.most_recent_solstice(self.date);
        let equinox = EventWindow::around(solstice.at.year())
            .first_after(solstice.at, SolarEventKind::is_equinox)
            .ok_or(DaylightError::ProjectionHorizonExceeded {
                horizon_days: self.horizon,
            })?;

        let equinox_date = self.calendar.local_date(equinox.at);
        if equinox.at <= self.calendar.moment(self.date) {
            Ok(MilestoneState::Achieved {
                achieved_date: equinox_date,
            })
        } else {
            Ok(self.upcoming(equinox_date))
        }
    }
}
