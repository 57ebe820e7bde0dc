//! Daily change, cumulative change and velocity of daylight.
//!
//! The comparison engine combines the solar engine with the seasonal calendar. It
//! never touches storage: previously observed snapshots come in through
//! [`References`], and anything worth caching goes back out as a
//! [`PersistRequest`] for the caller to apply.
//!
//! Positive numbers always mean lengthening days.

use chrono::{NaiveDate, TimeZone};
use serde::Serialize;

use crate::error::{DaylightError, ReferenceKind, Result};
use crate::season::{DatedEvent, Hemisphere, SeasonClassification, SeasonalCalendar};
use crate::solar::{DaylightSnapshot, GeoCoordinate, require_daylight};
use crate::store::SnapshotKey;

/// Snapshots the caller has cached from earlier runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct References {
    pub yesterday: Option<DaylightSnapshot>,
    pub last_solstice: Option<DaylightSnapshot>,
}

/// Ask the caller to cache a snapshot under `key`.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistRequest {
    pub key: SnapshotKey,
    pub snapshot: DaylightSnapshot,
}

/// Today's daylight compared with yesterday and with the most recent solstice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub today: DaylightSnapshot,
    pub daily_change_seconds: i64,
    /// `None` when the solstice itself had no sunrise or sunset at this location.
    pub cumulative_change_seconds: Option<i64>,
    /// Season at the location, oriented for its hemisphere.
    pub season: SeasonClassification,
    pub reference_solstice: DatedEvent,
}

/// A comparison plus the snapshots the caller should cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub result: ComparisonResult,
    pub persist: Vec<PersistRequest>,
}

/// Daylight duration on `date`, with polar days reported as a missing `kind` reference.
fn duration_for<Tz: TimeZone>(
    date: NaiveDate,
    coordinate: GeoCoordinate,
    tz: &Tz,
    kind: ReferenceKind,
) -> Result<DaylightSnapshot> {
    require_daylight(date, coordinate, tz).map_err(|e| e.into_missing(kind))
}

fn previous_day(date: NaiveDate) -> Result<NaiveDate> {
    date.pred_opt().ok_or(DaylightError::MissingReference {
        kind: ReferenceKind::PreviousDay,
        date,
    })
}

fn next_day(date: NaiveDate) -> Result<NaiveDate> {
    date.succ_opt().ok_or(DaylightError::MissingReference {
        kind: ReferenceKind::NextDay,
        date,
    })
}

/// Change in daylight from `from` to `to`, in seconds.
pub fn daily_change_seconds<Tz: TimeZone>(
    from: NaiveDate,
    to: NaiveDate,
    coordinate: GeoCoordinate,
    tz: &Tz,
) -> Result<i64> {
    let before = duration_for(from, coordinate, tz, ReferenceKind::PreviousDay)?;
    let after = duration_for(to, coordinate, tz, ReferenceKind::Today)?;
    Ok(after.daylight_seconds - before.daylight_seconds)
}

/// Change in daylight since a reference date (normally a solstice), in seconds.
pub fn cumulative_change_seconds<Tz: TimeZone>(
    since: NaiveDate,
    to: NaiveDate,
    coordinate: GeoCoordinate,
    tz: &Tz,
) -> Result<i64> {
    let reference = duration_for(since, coordinate, tz, ReferenceKind::Solstice)?;
    let current = duration_for(to, coordinate, tz, ReferenceKind::Today)?;
    Ok(current.daylight_seconds - reference.daylight_seconds)
}

/// Rate of change of daylight around `date` in seconds per day.
///
/// Central difference over the neighbouring days, rounded to the nearest second.
pub fn daylight_velocity<Tz: TimeZone>(
    date: NaiveDate,
    coordinate: GeoCoordinate,
    tz: &Tz,
) -> Result<i64> {
    let yesterday = duration_for(previous_day(date)?, coordinate, tz, ReferenceKind::PreviousDay)?;
    let tomorrow = duration_for(next_day(date)?, coordinate, tz, ReferenceKind::NextDay)?;
    let difference = (tomorrow.daylight_seconds - yesterday.daylight_seconds) as f64;
    Ok((difference / 2.0).round() as i64)
}

/// Use the cached snapshot when it describes `date` at `coordinate`, otherwise
/// recompute it.
///
/// The flag is true when the snapshot had to be recomputed.
fn resolve_reference<Tz: TimeZone>(
    cached: Option<&DaylightSnapshot>,
    date: NaiveDate,
    coordinate: GeoCoordinate,
    tz: &Tz,
    kind: ReferenceKind,
) -> Result<(DaylightSnapshot, bool)> {
    match cached {
        Some(snapshot) if snapshot.describes(date, coordinate) => {
            log_debug!("Using cached {kind} snapshot for {date}");
            Ok((snapshot.clone(), false))
        }
        Some(snapshot) if snapshot.is_for(date) => {
            log_debug!(
                "Cached {kind} snapshot for {date} was taken at {}, recomputing for {coordinate}",
                snapshot.location
            );
            Ok((duration_for(date, coordinate, tz, kind)?, true))
        }
        _ => {
            log_debug!("No cached {kind} snapshot for {date}, recomputing");
            Ok((duration_for(date, coordinate, tz, kind)?, true))
        }
    }
}

/// Compare `today` against yesterday and the most recent solstice.
///
/// Fails with [`DaylightError::MissingReference`] when today or yesterday has no
/// sunrise or sunset; the caller then omits the comparison rather than showing zero.
/// A solstice without one (polar night or midnight sun) only leaves the cumulative
/// change empty.
pub fn compare<Tz: TimeZone>(
    today: NaiveDate,
    coordinate: GeoCoordinate,
    tz: &Tz,
    references: &References,
) -> Result<Comparison> {
    let calendar = SeasonalCalendar::new(tz.clone());
    let today_snapshot = duration_for(today, coordinate, tz, ReferenceKind::Today)?;

    let (yesterday, _) = resolve_reference(
        references.yesterday.as_ref(),
        previous_day(today)?,
        coordinate,
        tz,
        ReferenceKind::PreviousDay,
    )?;

    let solstice = calendar.most_recent_solstice(today);
    let solstice_reference = match resolve_reference(
        references.last_solstice.as_ref(),
        solstice.date,
        coordinate,
        tz,
        ReferenceKind::Solstice,
    ) {
        Ok(reference) => Some(reference),
        Err(e) if e.is_unavailable() => {
            log_debug!("No cumulative change for {today}: {e}");
            None
        }
        Err(e) => return Err(e),
    };

    let mut persist = Vec::new();
    if let Some((snapshot, true)) = &solstice_reference {
        log_debug!("Requesting persistence of {} reference", SnapshotKey::LastSolstice);
        persist.push(PersistRequest {
            key: SnapshotKey::LastSolstice,
            snapshot: snapshot.clone(),
        });
    }

    let season = Hemisphere::from_latitude(coordinate.latitude()).orient(calendar.classify(today));

    let result = ComparisonResult {
        daily_change_seconds: today_snapshot.daylight_seconds - yesterday.daylight_seconds,
        cumulative_change_seconds: solstice_reference
            .map(|(snapshot, _)| today_snapshot.daylight_seconds - snapshot.daylight_seconds),
        today: today_snapshot,
        season,
        reference_solstice: solstice,
    };

    Ok(Comparison { result, persist })
}

#[cfg(test)]
mod tests;
