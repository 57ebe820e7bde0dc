//! The once-a-day caller that ties the comparison engine to a snapshot store.

use anyhow::{Context, Result};
use chrono::{NaiveDate, TimeZone};

use crate::comparison::{self, Comparison, References};
use crate::solar::GeoCoordinate;
use crate::store::{SnapshotKey, SnapshotStore};

/// Tracks daylight at one location, remembering references in `S`.
pub struct DaylightTracker<S: SnapshotStore, Tz: TimeZone> {
    store: S,
    coordinate: GeoCoordinate,
    tz: Tz,
}

impl<S: SnapshotStore, Tz: TimeZone> DaylightTracker<S, Tz> {
    pub fn new(store: S, coordinate: GeoCoordinate, tz: Tz) -> Self {
        Self {
            store,
            coordinate,
            tz,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Cached references; a store read failure degrades to "not cached".
    pub fn references(&self) -> References {
        let load = |key: SnapshotKey| match self.store.load(key) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log_warning!("Could not read the {key} reference: {e:#}");
                None
            }
        };
        References {
            yesterday: load(SnapshotKey::Yesterday),
            last_solstice: load(SnapshotKey::LastSolstice),
        }
    }

    /// Compare `date` against the cached references and update the store.
    ///
    /// Persist requests from the engine are applied first, then today's snapshot
    /// becomes the `Yesterday` reference for the next run. A comparison that is
    /// unavailable (polar day or night) leaves the store untouched.
    pub fn track(&self, date: NaiveDate) -> Result<Comparison> {
        let references = self.references();
        let comparison = comparison::compare(date, self.coordinate, &self.tz, &references)
            .with_context(|| format!("Daylight comparison unavailable for {date}"))?;

        for request in &comparison.persist {
            self.store
                .save(request.key, &request.snapshot)
                .with_context(|| format!("Failed to persist the {} reference", request.key))?;
        }
        self.store
            .save(SnapshotKey::Yesterday, &comparison.result.today)
            .context("Failed to persist today's snapshot")?;

        Ok(comparison)
    }
}
