//! Cached reference snapshots.
//!
//! The comparison engine only needs two remembered values: yesterday's daylight and
//! the daylight on the most recent solstice. A [`SnapshotStore`] keeps them between
//! runs. Stores allow many concurrent readers and at most one writer per key.

pub mod file;
pub mod memory;

pub use file::FileSnapshotStore;
pub use memory::MemorySnapshotStore;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::common::constants::APP_DIR_NAME;
use crate::solar::DaylightSnapshot;

/// The two reference slots a store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotKey {
    Yesterday,
    LastSolstice,
}

impl SnapshotKey {
    pub const ALL: [SnapshotKey; 2] = [SnapshotKey::Yesterday, SnapshotKey::LastSolstice];

    pub fn file_name(&self) -> &'static str {
        match self {
            SnapshotKey::Yesterday => "yesterday.json",
            SnapshotKey::LastSolstice => "last_solstice.json",
        }
    }
}

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotKey::Yesterday => write!(f, "yesterday"),
            SnapshotKey::LastSolstice => write!(f, "last solstice"),
        }
    }
}

/// Storage for reference snapshots.
pub trait SnapshotStore: Send + Sync {
    /// The snapshot under `key`, or `None` when nothing usable is stored.
    fn load(&self, key: SnapshotKey) -> Result<Option<DaylightSnapshot>>;

    /// Replace the snapshot under `key`.
    fn save(&self, key: SnapshotKey, snapshot: &DaylightSnapshot) -> Result<()>;

    /// Forget the snapshot under `key`.
    fn clear(&self, key: SnapshotKey) -> Result<()>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for &S {
    fn load(&self, key: SnapshotKey) -> Result<Option<DaylightSnapshot>> {
        (**self).load(key)
    }

    fn save(&self, key: SnapshotKey, snapshot: &DaylightSnapshot) -> Result<()> {
        (**self).save(key, snapshot)
    }

    fn clear(&self, key: SnapshotKey) -> Result<()> {
        (**self).clear(key)
    }
}

/// Default snapshot directory: `$XDG_STATE_HOME/daylightr`, else `~/.local/state/daylightr`.
pub fn get_state_dir() -> PathBuf {
    let state_home = std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".local/state")
        });
    state_home.join(APP_DIR_NAME)
}
