//! In-process snapshot store.

use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::RwLock;

use super::{SnapshotKey, SnapshotStore};
use crate::solar::DaylightSnapshot;

/// Snapshots held in memory behind a read-write lock.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    snapshots: RwLock<HashMap<SnapshotKey, DaylightSnapshot>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, key: SnapshotKey) -> Result<Option<DaylightSnapshot>> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|_| anyhow!("Snapshot store lock poisoned"))?;
        Ok(snapshots.get(&key).cloned())
    }

    fn save(&self, key: SnapshotKey, snapshot: &DaylightSnapshot) -> Result<()> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| anyhow!("Snapshot store lock poisoned"))?;
        snapshots.insert(key, snapshot.clone());
        Ok(())
    }

    fn clear(&self, key: SnapshotKey) -> Result<()> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| anyhow!("Snapshot store lock poisoned"))?;
        snapshots.remove(&key);
        Ok(())
    }
}
