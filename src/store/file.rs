//! Snapshot store backed by JSON files.
//!
//! Each key lives in its own file inside the state directory. Writers take an
//! exclusive lock on a shared `.lock` file and replace the snapshot through a
//! temporary file and a rename, so readers (holding a shared lock) never observe
//! a half-written snapshot.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{SnapshotKey, SnapshotStore};
use crate::solar::DaylightSnapshot;

const LOCK_FILE_NAME: &str = ".lock";

/// JSON snapshot files in one directory.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store in `dir` when given, otherwise in the default state directory.
    pub fn open(dir: Option<&Path>) -> Self {
        match dir {
            Some(dir) => Self::new(dir),
            None => Self::new(super::get_state_dir()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: SnapshotKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    fn open_lock(&self) -> Result<File> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create state directory {}", self.dir.display())
        })?;
        let lock_path = self.dir.join(LOCK_FILE_NAME);
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {}", lock_path.display()))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self, key: SnapshotKey) -> Result<Option<DaylightSnapshot>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let lock = self.open_lock()?;
        FileExt::lock_shared(&lock).context("Failed to acquire shared snapshot lock")?;
        let content = fs::read_to_string(&path);
        let _ = FileExt::unlock(&lock);

        let content = match content {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };

        match serde_json::from_str::<DaylightSnapshot>(&content) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                log_warning!("Ignoring unreadable {key} snapshot at {}: {e}", path.display());
                Ok(None)
            }
        }
    }

    fn save(&self, key: SnapshotKey, snapshot: &DaylightSnapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot)
            .with_context(|| format!("Failed to serialize {key} snapshot"))?;

        let lock = self.open_lock()?;
        FileExt::lock_exclusive(&lock).context("Failed to acquire exclusive snapshot lock")?;

        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");
        let written = File::create(&temp_path)
            .and_then(|mut file| {
                file.write_all(json.as_bytes())?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&temp_path, &path));
        let _ = FileExt::unlock(&lock);

        written.with_context(|| format!("Failed to write {}", path.display()))?;
        log_debug!("Saved {key} snapshot for {} to {}", snapshot.date, path.display());
        Ok(())
    }

    fn clear(&self, key: SnapshotKey) -> Result<()> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(());
        }

        let lock = self.open_lock()?;
        FileExt::lock_exclusive(&lock).context("Failed to acquire exclusive snapshot lock")?;
        let removed = fs::remove_file(&path);
        let _ = FileExt::unlock(&lock);

        match removed {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }
}
