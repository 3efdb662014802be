//! Persistent container records.
//!
//! Each container's metadata is written to its own JSON file. Writes go
//! through a temp file followed by a rename, so a reader always sees
//! either the previous record or the new one, never a torn write — the
//! atomicity the update orchestrator's rollback contract relies on.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vessel_common::error::{Result, VesselError};
use vessel_common::types::{ContainerId, ContainerState, HostConfig};

use crate::container::Container;

/// On-disk record of a container's metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerRecord {
    /// Container identifier.
    pub id: ContainerId,
    /// Human-readable name.
    pub name: String,
    /// Lifecycle state at persist time.
    pub state: ContainerState,
    /// Path of the container's start process.
    pub path: String,
    /// Arguments of the container's start process.
    pub args: Vec<String>,
    /// Host configuration at persist time.
    pub host_config: HostConfig,
    /// ISO-8601 creation timestamp.
    pub created_at: String,
}

impl ContainerRecord {
    /// Snapshots a container into its persistable record.
    #[must_use]
    pub fn snapshot(container: &Container) -> Self {
        container.with_exclusive(|state| Self {
            id: container.id().clone(),
            name: container.name().to_owned(),
            state: state.state(),
            path: state.path.clone(),
            args: state.args.clone(),
            host_config: state.host_config.clone(),
            created_at: container.created_at().to_owned(),
        })
    }
}

/// Durable storage for container records.
///
/// `persist` must be atomic from the caller's perspective: after a
/// failure the previous record remains readable.
pub trait StateStore: Send + Sync {
    /// Writes the container's current record to durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written; the previous
    /// record is still intact in that case.
    fn persist(&self, container: &Container) -> Result<()>;
}

/// [`StateStore`] writing one `config.json` per container.
#[derive(Debug)]
pub struct JsonStateStore {
    dir: PathBuf,
}

impl JsonStateStore {
    /// Opens a store rooted at `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| VesselError::Io {
            path: dir.clone(),
            source: e,
        })?;
        Ok(Self { dir })
    }

    /// Returns the record path for a container ID.
    #[must_use]
    pub fn record_path(&self, id: &ContainerId) -> PathBuf {
        self.dir.join(id.as_str()).join("config.json")
    }

    /// Loads a previously persisted record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is missing or unparseable.
    pub fn load(&self, id: &ContainerId) -> Result<ContainerRecord> {
        let path = self.record_path(id);
        let content = std::fs::read_to_string(&path).map_err(|e| VesselError::Io {
            path: path.clone(),
            source: e,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_atomic(path: &Path, content: &str) -> Result<()> {
        let parent = path.parent().unwrap_or(Path::new("."));
        std::fs::create_dir_all(parent).map_err(|e| VesselError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(|e| VesselError::Io {
            path: tmp.clone(),
            source: e,
        })?;
        std::fs::rename(&tmp, path).map_err(|e| VesselError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

impl StateStore for JsonStateStore {
    fn persist(&self, container: &Container) -> Result<()> {
        let record = ContainerRecord::snapshot(container);
        let path = self.record_path(container.id());
        let content = serde_json::to_string_pretty(&record)?;
        Self::write_atomic(&path, &content)?;
        tracing::debug!(id = %container.id(), path = %path.display(), "container record persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(id: &str) -> Container {
        Container::new(ContainerId::new(id), id, HostConfig::default())
    }

    #[test]
    fn persist_then_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonStateStore::open(dir.path()).expect("open");
        let c = container("c1");
        c.with_exclusive(|state| state.host_config.memory = 104_857_600);

        store.persist(&c).expect("persist");

        let record = store.load(c.id()).expect("load");
        assert_eq!(record.host_config.memory, 104_857_600);
        assert_eq!(record.name, "c1");
        assert_eq!(record.state, ContainerState::Stopped);
    }

    #[test]
    fn persist_leaves_no_temp_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonStateStore::open(dir.path()).expect("open");
        let c = container("c2");

        store.persist(&c).expect("persist");

        let container_dir = dir.path().join("c2");
        let entries: Vec<_> = std::fs::read_dir(&container_dir)
            .expect("read dir")
            .map(|e| e.expect("entry").file_name())
            .collect();
        assert_eq!(entries, vec!["config.json"]);
    }

    #[test]
    fn persist_overwrites_previous_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonStateStore::open(dir.path()).expect("open");
        let c = container("c3");

        store.persist(&c).expect("first persist");
        c.with_exclusive(|state| state.host_config.cpu_shares = 512);
        store.persist(&c).expect("second persist");

        assert_eq!(store.load(c.id()).expect("load").host_config.cpu_shares, 512);
    }

    #[test]
    fn load_missing_record_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonStateStore::open(dir.path()).expect("open");
        assert!(store.load(&ContainerId::new("ghost")).is_err());
    }

    #[test]
    fn record_snapshot_reflects_lifecycle_state() {
        let c = container("c4");
        c.set_running();
        let record = ContainerRecord::snapshot(&c);
        assert_eq!(record.state, ContainerState::Running);
    }
}
