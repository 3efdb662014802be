//! Cgroups v2 runtime client.
//!
//! Applies resource-update requests by writing control files under the
//! unified hierarchy at `/sys/fs/cgroup`. Only fields that are set
//! (non-zero, non-empty) are written; unset fields leave the current
//! kernel values in place.

pub mod cpu;
pub mod io;
pub mod memory;

use std::path::PathBuf;

use vessel_common::error::Result;
use vessel_common::types::ContainerId;

use crate::client::RuntimeClient;
use crate::resources::ResourceUpdateRequest;

/// Runtime client backed by direct cgroup-v2 control-file writes.
///
/// Each container's process group is expected to live in its own cgroup
/// at `<root>/<container-id>`, placed there at start time by the
/// container's creation path.
#[derive(Debug)]
pub struct CgroupClient {
    root: PathBuf,
}

impl CgroupClient {
    /// Creates a client rooted at the daemon's cgroup subtree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: PathBuf::from(vessel_common::constants::CGROUP_V2_PATH)
                .join(vessel_common::constants::APP_NAME),
        }
    }

    /// Creates a client rooted at an arbitrary directory.
    #[must_use]
    pub const fn with_root(root: PathBuf) -> Self {
        Self { root }
    }
}

impl Default for CgroupClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeClient for CgroupClient {
    fn update_resources(&self, id: &ContainerId, resources: &ResourceUpdateRequest) -> Result<()> {
        let path = self.root.join(id.as_str());

        if resources.cpu_shares != 0 {
            cpu::set_cpu_weight(&path, resources.cpu_shares)?;
        }
        if resources.cpu_quota != 0 || resources.cpu_period != 0 {
            cpu::set_cpu_max(&path, resources.cpu_quota, resources.cpu_period)?;
        }
        if !resources.cpuset_cpus.is_empty() {
            cpu::set_cpuset_cpus(&path, &resources.cpuset_cpus)?;
        }
        if resources.memory != 0 {
            memory::set_memory_max(&path, resources.memory)?;
        }
        if resources.memory_swap != 0 {
            // The request carries the combined memory+swap total; the v2
            // controller takes swap alone.
            let swap = resources.memory_swap.saturating_sub(resources.memory);
            memory::set_memory_swap_max(&path, swap)?;
        }
        if resources.memory_reservation != 0 {
            memory::set_memory_low(&path, resources.memory_reservation)?;
        }
        if !resources.cpuset_mems.is_empty() {
            memory::set_cpuset_mems(&path, &resources.cpuset_mems)?;
        }
        if resources.blkio_weight != 0 {
            io::set_io_weight(&path, resources.blkio_weight)?;
        }

        tracing::info!(id = %id, "resource limits applied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cgroup_dir(id: &str) -> (tempfile::TempDir, CgroupClient, ContainerId) {
        let dir = tempfile::tempdir().expect("tempdir");
        let container_id = ContainerId::new(id);
        std::fs::create_dir_all(dir.path().join(id)).expect("container cgroup dir");
        let client = CgroupClient::with_root(dir.path().to_path_buf());
        (dir, client, container_id)
    }

    #[test]
    fn writes_only_set_fields() {
        let (dir, client, id) = cgroup_dir("c1");
        let request = ResourceUpdateRequest {
            cpu_shares: 200,
            memory: 104_857_600,
            ..ResourceUpdateRequest::default()
        };

        client.update_resources(&id, &request).expect("update");

        let base = dir.path().join("c1");
        assert_eq!(
            std::fs::read_to_string(base.join("cpu.weight")).expect("cpu.weight"),
            "200"
        );
        assert_eq!(
            std::fs::read_to_string(base.join("memory.max")).expect("memory.max"),
            "104857600"
        );
        assert!(!base.join("io.weight").exists());
        assert!(!base.join("cpuset.cpus").exists());
    }

    #[test]
    fn swap_write_subtracts_memory_limit() {
        let (dir, client, id) = cgroup_dir("c2");
        let request = ResourceUpdateRequest {
            memory: 100,
            memory_swap: 300,
            ..ResourceUpdateRequest::default()
        };

        client.update_resources(&id, &request).expect("update");

        let swap = std::fs::read_to_string(dir.path().join("c2").join("memory.swap.max"))
            .expect("memory.swap.max");
        assert_eq!(swap, "200");
    }

    #[test]
    fn missing_cgroup_dir_surfaces_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let client = CgroupClient::with_root(dir.path().to_path_buf());
        let request = ResourceUpdateRequest {
            cpu_shares: 100,
            ..ResourceUpdateRequest::default()
        };

        let result = client.update_resources(&ContainerId::new("ghost"), &request);
        assert!(result.is_err());
    }
}
