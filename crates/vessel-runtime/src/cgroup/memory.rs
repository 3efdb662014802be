//! Memory resource control via cgroups v2.
//!
//! Manages `memory.max`, `memory.swap.max`, `memory.low`, and
//! `cpuset.mems`.

use std::path::Path;

use vessel_common::error::{Result, VesselError};

/// Sets the hard memory limit for a cgroup.
///
/// # Errors
///
/// Returns an error if writing to `memory.max` fails.
pub fn set_memory_max(cgroup_path: &Path, bytes: u32) -> Result<()> {
    let file = cgroup_path.join("memory.max");
    std::fs::write(&file, bytes.to_string()).map_err(|e| VesselError::Io {
        path: file,
        source: e,
    })?;
    tracing::debug!(bytes, "memory max set");
    Ok(())
}

/// Sets the swap limit for a cgroup.
///
/// # Errors
///
/// Returns an error if writing to `memory.swap.max` fails.
pub fn set_memory_swap_max(cgroup_path: &Path, bytes: u32) -> Result<()> {
    let file = cgroup_path.join("memory.swap.max");
    std::fs::write(&file, bytes.to_string()).map_err(|e| VesselError::Io {
        path: file,
        source: e,
    })?;
    tracing::debug!(bytes, "memory swap max set");
    Ok(())
}

/// Sets the best-effort memory protection (soft limit) for a cgroup.
///
/// # Errors
///
/// Returns an error if writing to `memory.low` fails.
pub fn set_memory_low(cgroup_path: &Path, bytes: u32) -> Result<()> {
    let file = cgroup_path.join("memory.low");
    std::fs::write(&file, bytes.to_string()).map_err(|e| VesselError::Io {
        path: file,
        source: e,
    })?;
    tracing::debug!(bytes, "memory low watermark set");
    Ok(())
}

/// Restricts the cgroup to the given memory-node list, e.g. `"0,1"`.
///
/// # Errors
///
/// Returns an error if writing to `cpuset.mems` fails.
pub fn set_cpuset_mems(cgroup_path: &Path, mems: &str) -> Result<()> {
    let file = cgroup_path.join("cpuset.mems");
    std::fs::write(&file, mems).map_err(|e| VesselError::Io {
        path: file,
        source: e,
    })?;
    tracing::debug!(mems, "cpuset memory nodes set");
    Ok(())
}
