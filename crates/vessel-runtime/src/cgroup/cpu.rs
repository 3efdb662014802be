//! CPU resource control via cgroups v2.
//!
//! Manages `cpu.weight`, `cpu.max`, and `cpuset.cpus`.

use std::path::Path;

use vessel_common::error::{Result, VesselError};

/// Sets the CPU weight (shares) for a cgroup.
///
/// # Errors
///
/// Returns an error if writing to `cpu.weight` fails.
pub fn set_cpu_weight(cgroup_path: &Path, weight: u32) -> Result<()> {
    let file = cgroup_path.join("cpu.weight");
    std::fs::write(&file, weight.to_string()).map_err(|e| VesselError::Io {
        path: file,
        source: e,
    })?;
    tracing::debug!(weight, "CPU weight set");
    Ok(())
}

/// Sets the CPU bandwidth limit.
///
/// Writes `quota_us period_us` to `cpu.max`; a zero quota means
/// unlimited and is written as `max`.
///
/// # Errors
///
/// Returns an error if writing to `cpu.max` fails.
pub fn set_cpu_max(cgroup_path: &Path, quota_us: u32, period_us: u32) -> Result<()> {
    let file = cgroup_path.join("cpu.max");
    let value = if quota_us == 0 {
        format!("max {period_us}")
    } else {
        format!("{quota_us} {period_us}")
    };
    std::fs::write(&file, value).map_err(|e| VesselError::Io {
        path: file,
        source: e,
    })?;
    tracing::debug!(quota_us, period_us, "CPU max quota set");
    Ok(())
}

/// Restricts the cgroup to the given CPU list, e.g. `"0-3,7"`.
///
/// # Errors
///
/// Returns an error if writing to `cpuset.cpus` fails.
pub fn set_cpuset_cpus(cgroup_path: &Path, cpus: &str) -> Result<()> {
    let file = cgroup_path.join("cpuset.cpus");
    std::fs::write(&file, cpus).map_err(|e| VesselError::Io {
        path: file,
        source: e,
    })?;
    tracing::debug!(cpus, "cpuset CPUs set");
    Ok(())
}
