//! Block-IO resource control via cgroups v2.
//!
//! Manages `io.weight`.

use std::path::Path;

use vessel_common::error::{Result, VesselError};

/// Sets the block-IO weight for a cgroup.
///
/// # Errors
///
/// Returns an error if writing to `io.weight` fails.
pub fn set_io_weight(cgroup_path: &Path, weight: u32) -> Result<()> {
    let file = cgroup_path.join("io.weight");
    std::fs::write(&file, weight.to_string()).map_err(|e| VesselError::Io {
        path: file,
        source: e,
    })?;
    tracing::debug!(weight, "IO weight set");
    Ok(())
}
