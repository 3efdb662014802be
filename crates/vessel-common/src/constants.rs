//! System-wide constants and default paths.

use std::time::Duration;

/// Default base directory for Vessel daemon state on Linux.
pub const DEFAULT_DATA_DIR: &str = "/var/lib/vessel";

/// Default directory for per-container persisted records.
pub const DEFAULT_CONTAINERS_DIR: &str = "/var/lib/vessel/containers";

/// Cgroups v2 unified hierarchy mount point.
pub const CGROUP_V2_PATH: &str = "/sys/fs/cgroup";

/// How long an update waits for a mid-restart container to come back up
/// before pushing resources. Elapsing is informational, not an error.
pub const RESTART_WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Minimum accepted memory limit in bytes (4 MiB). Lower limits starve
/// the container before its init process can even exec.
pub const MIN_MEMORY_LIMIT: i64 = 4 * 1024 * 1024;

/// Minimum accepted block-IO weight (when set).
pub const MIN_BLKIO_WEIGHT: u16 = 10;

/// Maximum accepted block-IO weight.
pub const MAX_BLKIO_WEIGHT: u16 = 1000;

/// Application name used in logs and state files.
pub const APP_NAME: &str = "vessel";
