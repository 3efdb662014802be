//! Global configuration model for the Vessel daemon.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the Vessel daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Base directory for Vessel state and data.
    pub data_dir: PathBuf,
    /// Directory holding per-container persisted records.
    pub containers_dir: PathBuf,
    /// How long an update waits for a mid-restart container to reach the
    /// running state before deciding whether to push resources live.
    #[serde(with = "humantime_secs")]
    pub restart_wait: Duration,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(crate::constants::DEFAULT_DATA_DIR),
            containers_dir: PathBuf::from(crate::constants::DEFAULT_CONTAINERS_DIR),
            restart_wait: crate::constants::RESTART_WAIT_TIMEOUT,
        }
    }
}

/// Serde adapter storing a [`Duration`] as whole seconds.
mod humantime_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(d)?;
        Ok(Duration::from_secs(secs))
    }
}
