//! Domain primitive types used across the Vessel workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a container instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(String);

impl ContainerId {
    /// Creates a new container ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a random container ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Policy governing whether a container is automatically restarted
/// after its process exits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "kebab-case")]
pub enum RestartPolicy {
    /// Never restart automatically.
    #[default]
    No,
    /// Always restart, regardless of exit status.
    Always,
    /// Restart unless the container was explicitly stopped.
    UnlessStopped,
    /// Restart on non-zero exit, up to a retry budget.
    OnFailure {
        /// Maximum restart attempts before giving up (0 = unlimited).
        max_retries: u32,
    },
}

impl fmt::Display for RestartPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::No => write!(f, "no"),
            Self::Always => write!(f, "always"),
            Self::UnlessStopped => write!(f, "unless-stopped"),
            Self::OnFailure { max_retries } => write!(f, "on-failure:{max_retries}"),
        }
    }
}

/// Host-specific resource and policy settings of a container.
///
/// Numeric limits use the signed widths of the daemon's public API; zero
/// means "unset" and negative values are sentinel values owned by the
/// validation layer. Narrowing to the runtime engine's unsigned widths
/// happens at the runtime boundary, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// CPU shares (relative weight vs. other containers).
    pub cpu_shares: i64,
    /// CPU CFS period in microseconds.
    pub cpu_period: i64,
    /// CPU CFS quota in microseconds per period.
    pub cpu_quota: i64,
    /// CPUs in which to allow execution, e.g. `"0-3,7"`.
    pub cpuset_cpus: String,
    /// Memory nodes in which to allow allocation, e.g. `"0,1"`.
    pub cpuset_mems: String,
    /// Memory limit in bytes.
    pub memory: i64,
    /// Total memory limit (memory + swap) in bytes; -1 for unlimited swap.
    pub memory_swap: i64,
    /// Soft memory limit in bytes.
    pub memory_reservation: i64,
    /// Kernel memory limit in bytes. Only settable before the container
    /// process starts; the kernel rejects live changes.
    pub kernel_memory: i64,
    /// Block-IO weight, 0 (unset) or 10..=1000.
    pub blkio_weight: u16,
    /// Restart policy applied by the restart monitor.
    pub restart_policy: RestartPolicy,
}

/// Lifecycle state of a container, as reported to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerState {
    /// Container has been created but not yet started.
    Created,
    /// Container is actively running.
    Running,
    /// Container exited and its restart policy is bringing it back up.
    Restarting,
    /// Container has been stopped.
    Stopped,
    /// Container is being removed from the daemon.
    Removing,
    /// Container is defunct and only awaiting cleanup.
    Dead,
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Running => write!(f, "running"),
            Self::Restarting => write!(f, "restarting"),
            Self::Stopped => write!(f, "stopped"),
            Self::Removing => write!(f, "removing"),
            Self::Dead => write!(f, "dead"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_id_roundtrip() {
        let id = ContainerId::new("web-1");
        assert_eq!(id.as_str(), "web-1");
        assert_eq!(id.to_string(), "web-1");
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(ContainerId::generate(), ContainerId::generate());
    }

    #[test]
    fn restart_policy_default_is_no() {
        assert_eq!(RestartPolicy::default(), RestartPolicy::No);
    }

    #[test]
    fn restart_policy_serde_roundtrip() {
        let policy = RestartPolicy::OnFailure { max_retries: 3 };
        let json = serde_json::to_string(&policy).expect("serialize");
        assert!(json.contains("on-failure"));
        let back: RestartPolicy = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, policy);
    }

    #[test]
    fn restart_policy_display() {
        assert_eq!(RestartPolicy::No.to_string(), "no");
        assert_eq!(RestartPolicy::UnlessStopped.to_string(), "unless-stopped");
        assert_eq!(
            RestartPolicy::OnFailure { max_retries: 5 }.to_string(),
            "on-failure:5"
        );
    }

    #[test]
    fn host_config_default_is_all_unset() {
        let config = HostConfig::default();
        assert_eq!(config.cpu_shares, 0);
        assert_eq!(config.memory, 0);
        assert_eq!(config.kernel_memory, 0);
        assert!(config.cpuset_cpus.is_empty());
        assert_eq!(config.restart_policy, RestartPolicy::No);
    }

    #[test]
    fn container_state_display() {
        assert_eq!(ContainerState::Running.to_string(), "running");
        assert_eq!(ContainerState::Restarting.to_string(), "restarting");
        assert_eq!(ContainerState::Removing.to_string(), "removing");
    }
}
