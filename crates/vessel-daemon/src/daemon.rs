//! The daemon aggregate: registry plus collaborator seams.

use std::sync::Arc;
use std::time::Duration;

use vessel_common::config::DaemonConfig;
use vessel_common::error::Result;
use vessel_runtime::cgroup::CgroupClient;
use vessel_runtime::client::RuntimeClient;

use crate::events::{EventSink, LogEventSink};
use crate::monitor::RestartMonitor;
use crate::registry::ContainerRegistry;
use crate::state::{JsonStateStore, StateStore};
use crate::validate::{DefaultHostConfigPolicy, HostConfigPolicy};

/// The container daemon core.
///
/// Owns the registry and reaches every external authority through a
/// trait seam, so the update workflow can be exercised against fakes.
pub struct Daemon {
    pub(crate) registry: ContainerRegistry,
    pub(crate) store: Arc<dyn StateStore>,
    pub(crate) runtime: Arc<dyn RuntimeClient>,
    pub(crate) monitor: Arc<dyn RestartMonitor>,
    pub(crate) events: Arc<dyn EventSink>,
    pub(crate) policy: Arc<dyn HostConfigPolicy>,
    pub(crate) restart_wait: Duration,
}

impl Daemon {
    /// Creates a daemon with the standard collaborators: a JSON state
    /// store under the configured containers directory, the cgroups v2
    /// runtime client, log-based events, and the default validation
    /// rules.
    ///
    /// The restart monitor is supplied by the caller since its
    /// scheduling loop lives outside this crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the state directory cannot be created.
    pub fn new(config: &DaemonConfig, monitor: Arc<dyn RestartMonitor>) -> Result<Self> {
        Ok(Self {
            registry: ContainerRegistry::new(),
            store: Arc::new(JsonStateStore::open(&config.containers_dir)?),
            runtime: Arc::new(CgroupClient::new()),
            monitor,
            events: Arc::new(LogEventSink),
            policy: Arc::new(DefaultHostConfigPolicy),
            restart_wait: config.restart_wait,
        })
    }

    /// Creates a daemon with fully injected collaborators.
    #[must_use]
    pub fn with_collaborators(
        store: Arc<dyn StateStore>,
        runtime: Arc<dyn RuntimeClient>,
        monitor: Arc<dyn RestartMonitor>,
        events: Arc<dyn EventSink>,
        policy: Arc<dyn HostConfigPolicy>,
        restart_wait: Duration,
    ) -> Self {
        Self {
            registry: ContainerRegistry::new(),
            store,
            runtime,
            monitor,
            events,
            policy,
            restart_wait,
        }
    }

    /// Returns the container registry.
    #[must_use]
    pub const fn registry(&self) -> &ContainerRegistry {
        &self.registry
    }
}
