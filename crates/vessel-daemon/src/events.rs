//! Container lifecycle event emission.

use vessel_common::types::ContainerId;

use crate::container::Container;

/// A container lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerEvent {
    /// Container the event belongs to.
    pub id: ContainerId,
    /// Container name at emission time.
    pub name: String,
    /// Action that occurred, e.g. `"update"`.
    pub action: String,
    /// ISO-8601 emission timestamp.
    pub timestamp: String,
}

impl ContainerEvent {
    /// Builds an event for the given container and action.
    #[must_use]
    pub fn new(container: &Container, action: &str) -> Self {
        Self {
            id: container.id().clone(),
            name: container.name().to_owned(),
            action: action.to_owned(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Consumes lifecycle events produced by the daemon.
pub trait EventSink: Send + Sync {
    /// Emits an event for the given container and action.
    fn emit(&self, container: &Container, action: &str);
}

/// [`EventSink`] that records events to the structured log.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&self, container: &Container, action: &str) {
        let event = ContainerEvent::new(container, action);
        tracing::info!(
            id = %event.id,
            name = %event.name,
            action = %event.action,
            "container event"
        );
    }
}
