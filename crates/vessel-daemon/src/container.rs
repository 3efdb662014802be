//! Core container struct and its state guard.
//!
//! All mutable container state lives behind a single per-container lock.
//! Anything that reads or writes the host configuration, lifecycle
//! flags, or start command goes through [`Container::with_exclusive`],
//! which releases the lock on every exit path. Lifecycle transitions
//! (start, stop, restart, removal) use the same lock, so an in-flight
//! update serializes against them.

use std::sync::{Condvar, Mutex, PoisonError};
use std::time::Duration;

use vessel_common::types::{ContainerId, ContainerState, HostConfig};

/// A container instance with its configuration and runtime state.
#[derive(Debug)]
pub struct Container {
    /// Unique identifier. Immutable for the container's lifetime.
    id: ContainerId,
    /// Human-readable name. Immutable for the container's lifetime.
    name: String,
    /// ISO-8601 creation timestamp.
    created_at: String,
    /// Lock-guarded mutable state.
    inner: Mutex<ContainerMut>,
    /// Signaled on every lifecycle-flag transition.
    state_changed: Condvar,
}

/// The mutable interior of a container, only reachable under its lock.
#[derive(Debug, Clone, Default)]
pub struct ContainerMut {
    /// Host-specific resource and policy settings.
    pub host_config: HostConfig,
    /// Path of the process started inside the container.
    pub path: String,
    /// Arguments of the process started inside the container.
    pub args: Vec<String>,
    /// The container's process is currently running.
    pub running: bool,
    /// The container exited and its restart policy is bringing it back.
    /// Never true while `running` is true.
    pub restarting: bool,
    /// Removal has begun; the configuration is frozen.
    pub removal_in_progress: bool,
    /// The container is defunct; the configuration is frozen.
    pub dead: bool,
}

impl ContainerMut {
    /// Reports the externally visible lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ContainerState {
        if self.dead {
            ContainerState::Dead
        } else if self.removal_in_progress {
            ContainerState::Removing
        } else if self.restarting {
            ContainerState::Restarting
        } else if self.running {
            ContainerState::Running
        } else {
            ContainerState::Stopped
        }
    }
}

impl Container {
    /// Creates a container record in the stopped state.
    ///
    /// Creation of the underlying process group happens elsewhere; this
    /// type only tracks the daemon-side record.
    #[must_use]
    pub fn new(id: ContainerId, name: impl Into<String>, host_config: HostConfig) -> Self {
        Self {
            id,
            name: name.into(),
            created_at: chrono::Utc::now().to_rfc3339(),
            inner: Mutex::new(ContainerMut {
                host_config,
                ..ContainerMut::default()
            }),
            state_changed: Condvar::new(),
        }
    }

    /// Returns the container's unique identifier.
    #[must_use]
    pub const fn id(&self) -> &ContainerId {
        &self.id
    }

    /// Returns the container's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the ISO-8601 creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    /// Runs `f` with exclusive access to the container's mutable state.
    ///
    /// The lock is released when `f` returns, on every exit path. A lock
    /// poisoned by a panicking holder is recovered rather than
    /// propagated: the guarded data is a plain record whose invariants
    /// hold between statements.
    pub fn with_exclusive<R>(&self, f: impl FnOnce(&mut ContainerMut) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Whether the container's process is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.with_exclusive(|state| state.running)
    }

    /// Whether the container is mid-restart.
    #[must_use]
    pub fn is_restarting(&self) -> bool {
        self.with_exclusive(|state| state.restarting)
    }

    /// Returns the externally visible lifecycle state.
    #[must_use]
    pub fn state(&self) -> ContainerState {
        self.with_exclusive(|state| state.state())
    }

    /// Returns a copy of the current host configuration.
    #[must_use]
    pub fn host_config(&self) -> HostConfig {
        self.with_exclusive(|state| state.host_config.clone())
    }

    /// Marks the container running, clearing the restarting flag.
    pub fn set_running(&self) {
        self.with_exclusive(|state| {
            state.running = true;
            state.restarting = false;
        });
        self.state_changed.notify_all();
        tracing::debug!(id = %self.id, "container marked running");
    }

    /// Marks the container as restarting. The running flag is cleared
    /// first; the two are never set together.
    pub fn set_restarting(&self) {
        self.with_exclusive(|state| {
            state.running = false;
            state.restarting = true;
        });
        self.state_changed.notify_all();
        tracing::debug!(id = %self.id, "container marked restarting");
    }

    /// Marks the container stopped.
    pub fn set_stopped(&self) {
        self.with_exclusive(|state| {
            state.running = false;
            state.restarting = false;
        });
        self.state_changed.notify_all();
        tracing::debug!(id = %self.id, "container marked stopped");
    }

    /// Flags the container for removal, freezing its configuration.
    pub fn mark_removal_in_progress(&self) {
        self.with_exclusive(|state| state.removal_in_progress = true);
        self.state_changed.notify_all();
    }

    /// Flags the container as dead, freezing its configuration.
    pub fn mark_dead(&self) {
        self.with_exclusive(|state| state.dead = true);
        self.state_changed.notify_all();
    }

    /// Blocks until the container reaches the running state or `timeout`
    /// elapses, whichever comes first.
    ///
    /// Returns `true` if the container is running when the wait ends. A
    /// timeout is informational, not an error. The exclusive lock is not
    /// held across the wait: the restart path needs it to flip the
    /// running flag.
    #[must_use]
    pub fn await_running(&self, timeout: Duration) -> bool {
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = self
            .state_changed
            .wait_timeout_while(guard, timeout, |state| !state.running)
            .unwrap_or_else(PoisonError::into_inner);
        guard.running
    }
}
