//! Daemon core for the Vessel container runtime.
//!
//! Owns the container registry and applies live configuration changes:
//! the update orchestrator stages a new host configuration under the
//! container's exclusive lock, persists it, reconciles the restart
//! monitor, and pushes resource limits to the runtime engine when the
//! container is live, rolling the record back if any post-staging step
//! fails.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod container;
pub mod daemon;
pub mod events;
pub mod monitor;
pub mod registry;
pub mod state;
pub mod update;
pub mod validate;
