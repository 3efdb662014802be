//! Runtime-engine boundary for the Vessel daemon.
//!
//! Translates the daemon's portable [`HostConfig`] into the runtime
//! engine's resource-update request shape and defines the client seam
//! through which resource limits are pushed onto a live process group.
//!
//! [`HostConfig`]: vessel_common::types::HostConfig

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod cgroup;
pub mod client;
pub mod resources;
