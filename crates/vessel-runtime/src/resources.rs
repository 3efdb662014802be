//! Translation from a [`HostConfig`] to the runtime engine's
//! resource-update request shape.
//!
//! The daemon API carries limits as wide signed integers; the runtime
//! engine's update call takes unsigned 32-bit fields. The translation is
//! a pure function of its input and performs no validation — the
//! daemon-wide verification step has already run by the time a request
//! is built here.

use serde::{Deserialize, Serialize};
use vessel_common::types::HostConfig;

/// Resource limits in the shape the runtime engine consumes.
///
/// Built per update call and handed to the runtime client exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUpdateRequest {
    /// Block-IO weight.
    pub blkio_weight: u32,
    /// CPU shares (relative weight).
    pub cpu_shares: u32,
    /// CPU CFS period in microseconds.
    pub cpu_period: u32,
    /// CPU CFS quota in microseconds per period.
    pub cpu_quota: u32,
    /// CPUs in which to allow execution.
    pub cpuset_cpus: String,
    /// Memory nodes in which to allow allocation.
    pub cpuset_mems: String,
    /// Memory limit in bytes.
    pub memory: u32,
    /// Combined memory + swap limit in bytes.
    pub memory_swap: u32,
    /// Soft memory limit in bytes.
    pub memory_reservation: u32,
    /// Kernel memory limit in bytes.
    pub kernel_memory: u32,
}

impl ResourceUpdateRequest {
    /// Builds a request from a host configuration.
    ///
    /// Numeric fields are narrowed with [`narrow_u32`]; cpuset strings
    /// are passed through unchanged.
    #[must_use]
    pub fn from_host_config(config: &HostConfig) -> Self {
        Self {
            blkio_weight: u32::from(config.blkio_weight),
            cpu_shares: narrow_u32(config.cpu_shares),
            cpu_period: narrow_u32(config.cpu_period),
            cpu_quota: narrow_u32(config.cpu_quota),
            cpuset_cpus: config.cpuset_cpus.clone(),
            cpuset_mems: config.cpuset_mems.clone(),
            memory: narrow_u32(config.memory),
            memory_swap: narrow_u32(config.memory_swap),
            memory_reservation: narrow_u32(config.memory_reservation),
            kernel_memory: narrow_u32(config.kernel_memory),
        }
    }
}

/// Narrows a signed 64-bit limit to the engine's unsigned 32-bit width.
///
/// Saturating on both ends: negative values (the daemon's "unset" and
/// "unlimited" sentinels) collapse to 0, and values above `u32::MAX` pin
/// to `u32::MAX`. An unchecked `as` cast here would silently wrap
/// out-of-range limits into nonsense values.
#[must_use]
pub fn narrow_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_passes_in_range_values() {
        assert_eq!(narrow_u32(0), 0);
        assert_eq!(narrow_u32(1024), 1024);
        assert_eq!(narrow_u32(i64::from(u32::MAX)), u32::MAX);
    }

    #[test]
    fn narrow_saturates_negative_to_zero() {
        assert_eq!(narrow_u32(-1), 0);
        assert_eq!(narrow_u32(i64::MIN), 0);
    }

    #[test]
    fn narrow_saturates_overflow_to_max() {
        assert_eq!(narrow_u32(i64::from(u32::MAX) + 1), u32::MAX);
        assert_eq!(narrow_u32(i64::MAX), u32::MAX);
    }

    #[test]
    fn request_carries_all_host_config_fields() {
        let config = HostConfig {
            cpu_shares: 512,
            cpu_period: 100_000,
            cpu_quota: 50_000,
            cpuset_cpus: "0-3".into(),
            cpuset_mems: "0".into(),
            memory: 104_857_600,
            memory_swap: 209_715_200,
            memory_reservation: 52_428_800,
            kernel_memory: 0,
            blkio_weight: 500,
            ..HostConfig::default()
        };

        let request = ResourceUpdateRequest::from_host_config(&config);
        assert_eq!(request.cpu_shares, 512);
        assert_eq!(request.cpu_period, 100_000);
        assert_eq!(request.cpu_quota, 50_000);
        assert_eq!(request.cpuset_cpus, "0-3");
        assert_eq!(request.cpuset_mems, "0");
        assert_eq!(request.memory, 104_857_600);
        assert_eq!(request.memory_swap, 209_715_200);
        assert_eq!(request.memory_reservation, 52_428_800);
        assert_eq!(request.kernel_memory, 0);
        assert_eq!(request.blkio_weight, 500);
    }

    #[test]
    fn unlimited_swap_sentinel_narrows_to_unset() {
        let config = HostConfig {
            memory: 104_857_600,
            memory_swap: -1,
            ..HostConfig::default()
        };
        let request = ResourceUpdateRequest::from_host_config(&config);
        assert_eq!(request.memory_swap, 0);
    }
}
