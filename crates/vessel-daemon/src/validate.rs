//! Daemon-wide host-configuration validation.
//!
//! Runs before any container state is touched. A failing rule aborts the
//! update with no mutation; rules that are merely inadvisable produce
//! warnings returned alongside a successful verification.

use vessel_common::constants::{MAX_BLKIO_WEIGHT, MIN_BLKIO_WEIGHT, MIN_MEMORY_LIMIT};
use vessel_common::error::{Result, VesselError};
use vessel_common::types::HostConfig;

/// Verifies a requested host configuration against daemon-wide rules.
pub trait HostConfigPolicy: Send + Sync {
    /// Checks the configuration, returning accumulated warnings on
    /// success.
    ///
    /// # Errors
    ///
    /// Returns [`VesselError::Validation`] on the first failing rule,
    /// carrying the warnings collected up to that point.
    fn verify(&self, config: &HostConfig) -> Result<Vec<String>>;
}

/// The daemon's standard validation rules.
#[derive(Debug, Default)]
pub struct DefaultHostConfigPolicy;

impl HostConfigPolicy for DefaultHostConfigPolicy {
    fn verify(&self, config: &HostConfig) -> Result<Vec<String>> {
        let mut warnings = Vec::new();
        let fail = |reason: &str, warnings: &mut Vec<String>| VesselError::Validation {
            reason: reason.to_owned(),
            warnings: std::mem::take(warnings),
        };

        if config.memory != 0 && config.memory < MIN_MEMORY_LIMIT {
            return Err(fail("minimum memory limit allowed is 4MB", &mut warnings));
        }
        if config.memory_swap > 0 && config.memory == 0 {
            return Err(fail(
                "you should always set the memory limit when using the memory-swap limit",
                &mut warnings,
            ));
        }
        if config.memory_swap > 0 && config.memory_swap < config.memory {
            return Err(fail(
                "memory-swap limit should be larger than memory limit",
                &mut warnings,
            ));
        }
        if config.memory_swap < -1 {
            return Err(fail(
                "memory-swap limit must be -1 (unlimited) or non-negative",
                &mut warnings,
            ));
        }
        if config.memory_reservation > 0 && config.memory != 0 && config.memory < config.memory_reservation
        {
            return Err(fail(
                "memory limit should be larger than memory reservation",
                &mut warnings,
            ));
        }
        if config.kernel_memory != 0 && config.kernel_memory < MIN_MEMORY_LIMIT {
            return Err(fail(
                "minimum kernel memory limit allowed is 4MB",
                &mut warnings,
            ));
        }
        if config.cpu_shares < 0 || config.cpu_period < 0 || config.cpu_quota < 0 {
            return Err(fail("CPU settings must be non-negative", &mut warnings));
        }
        if config.blkio_weight != 0
            && !(MIN_BLKIO_WEIGHT..=MAX_BLKIO_WEIGHT).contains(&config.blkio_weight)
        {
            return Err(fail(
                "block-IO weight must be between 10 and 1000, or 0 to unset",
                &mut warnings,
            ));
        }

        if config.memory_swap == -1 {
            warnings.push(
                "unlimited swap allows the container to consume all host swap space".to_owned(),
            );
        }
        if config.kernel_memory != 0 {
            warnings.push(
                "kernel memory limits only take effect when the container process starts"
                    .to_owned(),
            );
        }

        Ok(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verify(config: &HostConfig) -> Result<Vec<String>> {
        DefaultHostConfigPolicy.verify(config)
    }

    #[test]
    fn default_config_passes_with_no_warnings() {
        let warnings = verify(&HostConfig::default()).expect("valid");
        assert!(warnings.is_empty());
    }

    #[test]
    fn tiny_memory_limit_rejected() {
        let config = HostConfig {
            memory: 1024,
            ..HostConfig::default()
        };
        let err = verify(&config).expect_err("should fail");
        assert!(matches!(err, VesselError::Validation { .. }));
    }

    #[test]
    fn swap_without_memory_rejected() {
        let config = HostConfig {
            memory_swap: 104_857_600,
            ..HostConfig::default()
        };
        assert!(verify(&config).is_err());
    }

    #[test]
    fn swap_below_memory_rejected() {
        let config = HostConfig {
            memory: 104_857_600,
            memory_swap: 52_428_800,
            ..HostConfig::default()
        };
        assert!(verify(&config).is_err());
    }

    #[test]
    fn reservation_above_memory_rejected() {
        let config = HostConfig {
            memory: 52_428_800,
            memory_reservation: 104_857_600,
            ..HostConfig::default()
        };
        assert!(verify(&config).is_err());
    }

    #[test]
    fn negative_cpu_quota_rejected() {
        let config = HostConfig {
            cpu_quota: -5,
            ..HostConfig::default()
        };
        assert!(verify(&config).is_err());
    }

    #[test]
    fn out_of_range_blkio_weight_rejected() {
        for weight in [5, 1001] {
            let config = HostConfig {
                blkio_weight: weight,
                ..HostConfig::default()
            };
            assert!(verify(&config).is_err(), "weight {weight} should fail");
        }
    }

    #[test]
    fn boundary_blkio_weights_accepted() {
        for weight in [0, 10, 1000] {
            let config = HostConfig {
                blkio_weight: weight,
                ..HostConfig::default()
            };
            assert!(verify(&config).is_ok(), "weight {weight} should pass");
        }
    }

    #[test]
    fn unlimited_swap_warns() {
        let config = HostConfig {
            memory: 104_857_600,
            memory_swap: -1,
            ..HostConfig::default()
        };
        let warnings = verify(&config).expect("valid");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("swap"));
    }

    #[test]
    fn kernel_memory_warns_but_passes() {
        let config = HostConfig {
            kernel_memory: 8 * 1024 * 1024,
            ..HostConfig::default()
        };
        let warnings = verify(&config).expect("valid");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn validation_error_reports_failing_rule() {
        let config = HostConfig {
            memory: 104_857_600,
            blkio_weight: 5,
            ..HostConfig::default()
        };
        let err = verify(&config).expect_err("should fail");
        assert!(
            matches!(err, VesselError::Validation { ref reason, .. } if reason.contains("block-IO"))
        );
    }
}
