//! Unified error types for the Vessel workspace.
//!
//! Every fallible operation in the workspace returns [`VesselError`].
//! Update failures that occur after configuration has been staged are
//! wrapped in [`VesselError::CannotUpdate`] so callers always see which
//! container the failure belongs to alongside the underlying cause.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum VesselError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// The requested host configuration failed daemon-wide validation.
    ///
    /// Carries the warnings collected before the failing rule fired, so
    /// callers see both, matching the (warnings, error) pair the update
    /// API exposes.
    #[error("invalid host configuration: {reason}")]
    Validation {
        /// The rule that rejected the configuration.
        reason: String,
        /// Non-fatal findings produced before the rejection.
        warnings: Vec<String>,
    },

    /// A container could not be updated.
    ///
    /// Covers lifecycle-state preconditions, persistence failures, and
    /// live runtime rejections. Whenever this is returned after staging,
    /// the container's configuration has been restored to its pre-update
    /// value.
    #[error("cannot update container {id}: {source}")]
    CannotUpdate {
        /// Container the update targeted.
        id: String,
        /// Underlying cause.
        source: Box<VesselError>,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl VesselError {
    /// Wraps an error as a [`VesselError::CannotUpdate`] for the given
    /// container ID.
    #[must_use]
    pub fn cannot_update(id: impl Into<String>, source: Self) -> Self {
        Self::CannotUpdate {
            id: id.into(),
            source: Box::new(source),
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, VesselError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cannot_update_embeds_container_id() {
        let err = VesselError::cannot_update(
            "abc123",
            VesselError::Config {
                message: "bad value".into(),
            },
        );
        let msg = err.to_string();
        assert!(msg.contains("abc123"));
        assert!(msg.contains("cannot update container"));
    }

    #[test]
    fn not_found_display_names_kind_and_id() {
        let err = VesselError::NotFound {
            kind: "container",
            id: "web-1".into(),
        };
        assert_eq!(err.to_string(), "container not found: web-1");
    }

    #[test]
    fn validation_display_shows_reason() {
        let err = VesselError::Validation {
            reason: "memory limit too low".into(),
            warnings: vec!["swap unlimited".into()],
        };
        assert!(err.to_string().contains("memory limit too low"));
    }
}
