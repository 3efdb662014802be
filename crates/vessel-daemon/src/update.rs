//! Live container reconfiguration.
//!
//! Applies a new host configuration to an existing container, whether
//! stopped, running, or mid-restart. Three authorities must stay
//! consistent: the persisted record, the live runtime, and the restart
//! monitor. There is no transaction log — consistency comes from the
//! container's exclusive lock plus a single pre-update snapshot that is
//! restored (and re-persisted) if any step after staging fails. The
//! persisted record therefore always matches either the pre-update or
//! the fully applied post-update configuration.

use std::sync::Arc;

use vessel_common::error::{Result, VesselError};
use vessel_common::types::HostConfig;
use vessel_runtime::resources::ResourceUpdateRequest;

use crate::container::Container;
use crate::daemon::Daemon;

/// Result of a successful update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Non-fatal findings from validation and the update itself.
    pub warnings: Vec<String>,
}

impl Daemon {
    /// Applies a new host configuration to the named container.
    ///
    /// The configuration is verified, staged under the container's
    /// exclusive lock, and persisted; the restart monitor is reconciled
    /// regardless of lifecycle state; resource limits are pushed to the
    /// runtime engine only if the container is running and not
    /// mid-restart. A mid-restart container is given `restart_wait` to
    /// come back up first — that wait elapsing is reported as a warning,
    /// not a failure.
    ///
    /// # Errors
    ///
    /// Returns [`VesselError::Validation`] or [`VesselError::NotFound`]
    /// before any mutation, or [`VesselError::CannotUpdate`] afterwards;
    /// in the latter case the container's configuration has been
    /// restored to its pre-update value.
    pub fn update_container(&self, name: &str, new_config: &HostConfig) -> Result<UpdateOutcome> {
        let mut warnings = self.policy.verify(new_config)?;
        let container = self.registry.resolve(name)?;
        let id = container.id().clone();

        // Preconditions and staging are one exclusive section: nothing
        // is staged if the container is not updatable, so rejection
        // needs no rollback.
        let backup = container.with_exclusive(|state| {
            if state.removal_in_progress || state.dead {
                return Err(VesselError::cannot_update(
                    id.as_str(),
                    VesselError::Config {
                        message: "container is marked for removal and cannot be updated".into(),
                    },
                ));
            }
            if state.running && new_config.kernel_memory != 0 {
                return Err(VesselError::cannot_update(
                    id.as_str(),
                    VesselError::Config {
                        message: "cannot change kernel memory limit of a running container; stop it first".into(),
                    },
                ));
            }
            let backup = state.host_config.clone();
            state.host_config = new_config.clone();
            Ok(backup)
        })?;

        if let Err(err) = self.store.persist(&container) {
            self.restore_config(&container, backup);
            return Err(VesselError::cannot_update(id.as_str(), err));
        }

        // The monitor governs future restarts, so it is reconciled even
        // for stopped containers.
        self.monitor
            .restart_policy_changed(&id, &new_config.restart_policy);

        if container.is_restarting() && !container.await_running(self.restart_wait) {
            tracing::warn!(id = %id, "restart wait elapsed before container reached running state");
            warnings.push(format!(
                "container {id} was still restarting; new resource limits apply when it is next running"
            ));
        }

        // A stopped container needs no live push: the staged record is
        // applied at next start.
        if container.is_running() && !container.is_restarting() {
            let request = ResourceUpdateRequest::from_host_config(new_config);
            if let Err(err) = self.runtime.update_resources(&id, &request) {
                self.restore_config(&container, backup);
                return Err(VesselError::cannot_update(id.as_str(), err));
            }
        }

        self.events.emit(&container, "update");
        tracing::info!(id = %id, "container configuration updated");
        Ok(UpdateOutcome { warnings })
    }

    /// Rewrites the container's start path and arguments.
    ///
    /// Used by the image build path to correct metadata; touches no
    /// resource limits and performs no runtime call.
    ///
    /// # Errors
    ///
    /// Returns [`VesselError::NotFound`] for an unknown container, or a
    /// configuration error if `cmd` is empty.
    pub fn update_cmd_on_build(&self, id: &str, cmd: &[String]) -> Result<()> {
        let container = self.registry.resolve(id)?;
        let Some((path, args)) = cmd.split_first() else {
            return Err(VesselError::Config {
                message: "command must contain at least the executable path".into(),
            });
        };
        container.with_exclusive(|state| {
            state.path = path.clone();
            state.args = args.to_vec();
        });
        tracing::debug!(id = %container.id(), path, "container start command rewritten");
        Ok(())
    }

    /// Restores a configuration snapshot and re-persists it.
    ///
    /// Called on any failure after staging. A persist failure during
    /// rollback leaves the in-memory record authoritative; it is logged
    /// rather than propagated so the original failure reaches the
    /// caller.
    fn restore_config(&self, container: &Arc<Container>, backup: HostConfig) {
        container.with_exclusive(|state| state.host_config = backup);
        if let Err(err) = self.store.persist(container) {
            tracing::error!(id = %container.id(), %err, "failed to persist restored configuration");
        } else {
            tracing::debug!(id = %container.id(), "configuration rolled back to pre-update snapshot");
        }
    }
}
