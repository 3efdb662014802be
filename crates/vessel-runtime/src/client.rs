//! Client seam to the external runtime engine.

use vessel_common::error::Result;
use vessel_common::types::ContainerId;

use crate::resources::ResourceUpdateRequest;

/// Pushes resource limits onto a live container's process group.
///
/// Implementors enforce the limits through whatever mechanism the
/// platform provides; the daemon treats the call as one-shot and opaque.
/// A returned error means the limits did not take effect live.
pub trait RuntimeClient: Send + Sync {
    /// Applies the given limits to the container's process group.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime engine rejects or fails the
    /// update; the caller is responsible for keeping its persisted
    /// record consistent in that case.
    fn update_resources(&self, id: &ContainerId, resources: &ResourceUpdateRequest) -> Result<()>;
}
