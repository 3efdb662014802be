//! In-memory container registry.
//!
//! Owns every [`Container`] the daemon knows about and resolves
//! caller-supplied identifiers, which may be either a container ID or a
//! name. The registry lock is held only for map access, never across
//! collaborator calls.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use vessel_common::error::{Result, VesselError};
use vessel_common::types::ContainerId;

use crate::container::Container;

/// Registry of all containers managed by the daemon, keyed by ID.
#[derive(Debug, Default)]
pub struct ContainerRegistry {
    containers: RwLock<HashMap<String, Arc<Container>>>,
}

impl ContainerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a container to the registry.
    ///
    /// # Errors
    ///
    /// Returns an error if a container with the same ID is already
    /// registered.
    pub fn register(&self, container: Arc<Container>) -> Result<()> {
        let mut containers = self
            .containers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let id = container.id().as_str().to_owned();
        if containers.contains_key(&id) {
            return Err(VesselError::Config {
                message: format!("container ID already registered: {id}"),
            });
        }
        let _ = containers.insert(id, container);
        Ok(())
    }

    /// Resolves a container by ID or name.
    ///
    /// # Errors
    ///
    /// Returns [`VesselError::NotFound`] if no container matches.
    pub fn resolve(&self, name_or_id: &str) -> Result<Arc<Container>> {
        let containers = self
            .containers
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(container) = containers.get(name_or_id) {
            return Ok(Arc::clone(container));
        }
        containers
            .values()
            .find(|c| c.name() == name_or_id)
            .map(Arc::clone)
            .ok_or_else(|| VesselError::NotFound {
                kind: "container",
                id: name_or_id.to_owned(),
            })
    }

    /// Removes a container from the registry, returning it if present.
    pub fn remove(&self, id: &ContainerId) -> Option<Arc<Container>> {
        self.containers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id.as_str())
    }

    /// Returns all registered containers.
    #[must_use]
    pub fn list(&self) -> Vec<Arc<Container>> {
        self.containers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(Arc::clone)
            .collect()
    }
}
