//! Manifest collection.

use std::sync::Arc;

use crate::error::{DoctorError, Result};
use crate::host::ExtensionRegistry;

use super::ComponentManifest;

/// Gathers one snapshot of every installed component's manifest.
///
/// Nothing is cached; each call reflects the registry at call time.
#[derive(Clone)]
pub struct ManifestCollector {
    registry: Arc<dyn ExtensionRegistry>,
}

impl ManifestCollector {
    /// Create a collector over a registry.
    pub fn new(registry: Arc<dyn ExtensionRegistry>) -> Self {
        Self { registry }
    }

    /// Collect a fresh snapshot, in registry order.
    pub async fn collect(&self) -> Result<Vec<ComponentManifest>> {
        let descriptors = self
            .registry
            .list()
            .await
            .map_err(|e| DoctorError::host("extension registry query", e))?;

        let manifests: Vec<_> = descriptors
            .iter()
            .map(ComponentManifest::from_descriptor)
            .collect();
        tracing::debug!(components = manifests.len(), "collected manifest snapshot");
        Ok(manifests)
    }
}
