//!
//! # Accessor seams over the backing object store
//!
//! The controllers never talk to a cluster directly, they go through these
//! narrow clients. A K8 binding and the in-memory client both implement them.
//!
mod memory;

pub use memory::MemoryClient;

use std::sync::Arc;

use async_trait::async_trait;

use edge_template_metadata::catalog::Catalog;
use edge_template_metadata::core::LabelSelector;
use edge_template_metadata::revision::DeviceTemplateRevision;
use edge_template_metadata::template::DeviceTemplate;

use crate::StoreError;

pub type SharedClient<C> = Arc<C>;

/// which consistency tier a list read goes to: the watch cache is cheap but
/// may lag a just-written object, the live store is authoritative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheResolution {
    Cached,
    Live,
}

#[async_trait]
pub trait TemplateClient: Send + Sync {
    async fn get(&self, namespace: &str, name: &str) -> Result<DeviceTemplate, StoreError>;

    /// rejects with [`StoreError::Conflict`] when the stored resource version
    /// no longer matches the one carried by `template`
    async fn update(&self, template: DeviceTemplate) -> Result<DeviceTemplate, StoreError>;
}

#[async_trait]
pub trait RevisionClient: Send + Sync {
    async fn get(&self, namespace: &str, name: &str)
    -> Result<DeviceTemplateRevision, StoreError>;

    async fn update(
        &self,
        revision: DeviceTemplateRevision,
    ) -> Result<DeviceTemplateRevision, StoreError>;

    async fn delete(&self, namespace: &str, name: &str) -> Result<(), StoreError>;

    async fn list(
        &self,
        namespace: &str,
        selector: &LabelSelector,
        resolution: CacheResolution,
    ) -> Result<Vec<DeviceTemplateRevision>, StoreError>;
}

#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn get(&self, namespace: &str, name: &str) -> Result<Catalog, StoreError>;

    async fn list(&self, namespace: &str) -> Result<Vec<Catalog>, StoreError>;

    async fn update(&self, catalog: Catalog) -> Result<Catalog, StoreError>;
}
