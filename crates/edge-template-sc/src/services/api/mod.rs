//!
//! # API store overlays
//!
//! Write paths for the public API: each overlay validates, authenticates
//! and stamps labels before delegating to the backing object store. The
//! controllers only ever see objects that already passed through here.
//!
mod catalog;
mod revision;
mod template;

pub use catalog::CatalogApiStore;
pub use revision::{AcceptAllValidator, RevisionApiStore, SpecValidator};
pub use template::TemplateApiStore;

use async_trait::async_trait;

use edge_template_metadata::catalog::{Catalog, CatalogSpec};
use edge_template_metadata::core::{K8Obj, Spec};
use edge_template_metadata::revision::{DeviceTemplateRevision, DeviceTemplateRevisionSpec};
use edge_template_metadata::template::{DeviceTemplate, DeviceTemplateSpec};

use crate::StoreError;
use crate::stores::{CatalogClient, MemoryClient, RevisionClient, TemplateClient};

/// delegation seam under the overlays
#[async_trait]
pub trait ObjectStore<S: Spec>: Send + Sync {
    async fn create(&self, obj: K8Obj<S>) -> Result<K8Obj<S>, StoreError>;

    async fn update(&self, obj: K8Obj<S>) -> Result<K8Obj<S>, StoreError>;
}

#[async_trait]
impl<S, T> ObjectStore<S> for std::sync::Arc<T>
where
    S: Spec + 'static,
    T: ObjectStore<S> + ?Sized,
{
    async fn create(&self, obj: K8Obj<S>) -> Result<K8Obj<S>, StoreError> {
        (**self).create(obj).await
    }

    async fn update(&self, obj: K8Obj<S>) -> Result<K8Obj<S>, StoreError> {
        (**self).update(obj).await
    }
}

#[async_trait]
impl ObjectStore<DeviceTemplateSpec> for MemoryClient {
    async fn create(&self, obj: DeviceTemplate) -> Result<DeviceTemplate, StoreError> {
        self.create_template(obj).await
    }

    async fn update(&self, obj: DeviceTemplate) -> Result<DeviceTemplate, StoreError> {
        TemplateClient::update(self, obj).await
    }
}

#[async_trait]
impl ObjectStore<DeviceTemplateRevisionSpec> for MemoryClient {
    async fn create(
        &self,
        obj: DeviceTemplateRevision,
    ) -> Result<DeviceTemplateRevision, StoreError> {
        self.create_revision(obj).await
    }

    async fn update(
        &self,
        obj: DeviceTemplateRevision,
    ) -> Result<DeviceTemplateRevision, StoreError> {
        RevisionClient::update(self, obj).await
    }
}

#[async_trait]
impl ObjectStore<CatalogSpec> for MemoryClient {
    async fn create(&self, obj: Catalog) -> Result<Catalog, StoreError> {
        self.create_catalog(obj).await
    }

    async fn update(&self, obj: Catalog) -> Result<Catalog, StoreError> {
        CatalogClient::update(self, obj).await
    }
}
