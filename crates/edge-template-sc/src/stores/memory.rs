//!
//! # In-memory object store
//!
//! Backing client for local mode and tests. Writes carry resource-version
//! optimistic concurrency, reads can go through a watch-cache snapshot that
//! only advances on [`MemoryClient::sync_cache`] so informer lag is
//! reproducible.
//!
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_lock::RwLock;
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use edge_template_metadata::catalog::{Catalog, CatalogSpec};
use edge_template_metadata::core::{K8Obj, LabelSelector, Spec};
use edge_template_metadata::revision::{DeviceTemplateRevision, DeviceTemplateRevisionSpec};
use edge_template_metadata::template::{DeviceTemplate, DeviceTemplateSpec};

use crate::StoreError;

use super::{CacheResolution, CatalogClient, RevisionClient, TemplateClient};

fn store_key(namespace: &str, name: &str) -> String {
    format!("{namespace}/{name}")
}

#[derive(Debug)]
struct SpecStore<S>
where
    S: Spec,
{
    data: RwLock<HashMap<String, K8Obj<S>>>,
}

impl<S> Default for SpecStore<S>
where
    S: Spec,
{
    fn default() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }
}

impl<S> SpecStore<S>
where
    S: Spec,
{
    async fn value(&self, namespace: &str, name: &str) -> Result<K8Obj<S>, StoreError> {
        let key = store_key(namespace, name);
        self.data
            .read()
            .await
            .get(&key)
            .cloned()
            .ok_or(StoreError::NotFound {
                kind: S::label(),
                name: key,
            })
    }

    async fn insert_new(&self, mut obj: K8Obj<S>, version: u64) -> Result<K8Obj<S>, StoreError> {
        let key = obj.store_key();
        let mut lock = self.data.write().await;
        if lock.contains_key(&key) {
            return Err(StoreError::Conflict {
                kind: S::label(),
                name: key,
            });
        }
        obj.metadata.uid = Uuid::new_v4().to_string();
        obj.metadata.resource_version = version.to_string();
        obj.metadata.creation_timestamp = Some(Utc::now());
        lock.insert(key, obj.clone());
        Ok(obj)
    }

    async fn update(&self, mut obj: K8Obj<S>, version: u64) -> Result<K8Obj<S>, StoreError> {
        let key = obj.store_key();
        let mut lock = self.data.write().await;
        let Some(stored) = lock.get(&key) else {
            return Err(StoreError::NotFound {
                kind: S::label(),
                name: key,
            });
        };
        if stored.metadata.resource_version != obj.metadata.resource_version {
            debug!(
                key,
                stored = stored.metadata.resource_version,
                incoming = obj.metadata.resource_version,
                "stale resource version"
            );
            return Err(StoreError::Conflict {
                kind: S::label(),
                name: key,
            });
        }
        obj.metadata.resource_version = version.to_string();
        lock.insert(key, obj.clone());
        Ok(obj)
    }

    async fn remove(&self, namespace: &str, name: &str) -> Result<K8Obj<S>, StoreError> {
        let key = store_key(namespace, name);
        self.data
            .write()
            .await
            .remove(&key)
            .ok_or(StoreError::NotFound {
                kind: S::label(),
                name: key,
            })
    }

    async fn items(&self) -> Vec<K8Obj<S>> {
        self.data.read().await.values().cloned().collect()
    }

    async fn select(&self, namespace: &str, selector: &LabelSelector) -> Vec<K8Obj<S>> {
        self.data
            .read()
            .await
            .values()
            .filter(|obj| {
                obj.metadata.namespace == namespace && selector.matches(&obj.metadata.labels)
            })
            .cloned()
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct MemoryClient {
    templates: SpecStore<DeviceTemplateSpec>,
    revisions: SpecStore<DeviceTemplateRevisionSpec>,
    revision_cache: RwLock<Vec<DeviceTemplateRevision>>,
    catalogs: SpecStore<CatalogSpec>,
    versions: AtomicU64,
    template_updates: AtomicU64,
}

impl MemoryClient {
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn next_version(&self) -> u64 {
        self.versions.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub async fn create_template(
        &self,
        template: DeviceTemplate,
    ) -> Result<DeviceTemplate, StoreError> {
        self.templates.insert_new(template, self.next_version()).await
    }

    pub async fn create_revision(
        &self,
        revision: DeviceTemplateRevision,
    ) -> Result<DeviceTemplateRevision, StoreError> {
        self.revisions.insert_new(revision, self.next_version()).await
    }

    pub async fn create_catalog(&self, catalog: Catalog) -> Result<Catalog, StoreError> {
        self.catalogs.insert_new(catalog, self.next_version()).await
    }

    /// advance the watch-cache snapshot to the authoritative revision set
    pub async fn sync_cache(&self) {
        let items = self.revisions.items().await;
        *self.revision_cache.write().await = items;
    }

    /// number of template update calls issued so far, used to assert
    /// reconcile idempotence
    pub fn template_update_count(&self) -> u64 {
        self.template_updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TemplateClient for MemoryClient {
    async fn get(&self, namespace: &str, name: &str) -> Result<DeviceTemplate, StoreError> {
        self.templates.value(namespace, name).await
    }

    async fn update(&self, template: DeviceTemplate) -> Result<DeviceTemplate, StoreError> {
        self.template_updates.fetch_add(1, Ordering::SeqCst);
        self.templates.update(template, self.next_version()).await
    }
}

#[async_trait]
impl RevisionClient for MemoryClient {
    async fn get(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<DeviceTemplateRevision, StoreError> {
        self.revisions.value(namespace, name).await
    }

    async fn update(
        &self,
        revision: DeviceTemplateRevision,
    ) -> Result<DeviceTemplateRevision, StoreError> {
        self.revisions.update(revision, self.next_version()).await
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<(), StoreError> {
        self.revisions.remove(namespace, name).await?;
        Ok(())
    }

    async fn list(
        &self,
        namespace: &str,
        selector: &LabelSelector,
        resolution: CacheResolution,
    ) -> Result<Vec<DeviceTemplateRevision>, StoreError> {
        match resolution {
            CacheResolution::Live => Ok(self.revisions.select(namespace, selector).await),
            CacheResolution::Cached => Ok(self
                .revision_cache
                .read()
                .await
                .iter()
                .filter(|revision| {
                    revision.metadata.namespace == namespace
                        && selector.matches(&revision.metadata.labels)
                })
                .cloned()
                .collect()),
        }
    }
}

#[async_trait]
impl CatalogClient for MemoryClient {
    async fn get(&self, namespace: &str, name: &str) -> Result<Catalog, StoreError> {
        self.catalogs.value(namespace, name).await
    }

    async fn list(&self, namespace: &str) -> Result<Vec<Catalog>, StoreError> {
        Ok(self
            .catalogs
            .items()
            .await
            .into_iter()
            .filter(|catalog| catalog.metadata.namespace == namespace)
            .collect())
    }

    async fn update(&self, catalog: Catalog) -> Result<Catalog, StoreError> {
        self.catalogs.update(catalog, self.next_version()).await
    }
}
