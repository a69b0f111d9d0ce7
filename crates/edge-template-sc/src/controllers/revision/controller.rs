use chrono::Utc;
use tracing::{debug, instrument};

use edge_template_metadata::core::{LabelSelector, OwnerReference, Spec};
use edge_template_metadata::labels;
use edge_template_metadata::revision::DeviceTemplateRevision;
use edge_template_metadata::template::{DeviceTemplate, DeviceTemplateSpec};

use crate::StoreError;
use crate::stores::{CacheResolution, RevisionClient, SharedClient, TemplateClient};

/// Keeps `DeviceTemplate.spec.defaultRevisionName` in sync with the set of
/// revisions referencing the template, and pins each revision to its parent
/// through a controller owner reference.
///
/// Default election only reacts to the revision population crossing the
/// zero/one boundary, there is no promotion logic among several revisions.
pub struct RevisionController<T, R> {
    templates: SharedClient<T>,
    revisions: SharedClient<R>,
}

impl<T, R> RevisionController<T, R>
where
    T: TemplateClient,
    R: RevisionClient,
{
    pub fn new(templates: SharedClient<T>, revisions: SharedClient<R>) -> Self {
        Self {
            templates,
            revisions,
        }
    }

    /// revision changed: stamp the status, refresh ownership, reconcile the
    /// parent's default pointer, then persist the revision
    #[instrument(skip(self, revision), name = "RevisionOnChanged")]
    pub async fn on_changed(
        &self,
        key: &str,
        revision: Option<DeviceTemplateRevision>,
    ) -> Result<Option<DeviceTemplateRevision>, StoreError> {
        if key.is_empty() {
            return Ok(None);
        }
        let Some(revision) = revision else {
            return Ok(None);
        };
        // deletion is handled by on_removed
        if revision.is_being_deleted() {
            return Ok(None);
        }

        let template = self
            .templates
            .get(
                &revision.metadata.namespace,
                &revision.spec.device_template_name,
            )
            .await?;

        let mut updated = revision;
        updated.status.updated_at = Some(Utc::now());
        updated.metadata.owner_references =
            vec![Self::revision_owner(&updated, &template.metadata.uid)];

        self.sync_default_revision(&updated, &template, None).await?;

        Ok(Some(self.revisions.update(updated).await?))
    }

    /// revision removed: reconcile the parent first so its default pointer
    /// never keeps naming a revision that is gone, then delete the revision
    #[instrument(skip(self, revision), name = "RevisionOnRemoved")]
    pub async fn on_removed(
        &self,
        key: &str,
        revision: Option<DeviceTemplateRevision>,
    ) -> Result<Option<DeviceTemplateRevision>, StoreError> {
        if key.is_empty() {
            return Ok(revision);
        }
        let Some(revision) = revision else {
            return Ok(None);
        };

        let template = match self
            .templates
            .get(
                &revision.metadata.namespace,
                &revision.spec.device_template_name,
            )
            .await
        {
            Ok(template) => template,
            // parent already gone, nothing left to reconcile
            Err(err) if err.is_not_found() => {
                debug!(key, "parent template already removed");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        self.sync_default_revision(&revision, &template, Some(&revision.store_key()))
            .await?;

        match self
            .revisions
            .delete(&revision.metadata.namespace, &revision.metadata.name)
            .await
        {
            Ok(()) => {}
            // the store may have dropped the object before this handler ran
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err),
        }

        Ok(Some(revision))
    }

    /// revisions referencing the same template, `exclude` drops the revision
    /// currently being removed whether or not the store still holds it
    async fn sibling_revisions(
        &self,
        namespace: &str,
        template_name: &str,
        exclude: Option<&str>,
    ) -> Result<Vec<DeviceTemplateRevision>, StoreError> {
        let selector = LabelSelector::entry(labels::REVISION_REFERENCE, template_name);

        let mut revisions = self
            .revisions
            .list(namespace, &selector, CacheResolution::Cached)
            .await?;
        if revisions.is_empty() {
            // the cache may not have caught up with a just-created revision
            revisions = self
                .revisions
                .list(namespace, &selector, CacheResolution::Live)
                .await?;
        }

        if let Some(excluded_key) = exclude {
            revisions.retain(|revision| revision.store_key() != excluded_key);
        }
        Ok(revisions)
    }

    /// move the parent's default pointer across the zero/one revision
    /// boundary, a single conditional update and a no-op otherwise
    #[instrument(skip(self, revision, template), name = "SyncDefaultRevision")]
    pub async fn sync_default_revision(
        &self,
        revision: &DeviceTemplateRevision,
        template: &DeviceTemplate,
        exclude: Option<&str>,
    ) -> Result<(), StoreError> {
        let siblings = self
            .sibling_revisions(
                &revision.metadata.namespace,
                &revision.spec.device_template_name,
                exclude,
            )
            .await?;
        debug!(
            template = template.metadata.name,
            count = siblings.len(),
            "sibling revisions"
        );

        if siblings.len() == 1
            && template.spec.default_revision_name != siblings[0].metadata.name
        {
            let mut updated = template.clone();
            updated.spec.default_revision_name = siblings[0].metadata.name.clone();
            self.templates.update(updated).await?;
            return Ok(());
        }

        if siblings.is_empty() && !template.spec.default_revision_name.is_empty() {
            let mut updated = template.clone();
            updated.spec.default_revision_name.clear();
            self.templates.update(updated).await?;
        }

        Ok(())
    }

    /// single controller owner entry, any prior owner is discarded
    fn revision_owner(revision: &DeviceTemplateRevision, uid: &str) -> OwnerReference {
        OwnerReference {
            api_version: revision.spec.device_template_api_version.clone(),
            kind: DeviceTemplateSpec::kind(),
            name: revision.spec.device_template_name.clone(),
            uid: uid.to_owned(),
            controller: Some(true),
            block_owner_deletion: None,
        }
    }
}

#[cfg(test)]
mod test {
    use chrono::Utc;

    use edge_template_metadata::core::{ObjectMeta, OwnerReference};
    use edge_template_metadata::labels;
    use edge_template_metadata::revision::{DeviceTemplateRevision, DeviceTemplateRevisionSpec};
    use edge_template_metadata::template::{DeviceTemplate, DeviceTemplateSpec};

    use crate::stores::{MemoryClient, RevisionClient, TemplateClient};

    use super::RevisionController;

    type MemoryController = RevisionController<MemoryClient, MemoryClient>;

    fn test_controller(client: &std::sync::Arc<MemoryClient>) -> MemoryController {
        RevisionController::new(client.clone(), client.clone())
    }

    fn test_template(name: &str, default_revision: &str) -> DeviceTemplate {
        DeviceTemplate::new(
            name,
            "default",
            DeviceTemplateSpec {
                device_kind: "Sensor".to_owned(),
                device_version: "v1alpha1".to_owned(),
                device_group: "devices.edgetemplate.io".to_owned(),
                device_resource: "sensors".to_owned(),
                display_name: "sensor template".to_owned(),
                default_revision_name: default_revision.to_owned(),
                ..Default::default()
            },
        )
    }

    fn test_revision(name: &str, template_name: &str) -> DeviceTemplateRevision {
        DeviceTemplateRevision {
            metadata: ObjectMeta::new(name, "default")
                .set_labels(vec![(labels::REVISION_REFERENCE, template_name)]),
            spec: DeviceTemplateRevisionSpec {
                display_name: format!("{name} display"),
                device_template_name: template_name.to_owned(),
                device_template_api_version: "edgetemplate.io/v1alpha1".to_owned(),
                template_spec: serde_json::json!({ "interval": 30 }),
                enabled: None,
            },
            ..Default::default()
        }
    }

    #[fluvio_future::test]
    async fn test_first_revision_becomes_default() {
        let client = MemoryClient::new_shared();
        let controller = test_controller(&client);

        let template = client
            .create_template(test_template("t1", ""))
            .await
            .expect("template");
        let revision = client
            .create_revision(test_revision("r1", "t1"))
            .await
            .expect("revision");
        // cache intentionally left behind the live store

        let persisted = controller
            .on_changed(&revision.store_key(), Some(revision))
            .await
            .expect("reconcile")
            .expect("persisted revision");

        let template = TemplateClient::get(client.as_ref(), "default", "t1")
            .await
            .expect("template");
        assert_eq!(template.spec.default_revision_name, "r1");
        assert_eq!(client.template_update_count(), 1);

        assert!(persisted.status.updated_at.is_some());
        let owner: &OwnerReference = &persisted.metadata.owner_references[0];
        assert_eq!(persisted.metadata.owner_references.len(), 1);
        assert_eq!(owner.kind, "DeviceTemplate");
        assert_eq!(owner.name, "t1");
        assert_eq!(owner.uid, template.metadata.uid);
        assert_eq!(owner.api_version, "edgetemplate.io/v1alpha1");
        assert_eq!(owner.controller, Some(true));

        // second pass over the same state must not issue another template write
        let again = controller
            .on_changed(&persisted.store_key(), Some(persisted))
            .await
            .expect("second reconcile")
            .expect("revision");
        assert_eq!(client.template_update_count(), 1);
        assert!(again.status.updated_at.is_some());
    }

    #[fluvio_future::test]
    async fn test_prior_owner_is_replaced() {
        let client = MemoryClient::new_shared();
        let controller = test_controller(&client);

        client
            .create_template(test_template("t1", ""))
            .await
            .expect("template");
        let mut revision = test_revision("r1", "t1");
        revision.metadata.owner_references = vec![OwnerReference {
            kind: "Deployment".to_owned(),
            name: "stale".to_owned(),
            uid: "stale-uid".to_owned(),
            ..Default::default()
        }];
        let revision = client.create_revision(revision).await.expect("revision");

        let persisted = controller
            .on_changed(&revision.store_key(), Some(revision))
            .await
            .expect("reconcile")
            .expect("revision");
        assert_eq!(persisted.metadata.owner_references.len(), 1);
        assert_eq!(persisted.metadata.owner_references[0].kind, "DeviceTemplate");
    }

    #[fluvio_future::test]
    async fn test_removing_last_revision_clears_default() {
        let client = MemoryClient::new_shared();
        let controller = test_controller(&client);

        client
            .create_template(test_template("t1", "r1"))
            .await
            .expect("template");
        let revision = client
            .create_revision(test_revision("r1", "t1"))
            .await
            .expect("revision");
        client.sync_cache().await;

        controller
            .on_removed(&revision.store_key(), Some(revision))
            .await
            .expect("remove");

        let template = TemplateClient::get(client.as_ref(), "default", "t1")
            .await
            .expect("template");
        assert_eq!(template.spec.default_revision_name, "");
        assert!(
            RevisionClient::get(client.as_ref(), "default", "r1")
                .await
                .expect_err("deleted")
                .is_not_found()
        );
    }

    #[fluvio_future::test]
    async fn test_removal_promotes_remaining_sibling() {
        let client = MemoryClient::new_shared();
        let controller = test_controller(&client);

        client
            .create_template(test_template("t1", "r1"))
            .await
            .expect("template");
        let first = client
            .create_revision(test_revision("r1", "t1"))
            .await
            .expect("r1");
        client
            .create_revision(test_revision("r2", "t1"))
            .await
            .expect("r2");
        client.sync_cache().await;

        controller
            .on_removed(&first.store_key(), Some(first))
            .await
            .expect("remove");

        let template = TemplateClient::get(client.as_ref(), "default", "t1")
            .await
            .expect("template");
        assert_eq!(template.spec.default_revision_name, "r2");
    }

    #[fluvio_future::test]
    async fn test_second_revision_keeps_default() {
        let client = MemoryClient::new_shared();
        let controller = test_controller(&client);

        client
            .create_template(test_template("t1", "r1"))
            .await
            .expect("template");
        client
            .create_revision(test_revision("r1", "t1"))
            .await
            .expect("r1");
        let second = client
            .create_revision(test_revision("r2", "t1"))
            .await
            .expect("r2");
        client.sync_cache().await;

        controller
            .on_changed(&second.store_key(), Some(second))
            .await
            .expect("reconcile");

        let template = TemplateClient::get(client.as_ref(), "default", "t1")
            .await
            .expect("template");
        assert_eq!(template.spec.default_revision_name, "r1");
        assert_eq!(client.template_update_count(), 0);
    }

    #[fluvio_future::test]
    async fn test_missing_parent_fails_change() {
        let client = MemoryClient::new_shared();
        let controller = test_controller(&client);

        let revision = client
            .create_revision(test_revision("r1", "absent"))
            .await
            .expect("revision");

        let err = controller
            .on_changed(&revision.store_key(), Some(revision.clone()))
            .await
            .expect_err("missing parent");
        assert!(err.is_not_found());

        // the revision itself must be untouched
        let stored = RevisionClient::get(client.as_ref(), "default", "r1")
            .await
            .expect("revision");
        assert!(stored.status.updated_at.is_none());
        assert_eq!(stored.metadata.resource_version, revision.metadata.resource_version);
    }

    #[fluvio_future::test]
    async fn test_deleting_revision_is_ignored_by_on_changed() {
        let client = MemoryClient::new_shared();
        let controller = test_controller(&client);

        client
            .create_template(test_template("t1", ""))
            .await
            .expect("template");
        let mut revision = test_revision("r1", "t1");
        revision.metadata.deletion_timestamp = Some(Utc::now());

        let result = controller
            .on_changed("default/r1", Some(revision))
            .await
            .expect("noop");
        assert!(result.is_none());
        assert_eq!(client.template_update_count(), 0);
    }

    #[fluvio_future::test]
    async fn test_empty_key_is_noop() {
        let client = MemoryClient::new_shared();
        let controller = test_controller(&client);

        assert!(
            controller
                .on_changed("", Some(test_revision("r1", "t1")))
                .await
                .expect("noop")
                .is_none()
        );
        let unchanged = controller
            .on_removed("", Some(test_revision("r1", "t1")))
            .await
            .expect("noop")
            .expect("input returned");
        assert_eq!(unchanged.metadata.name, "r1");
        assert_eq!(client.template_update_count(), 0);
    }

    #[fluvio_future::test]
    async fn test_removal_with_missing_parent_is_benign() {
        let client = MemoryClient::new_shared();
        let controller = test_controller(&client);

        let revision = client
            .create_revision(test_revision("r1", "absent"))
            .await
            .expect("revision");
        client.sync_cache().await;

        let result = controller
            .on_removed(&revision.store_key(), Some(revision))
            .await
            .expect("benign");
        assert!(result.is_none());
        // nothing to reconcile, the revision is left for garbage collection
        assert!(RevisionClient::get(client.as_ref(), "default", "r1").await.is_ok());
    }
}
