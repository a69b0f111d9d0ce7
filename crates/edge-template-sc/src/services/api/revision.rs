use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use edge_template_metadata::labels;
use edge_template_metadata::revision::{DeviceTemplateRevision, DeviceTemplateRevisionSpec};
use edge_template_metadata::template::DeviceTemplate;

use crate::error::ApiError;
use crate::services::auth::Authenticator;
use crate::stores::{SharedClient, TemplateClient};

use super::ObjectStore;

/// Dry-run check of the opaque template payload against the device model
/// the parent template targets. Rejection reasons surface verbatim as
/// [`ApiError::SpecRejected`].
#[async_trait]
pub trait SpecValidator: Send + Sync {
    async fn dry_run(
        &self,
        template: &DeviceTemplate,
        payload: &serde_json::Value,
    ) -> Result<(), String>;
}

/// no schema available, admit everything
#[derive(Debug, Default)]
pub struct AcceptAllValidator;

#[async_trait]
impl SpecValidator for AcceptAllValidator {
    async fn dry_run(
        &self,
        _template: &DeviceTemplate,
        _payload: &serde_json::Value,
    ) -> Result<(), String> {
        Ok(())
    }
}

/// Write path for revisions: the payload must dry-run against the parent
/// template's device model before anything is persisted, and the labels
/// the controller selects on are mirrored from the parent.
pub struct RevisionApiStore<S, T, V, A> {
    inner: S,
    templates: SharedClient<T>,
    validator: Arc<V>,
    auth: Arc<A>,
}

impl<S, T, V, A> RevisionApiStore<S, T, V, A>
where
    S: ObjectStore<DeviceTemplateRevisionSpec>,
    T: TemplateClient,
    V: SpecValidator,
    A: Authenticator,
{
    pub fn new(inner: S, templates: SharedClient<T>, validator: Arc<V>, auth: Arc<A>) -> Self {
        Self {
            inner,
            templates,
            validator,
            auth,
        }
    }

    #[instrument(skip(self, revision, token), fields(name = %revision.metadata.name))]
    pub async fn create(
        &self,
        mut revision: DeviceTemplateRevision,
        token: &str,
    ) -> Result<DeviceTemplateRevision, ApiError> {
        Self::validate(&revision)?;
        let template = self.parent(&revision).await?;
        self.dry_run(&template, &revision).await?;

        let principal = self.auth.authenticate(token).await?;
        debug!(owner = principal.name, "creating revision");

        Self::stamp_labels(&mut revision, &template);
        revision
            .metadata
            .labels
            .insert(labels::REVISION_OWNER.to_owned(), principal.name);

        Ok(self.inner.create(revision).await?)
    }

    pub async fn update(
        &self,
        mut revision: DeviceTemplateRevision,
    ) -> Result<DeviceTemplateRevision, ApiError> {
        Self::validate(&revision)?;
        let template = self.parent(&revision).await?;
        self.dry_run(&template, &revision).await?;

        Self::stamp_labels(&mut revision, &template);
        Ok(self.inner.update(revision).await?)
    }

    fn validate(revision: &DeviceTemplateRevision) -> Result<(), ApiError> {
        let spec = &revision.spec;
        if spec.display_name.is_empty() {
            return Err(ApiError::Validation("displayName is required".to_owned()));
        }
        if spec.device_template_name.is_empty() {
            return Err(ApiError::Validation(
                "a revision must reference its device template".to_owned(),
            ));
        }
        if spec.device_template_api_version.is_empty() {
            return Err(ApiError::Validation(
                "deviceTemplateAPIVersion is required".to_owned(),
            ));
        }
        if spec.template_spec.is_null() {
            return Err(ApiError::Validation(
                "templateSpec must carry a payload".to_owned(),
            ));
        }
        Ok(())
    }

    async fn parent(
        &self,
        revision: &DeviceTemplateRevision,
    ) -> Result<DeviceTemplate, ApiError> {
        self.templates
            .get(
                &revision.metadata.namespace,
                &revision.spec.device_template_name,
            )
            .await
            .map_err(|err| {
                if err.is_not_found() {
                    ApiError::Validation(format!(
                        "referenced device template '{}' does not exist",
                        revision.spec.device_template_name
                    ))
                } else {
                    err.into()
                }
            })
    }

    async fn dry_run(
        &self,
        template: &DeviceTemplate,
        revision: &DeviceTemplateRevision,
    ) -> Result<(), ApiError> {
        self.validator
            .dry_run(template, &revision.spec.template_spec)
            .await
            .map_err(ApiError::SpecRejected)
    }

    /// parent reference plus the parent's device coordinates, the
    /// controller and UI both select on these
    fn stamp_labels(revision: &mut DeviceTemplateRevision, template: &DeviceTemplate) {
        let entries = [
            (labels::REVISION_REFERENCE, template.metadata.name.clone()),
            (labels::REVISION_DEVICE_TYPE, template.spec.device_kind.clone()),
            (
                labels::REVISION_DEVICE_VERSION,
                template.spec.device_version.clone(),
            ),
            (
                labels::REVISION_DEVICE_GROUP,
                template.spec.device_group.clone(),
            ),
            (
                labels::REVISION_DEVICE_RESOURCE,
                template.spec.device_resource.clone(),
            ),
        ];
        for (key, value) in entries {
            revision.metadata.labels.insert(key.to_owned(), value);
        }
    }
}
