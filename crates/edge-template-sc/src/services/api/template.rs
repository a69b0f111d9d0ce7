use std::sync::Arc;

use tracing::{debug, instrument};

use edge_template_metadata::labels;
use edge_template_metadata::template::{DeviceTemplate, DeviceTemplateSpec};

use crate::error::ApiError;
use crate::services::auth::Authenticator;

use super::ObjectStore;

/// Write path for templates: validates the device reference, stamps the
/// device-type labels and records who created the template. The owner
/// label is stamped once on create and never rewritten.
pub struct TemplateApiStore<S, A> {
    inner: S,
    auth: Arc<A>,
}

impl<S, A> TemplateApiStore<S, A>
where
    S: ObjectStore<DeviceTemplateSpec>,
    A: Authenticator,
{
    pub fn new(inner: S, auth: Arc<A>) -> Self {
        Self { inner, auth }
    }

    #[instrument(skip(self, template, token), fields(name = %template.metadata.name))]
    pub async fn create(
        &self,
        mut template: DeviceTemplate,
        token: &str,
    ) -> Result<DeviceTemplate, ApiError> {
        Self::validate(&template)?;
        let principal = self.auth.authenticate(token).await?;
        debug!(owner = principal.name, "creating template");

        Self::stamp_labels(&mut template);
        template
            .metadata
            .labels
            .insert(labels::TEMPLATE_OWNER.to_owned(), principal.name);

        Ok(self.inner.create(template).await?)
    }

    pub async fn update(&self, mut template: DeviceTemplate) -> Result<DeviceTemplate, ApiError> {
        Self::validate(&template)?;
        Self::stamp_labels(&mut template);
        Ok(self.inner.update(template).await?)
    }

    fn validate(template: &DeviceTemplate) -> Result<(), ApiError> {
        let spec = &template.spec;
        if spec.device_kind.is_empty()
            || spec.device_version.is_empty()
            || spec.device_group.is_empty()
            || spec.device_resource.is_empty()
        {
            return Err(ApiError::Validation(
                "device kind, version, group and resource are required".to_owned(),
            ));
        }
        if spec.display_name.is_empty() {
            return Err(ApiError::Validation("displayName is required".to_owned()));
        }
        Ok(())
    }

    /// device-type labels mirror the spec so templates are selectable by
    /// the device model they target
    fn stamp_labels(template: &mut DeviceTemplate) {
        let labels = &mut template.metadata.labels;
        labels.insert(
            labels::TEMPLATE_DEVICE_TYPE.to_owned(),
            template.spec.device_kind.clone(),
        );
        labels.insert(
            labels::TEMPLATE_DEVICE_VERSION.to_owned(),
            template.spec.device_version.clone(),
        );
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use edge_template_metadata::labels;
    use edge_template_metadata::template::{DeviceTemplate, DeviceTemplateSpec};

    use crate::services::auth::StaticAuthenticator;
    use crate::stores::MemoryClient;

    use super::TemplateApiStore;

    fn test_template() -> DeviceTemplate {
        DeviceTemplate::new(
            "t1",
            "default",
            DeviceTemplateSpec {
                device_kind: "Sensor".to_owned(),
                device_version: "v1alpha1".to_owned(),
                device_group: "devices.edgetemplate.io".to_owned(),
                device_resource: "sensors".to_owned(),
                display_name: "sensor template".to_owned(),
                ..Default::default()
            },
        )
    }

    fn test_store() -> TemplateApiStore<Arc<MemoryClient>, StaticAuthenticator> {
        let auth = StaticAuthenticator::default().with_token("secret", "alice");
        TemplateApiStore::new(MemoryClient::new_shared(), Arc::new(auth))
    }

    #[fluvio_future::test]
    async fn test_create_stamps_labels() {
        let store = test_store();

        let created = store
            .create(test_template(), "secret")
            .await
            .expect("created");
        assert_eq!(
            created.metadata.labels[labels::TEMPLATE_DEVICE_TYPE],
            "Sensor"
        );
        assert_eq!(
            created.metadata.labels[labels::TEMPLATE_DEVICE_VERSION],
            "v1alpha1"
        );
        assert_eq!(created.metadata.labels[labels::TEMPLATE_OWNER], "alice");
    }

    #[fluvio_future::test]
    async fn test_update_keeps_owner() {
        let store = test_store();

        let mut created = store
            .create(test_template(), "secret")
            .await
            .expect("created");
        created.spec.device_kind = "Gateway".to_owned();

        let updated = store.update(created).await.expect("updated");
        assert_eq!(
            updated.metadata.labels[labels::TEMPLATE_DEVICE_TYPE],
            "Gateway"
        );
        // owner survives updates untouched
        assert_eq!(updated.metadata.labels[labels::TEMPLATE_OWNER], "alice");
    }

    #[fluvio_future::test]
    async fn test_missing_device_fields_rejected() {
        let store = test_store();

        let mut template = test_template();
        template.spec.device_resource.clear();
        let err = store
            .create(template, "secret")
            .await
            .expect_err("rejected");
        assert!(matches!(err, crate::error::ApiError::Validation(_)));
    }

    #[fluvio_future::test]
    async fn test_empty_display_name_rejected() {
        let store = test_store();

        let mut template = test_template();
        template.spec.display_name.clear();
        let err = store
            .create(template, "secret")
            .await
            .expect_err("rejected");
        assert!(matches!(err, crate::error::ApiError::Validation(_)));
    }

    #[fluvio_future::test]
    async fn test_bad_token_rejected() {
        let store = test_store();

        let err = store
            .create(test_template(), "wrong")
            .await
            .expect_err("unauthenticated");
        assert!(matches!(err, crate::error::ApiError::Auth(_)));
    }
}
