use std::sync::Arc;

use async_channel::Sender;

use edge_template_metadata::revision::DeviceTemplateRevisionSpec;
use edge_template_metadata::template::DeviceTemplateSpec;

use crate::config::ControllerConfig;
use crate::dispatcher::RevisionEvent;
use crate::services::api::{
    AcceptAllValidator, CatalogApiStore, ObjectStore, RevisionApiStore, TemplateApiStore,
};
use crate::services::auth::RootAuthenticator;
use crate::stores::{CatalogClient, RevisionClient, SharedClient, TemplateClient};

pub type SharedContext<C> = Arc<Context<C>>;

/// Global context shared by services and controllers: the backing client,
/// the process configuration, the channel feeding the revision dispatcher
/// and the API write paths.
pub struct Context<C> {
    client: SharedClient<C>,
    config: ControllerConfig,
    revision_events: Sender<RevisionEvent>,
    templates_api: TemplateApiStore<SharedClient<C>, RootAuthenticator>,
    revisions_api: RevisionApiStore<SharedClient<C>, C, AcceptAllValidator, RootAuthenticator>,
    catalogs_api: CatalogApiStore<C>,
}

impl<C> Context<C>
where
    C: TemplateClient
        + RevisionClient
        + CatalogClient
        + ObjectStore<DeviceTemplateSpec>
        + ObjectStore<DeviceTemplateRevisionSpec>,
{
    /// local mode wiring: every caller is root, no schema validation
    pub fn shared(
        client: SharedClient<C>,
        config: ControllerConfig,
        revision_events: Sender<RevisionEvent>,
    ) -> Arc<Self> {
        let auth = Arc::new(RootAuthenticator);
        Arc::new(Self {
            templates_api: TemplateApiStore::new(client.clone(), auth.clone()),
            revisions_api: RevisionApiStore::new(
                client.clone(),
                client.clone(),
                Arc::new(AcceptAllValidator),
                auth,
            ),
            catalogs_api: CatalogApiStore::new(client.clone()),
            client,
            config,
            revision_events,
        })
    }

    pub fn client(&self) -> &SharedClient<C> {
        &self.client
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn revision_events(&self) -> &Sender<RevisionEvent> {
        &self.revision_events
    }

    pub fn templates_api(&self) -> &TemplateApiStore<SharedClient<C>, RootAuthenticator> {
        &self.templates_api
    }

    pub fn revisions_api(
        &self,
    ) -> &RevisionApiStore<SharedClient<C>, C, AcceptAllValidator, RootAuthenticator> {
        &self.revisions_api
    }

    pub fn catalogs_api(&self) -> &CatalogApiStore<C> {
        &self.catalogs_api
    }
}
