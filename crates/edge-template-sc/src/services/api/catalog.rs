use tracing::{debug, instrument};

use edge_template_metadata::catalog::Catalog;

use crate::error::ApiError;
use crate::stores::{CatalogClient, SharedClient};

/// Write path for catalogs. Creating through the API doubles as a refresh
/// trigger: the stored catalogs get their `Refreshed` condition reset to
/// `Unknown`, which the refresh worker picks up.
pub struct CatalogApiStore<C> {
    catalogs: SharedClient<C>,
}

impl<C> CatalogApiStore<C>
where
    C: CatalogClient,
{
    pub fn new(catalogs: SharedClient<C>) -> Self {
        Self { catalogs }
    }

    /// mark one catalog as pending refresh
    #[instrument(skip(self))]
    pub async fn refresh(&self, namespace: &str, name: &str) -> Result<Catalog, ApiError> {
        let mut catalog = self.catalogs.get(namespace, name).await?;
        catalog.status.set_refreshed_unknown();
        debug!(name, "catalog marked for refresh");
        Ok(self.catalogs.update(catalog).await?)
    }

    /// mark every catalog in the namespace as pending refresh
    #[instrument(skip(self))]
    pub async fn refresh_all(&self, namespace: &str) -> Result<Vec<Catalog>, ApiError> {
        let mut refreshed = Vec::new();
        for mut catalog in self.catalogs.list(namespace).await? {
            catalog.status.set_refreshed_unknown();
            refreshed.push(self.catalogs.update(catalog).await?);
        }
        debug!(count = refreshed.len(), "catalogs marked for refresh");
        Ok(refreshed)
    }
}
