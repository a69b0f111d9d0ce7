use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogSpec {
    pub display_name: String,
    pub url: String,
    pub branch: String,
}
