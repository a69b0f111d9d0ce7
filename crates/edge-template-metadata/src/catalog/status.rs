use serde::{Deserialize, Serialize};

use crate::core::{Condition, set_condition};

pub const CATALOG_CONDITION_REFRESHED: &str = "Refreshed";

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogStatus {
    pub conditions: Vec<Condition>,
}

impl CatalogStatus {
    /// mark the catalog as pending refresh, the refresh worker flips the
    /// condition to True/False once the index has been fetched
    pub fn set_refreshed_unknown(&mut self) {
        set_condition(
            &mut self.conditions,
            Condition::unknown(CATALOG_CONDITION_REFRESHED),
        );
    }

    pub fn refreshed(&self) -> Option<&Condition> {
        self.conditions
            .iter()
            .find(|condition| condition.condition_type == CATALOG_CONDITION_REFRESHED)
    }
}
