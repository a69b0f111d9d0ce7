use serde::{Deserialize, Serialize};

/// cluster wide key/value setting, no controller logic attached
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingSpec {
    pub value: String,
    pub default_value: String,
}
