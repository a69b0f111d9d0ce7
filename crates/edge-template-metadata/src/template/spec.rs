use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceTemplateSpec {
    pub device_kind: String,
    pub device_version: String,
    pub device_group: String,
    pub device_resource: String,
    pub display_name: String,
    pub description: String,
    /// derived field, owned by the revision controller; empty when the
    /// template has no revisions
    pub default_revision_name: String,
}

impl fmt::Display for DeviceTemplateSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "DeviceTemplate {}/{}",
            self.device_group, self.device_kind
        )
    }
}
