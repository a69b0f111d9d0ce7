use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceTemplateRevisionSpec {
    pub display_name: String,
    /// name of the owning template, same namespace
    pub device_template_name: String,
    #[serde(rename = "deviceTemplateAPIVersion")]
    pub device_template_api_version: String,
    /// opaque device payload, validated against the device CRD schema at
    /// admission time, never interpreted here
    pub template_spec: serde_json::Value,
    pub enabled: Option<bool>,
}

impl fmt::Display for DeviceTemplateRevisionSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DeviceTemplateRevision of {}", self.device_template_name)
    }
}
