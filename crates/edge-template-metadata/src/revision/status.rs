use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceTemplateRevisionStatus {
    /// refreshed on every reconcile pass
    pub updated_at: Option<DateTime<Utc>>,
}
