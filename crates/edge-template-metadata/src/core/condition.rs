use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

/// observed state entry for resources that report conditions
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: ConditionStatus,
    pub last_update_time: Option<DateTime<Utc>>,
    pub reason: String,
    pub message: String,
}

impl Condition {
    pub fn unknown<T: Into<String>>(condition_type: T) -> Self {
        Self {
            condition_type: condition_type.into(),
            status: ConditionStatus::Unknown,
            last_update_time: Some(Utc::now()),
            ..Default::default()
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.status == ConditionStatus::Unknown
    }
}

/// replace or append the condition matching `condition.condition_type`
pub fn set_condition(conditions: &mut Vec<Condition>, condition: Condition) {
    if let Some(existing) = conditions
        .iter_mut()
        .find(|entry| entry.condition_type == condition.condition_type)
    {
        *existing = condition;
    } else {
        conditions.push(condition);
    }
}
