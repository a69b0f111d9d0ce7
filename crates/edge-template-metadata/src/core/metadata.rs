//!
//! # Object metadata
//!
//! Minimal K8 object envelope shared by all custom resources: typed spec +
//! status behind the `Spec` trait, with `ObjectMeta` carrying identity,
//! labels and owner references.
//!
use std::collections::HashMap;
use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use super::Crd;

pub trait Status:
    Default + Debug + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync
{
}

pub trait Spec:
    Default + Debug + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync
{
    type Status: Status;

    fn metadata() -> &'static Crd;

    fn api_version() -> String {
        let metadata = Self::metadata();
        if metadata.group == "core" {
            return metadata.version.to_owned();
        }
        format!("{}/{}", metadata.group, metadata.version)
    }

    fn kind() -> String {
        Self::metadata().names.kind.to_owned()
    }

    fn label() -> &'static str {
        Self::metadata().names.kind
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: String,
    pub uid: String,
    pub resource_version: String,
    pub creation_timestamp: Option<DateTime<Utc>>,
    pub deletion_timestamp: Option<DateTime<Utc>>,
    pub labels: HashMap<String, String>,
    pub annotations: HashMap<String, String>,
    pub finalizers: Vec<String>,
    pub owner_references: Vec<OwnerReference>,
}

impl ObjectMeta {
    pub fn new<S>(name: S, namespace: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    pub fn set_labels<T: Into<String>>(mut self, labels: Vec<(T, T)>) -> Self {
        let mut map = HashMap::new();
        for (key, value) in labels {
            map.insert(key.into(), value.into());
        }
        self.labels = map;
        self
    }
}

/// back-link to the controlling resource, UID included so that a child can
/// detect a parent that was deleted and recreated under the same name
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct OwnerReference {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    pub uid: String,
    pub controller: Option<bool>,
    pub block_owner_deletion: Option<bool>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelSelector {
    pub match_labels: HashMap<String, String>,
}

impl LabelSelector {
    pub fn entry<T: Into<String>>(key: T, value: T) -> Self {
        let mut match_labels = HashMap::new();
        match_labels.insert(key.into(), value.into());
        Self { match_labels }
    }

    /// true if every selector entry is present in the label set
    pub fn matches(&self, labels: &HashMap<String, String>) -> bool {
        self.match_labels
            .iter()
            .all(|(key, value)| labels.get(key) == Some(value))
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
#[serde(bound = "S: Spec")]
pub struct K8Obj<S>
where
    S: Spec,
{
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: S,
    pub status: S::Status,
}

impl<S> Default for K8Obj<S>
where
    S: Spec,
{
    fn default() -> Self {
        Self {
            api_version: S::api_version(),
            kind: S::kind(),
            metadata: ObjectMeta::default(),
            spec: S::default(),
            status: S::Status::default(),
        }
    }
}

impl<S> K8Obj<S>
where
    S: Spec,
{
    pub fn new<T>(name: T, namespace: T, spec: S) -> Self
    where
        T: Into<String>,
    {
        Self {
            metadata: ObjectMeta::new(name, namespace),
            spec,
            ..Default::default()
        }
    }

    /// store key used by the dispatcher, `namespace/name`
    pub fn store_key(&self) -> String {
        format!("{}/{}", self.metadata.namespace, self.metadata.name)
    }

    pub fn is_being_deleted(&self) -> bool {
        self.metadata.deletion_timestamp.is_some()
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::LabelSelector;

    #[test]
    fn test_selector_match() {
        let selector = LabelSelector::entry("app", "edge");

        let mut labels = HashMap::new();
        assert!(!selector.matches(&labels));

        labels.insert("app".to_owned(), "edge".to_owned());
        labels.insert("tier".to_owned(), "device".to_owned());
        assert!(selector.matches(&labels));

        labels.insert("app".to_owned(), "other".to_owned());
        assert!(!selector.matches(&labels));
    }
}
