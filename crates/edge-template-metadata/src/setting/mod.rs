mod spec;

pub use spec::*;

use serde::{Deserialize, Serialize};

use crate::core::{Condition, Crd, CrdNames, GROUP, K8Obj, Spec, Status, V1ALPHA1};

const SETTING_API: Crd = Crd {
    group: GROUP,
    version: V1ALPHA1,
    names: CrdNames {
        kind: "Setting",
        plural: "settings",
        singular: "setting",
    },
};

impl Spec for SettingSpec {
    type Status = SettingStatus;
    fn metadata() -> &'static Crd {
        &SETTING_API
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingStatus {
    pub conditions: Vec<Condition>,
}

impl Status for SettingStatus {}

pub type Setting = K8Obj<SettingSpec>;
