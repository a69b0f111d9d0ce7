mod spec;
mod status;

pub use spec::*;
pub use status::*;

use crate::core::{Crd, CrdNames, GROUP, K8Obj, Spec, Status, V1ALPHA1};

const DEVICE_TEMPLATE_API: Crd = Crd {
    group: GROUP,
    version: V1ALPHA1,
    names: CrdNames {
        kind: "DeviceTemplate",
        plural: "devicetemplates",
        singular: "devicetemplate",
    },
};

impl Spec for DeviceTemplateSpec {
    type Status = DeviceTemplateStatus;
    fn metadata() -> &'static Crd {
        &DEVICE_TEMPLATE_API
    }
}

impl Status for DeviceTemplateStatus {}

pub type DeviceTemplate = K8Obj<DeviceTemplateSpec>;
