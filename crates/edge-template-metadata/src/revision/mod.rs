mod spec;
mod status;

pub use spec::*;
pub use status::*;

use crate::core::{Crd, CrdNames, GROUP, K8Obj, Spec, Status, V1ALPHA1};

const DEVICE_TEMPLATE_REVISION_API: Crd = Crd {
    group: GROUP,
    version: V1ALPHA1,
    names: CrdNames {
        kind: "DeviceTemplateRevision",
        plural: "devicetemplaterevisions",
        singular: "devicetemplaterevision",
    },
};

impl Spec for DeviceTemplateRevisionSpec {
    type Status = DeviceTemplateRevisionStatus;
    fn metadata() -> &'static Crd {
        &DEVICE_TEMPLATE_REVISION_API
    }
}

impl Status for DeviceTemplateRevisionStatus {}

pub type DeviceTemplateRevision = K8Obj<DeviceTemplateRevisionSpec>;
