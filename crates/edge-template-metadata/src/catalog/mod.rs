mod spec;
mod status;

pub use spec::*;
pub use status::*;

use crate::core::{Crd, CrdNames, GROUP, K8Obj, Spec, Status, V1ALPHA1};

const CATALOG_API: Crd = Crd {
    group: GROUP,
    version: V1ALPHA1,
    names: CrdNames {
        kind: "Catalog",
        plural: "catalogs",
        singular: "catalog",
    },
};

impl Spec for CatalogSpec {
    type Status = CatalogStatus;
    fn metadata() -> &'static Crd {
        &CATALOG_API
    }
}

impl Status for CatalogStatus {}

pub type Catalog = K8Obj<CatalogSpec>;
