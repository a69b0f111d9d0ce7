//!
//! # CRD Definition
//!
//! Header definition for custom resources stored in the K8 key value store
//!
#[derive(Debug)]
pub struct Crd {
    pub group: &'static str,
    pub version: &'static str,
    pub names: CrdNames,
}

#[derive(Debug)]
pub struct CrdNames {
    pub kind: &'static str,
    pub plural: &'static str,
    pub singular: &'static str,
}

pub const GROUP: &str = "edgetemplate.io";
pub const V1ALPHA1: &str = "v1alpha1";
