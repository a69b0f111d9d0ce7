//!
//! # Label keys
//!
//! These exact strings are queried by selector, changing one breaks the
//! sibling-count query against existing clusters.
//!

pub const TEMPLATE_DEVICE_TYPE: &str = "edgetemplate.io/device-template-device-type";
pub const TEMPLATE_DEVICE_VERSION: &str = "edgetemplate.io/device-template-device-version";
pub const TEMPLATE_OWNER: &str = "edgetemplate.io/device-template-owner";

pub const REVISION_DEVICE_TYPE: &str = "edgetemplate.io/device-template-revision-device-type";
pub const REVISION_DEVICE_VERSION: &str = "edgetemplate.io/device-template-revision-device-version";
pub const REVISION_DEVICE_GROUP: &str = "edgetemplate.io/device-template-revision-device-group";
pub const REVISION_DEVICE_RESOURCE: &str = "edgetemplate.io/device-template-revision-device-resource";
pub const REVISION_OWNER: &str = "edgetemplate.io/device-template-revision-owner";

/// parent-reference label, value is the owning template's name
pub const REVISION_REFERENCE: &str = "edgetemplate.io/device-template-revision-reference";
