mod crd;
mod metadata;
mod condition;

pub use crd::*;
pub use metadata::*;
pub use condition::*;
