pub mod revision;

pub use revision::RevisionController;
