mod controller;

pub use controller::RevisionController;
