pub mod core;
pub mod labels;

pub mod template;
pub mod revision;
pub mod catalog;
pub mod setting;
