pub mod cli;
pub mod config;
pub mod controllers;
pub mod core;
pub mod dispatcher;
pub mod services;
pub mod stores;

mod error;
mod init;

pub use error::{ApiError, StoreError};
pub use init::start_main_loop;
