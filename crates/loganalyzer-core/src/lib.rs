pub mod analysis;
pub mod config;
pub mod error;
pub mod locate;
pub mod log;
pub mod report;

pub use error::{Error, Result};
