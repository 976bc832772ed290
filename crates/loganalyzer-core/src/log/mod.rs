mod reader;
mod types;

pub use reader::{DEFAULT_METHODS, LogParser};
pub use types::*;
