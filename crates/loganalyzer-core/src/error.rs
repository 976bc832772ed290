use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read log source: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode log source: {0}")]
    Decode(String),

    #[error("Failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Failed to serialize report: {0}")]
    Serialize(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

pub type Result<T> = std::result::Result<T, Error>;
