use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A normalizer was handed something other than text
    #[error("Input must be a string")]
    InvalidInputType,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("{message} (status {status})")]
    Status { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("cliente not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
