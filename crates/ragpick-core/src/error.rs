use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Query is empty")]
    EmptyQuery,

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Fallback source unavailable: {0}")]
    FallbackUnavailable(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
