use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type AgendaResult<T> = Result<T, AgendaError>;

/// A stored start time that does not follow the `HH:MM:SS` layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed stored time {raw:?}: expected HH:MM:SS")]
pub struct TimeParseError {
    pub raw: String,
}
