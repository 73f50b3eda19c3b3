use thiserror::Error;

use crate::domain::RecordId;

/// Error type shared by the record stores, configuration and CLI layers.
///
/// Aggregation code never produces one of these: bad dates and amounts are
/// absorbed where they are read.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: RecordId },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type FleetResult<T> = Result<T, FleetError>;

impl FleetError {
    pub fn invalid(message: impl Into<String>) -> Self {
        FleetError::InvalidInput(message.into())
    }
}
