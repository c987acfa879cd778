use super::{ConfigError, EventError, MatchError, TableError};

/// Top-level error for a pipeline run.
/// Aggregates subsystem errors via `From` conversions. Every variant is fatal:
/// a run that produces one writes no output.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("table error: {0}")]
    TableError(#[from] TableError),

    #[error("matching error: {0}")]
    MatchError(#[from] MatchError),

    #[error("event error: {0}")]
    EventError(#[from] EventError),

    #[error("configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type RosterResult<T> = Result<T, RosterError>;
