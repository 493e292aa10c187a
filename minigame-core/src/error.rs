//! Error types for mini-game operations.

use thiserror::Error;

use crate::drag::DragError;
use crate::store::StoreError;

/// Result type for mini-game operations.
pub type GameResult<T> = Result<T, GameError>;

/// Errors that can occur in mini-game operations.
#[derive(Debug, Error)]
pub enum GameError {
    /// Unknown zone identifier.
    #[error("Zone not found: {0}")]
    ZoneNotFound(String),

    /// A value could not be parsed into one of the model's tagged variants.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Invalid operation on a zone.
    #[error("Invalid operation on zone: {0}")]
    InvalidOperation(String),

    /// Configuration or snapshot serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Drag session rejected.
    #[error("Drag rejected: {0}")]
    Drag(#[from] DragError),

    /// Preference store failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
