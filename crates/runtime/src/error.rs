//! Runtime errors.

use combat_core::{CharacterError, CharacterId, CombatError, ErrorSeverity};

use crate::ai::TreeError;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// A controller was attached to a character that does not exist.
    #[error("no character {0} to control")]
    UnknownCharacter(CharacterId),

    #[error(transparent)]
    Character(#[from] CharacterError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    /// A leaf needed sensors its controller does not have.
    #[error("{node} on {id} has no sensors attached")]
    SensorUnavailable { id: CharacterId, node: &'static str },

    #[error("invalid runtime config: {0}")]
    InvalidConfig(String),

    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CombatError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::UnknownCharacter(_) => ErrorSeverity::Fatal,
            RuntimeError::Character(e) => e.severity(),
            RuntimeError::Tree(e) => e.severity(),
            RuntimeError::SensorUnavailable { .. } => ErrorSeverity::Recoverable,
            RuntimeError::InvalidConfig(_) => ErrorSeverity::Validation,
            RuntimeError::Serialization(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::UnknownCharacter(_) => "RUNTIME_UNKNOWN_CHARACTER",
            RuntimeError::Character(e) => e.error_code(),
            RuntimeError::Tree(e) => e.error_code(),
            RuntimeError::SensorUnavailable { .. } => "RUNTIME_SENSOR_UNAVAILABLE",
            RuntimeError::InvalidConfig(_) => "RUNTIME_INVALID_CONFIG",
            RuntimeError::Serialization(_) => "RUNTIME_SERIALIZATION",
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
