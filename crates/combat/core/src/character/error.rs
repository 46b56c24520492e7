//! Character roster errors.

use crate::error::{CombatError, ErrorSeverity};

use super::CharacterId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CharacterError {
    /// The fixed roster has no free slot.
    #[error("character roster is full (max: {max})")]
    RosterFull { max: usize },

    /// The id never existed or has been despawned.
    #[error("unknown character {0}")]
    Unknown(CharacterId),

    /// Spawn or despawn requested on a replica table.
    #[error("cannot change the roster of a replica table")]
    NotAuthoritative,
}

impl CombatError for CharacterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CharacterError::RosterFull { .. } => ErrorSeverity::Validation,
            CharacterError::Unknown(_) => ErrorSeverity::Validation,
            CharacterError::NotAuthoritative => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CharacterError::RosterFull { .. } => "CHARACTER_ROSTER_FULL",
            CharacterError::Unknown(_) => "CHARACTER_UNKNOWN",
            CharacterError::NotAuthoritative => "CHARACTER_NOT_AUTHORITATIVE",
        }
    }
}
