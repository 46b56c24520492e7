//! Status effect invariant violations.
//!
//! None of these are returned to callers. Registry operations clamp to a safe
//! value and log the error through [`crate::error::report`].

use crate::character::CharacterId;
use crate::error::{CombatError, ErrorSeverity};

use super::kind::StatusEffectKind;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EffectError {
    /// Every slot of the registry is taken.
    #[error("status registry of {owner:?} is full (max: {max}), dropped {kind:?}")]
    CapacityExceeded {
        owner: CharacterId,
        kind: StatusEffectKind,
        max: usize,
    },

    /// A shield hit targeted a kind without a shield pool.
    #[error("{kind:?} on {owner:?} is not a shielded kind")]
    NotShielded {
        owner: CharacterId,
        kind: StatusEffectKind,
    },

    /// More stacks were consumed than the instance held.
    #[error("consumed {requested} stacks of {kind:?} on {owner:?} but only {held} were held")]
    StackUnderflow {
        owner: CharacterId,
        kind: StatusEffectKind,
        requested: u8,
        held: u8,
    },

    /// Tick called with a negative or non-finite delta.
    #[error("invalid tick delta {delta} for {owner:?}")]
    InvalidDelta { owner: CharacterId, delta: f32 },

    /// Snapshot pushed into an authoritative registry.
    #[error("snapshot rejected: registry of {owner:?} is authoritative")]
    SnapshotOnAuthority { owner: CharacterId },
}

impl CombatError for EffectError {
    fn severity(&self) -> ErrorSeverity {
        use EffectError::*;
        match self {
            CapacityExceeded { .. } => ErrorSeverity::Recoverable,
            NotShielded { .. }
            | StackUnderflow { .. }
            | InvalidDelta { .. }
            | SnapshotOnAuthority { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use EffectError::*;
        match self {
            CapacityExceeded { .. } => "EFFECT_CAPACITY_EXCEEDED",
            NotShielded { .. } => "EFFECT_NOT_SHIELDED",
            StackUnderflow { .. } => "EFFECT_STACK_UNDERFLOW",
            InvalidDelta { .. } => "EFFECT_INVALID_DELTA",
            SnapshotOnAuthority { .. } => "EFFECT_SNAPSHOT_ON_AUTHORITY",
        }
    }
}
