//! State transitions reported to the replication layer.

use crate::character::CharacterId;

use super::kind::StatusEffectKind;

/// Why an instance left the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RemovalReason {
    /// Duration ran out.
    Expired,
    /// Shield pool reached zero.
    ShieldDepleted,
    /// Explicit removal (dispel or consumption).
    Removed,
    /// Replaced by its max-stack transform.
    Transformed,
    /// Registry wiped (death or despawn).
    Cleared,
}

/// One transition of a character's status effects.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEvent {
    Applied {
        owner: CharacterId,
        kind: StatusEffectKind,
        source: Option<CharacterId>,
    },
    StackChanged {
        owner: CharacterId,
        kind: StatusEffectKind,
        stacks: u8,
    },
    Refreshed {
        owner: CharacterId,
        kind: StatusEffectKind,
        remaining: f32,
    },
    Pulsed {
        owner: CharacterId,
        kind: StatusEffectKind,
        pulses: u32,
        damage: u32,
    },
    ShieldChanged {
        owner: CharacterId,
        kind: StatusEffectKind,
        shield: u32,
    },
    Removed {
        owner: CharacterId,
        kind: StatusEffectKind,
        stacks: u8,
        reason: RemovalReason,
    },
}

impl StatusEvent {
    pub fn owner(&self) -> CharacterId {
        match *self {
            StatusEvent::Applied { owner, .. }
            | StatusEvent::StackChanged { owner, .. }
            | StatusEvent::Refreshed { owner, .. }
            | StatusEvent::Pulsed { owner, .. }
            | StatusEvent::ShieldChanged { owner, .. }
            | StatusEvent::Removed { owner, .. } => owner,
        }
    }

    pub fn kind(&self) -> StatusEffectKind {
        match *self {
            StatusEvent::Applied { kind, .. }
            | StatusEvent::StackChanged { kind, .. }
            | StatusEvent::Refreshed { kind, .. }
            | StatusEvent::Pulsed { kind, .. }
            | StatusEvent::ShieldChanged { kind, .. }
            | StatusEvent::Removed { kind, .. } => kind,
        }
    }
}
