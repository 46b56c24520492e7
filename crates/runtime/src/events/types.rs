//! Payloads published on the non-status topics.

use behavior_tree::Status;
use combat_core::{CharacterId, HitResult, StatusEffectKind};
use serde::{Deserialize, Serialize};

use crate::ai::CombatAction;

/// Combat resolution events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// An attack was resolved against `target`.
    Hit {
        attacker: CharacterId,
        target: CharacterId,
        result: HitResult,
    },
    /// A dodge charge was spent.
    Dodged { id: CharacterId, charges_left: u8 },
    /// A marker was consumed into a burst.
    Consumed {
        caster: Option<CharacterId>,
        target: CharacterId,
        marker: StatusEffectKind,
        stacks: u8,
    },
    /// Life reached zero.
    Died { id: CharacterId },
}

/// One tree evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionEvent {
    pub tick: u64,
    pub id: CharacterId,
    pub status: Status,
    pub action: Option<CombatAction>,
}
