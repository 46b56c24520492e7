//! Actions chosen by task leaves.

use combat_core::{CharacterId, StatusEffectKind};
use serde::{Deserialize, Serialize};

/// What a character decided to do this tick.
///
/// Tasks only record the choice; the simulation resolves it after every
/// tree has been evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum CombatAction {
    /// Leave the hostile zone.
    ExitZone,
    /// Spend a dodge charge for a short invulnerability window.
    Dodge,
    /// Continue a dodge started on an earlier tick.
    Dodging,
    /// Basic attack against `target`.
    Attack { target: CharacterId },
    /// Move toward a better position.
    Reposition,
    /// Deliberate no-op.
    Idle,
    /// Apply a status effect to oneself.
    ApplySelfState(StatusEffectKind),
}

impl CombatAction {
    pub fn label(&self) -> &'static str {
        match self {
            CombatAction::ExitZone => "exit_zone",
            CombatAction::Dodge => "dodge",
            CombatAction::Dodging => "dodging",
            CombatAction::Attack { .. } => "attack",
            CombatAction::Reposition => "reposition",
            CombatAction::Idle => "idle",
            CombatAction::ApplySelfState(_) => "apply_self_state",
        }
    }
}
