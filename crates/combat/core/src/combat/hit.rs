//! Incoming hit resolution.

use crate::character::Character;

/// How a hit was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitOutcome {
    /// Shields and life took the damage.
    Landed,
    /// The target was invulnerable.
    Blocked,
    /// Dead target or replica; nothing happened.
    Ignored,
}

/// Result of one hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitResult {
    pub outcome: HitOutcome,
    /// Damage soaked by shields.
    pub absorbed: u32,
    /// Damage removed from life.
    pub dealt: u32,
    /// The hit brought life to zero.
    pub killed: bool,
}

impl HitResult {
    const fn neutral(outcome: HitOutcome) -> Self {
        Self {
            outcome,
            absorbed: 0,
            dealt: 0,
            killed: false,
        }
    }
}

/// Applies `damage` to `target`: shields first, overflow to life.
pub fn resolve_hit(target: &mut Character, damage: u32) -> HitResult {
    if !target.is_alive() || !target.authority().is_authoritative() {
        return HitResult::neutral(HitOutcome::Ignored);
    }
    if target.effects.is_invulnerable() {
        tracing::debug!(target: "combat::hit", id = %target.id, damage, "blocked");
        return HitResult::neutral(HitOutcome::Blocked);
    }

    let overflow = target.effects.absorb(damage);
    let dealt = target.take_damage(overflow);
    let result = HitResult {
        outcome: HitOutcome::Landed,
        absorbed: damage - overflow,
        dealt,
        killed: !target.is_alive(),
    };
    tracing::debug!(
        target: "combat::hit",
        id = %target.id,
        absorbed = result.absorbed,
        dealt,
        killed = result.killed,
        "hit resolved"
    );
    result
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::authority::Authority;
    use crate::character::{CharacterId, CharacterSpec, Team};
    use crate::status::{EffectPayload, StatusEffectKind, StatusEffectTable};

    fn target(authority: Authority) -> Character {
        Character::new(
            CharacterId(1),
            &CharacterSpec::new(Team(1), 100),
            Arc::new(StatusEffectTable::default()),
            authority,
        )
    }

    #[test]
    fn shield_absorbs_before_life() {
        let mut victim = target(Authority::Authoritative);
        victim
            .effects
            .apply(StatusEffectKind::Barrier, None, EffectPayload::with_shield(10));

        let first = resolve_hit(&mut victim, 4);
        assert_eq!((first.absorbed, first.dealt), (4, 0));

        let second = resolve_hit(&mut victim, 8);
        assert_eq!((second.absorbed, second.dealt), (6, 2));
        assert!(!victim.effects.has_state(StatusEffectKind::Barrier));
        assert_eq!(victim.life.current, 98);
    }

    #[test]
    fn invulnerable_blocks_everything() {
        let mut victim = target(Authority::Authoritative);
        victim
            .effects
            .apply(StatusEffectKind::Invulnerable, None, EffectPayload::default());

        let result = resolve_hit(&mut victim, 50);
        assert_eq!(result.outcome, HitOutcome::Blocked);
        assert_eq!(victim.life.current, 100);
    }

    #[test]
    fn lethal_hit_reports_kill_and_later_hits_are_ignored() {
        let mut victim = target(Authority::Authoritative);
        assert!(resolve_hit(&mut victim, 150).killed);
        assert_eq!(resolve_hit(&mut victim, 1).outcome, HitOutcome::Ignored);
    }

    #[test]
    fn replica_targets_are_untouched() {
        let mut victim = target(Authority::Replica);
        assert_eq!(resolve_hit(&mut victim, 10).outcome, HitOutcome::Ignored);
        assert_eq!(victim.life.current, 100);
    }
}
