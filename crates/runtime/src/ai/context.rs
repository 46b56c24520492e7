//! Per-tick blackboard handed to decision nodes.
//!
//! [`AiContext`] is an owned projection of one character and its
//! surroundings, captured right before its tree is ticked. Checkers read it,
//! tasks record a [`CombatAction`] in it, and the simulation resolves that
//! action once every tree has been evaluated. Owning the data keeps trees
//! free of borrows into the world.

use combat_core::{
    Character, CharacterId, CharacterTable, KindFlags, StatusEffect, StatusEffectKind, Team,
    report,
};

use super::action::CombatAction;
use crate::error::RuntimeError;
use crate::sensors::{SharedSensors, TriggerPredicates};

pub struct AiContext {
    /// The character deciding.
    pub id: CharacterId,
    pub team: Team,
    /// Simulation tick this context was captured on.
    pub tick: u64,
    /// Life as a fraction of maximum, in `[0, 1]`.
    pub life_ratio: f32,
    pub dodge_charges: u8,
    /// The previous tick left a dodge running.
    pub dodging: bool,
    /// First targetable enemy by ascending id, if any.
    pub target: Option<CharacterId>,
    effects: Vec<StatusEffect>,
    /// Union of the flags of every live effect.
    flags: KindFlags,
    sensors: Option<SharedSensors>,
    action: Option<CombatAction>,
}

impl AiContext {
    /// A context with full life, no effects, no target and no sensors.
    pub fn new(id: CharacterId, team: Team) -> Self {
        Self {
            id,
            team,
            tick: 0,
            life_ratio: 1.0,
            dodge_charges: 0,
            dodging: false,
            target: None,
            effects: Vec::new(),
            flags: KindFlags::empty(),
            sensors: None,
            action: None,
        }
    }

    /// Captures `character` as seen from inside `roster`.
    pub fn capture(
        character: &Character,
        roster: &CharacterTable,
        tick: u64,
        sensors: Option<SharedSensors>,
    ) -> Self {
        let table = roster.effect_table();
        let effects: Vec<StatusEffect> = character.effects.iter().copied().collect();
        let flags = effects
            .iter()
            .fold(KindFlags::empty(), |acc, e| acc | table.get(e.kind).flags);

        Self {
            id: character.id,
            team: character.team,
            tick,
            life_ratio: character.life.ratio(),
            dodge_charges: character.dodge_charges,
            dodging: false,
            target: roster.targetable_enemies_of(character.team).map(|c| c.id).next(),
            effects,
            flags,
            sensors,
            action: None,
        }
    }

    pub fn with_sensors(mut self, sensors: SharedSensors) -> Self {
        self.sensors = Some(sensors);
        self
    }

    pub fn with_target(mut self, target: CharacterId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_dodge_charges(mut self, charges: u8) -> Self {
        self.dodge_charges = charges;
        self
    }

    pub fn with_dodging(mut self, dodging: bool) -> Self {
        self.dodging = dodging;
        self
    }

    pub fn with_life_ratio(mut self, ratio: f32) -> Self {
        self.life_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn with_tick(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }

    /// Records a live effect carrying `flags`.
    pub fn with_effect(mut self, effect: StatusEffect, flags: KindFlags) -> Self {
        self.effects.push(effect);
        self.flags |= flags;
        self
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub fn has_state(&self, kind: StatusEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn stacks(&self, kind: StatusEffectKind) -> u8 {
        self.effects
            .iter()
            .find(|e| e.kind == kind)
            .map_or(0, |e| e.stacks)
    }

    pub fn has_flag(&self, flags: KindFlags) -> bool {
        self.flags.intersects(flags)
    }

    pub fn is_incapacitated(&self) -> bool {
        self.has_flag(KindFlags::INCAPACITATING)
    }

    /// Sensors for `node`, or a warning and `None` when none are attached.
    pub fn sensors(&self, node: &'static str) -> Option<&dyn TriggerPredicates> {
        if self.sensors.is_none() {
            report(&RuntimeError::SensorUnavailable { id: self.id, node });
        }
        self.sensors.as_deref()
    }

    // ========================================================================
    // Action slot
    // ========================================================================

    /// Records the action for this tick.
    ///
    /// Only the first action of an evaluation is kept; a second one means two
    /// tasks succeeded in the same tick, which is logged and dropped.
    pub fn set_action(&mut self, action: CombatAction) {
        if let Some(existing) = self.action {
            tracing::error!(
                target: "runtime::ai",
                id = %self.id,
                kept = existing.label(),
                dropped = action.label(),
                "action already set this tick"
            );
            return;
        }
        self.action = Some(action);
    }

    pub fn action(&self) -> Option<CombatAction> {
        self.action
    }

    pub fn take_action(&mut self) -> Option<CombatAction> {
        self.action.take()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use combat_core::{Authority, CharacterSpec, EffectPayload, StatusEffectTable};

    use super::*;

    #[test]
    fn capture_projects_effects_and_target() {
        let mut roster =
            CharacterTable::new(Arc::new(StatusEffectTable::default()), Authority::Authoritative);
        let me = roster.spawn(&CharacterSpec::new(Team(0), 40)).unwrap();
        let foe = roster.spawn(&CharacterSpec::new(Team(1), 40)).unwrap();
        let hero = roster.get_mut(me).unwrap();
        hero.take_damage(10);
        hero.effects
            .apply(StatusEffectKind::Stun, None, EffectPayload::default());

        let ctx = AiContext::capture(roster.get(me).unwrap(), &roster, 7, None);

        assert_eq!(ctx.tick, 7);
        assert_eq!(ctx.target, Some(foe));
        assert_eq!(ctx.life_ratio, 0.75);
        assert!(ctx.has_state(StatusEffectKind::Stun));
        assert!(ctx.is_incapacitated());
    }

    #[test]
    fn first_action_wins() {
        let mut ctx = AiContext::new(CharacterId(0), Team(0));
        ctx.set_action(CombatAction::Idle);
        ctx.set_action(CombatAction::Reposition);
        assert_eq!(ctx.take_action(), Some(CombatAction::Idle));
        assert_eq!(ctx.take_action(), None);
    }

    #[test]
    fn missing_sensors_read_as_none() {
        let ctx = AiContext::new(CharacterId(0), Team(0));
        assert!(ctx.sensors("IsCasting").is_none());
    }
}
