//! Checker leaves for combat trees.
//!
//! Checkers read the [`AiContext`] and answer yes or no. Sensor-backed
//! checkers fail closed when their controller has no sensors attached.

use behavior_tree::{Chance, Checker};
use combat_core::StatusEffectKind;

use crate::ai::AiContext;

/// Standing inside a hostile area effect.
pub struct IsInHostileZone;

impl Checker<AiContext> for IsInHostileZone {
    fn check(&self, ctx: &AiContext, _chance: &mut Chance<'_>) -> bool {
        ctx.sensors("IsInHostileZone")
            .is_some_and(|s| s.is_in_hostile_zone())
    }

    fn name(&self) -> &'static str {
        "IsInHostileZone"
    }
}

/// A zone is about to land within `margin` seconds, or a projectile is in
/// flight along this character's position.
pub struct IsThreatImminent {
    pub margin: f32,
}

impl Checker<AiContext> for IsThreatImminent {
    fn check(&self, ctx: &AiContext, _chance: &mut Chance<'_>) -> bool {
        ctx.sensors("IsThreatImminent").is_some_and(|s| {
            s.is_hostile_zone_imminent(self.margin) || s.is_in_projectile_path()
        })
    }

    fn name(&self) -> &'static str {
        "IsThreatImminent"
    }
}

pub struct IsInProjectilePath;

impl Checker<AiContext> for IsInProjectilePath {
    fn check(&self, ctx: &AiContext, _chance: &mut Chance<'_>) -> bool {
        ctx.sensors("IsInProjectilePath")
            .is_some_and(|s| s.is_in_projectile_path())
    }

    fn name(&self) -> &'static str {
        "IsInProjectilePath"
    }
}

pub struct IsCasting;

impl Checker<AiContext> for IsCasting {
    fn check(&self, ctx: &AiContext, _chance: &mut Chance<'_>) -> bool {
        ctx.sensors("IsCasting").is_some_and(|s| s.is_casting())
    }

    fn name(&self) -> &'static str {
        "IsCasting"
    }
}

/// The character carries a live instance of the kind.
pub struct HasState(pub StatusEffectKind);

impl Checker<AiContext> for HasState {
    fn check(&self, ctx: &AiContext, _chance: &mut Chance<'_>) -> bool {
        ctx.has_state(self.0)
    }

    fn name(&self) -> &'static str {
        "HasState"
    }
}

/// Any live effect forbids acting (stun, freeze, knockback).
pub struct IsIncapacitated;

impl Checker<AiContext> for IsIncapacitated {
    fn check(&self, ctx: &AiContext, _chance: &mut Chance<'_>) -> bool {
        ctx.is_incapacitated()
    }

    fn name(&self) -> &'static str {
        "IsIncapacitated"
    }
}

/// Life ratio strictly below `ratio`.
pub struct IsLifeBelow {
    pub ratio: f32,
}

impl Checker<AiContext> for IsLifeBelow {
    fn check(&self, ctx: &AiContext, _chance: &mut Chance<'_>) -> bool {
        ctx.life_ratio < self.ratio
    }

    fn name(&self) -> &'static str {
        "IsLifeBelow"
    }
}

pub struct HasDodgeCharge;

impl Checker<AiContext> for HasDodgeCharge {
    fn check(&self, ctx: &AiContext, _chance: &mut Chance<'_>) -> bool {
        ctx.dodge_charges > 0
    }

    fn name(&self) -> &'static str {
        "HasDodgeCharge"
    }
}

/// A dodge started on an earlier tick is still in progress.
pub struct IsDodging;

impl Checker<AiContext> for IsDodging {
    fn check(&self, ctx: &AiContext, _chance: &mut Chance<'_>) -> bool {
        ctx.dodging
    }

    fn name(&self) -> &'static str {
        "IsDodging"
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{
        CharacterId, EffectPayload, KindFlags, StatusEffect, StatusEffectDef, Team,
    };
    use rand::rngs::mock::StepRng;

    use super::*;
    use crate::sensors::SensorReadings;

    /// Runs `f` with a chance that never passes.
    fn zero_rng<T>(f: impl FnOnce(&mut Chance<'_>) -> T) -> T {
        let mut rng = StepRng::new(0, 0);
        let mut chance = Chance::new(0.0, &mut rng);
        f(&mut chance)
    }

    fn ctx() -> AiContext {
        AiContext::new(CharacterId(0), Team(0))
    }

    #[test]
    fn sensor_checkers_fail_closed_without_sensors() {
        let bare = ctx();
        zero_rng(|chance| {
            assert!(!IsInHostileZone.check(&bare, chance));
            assert!(!IsThreatImminent { margin: 5.0 }.check(&bare, chance));
            assert!(!IsInProjectilePath.check(&bare, chance));
            assert!(!IsCasting.check(&bare, chance));
        });
    }

    #[test]
    fn threat_covers_zones_and_projectiles() {
        let zone = ctx().with_sensors(SensorReadings::zone_in(0.3).shared());
        let far_zone = ctx().with_sensors(SensorReadings::zone_in(3.0).shared());
        let arrow = ctx().with_sensors(SensorReadings::projectile().shared());
        let check = IsThreatImminent { margin: 0.5 };

        zero_rng(|chance| {
            assert!(check.check(&zone, chance));
            assert!(!check.check(&far_zone, chance));
            assert!(check.check(&arrow, chance));
        });
    }

    #[test]
    fn state_checkers_read_the_snapshot() {
        let def = StatusEffectDef::timed(1.0, KindFlags::INCAPACITATING);
        let stunned = ctx().with_effect(
            StatusEffect::new(StatusEffectKind::Stun, &def, None, EffectPayload::default()),
            def.flags,
        );

        zero_rng(|chance| {
            assert!(HasState(StatusEffectKind::Stun).check(&stunned, chance));
            assert!(!HasState(StatusEffectKind::Burn).check(&stunned, chance));
            assert!(IsIncapacitated.check(&stunned, chance));
            assert!(!IsIncapacitated.check(&ctx(), chance));
        });
    }

    #[test]
    fn life_and_dodge_checkers() {
        let hurt = ctx().with_life_ratio(0.2).with_dodge_charges(1);
        zero_rng(|chance| {
            assert!(IsLifeBelow { ratio: 0.25 }.check(&hurt, chance));
            assert!(!IsLifeBelow { ratio: 0.2 }.check(&hurt, chance));
            assert!(HasDodgeCharge.check(&hurt, chance));
            assert!(!HasDodgeCharge.check(&ctx(), chance));
        });
    }

    #[test]
    fn dodging_reads_the_captured_flag() {
        zero_rng(|chance| {
            assert!(IsDodging.check(&ctx().with_dodging(true), chance));
            assert!(!IsDodging.check(&ctx(), chance));
        });
    }
}
