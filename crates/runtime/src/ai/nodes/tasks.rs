//! Task leaves for combat trees.
//!
//! Tasks record a [`CombatAction`] in the context and report how far along
//! it is. Resolution (damage, dodge charges, effects) happens in the
//! simulation after every tree has been evaluated.

use behavior_tree::{Status, Task};
use combat_core::StatusEffectKind;

use crate::ai::{AiContext, CombatAction};

/// Leaves the hostile zone. Fails without sensors.
pub struct ExitZone;

impl Task<AiContext> for ExitZone {
    fn run(&mut self, ctx: &mut AiContext) -> Status {
        if ctx.sensors("ExitZone").is_none() {
            return Status::Failure;
        }
        ctx.set_action(CombatAction::ExitZone);
        Status::Success
    }

    fn name(&self) -> &'static str {
        "ExitZone"
    }
}

/// Dodge lasting `duration_ticks` ticks.
///
/// The first tick spends a charge and reports `Running` until the dodge has
/// been re-entered on consecutive ticks for its full duration. Skipping a
/// tick (another branch won) abandons the dodge; the next entry starts over.
pub struct Dodge {
    duration_ticks: u32,
    progress: Option<DodgeProgress>,
}

#[derive(Clone, Copy, Debug)]
struct DodgeProgress {
    started: u64,
    last_seen: u64,
}

impl Dodge {
    pub fn new(duration_ticks: u32) -> Self {
        Self {
            duration_ticks: duration_ticks.max(1),
            progress: None,
        }
    }

    pub fn duration_ticks(&self) -> u32 {
        self.duration_ticks
    }

    pub fn is_in_progress(&self) -> bool {
        self.progress.is_some()
    }

    fn finish_or_continue(&mut self, started: u64, tick: u64) -> Status {
        if tick - started + 1 >= u64::from(self.duration_ticks) {
            self.progress = None;
            Status::Success
        } else {
            self.progress = Some(DodgeProgress {
                started,
                last_seen: tick,
            });
            Status::Running
        }
    }
}

impl Task<AiContext> for Dodge {
    fn run(&mut self, ctx: &mut AiContext) -> Status {
        if let Some(progress) = self.progress
            && ctx.tick == progress.last_seen + 1
        {
            ctx.set_action(CombatAction::Dodging);
            return self.finish_or_continue(progress.started, ctx.tick);
        }

        self.progress = None;
        if ctx.dodge_charges == 0 {
            return Status::Failure;
        }
        ctx.set_action(CombatAction::Dodge);
        self.finish_or_continue(ctx.tick, ctx.tick)
    }

    fn name(&self) -> &'static str {
        "Dodge"
    }
}

/// Attacks the current target. Fails when nothing is targetable.
pub struct Attack;

impl Task<AiContext> for Attack {
    fn run(&mut self, ctx: &mut AiContext) -> Status {
        match ctx.target {
            Some(target) => {
                ctx.set_action(CombatAction::Attack { target });
                Status::Success
            }
            None => Status::Failure,
        }
    }

    fn name(&self) -> &'static str {
        "Attack"
    }
}

/// Moves toward a better position. Always succeeds.
pub struct Reposition;

impl Task<AiContext> for Reposition {
    fn run(&mut self, ctx: &mut AiContext) -> Status {
        ctx.set_action(CombatAction::Reposition);
        Status::Success
    }

    fn name(&self) -> &'static str {
        "Reposition"
    }
}

/// Does nothing this tick. Always succeeds.
pub struct Idle;

impl Task<AiContext> for Idle {
    fn run(&mut self, ctx: &mut AiContext) -> Status {
        ctx.set_action(CombatAction::Idle);
        Status::Success
    }

    fn name(&self) -> &'static str {
        "Idle"
    }
}

/// Applies a status effect to the acting character.
pub struct ApplySelfState(pub StatusEffectKind);

impl Task<AiContext> for ApplySelfState {
    fn run(&mut self, ctx: &mut AiContext) -> Status {
        ctx.set_action(CombatAction::ApplySelfState(self.0));
        Status::Success
    }

    fn name(&self) -> &'static str {
        "ApplySelfState"
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{CharacterId, Team};

    use super::*;
    use crate::sensors::SensorReadings;

    fn ctx(tick: u64) -> AiContext {
        AiContext::new(CharacterId(0), Team(0))
            .with_tick(tick)
            .with_dodge_charges(1)
    }

    #[test]
    fn single_tick_dodge_succeeds_immediately() {
        let mut dodge = Dodge::new(1);
        let mut c = ctx(0);
        assert_eq!(dodge.run(&mut c), Status::Success);
        assert_eq!(c.action(), Some(CombatAction::Dodge));
        assert!(!dodge.is_in_progress());
    }

    #[test]
    fn multi_tick_dodge_runs_then_succeeds() {
        let mut dodge = Dodge::new(3);

        let mut first = ctx(10);
        assert_eq!(dodge.run(&mut first), Status::Running);
        assert_eq!(first.action(), Some(CombatAction::Dodge));

        let mut second = ctx(11).with_dodge_charges(0);
        assert_eq!(dodge.run(&mut second), Status::Running);
        assert_eq!(second.action(), Some(CombatAction::Dodging));

        let mut third = ctx(12).with_dodge_charges(0);
        assert_eq!(dodge.run(&mut third), Status::Success);
        assert!(!dodge.is_in_progress());
    }

    #[test]
    fn interrupted_dodge_starts_over() {
        let mut dodge = Dodge::new(2);
        assert_eq!(dodge.run(&mut ctx(0)), Status::Running);

        let mut later = ctx(5);
        assert_eq!(dodge.run(&mut later), Status::Running);
        assert_eq!(later.action(), Some(CombatAction::Dodge));
    }

    #[test]
    fn dodge_without_charges_fails() {
        let mut dodge = Dodge::new(2);
        let mut c = ctx(0).with_dodge_charges(0);
        assert_eq!(dodge.run(&mut c), Status::Failure);
        assert_eq!(c.action(), None);
    }

    #[test]
    fn attack_needs_a_target() {
        let mut c = ctx(0);
        assert_eq!(Attack.run(&mut c), Status::Failure);

        let mut armed = ctx(0).with_target(CharacterId(3));
        assert_eq!(Attack.run(&mut armed), Status::Success);
        assert_eq!(
            armed.action(),
            Some(CombatAction::Attack {
                target: CharacterId(3)
            })
        );
    }

    #[test]
    fn exit_zone_fails_closed_without_sensors() {
        assert_eq!(ExitZone.run(&mut ctx(0)), Status::Failure);

        let mut c = ctx(0).with_sensors(SensorReadings::in_zone().shared());
        assert_eq!(ExitZone.run(&mut c), Status::Success);
    }
}
