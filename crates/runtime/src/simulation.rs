//! Fixed-step combat simulation.
//!
//! # Tick order
//!
//! Every [`Simulation::step`] runs four phases, each over characters in
//! ascending id order:
//!
//! 1. **Effects**: status effects advance and periodic damage hits life
//! 2. **Decisions**: each controlled, living character's tree is evaluated
//! 3. **Resolution**: chosen actions are resolved against the roster
//! 4. **Replication**: registry events are drained onto the bus
//!
//! Effects resolve before decisions, so an effect expiring this tick frees its
//! character to act this tick. Actions are resolved after all decisions, so a
//! stun landed by an earlier id does not cancel a later id's committed action;
//! only death does.

use std::collections::BTreeMap;
use std::sync::Arc;

use behavior_tree::Status;
use combat_core::{
    Authority, CharacterId, CharacterSnapshot, CharacterSpec, CharacterTable, EffectPayload,
    EffectResolution, EffectSpec, HitOutcome, HitResult, StatusEffectKind, StatusEffectTable,
    apply_effect, apply_on_hit, resolve_hit,
};

use crate::ai::{AiContext, Archetype, CombatAction, CombatTree, TreeDefinition, spawn_tree};
use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::events::{CombatEvent, DecisionEvent, Event, EventBus};
use crate::sensors::SharedSensors;

/// Basic attack of a controlled character.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttackProfile {
    pub damage: u32,
    /// Applied once per landed hit, in order.
    pub on_hit: Vec<EffectSpec>,
}

impl AttackProfile {
    pub fn new(damage: u32) -> Self {
        Self {
            damage,
            on_hit: Vec::new(),
        }
    }

    pub fn with_on_hit(mut self, effect: EffectSpec) -> Self {
        self.on_hit.push(effect);
        self
    }
}

/// AI attached to one character.
struct Controller {
    tree: CombatTree,
    sensors: Option<SharedSensors>,
    attack: AttackProfile,
    /// Last tick ended with a dodge still running.
    dodging: bool,
}

/// What one step did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    pub tick: u64,
    pub decisions: Vec<DecisionEvent>,
    pub deaths: Vec<CharacterId>,
}

impl StepReport {
    pub fn decision(&self, id: CharacterId) -> Option<&DecisionEvent> {
        self.decisions.iter().find(|d| d.id == id)
    }
}

pub struct Simulation {
    config: RuntimeConfig,
    roster: CharacterTable,
    controllers: BTreeMap<CharacterId, Controller>,
    bus: EventBus,
    tick: u64,
}

impl Simulation {
    pub fn new(
        config: RuntimeConfig,
        effects: StatusEffectTable,
        authority: Authority,
    ) -> Result<Self> {
        config.validate()?;
        let bus = EventBus::with_capacity(config.event_buffer);
        Ok(Self {
            roster: CharacterTable::new(Arc::new(effects), authority),
            controllers: BTreeMap::new(),
            bus,
            tick: 0,
            config,
        })
    }

    /// Authoritative simulation with the built-in effect table.
    pub fn authoritative(config: RuntimeConfig) -> Result<Self> {
        Self::new(config, StatusEffectTable::default(), Authority::Authoritative)
    }

    /// Replica fed through [`Simulation::ingest`].
    pub fn replica(config: RuntimeConfig) -> Result<Self> {
        Self::new(config, StatusEffectTable::default(), Authority::Replica)
    }

    pub fn authority(&self) -> Authority {
        self.roster.authority()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn roster(&self) -> &CharacterTable {
        &self.roster
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    // ========================================================================
    // Roster and controllers
    // ========================================================================

    pub fn spawn(&mut self, spec: &CharacterSpec) -> Result<CharacterId> {
        Ok(self.roster.spawn(spec)?)
    }

    /// Spawns a character driven by `archetype`'s built-in tree.
    pub fn spawn_with(&mut self, spec: &CharacterSpec, archetype: Archetype) -> Result<CharacterId> {
        let id = self.spawn(spec)?;
        self.attach_archetype(id, archetype)?;
        Ok(id)
    }

    /// Removes a character and its controller, publishing its final removals.
    pub fn despawn(&mut self, id: CharacterId) -> Result<()> {
        let mut character = self.roster.despawn(id)?;
        self.controllers.remove(&id);
        character.effects.clear();
        for event in character.effects.drain_events() {
            self.bus.publish(Event::Status(event));
        }
        Ok(())
    }

    /// Attaches a tree built from `definition`.
    ///
    /// An unknown character is a fatal configuration error. An invalid
    /// definition is not: the character gets the always-attack tree.
    pub fn attach_tree(&mut self, id: CharacterId, definition: &TreeDefinition) -> Result<()> {
        if !self.roster.contains(id) {
            let error = RuntimeError::UnknownCharacter(id);
            combat_core::report(&error);
            return Err(error);
        }
        let tree = spawn_tree(definition, self.config.randomness, self.tree_seed(id));
        let previous = self.controllers.remove(&id);
        self.controllers.insert(
            id,
            Controller {
                tree,
                sensors: previous.as_ref().and_then(|c| c.sensors.clone()),
                attack: previous
                    .map(|c| c.attack)
                    .unwrap_or_else(|| AttackProfile::new(self.config.attack_damage)),
                dodging: false,
            },
        );
        tracing::debug!(target: "runtime::simulation", %id, "tree attached");
        Ok(())
    }

    pub fn attach_archetype(&mut self, id: CharacterId, archetype: Archetype) -> Result<()> {
        let definition = archetype.definition(self.config.archetype_params());
        self.attach_tree(id, &definition)
    }

    pub fn set_sensors(&mut self, id: CharacterId, sensors: Option<SharedSensors>) -> Result<()> {
        self.controller_mut(id)?.sensors = sensors;
        Ok(())
    }

    pub fn set_attack(&mut self, id: CharacterId, attack: AttackProfile) -> Result<()> {
        self.controller_mut(id)?.attack = attack;
        Ok(())
    }

    pub fn is_controlled(&self, id: CharacterId) -> bool {
        self.controllers.contains_key(&id)
    }

    fn controller_mut(&mut self, id: CharacterId) -> Result<&mut Controller> {
        self.controllers
            .get_mut(&id)
            .ok_or(RuntimeError::UnknownCharacter(id))
    }

    fn tree_seed(&self, id: CharacterId) -> u64 {
        self.config.seed ^ u64::from(id.0).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }

    // ========================================================================
    // External combat input
    // ========================================================================

    /// Applies an effect from outside the trees (player spells, scripts).
    pub fn apply_effect(
        &mut self,
        caster: Option<CharacterId>,
        target: CharacterId,
        kind: StatusEffectKind,
        payload: EffectPayload,
    ) -> Result<EffectResolution> {
        let resolution = apply_effect(&mut self.roster, caster, target, kind, payload)?;
        self.publish_resolution(caster, target, &resolution);
        Ok(resolution)
    }

    /// Resolves a hit from outside the trees.
    pub fn hit(&mut self, attacker: CharacterId, target: CharacterId, damage: u32) -> Result<HitResult> {
        let victim = self
            .roster
            .get_mut(target)
            .ok_or(RuntimeError::UnknownCharacter(target))?;
        let result = resolve_hit(victim, damage);
        self.publish_hit(attacker, target, result);
        Ok(result)
    }

    // ========================================================================
    // Step
    // ========================================================================

    /// Advances the simulation by one fixed tick.
    ///
    /// Replicas never mutate here; they return an empty report.
    pub fn step(&mut self) -> StepReport {
        let mut report = StepReport {
            tick: self.tick,
            ..StepReport::default()
        };
        if self.roster.authority().is_replica() {
            tracing::trace!(target: "runtime::simulation", tick = self.tick, "replica step skipped");
            return report;
        }

        let ids = self.roster.ids();
        self.tick_effects(&ids, &mut report);
        let chosen = self.evaluate_trees(&ids, &mut report);
        for (id, action) in chosen {
            self.resolve(id, action, &mut report);
        }
        self.drain_status_events();

        tracing::trace!(
            target: "runtime::simulation",
            tick = self.tick,
            decisions = report.decisions.len(),
            deaths = report.deaths.len(),
            "step complete"
        );
        self.tick += 1;
        report
    }

    fn tick_effects(&mut self, ids: &[CharacterId], report: &mut StepReport) {
        let delta = self.config.tick_seconds;
        for &id in ids {
            let Some(character) = self.roster.get_mut(id) else {
                continue;
            };
            if !character.is_alive() {
                continue;
            }
            let ticked = character.tick_effects(delta);
            if ticked.damage > 0 && !character.is_alive() {
                report.deaths.push(id);
                self.bus.publish(Event::Combat(CombatEvent::Died { id }));
            }
        }
    }

    fn evaluate_trees(
        &mut self,
        ids: &[CharacterId],
        report: &mut StepReport,
    ) -> Vec<(CharacterId, CombatAction)> {
        let mut chosen = Vec::new();
        for &id in ids {
            let Some(controller) = self.controllers.get_mut(&id) else {
                continue;
            };
            let Some(character) = self.roster.get(id) else {
                continue;
            };
            if !character.is_alive() {
                continue;
            }

            let mut ctx =
                AiContext::capture(character, &self.roster, self.tick, controller.sensors.clone())
                    .with_dodging(controller.dodging);
            let status = controller.tree.tick(&mut ctx);
            let action = ctx.take_action();
            controller.dodging = status == Status::Running
                && matches!(action, Some(CombatAction::Dodge | CombatAction::Dodging));

            tracing::trace!(
                target: "runtime::ai",
                %id,
                status = status.as_str(),
                action = action.as_ref().map(CombatAction::label),
                "tree evaluated"
            );

            let decision = DecisionEvent {
                tick: self.tick,
                id,
                status,
                action,
            };
            self.bus.publish(Event::Decision(decision.clone()));
            report.decisions.push(decision);
            if let Some(action) = action {
                chosen.push((id, action));
            }
        }
        chosen
    }

    fn resolve(&mut self, id: CharacterId, action: CombatAction, report: &mut StepReport) {
        if !self.roster.get(id).is_some_and(|c| c.is_alive()) {
            return;
        }

        match action {
            CombatAction::Attack { target } => self.resolve_attack(id, target, report),
            CombatAction::Dodge => self.resolve_dodge(id),
            CombatAction::ApplySelfState(kind) => {
                if let Err(error) = self.apply_effect(Some(id), id, kind, EffectPayload::default()) {
                    combat_core::report(&error);
                }
            }
            // Movement belongs to the embedding game.
            CombatAction::ExitZone
            | CombatAction::Dodging
            | CombatAction::Reposition
            | CombatAction::Idle => {}
        }
    }

    fn resolve_attack(&mut self, attacker: CharacterId, target: CharacterId, report: &mut StepReport) {
        let Some(team) = self.roster.get(attacker).map(|c| c.team) else {
            return;
        };
        let valid = self
            .roster
            .get(target)
            .is_some_and(|t| t.team != team && t.is_alive() && !t.effects.is_untargetable());
        if !valid {
            tracing::debug!(target: "runtime::simulation", %attacker, %target, "attack target no longer valid");
            return;
        }
        let Some(profile) = self.controllers.get(&attacker).map(|c| c.attack.clone()) else {
            return;
        };

        let Ok(result) = self.hit(attacker, target, profile.damage) else {
            return;
        };
        if result.outcome == HitOutcome::Landed && !profile.on_hit.is_empty() {
            match apply_on_hit(&mut self.roster, Some(attacker), target, &profile.on_hit) {
                Ok(resolutions) => {
                    for resolution in &resolutions {
                        self.publish_resolution(Some(attacker), target, resolution);
                    }
                }
                Err(error) => combat_core::report(&RuntimeError::from(error)),
            }
        }

        if !self.roster.get(target).is_some_and(|t| t.is_alive())
            && !report.deaths.contains(&target)
        {
            report.deaths.push(target);
        }
    }

    fn resolve_dodge(&mut self, id: CharacterId) {
        let Some(character) = self.roster.get_mut(id) else {
            return;
        };
        if !character.spend_dodge() {
            return;
        }
        let charges_left = character.dodge_charges;
        self.bus.publish(Event::Combat(CombatEvent::Dodged { id, charges_left }));

        let window = EffectPayload::with_duration(self.config.combat.dodge_invulnerability);
        if let Err(error) = self.apply_effect(Some(id), id, StatusEffectKind::Invulnerable, window) {
            combat_core::report(&error);
        }
    }

    fn publish_hit(&self, attacker: CharacterId, target: CharacterId, result: HitResult) {
        if result.outcome == HitOutcome::Ignored {
            return;
        }
        self.bus.publish(Event::Combat(CombatEvent::Hit {
            attacker,
            target,
            result,
        }));
        if result.killed {
            self.bus.publish(Event::Combat(CombatEvent::Died { id: target }));
        }
    }

    fn publish_resolution(
        &self,
        caster: Option<CharacterId>,
        target: CharacterId,
        resolution: &EffectResolution,
    ) {
        if let EffectResolution::Consumed(consumed) = resolution {
            self.bus.publish(Event::Combat(CombatEvent::Consumed {
                caster,
                target,
                marker: consumed.marker,
                stacks: consumed.stacks,
            }));
            if consumed.burst.killed {
                self.bus.publish(Event::Combat(CombatEvent::Died { id: target }));
            }
        }
    }

    fn drain_status_events(&mut self) {
        for character in self.roster.iter_mut() {
            for event in character.effects.drain_events() {
                self.bus.publish(Event::Status(event));
            }
        }
    }

    // ========================================================================
    // Replication
    // ========================================================================

    pub fn snapshot(&self) -> Vec<CharacterSnapshot> {
        self.roster.snapshot()
    }

    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    /// Mirrors authoritative state into a replica. False on the authority.
    pub fn ingest(&mut self, snapshots: &[CharacterSnapshot]) -> bool {
        self.roster.ingest(snapshots)
    }

    pub fn ingest_json(&mut self, text: &str) -> Result<bool> {
        let snapshots: Vec<CharacterSnapshot> = serde_json::from_str(text)?;
        Ok(self.ingest(&snapshots))
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("tick", &self.tick)
            .field("authority", &self.authority())
            .field("characters", &self.roster.len())
            .field("controllers", &self.controllers.len())
            .finish()
    }
}
