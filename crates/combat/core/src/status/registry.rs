//! Per-character status effect registry.
//!
//! The registry maps each [`StatusEffectKind`] to at most one live
//! [`StatusEffect`]. Re-applying a kind refreshes the existing instance
//! instead of creating a parallel one. All mutation goes through the methods
//! here; other characters interact with a registry only through
//! `apply` / `remove_state` / `hit_shield`.
//!
//! # Authority
//!
//! Every mutating method is a no-op on a [`Authority::Replica`] registry and
//! returns a neutral value. Replicas are updated exclusively through
//! [`StatusEffectRegistry::apply_snapshot`].

use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::authority::Authority;
use crate::character::CharacterId;
use crate::config::CombatConfig;
use crate::error::report;

use super::def::{MaxStackRule, StatusEffectDef, StatusEffectTable};
use super::effect::{EffectPayload, StatusEffect};
use super::error::EffectError;
use super::events::{RemovalReason, StatusEvent};
use super::kind::{KindFlags, StatusEffectKind};

/// Slack for accumulated float error when counting pulse boundaries.
const PULSE_EPSILON: f32 = 1e-4;

type EffectSlots = ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }>;

/// What an `apply` or `refresh` call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// A new instance was created at one stack.
    Applied,
    /// An existing instance was refreshed.
    Refreshed { stacks: u8 },
    /// The stack cap was reached and the instance was replaced by `into`.
    Transformed { into: StatusEffectKind },
    /// The kind never persists; nothing was stored.
    Instant,
    /// `refresh` found no live instance.
    Absent,
    /// The instance was created without duration or shield left and was
    /// removed on the spot.
    Spent,
    /// No free slot was left.
    Rejected,
    /// The registry is a replica.
    Ignored,
}

impl ApplyOutcome {
    /// True if the registry now holds the requested kind.
    pub fn is_live(self) -> bool {
        matches!(self, ApplyOutcome::Applied | ApplyOutcome::Refreshed { .. })
    }
}

/// Result of advancing the registry by one delta.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Periodic damage to apply to the owner's life pool.
    pub damage: u32,
    /// Cadence boundaries crossed across all instances.
    pub pulses: u32,
    /// Kinds removed during this tick.
    pub expired: Vec<StatusEffectKind>,
}

/// Replicated view of a registry.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegistrySnapshot {
    pub owner: CharacterId,
    pub effects: Vec<StatusEffect>,
}

/// Active status effects of one character.
#[derive(Clone, Debug)]
pub struct StatusEffectRegistry {
    owner: CharacterId,
    authority: Authority,
    table: Arc<StatusEffectTable>,
    effects: EffectSlots,
    events: Vec<StatusEvent>,
}

impl StatusEffectRegistry {
    /// Creates an empty registry for `owner`.
    pub fn new(owner: CharacterId, table: Arc<StatusEffectTable>, authority: Authority) -> Self {
        Self {
            owner,
            authority,
            table,
            effects: ArrayVec::new(),
            events: Vec::new(),
        }
    }

    pub fn owner(&self) -> CharacterId {
        self.owner
    }

    pub fn authority(&self) -> Authority {
        self.authority
    }

    pub fn table(&self) -> &StatusEffectTable {
        &self.table
    }

    // ========================================================================
    // Queries (safe from decision nodes)
    // ========================================================================

    /// Returns true if `kind` is live.
    pub fn has_state(&self, kind: StatusEffectKind) -> bool {
        self.position(kind).is_some()
    }

    /// Stack count of `kind`, or 0 when absent.
    pub fn stacks(&self, kind: StatusEffectKind) -> u8 {
        self.get(kind).map_or(0, |e| e.stacks)
    }

    pub fn get(&self, kind: StatusEffectKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Live instances in application order.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Returns true if any live kind carries one of `flags`.
    pub fn has_flag(&self, flags: KindFlags) -> bool {
        self.effects
            .iter()
            .any(|e| self.table.get(e.kind).flags.intersects(flags))
    }

    /// True while any crowd-control kind is live.
    pub fn is_incapacitated(&self) -> bool {
        self.has_flag(KindFlags::INCAPACITATING)
    }

    pub fn is_untargetable(&self) -> bool {
        self.has_flag(KindFlags::UNTARGETABLE)
    }

    pub fn is_invulnerable(&self) -> bool {
        self.has_flag(KindFlags::INVULNERABLE)
    }

    /// Product of every live instance's movement multiplier.
    pub fn speed_multiplier(&self) -> f32 {
        self.effects.iter().map(|e| e.speed_multiplier).product()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Applies `kind`, or refreshes it by one stack if already live.
    pub fn apply(
        &mut self,
        kind: StatusEffectKind,
        source: Option<CharacterId>,
        payload: EffectPayload,
    ) -> ApplyOutcome {
        if !self.authority.permits("apply") {
            return ApplyOutcome::Ignored;
        }
        self.apply_inner(kind, source, payload, true)
    }

    /// Adds `add_stacks` (capped) to a live instance and restores its full
    /// duration. Reaching the cap runs the kind's max-stack rule.
    ///
    /// "Full" means the duration and shield the instance was created with,
    /// including any payload override from its first application; later
    /// payloads do not change them.
    pub fn refresh(&mut self, kind: StatusEffectKind, add_stacks: u8) -> ApplyOutcome {
        if !self.authority.permits("refresh") {
            return ApplyOutcome::Ignored;
        }
        match self.position(kind) {
            Some(index) => self.refresh_at(index, add_stacks, None, true),
            None => ApplyOutcome::Absent,
        }
    }

    /// Removes `kind` and returns the stacks it held (0 if absent).
    pub fn remove_state(&mut self, kind: StatusEffectKind) -> u8 {
        if !self.authority.permits("remove_state") {
            return 0;
        }
        match self.position(kind) {
            Some(index) => self.remove_at(index, RemovalReason::Removed).stacks,
            None => 0,
        }
    }

    /// Removes up to `count` stacks of `kind` and returns how many were taken.
    ///
    /// Asking for more than is held is clamped and reported. The instance is
    /// removed once its stacks reach zero.
    pub fn consume_stacks(&mut self, kind: StatusEffectKind, count: u8) -> u8 {
        if !self.authority.permits("consume_stacks") {
            return 0;
        }
        let Some(index) = self.position(kind) else {
            return 0;
        };

        let held = self.effects[index].stacks;
        if count > held {
            report(&EffectError::StackUnderflow {
                owner: self.owner,
                kind,
                requested: count,
                held,
            });
        }

        let taken = count.min(held);
        if taken == held {
            self.remove_at(index, RemovalReason::Removed);
        } else if taken > 0 {
            self.effects[index].stacks = held - taken;
            self.events.push(StatusEvent::StackChanged {
                owner: self.owner,
                kind,
                stacks: held - taken,
            });
        }
        taken
    }

    /// Routes `damage` into the shield of `kind` and returns the overflow.
    ///
    /// The overflow is never negative and the shield never drops below zero.
    /// A shield that reaches zero is removed immediately. Hitting an absent
    /// or non-shielded kind absorbs nothing.
    pub fn hit_shield(&mut self, kind: StatusEffectKind, damage: u32) -> u32 {
        if !self.authority.permits("hit_shield") {
            return damage;
        }
        let Some(index) = self.position(kind) else {
            return damage;
        };
        if !self.table.get(kind).is_shielded() {
            report(&EffectError::NotShielded {
                owner: self.owner,
                kind,
            });
            return damage;
        }

        let effect = &mut self.effects[index];
        let absorbed = damage.min(effect.shield);
        effect.shield -= absorbed;
        let shield = effect.shield;

        if absorbed > 0 {
            self.events.push(StatusEvent::ShieldChanged {
                owner: self.owner,
                kind,
                shield,
            });
        }
        if shield == 0 {
            self.remove_at(index, RemovalReason::ShieldDepleted);
        }
        damage - absorbed
    }

    /// Runs `damage` through every live shield in application order.
    pub fn absorb(&mut self, damage: u32) -> u32 {
        if !self.authority.permits("absorb") {
            return damage;
        }
        let shielded: ArrayVec<StatusEffectKind, { CombatConfig::MAX_STATUS_EFFECTS }> = self
            .effects
            .iter()
            .filter(|e| self.table.get(e.kind).is_shielded())
            .map(|e| e.kind)
            .collect();

        let mut remaining = damage;
        for kind in shielded {
            if remaining == 0 {
                break;
            }
            remaining = self.hit_shield(kind, remaining);
        }
        remaining
    }

    /// Advances every instance by `delta` seconds.
    ///
    /// Durations count down (except infinite kinds), periodic pulses fire once
    /// per cadence boundary crossed within the instance's lifetime, and
    /// expired or depleted instances are removed before returning.
    pub fn tick(&mut self, delta: f32) -> TickReport {
        let mut report_out = TickReport::default();
        if !self.authority.permits("tick") {
            return report_out;
        }
        if !delta.is_finite() || delta < 0.0 {
            report(&EffectError::InvalidDelta {
                owner: self.owner,
                delta,
            });
            return report_out;
        }

        let table = Arc::clone(&self.table);
        let mut index = 0;
        while index < self.effects.len() {
            let def = table.get(self.effects[index].kind);
            let effect = &mut self.effects[index];

            let active = if def.is_infinite() {
                delta
            } else {
                let active = delta.min(effect.remaining.max(0.0));
                effect.remaining -= delta;
                active
            };

            if def.has_ticks() {
                effect.tick_progress += active;
                let pulses = ((effect.tick_progress + PULSE_EPSILON) / def.tick_interval).floor();
                if pulses >= 1.0 {
                    effect.tick_progress =
                        (effect.tick_progress - pulses * def.tick_interval).max(0.0);
                    let pulses = pulses as u32;
                    let damage = effect.pulse_damage().saturating_mul(pulses);
                    report_out.damage = report_out.damage.saturating_add(damage);
                    report_out.pulses = report_out.pulses.saturating_add(pulses);
                    self.events.push(StatusEvent::Pulsed {
                        owner: self.owner,
                        kind: effect.kind,
                        pulses,
                        damage,
                    });
                }
            }

            let effect = &self.effects[index];
            let reason = if effect.is_expired(def) {
                Some(RemovalReason::Expired)
            } else if effect.is_depleted(def) {
                Some(RemovalReason::ShieldDepleted)
            } else {
                None
            };

            match reason {
                Some(reason) => {
                    let removed = self.remove_at(index, reason);
                    report_out.expired.push(removed.kind);
                }
                None => index += 1,
            }
        }
        report_out
    }

    /// Removes every instance (death or despawn). Returns how many were live.
    pub fn clear(&mut self) -> usize {
        if !self.authority.permits("clear") {
            return 0;
        }
        let count = self.effects.len();
        for effect in self.effects.drain(..) {
            self.events.push(StatusEvent::Removed {
                owner: self.owner,
                kind: effect.kind,
                stacks: effect.stacks,
                reason: RemovalReason::Cleared,
            });
        }
        count
    }

    // ========================================================================
    // Replication
    // ========================================================================

    /// Captures the live instances for replication.
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            owner: self.owner,
            effects: self.effects.iter().copied().collect(),
        }
    }

    /// Replaces a replica's contents with `snapshot`.
    ///
    /// Returns false (and reports) when called on the authoritative registry,
    /// whose state is only ever produced by its own mutation entry points.
    pub fn apply_snapshot(&mut self, snapshot: &RegistrySnapshot) -> bool {
        if self.authority.is_authoritative() {
            report(&EffectError::SnapshotOnAuthority { owner: self.owner });
            return false;
        }
        self.effects = snapshot.effects.iter().copied().take(self.effects.capacity()).collect();
        true
    }

    /// Takes the transitions recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<StatusEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn position(&self, kind: StatusEffectKind) -> Option<usize> {
        self.effects.iter().position(|e| e.kind == kind)
    }

    fn apply_inner(
        &mut self,
        kind: StatusEffectKind,
        source: Option<CharacterId>,
        payload: EffectPayload,
        allow_transform: bool,
    ) -> ApplyOutcome {
        let table = Arc::clone(&self.table);
        let def = table.get(kind);

        if def.is_instant() {
            tracing::debug!(
                target: "combat::status",
                owner = ?self.owner,
                kind = kind.label(),
                "instant kind has nothing to store"
            );
            return ApplyOutcome::Instant;
        }

        if let Some(index) = self.position(kind) {
            return self.refresh_at(index, 1, source, allow_transform);
        }

        if self.effects.is_full() {
            report(&EffectError::CapacityExceeded {
                owner: self.owner,
                kind,
                max: self.effects.capacity(),
            });
            return ApplyOutcome::Rejected;
        }

        self.effects.push(StatusEffect::new(kind, def, source, payload));
        self.events.push(StatusEvent::Applied {
            owner: self.owner,
            kind,
            source,
        });

        let index = self.effects.len() - 1;
        let created = &self.effects[index];
        let spent = if created.is_expired(def) {
            Some(RemovalReason::Expired)
        } else if created.is_depleted(def) {
            Some(RemovalReason::ShieldDepleted)
        } else {
            None
        };
        if let Some(reason) = spent {
            self.remove_at(index, reason);
            return ApplyOutcome::Spent;
        }

        if allow_transform && let Some(outcome) = self.run_max_stack_rule(index, def) {
            return outcome;
        }
        ApplyOutcome::Applied
    }

    fn refresh_at(
        &mut self,
        index: usize,
        add_stacks: u8,
        source: Option<CharacterId>,
        allow_transform: bool,
    ) -> ApplyOutcome {
        let table = Arc::clone(&self.table);
        let effect = &mut self.effects[index];
        let def = table.get(effect.kind);

        let before = effect.stacks;
        effect.stacks = before.saturating_add(add_stacks).min(def.max_stacks);
        effect.remaining = effect.base_duration;
        if def.is_shielded() {
            effect.shield = effect.base_shield;
        }
        if source.is_some() {
            effect.source = source;
        }

        let (kind, stacks, remaining) = (effect.kind, effect.stacks, effect.remaining);
        self.events.push(StatusEvent::Refreshed {
            owner: self.owner,
            kind,
            remaining,
        });
        if stacks != before {
            self.events.push(StatusEvent::StackChanged {
                owner: self.owner,
                kind,
                stacks,
            });
        }

        if allow_transform && let Some(outcome) = self.run_max_stack_rule(index, def) {
            return outcome;
        }
        ApplyOutcome::Refreshed { stacks }
    }

    /// Runs the declared max-stack rule of the instance at `index`, if its
    /// cap has been reached. Transforms do not chain.
    fn run_max_stack_rule(&mut self, index: usize, def: &StatusEffectDef) -> Option<ApplyOutcome> {
        let rule = def.on_max_stacks?;
        if self.effects[index].stacks < def.max_stacks {
            return None;
        }

        match rule {
            MaxStackRule::Transform { into, duration } => {
                let removed = self.remove_at(index, RemovalReason::Transformed);
                tracing::debug!(
                    target: "combat::status",
                    owner = ?self.owner,
                    from = removed.kind.label(),
                    into = into.label(),
                    "max stacks reached"
                );
                self.apply_inner(
                    into,
                    removed.source,
                    EffectPayload::with_duration(duration),
                    false,
                );
                Some(ApplyOutcome::Transformed { into })
            }
        }
    }

    fn remove_at(&mut self, index: usize, reason: RemovalReason) -> StatusEffect {
        let effect = self.effects.remove(index);
        self.events.push(StatusEvent::Removed {
            owner: self.owner,
            kind: effect.kind,
            stacks: effect.stacks,
            reason,
        });
        effect
    }
}
