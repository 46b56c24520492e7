//! Characters: the owners of life pools and status effect registries.
//!
//! Characters are addressed by [`CharacterId`] handles into a
//! [`CharacterTable`]. Anything that refers to another character (an effect's
//! caster, an attack target) stores the handle, never a reference, so a
//! despawned character simply fails the lookup.

pub mod error;
pub mod meter;
pub mod table;

use std::fmt;
use std::sync::Arc;

use crate::authority::Authority;
use crate::config::CombatConfig;
use crate::status::{RegistrySnapshot, StatusEffectRegistry, StatusEffectTable, TickReport};

pub use error::CharacterError;
pub use meter::Meter;
pub use table::CharacterTable;

/// Handle of a character slot in a [`CharacterTable`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Allegiance; characters on the same team never target each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team(pub u8);

/// Spawn parameters for a character.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterSpec {
    pub team: Team,
    pub max_life: u32,
    pub max_resource: u32,
    pub dodge_charges: u8,
}

impl CharacterSpec {
    pub fn new(team: Team, max_life: u32) -> Self {
        Self {
            team,
            max_life,
            max_resource: 100,
            dodge_charges: CombatConfig::DEFAULT_DODGE_CHARGES,
        }
    }

    pub fn with_resource(mut self, max_resource: u32) -> Self {
        self.max_resource = max_resource;
        self
    }

    pub fn with_dodges(mut self, dodge_charges: u8) -> Self {
        self.dodge_charges = dodge_charges;
        self
    }
}

/// One combatant.
#[derive(Clone, Debug)]
pub struct Character {
    pub id: CharacterId,
    pub team: Team,
    pub life: Meter,
    /// Resource granted by consumption chains (mana, rage, ...). Starts empty.
    pub resource: Meter,
    pub dodge_charges: u8,
    pub effects: StatusEffectRegistry,
}

impl Character {
    pub fn new(
        id: CharacterId,
        spec: &CharacterSpec,
        table: Arc<StatusEffectTable>,
        authority: Authority,
    ) -> Self {
        Self {
            id,
            team: spec.team,
            life: Meter::full(spec.max_life),
            resource: Meter::new(0, spec.max_resource),
            dodge_charges: spec.dodge_charges,
            effects: StatusEffectRegistry::new(id, table, authority),
        }
    }

    pub fn authority(&self) -> Authority {
        self.effects.authority()
    }

    pub fn is_alive(&self) -> bool {
        !self.life.is_empty()
    }

    /// Removes life and returns the amount actually lost.
    ///
    /// Death wipes the status effect registry.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        if !self.authority().permits("take_damage") || !self.is_alive() {
            return 0;
        }
        let dealt = self.life.drain(amount);
        if !self.is_alive() {
            let cleared = self.effects.clear();
            tracing::debug!(
                target: "combat::character",
                id = %self.id,
                cleared,
                "character died"
            );
        }
        dealt
    }

    /// Adds resource and returns the amount actually gained.
    pub fn gain_resource(&mut self, amount: u32) -> u32 {
        if !self.authority().permits("gain_resource") {
            return 0;
        }
        self.resource.fill(amount)
    }

    /// Spends one dodge charge if any is left.
    pub fn spend_dodge(&mut self) -> bool {
        if !self.authority().permits("spend_dodge") || self.dodge_charges == 0 {
            return false;
        }
        self.dodge_charges -= 1;
        true
    }

    /// Advances status effects and applies their periodic damage to life.
    ///
    /// Periodic damage bypasses shields.
    pub fn tick_effects(&mut self, delta: f32) -> TickReport {
        let report = self.effects.tick(delta);
        if report.damage > 0 {
            self.take_damage(report.damage);
        }
        report
    }

    pub fn snapshot(&self) -> CharacterSnapshot {
        CharacterSnapshot {
            id: self.id,
            team: self.team,
            life: self.life,
            resource: self.resource,
            dodge_charges: self.dodge_charges,
            effects: self.effects.snapshot(),
        }
    }

    /// Overwrites a replica with replicated state. No-op on the authority.
    pub fn apply_snapshot(&mut self, snapshot: &CharacterSnapshot) -> bool {
        if !self.effects.apply_snapshot(&snapshot.effects) {
            return false;
        }
        self.team = snapshot.team;
        self.life = snapshot.life;
        self.resource = snapshot.resource;
        self.dodge_charges = snapshot.dodge_charges;
        true
    }
}

/// Replicated view of a character.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterSnapshot {
    pub id: CharacterId,
    pub team: Team,
    pub life: Meter,
    pub resource: Meter,
    pub dodge_charges: u8,
    pub effects: RegistrySnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{EffectPayload, StatusEffectKind};

    fn character(authority: Authority) -> Character {
        Character::new(
            CharacterId(0),
            &CharacterSpec::new(Team(1), 20),
            Arc::new(StatusEffectTable::default()),
            authority,
        )
    }

    #[test]
    fn periodic_damage_reduces_life() {
        let mut hero = character(Authority::Authoritative);
        hero.effects
            .apply(StatusEffectKind::Burn, None, EffectPayload::default());

        let report = hero.tick_effects(1.0);
        assert_eq!(report.damage, 4);
        assert_eq!(hero.life.current, 16);
    }

    #[test]
    fn death_clears_effects() {
        let mut hero = character(Authority::Authoritative);
        hero.effects
            .apply(StatusEffectKind::Slow, None, EffectPayload::default());

        assert_eq!(hero.take_damage(50), 20);
        assert!(!hero.is_alive());
        assert!(hero.effects.is_empty());
        assert_eq!(hero.take_damage(5), 0);
    }

    #[test]
    fn replica_only_changes_through_snapshots() {
        let mut owner = character(Authority::Authoritative);
        let mut replica = character(Authority::Replica);

        assert_eq!(replica.take_damage(5), 0);
        assert!(!replica.spend_dodge());

        owner.take_damage(5);
        owner.gain_resource(30);
        assert!(replica.apply_snapshot(&owner.snapshot()));
        assert_eq!(replica.life.current, 15);
        assert_eq!(replica.resource.current, 30);
        assert!(!owner.apply_snapshot(&replica.snapshot()));
    }

    #[test]
    fn dodge_charges_run_out() {
        let mut hero = character(Authority::Authoritative);
        assert!(hero.spend_dodge());
        assert!(hero.spend_dodge());
        assert!(!hero.spend_dodge());
    }
}
