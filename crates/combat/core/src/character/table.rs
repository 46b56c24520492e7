//! Fixed-capacity roster of characters.

use std::sync::Arc;

use crate::authority::Authority;
use crate::config::CombatConfig;
use crate::status::StatusEffectTable;

use super::{Character, CharacterError, CharacterId, CharacterSnapshot, CharacterSpec, Team};

/// Every character of a match, indexed by [`CharacterId`].
///
/// Ids are slot indices and are never reused, so a stale id held by an
/// effect or a tree simply misses after its character is despawned.
#[derive(Clone, Debug)]
pub struct CharacterTable {
    slots: Vec<Option<Character>>,
    authority: Authority,
    effects: Arc<StatusEffectTable>,
}

impl CharacterTable {
    pub fn new(effects: Arc<StatusEffectTable>, authority: Authority) -> Self {
        Self {
            slots: Vec::new(),
            authority,
            effects,
        }
    }

    pub fn authority(&self) -> Authority {
        self.authority
    }

    pub fn effect_table(&self) -> &Arc<StatusEffectTable> {
        &self.effects
    }

    /// Adds a character and returns its id.
    pub fn spawn(&mut self, spec: &CharacterSpec) -> Result<CharacterId, CharacterError> {
        if self.authority.is_replica() {
            return Err(CharacterError::NotAuthoritative);
        }
        if self.slots.len() >= CombatConfig::MAX_CHARACTERS {
            return Err(CharacterError::RosterFull {
                max: CombatConfig::MAX_CHARACTERS,
            });
        }

        let id = CharacterId(self.slots.len() as u32);
        self.slots.push(Some(Character::new(
            id,
            spec,
            Arc::clone(&self.effects),
            self.authority,
        )));
        tracing::debug!(target: "combat::character", %id, team = spec.team.0, "spawned");
        Ok(id)
    }

    /// Removes a character; its id stays retired.
    pub fn despawn(&mut self, id: CharacterId) -> Result<Character, CharacterError> {
        if self.authority.is_replica() {
            return Err(CharacterError::NotAuthoritative);
        }
        self.slots
            .get_mut(id.0 as usize)
            .and_then(Option::take)
            .ok_or(CharacterError::Unknown(id))
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.slots.get(id.0 as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.slots.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: CharacterId) -> bool {
        self.get(id).is_some()
    }

    /// Borrows two distinct characters mutably at once.
    pub fn pair_mut(
        &mut self,
        first: CharacterId,
        second: CharacterId,
    ) -> Option<(&mut Character, &mut Character)> {
        let (a, b) = (first.0 as usize, second.0 as usize);
        if a == b || a >= self.slots.len() || b >= self.slots.len() {
            return None;
        }
        if a < b {
            let (left, right) = self.slots.split_at_mut(b);
            Some((left[a].as_mut()?, right[0].as_mut()?))
        } else {
            let (left, right) = self.slots.split_at_mut(a);
            Some((right[0].as_mut()?, left[b].as_mut()?))
        }
    }

    /// Ids of every present character in ascending order.
    pub fn ids(&self) -> Vec<CharacterId> {
        self.iter().map(|c| c.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.slots.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Character> {
        self.slots.iter_mut().flatten()
    }

    /// Living characters not on `team` that can currently be targeted.
    pub fn targetable_enemies_of(&self, team: Team) -> impl Iterator<Item = &Character> {
        self.iter()
            .filter(move |c| c.team != team && c.is_alive() && !c.effects.is_untargetable())
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ========================================================================
    // Replication
    // ========================================================================

    pub fn snapshot(&self) -> Vec<CharacterSnapshot> {
        self.iter().map(Character::snapshot).collect()
    }

    /// Mirrors the authority's roster into this replica.
    ///
    /// Characters missing from `snapshots` are dropped and unseen ids are
    /// created. Returns false on the authoritative table.
    pub fn ingest(&mut self, snapshots: &[CharacterSnapshot]) -> bool {
        if self.authority.is_authoritative() {
            tracing::warn!(target: "combat::character", "snapshot ingest on authoritative table");
            return false;
        }

        let len = snapshots
            .iter()
            .map(|s| s.id.0 as usize + 1)
            .max()
            .unwrap_or(0)
            .min(CombatConfig::MAX_CHARACTERS);
        let mut slots: Vec<Option<Character>> = Vec::with_capacity(len);
        slots.resize_with(len, || None);

        for snapshot in snapshots {
            let index = snapshot.id.0 as usize;
            if index >= len {
                continue;
            }
            let mut character = match self.slots.get_mut(index).and_then(Option::take) {
                Some(existing) => existing,
                None => Character::new(
                    snapshot.id,
                    &CharacterSpec::new(snapshot.team, snapshot.life.maximum),
                    Arc::clone(&self.effects),
                    Authority::Replica,
                ),
            };
            character.apply_snapshot(snapshot);
            slots[index] = Some(character);
        }

        self.slots = slots;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{EffectPayload, StatusEffectKind};

    fn table(authority: Authority) -> CharacterTable {
        CharacterTable::new(Arc::new(StatusEffectTable::default()), authority)
    }

    #[test]
    fn ids_are_not_reused_after_despawn() {
        let mut roster = table(Authority::Authoritative);
        let a = roster.spawn(&CharacterSpec::new(Team(0), 10)).unwrap();
        let b = roster.spawn(&CharacterSpec::new(Team(1), 10)).unwrap();

        roster.despawn(a).unwrap();
        let c = roster.spawn(&CharacterSpec::new(Team(1), 10)).unwrap();

        assert!(roster.get(a).is_none());
        assert_eq!(roster.ids(), vec![b, c]);
        assert_eq!(roster.despawn(a).unwrap_err(), CharacterError::Unknown(a));
    }

    #[test]
    fn pair_mut_rejects_aliasing() {
        let mut roster = table(Authority::Authoritative);
        let a = roster.spawn(&CharacterSpec::new(Team(0), 10)).unwrap();
        let b = roster.spawn(&CharacterSpec::new(Team(1), 10)).unwrap();

        assert!(roster.pair_mut(a, a).is_none());
        let (second, first) = roster.pair_mut(b, a).unwrap();
        assert_eq!(second.id, b);
        assert_eq!(first.id, a);
    }

    #[test]
    fn untargetable_enemies_are_skipped() {
        let mut roster = table(Authority::Authoritative);
        let _ally = roster.spawn(&CharacterSpec::new(Team(0), 10)).unwrap();
        let seen = roster.spawn(&CharacterSpec::new(Team(1), 10)).unwrap();
        let hidden = roster.spawn(&CharacterSpec::new(Team(1), 10)).unwrap();
        roster
            .get_mut(hidden)
            .unwrap()
            .effects
            .apply(StatusEffectKind::Invisible, None, EffectPayload::default());

        let ids: Vec<_> = roster.targetable_enemies_of(Team(0)).map(|c| c.id).collect();
        assert_eq!(ids, vec![seen]);
    }

    #[test]
    fn replica_cannot_spawn_or_despawn_but_ingests() {
        let mut owner = table(Authority::Authoritative);
        let a = owner.spawn(&CharacterSpec::new(Team(0), 10)).unwrap();
        let b = owner.spawn(&CharacterSpec::new(Team(1), 30)).unwrap();
        owner.get_mut(b).unwrap().take_damage(12);
        owner.despawn(a).unwrap();

        let mut replica = table(Authority::Replica);
        assert_eq!(
            replica.spawn(&CharacterSpec::new(Team(0), 10)),
            Err(CharacterError::NotAuthoritative)
        );
        assert!(replica.ingest(&owner.snapshot()));

        assert!(replica.get(a).is_none());
        let mirrored = replica.get(b).unwrap();
        assert_eq!(mirrored.life.current, 18);
        assert_eq!(mirrored.authority(), Authority::Replica);

        assert!(matches!(
            replica.despawn(b),
            Err(CharacterError::NotAuthoritative)
        ));
        assert!(replica.contains(b));
        assert!(!owner.ingest(&replica.snapshot()));
    }

    #[test]
    fn roster_is_bounded() {
        let mut roster = table(Authority::Authoritative);
        for _ in 0..CombatConfig::MAX_CHARACTERS {
            roster.spawn(&CharacterSpec::new(Team(0), 1)).unwrap();
        }
        assert!(matches!(
            roster.spawn(&CharacterSpec::new(Team(0), 1)),
            Err(CharacterError::RosterFull { .. })
        ));
    }
}
