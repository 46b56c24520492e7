//! Per-kind definitions and the lookup table.

use std::collections::HashMap;

use super::kind::{KindFlags, StatusEffectKind};

/// Side effect declared for reaching a kind's stack cap.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaxStackRule {
    /// Remove the capped instance and apply `into` for a fixed duration.
    Transform {
        into: StatusEffectKind,
        duration: f32,
    },
}

/// Effect-specific hook run when the kind is applied to a target.
///
/// Hooks are what pair kinds together; the registry itself only offers the
/// apply/refresh/remove/shield primitives.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ApplyHook {
    /// Consumption chain.
    ///
    /// Without `marker` on the target, `marker` is applied instead and this
    /// kind's own effect does not fire. With `marker` present, all of its
    /// stacks are removed and converted into `burst_per_stack` damage per
    /// stack, `resource_per_stack` resource for the caster per stack, and a
    /// forced `stun` lasting `stun_duration` seconds.
    Consume {
        marker: StatusEffectKind,
        burst_per_stack: u32,
        resource_per_stack: u32,
        stun: StatusEffectKind,
        stun_duration: f32,
    },
}

/// Static properties of one kind.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatusEffectDef {
    /// Seconds an instance lasts after each application.
    pub base_duration: f32,
    /// Stack cap (at least 1).
    pub max_stacks: u8,
    /// Seconds between periodic pulses; `0` disables pulses.
    pub tick_interval: f32,
    /// Damage dealt per pulse, per stack.
    pub damage_per_tick: u32,
    /// Initial shield pool for shielded kinds.
    pub shield: u32,
    /// Movement multiplier while active.
    pub speed_multiplier: f32,
    pub flags: KindFlags,
    pub on_max_stacks: Option<MaxStackRule>,
    pub on_apply: Option<ApplyHook>,
}

impl Default for StatusEffectDef {
    fn default() -> Self {
        Self {
            base_duration: 1.0,
            max_stacks: 1,
            tick_interval: 0.0,
            damage_per_tick: 0,
            shield: 0,
            speed_multiplier: 1.0,
            flags: KindFlags::empty(),
            on_max_stacks: None,
            on_apply: None,
        }
    }
}

impl StatusEffectDef {
    pub fn timed(base_duration: f32, flags: KindFlags) -> Self {
        Self {
            base_duration,
            flags,
            ..Self::default()
        }
    }

    pub fn with_max_stacks(mut self, max_stacks: u8) -> Self {
        self.max_stacks = max_stacks.max(1);
        self
    }

    pub fn with_ticks(mut self, interval: f32, damage_per_tick: u32) -> Self {
        self.tick_interval = interval;
        self.damage_per_tick = damage_per_tick;
        self
    }

    pub fn with_shield(mut self, shield: u32) -> Self {
        self.shield = shield;
        self.flags |= KindFlags::SHIELDED;
        self
    }

    pub fn with_speed(mut self, multiplier: f32) -> Self {
        self.speed_multiplier = multiplier;
        self
    }

    pub fn on_max_stacks(mut self, rule: MaxStackRule) -> Self {
        self.on_max_stacks = Some(rule);
        self
    }

    pub fn on_apply(mut self, hook: ApplyHook) -> Self {
        self.on_apply = Some(hook);
        self
    }

    #[inline]
    pub fn is_infinite(&self) -> bool {
        self.flags.contains(KindFlags::INFINITE)
    }

    #[inline]
    pub fn is_shielded(&self) -> bool {
        self.flags.contains(KindFlags::SHIELDED)
    }

    #[inline]
    pub fn is_instant(&self) -> bool {
        self.flags.contains(KindFlags::INSTANT)
    }

    #[inline]
    pub fn has_ticks(&self) -> bool {
        self.tick_interval > 0.0
    }
}

/// Kind → definition lookup shared by every registry in a match.
///
/// Kinds without an explicit entry (typically new [`StatusEffectKind::Aura`]
/// slots) resolve to the aura fallback: infinite, single stack, no ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusEffectTable {
    defs: HashMap<StatusEffectKind, StatusEffectDef>,
    aura_fallback: StatusEffectDef,
}

impl StatusEffectTable {
    /// Creates a table with no explicit entries.
    pub fn empty() -> Self {
        Self {
            defs: HashMap::new(),
            aura_fallback: StatusEffectDef::timed(0.0, KindFlags::INFINITE),
        }
    }

    /// Looks up the definition of `kind`.
    pub fn get(&self, kind: StatusEffectKind) -> &StatusEffectDef {
        self.defs.get(&kind).unwrap_or(&self.aura_fallback)
    }

    /// Returns true if `kind` has an explicit entry.
    pub fn contains(&self, kind: StatusEffectKind) -> bool {
        self.defs.contains_key(&kind)
    }

    /// Inserts or replaces the definition of `kind`.
    pub fn set(&mut self, kind: StatusEffectKind, def: StatusEffectDef) {
        let def = StatusEffectDef {
            max_stacks: def.max_stacks.max(1),
            ..def
        };
        self.defs.insert(kind, def);
    }

    /// Builder form of [`StatusEffectTable::set`].
    pub fn with(mut self, kind: StatusEffectKind, def: StatusEffectDef) -> Self {
        self.set(kind, def);
        self
    }

    /// Applies every override on top of this table.
    pub fn extend(&mut self, overrides: impl IntoIterator<Item = (StatusEffectKind, StatusEffectDef)>) {
        for (kind, def) in overrides {
            self.set(kind, def);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StatusEffectKind, &StatusEffectDef)> {
        self.defs.iter()
    }
}

impl Default for StatusEffectTable {
    /// Built-in definitions for every [`StatusEffectKind::BUILTIN`] kind.
    fn default() -> Self {
        use StatusEffectKind::*;

        let cc = KindFlags::INCAPACITATING | KindFlags::DEBUFF;

        Self::empty()
            .with(Stun, StatusEffectDef::timed(1.5, cc))
            .with(Frozen, StatusEffectDef::timed(2.0, cc).with_speed(0.0))
            .with(Knockback, StatusEffectDef::timed(0.5, cc))
            .with(
                Invulnerable,
                StatusEffectDef::timed(1.0, KindFlags::INVULNERABLE),
            )
            .with(
                Invisible,
                StatusEffectDef::timed(4.0, KindFlags::UNTARGETABLE),
            )
            .with(
                Barrier,
                StatusEffectDef::timed(5.0, KindFlags::empty()).with_shield(50),
            )
            .with(
                Frost,
                StatusEffectDef::timed(4.0, KindFlags::DEBUFF)
                    .with_max_stacks(3)
                    .with_speed(0.85)
                    .on_max_stacks(MaxStackRule::Transform {
                        into: Frozen,
                        duration: 2.0,
                    }),
            )
            .with(
                Slow,
                StatusEffectDef::timed(3.0, KindFlags::DEBUFF)
                    .with_max_stacks(3)
                    .with_speed(0.7)
                    .on_max_stacks(MaxStackRule::Transform {
                        into: Stun,
                        duration: 1.0,
                    }),
            )
            .with(
                Burn,
                StatusEffectDef::timed(4.0, KindFlags::DEBUFF)
                    .with_max_stacks(5)
                    .with_ticks(1.0, 4),
            )
            .with(
                Poison,
                StatusEffectDef::timed(6.0, KindFlags::DEBUFF)
                    .with_max_stacks(5)
                    .with_ticks(1.0, 2),
            )
            .with(
                Cursed,
                StatusEffectDef::timed(0.0, KindFlags::INFINITE | KindFlags::DEBUFF),
            )
            .with(
                Marked,
                StatusEffectDef::timed(6.0, KindFlags::DEBUFF).with_max_stacks(3),
            )
            .with(
                Execute,
                StatusEffectDef::timed(0.0, KindFlags::INSTANT).on_apply(ApplyHook::Consume {
                    marker: Marked,
                    burst_per_stack: 15,
                    resource_per_stack: 10,
                    stun: Stun,
                    stun_duration: 1.0,
                }),
            )
            .with(
                Shatter,
                StatusEffectDef::timed(0.0, KindFlags::INSTANT).on_apply(ApplyHook::Consume {
                    marker: Frost,
                    burst_per_stack: 10,
                    resource_per_stack: 5,
                    stun: Frozen,
                    stun_duration: 1.5,
                }),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_builtin_kinds() {
        let table = StatusEffectTable::default();
        for kind in StatusEffectKind::BUILTIN {
            assert!(table.contains(kind), "{kind:?} missing");
        }
    }

    #[test]
    fn unknown_aura_uses_fallback() {
        let table = StatusEffectTable::default();
        let def = table.get(StatusEffectKind::Aura(7));
        assert!(def.is_infinite());
        assert_eq!(def.max_stacks, 1);
        assert!(!def.has_ticks());
    }

    #[test]
    fn set_clamps_zero_stack_cap() {
        let mut table = StatusEffectTable::empty();
        table.set(
            StatusEffectKind::Aura(1),
            StatusEffectDef {
                max_stacks: 0,
                ..StatusEffectDef::default()
            },
        );
        assert_eq!(table.get(StatusEffectKind::Aura(1)).max_stacks, 1);
    }

    #[test]
    fn with_shield_marks_kind_shielded() {
        let def = StatusEffectDef::timed(3.0, KindFlags::empty()).with_shield(10);
        assert!(def.is_shielded());
        assert_eq!(def.shield, 10);
    }
}
