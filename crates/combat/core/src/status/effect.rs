//! A single live status effect.

use crate::character::CharacterId;

use super::def::StatusEffectDef;
use super::kind::StatusEffectKind;

/// Per-application overrides merged over a kind's defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectPayload {
    pub duration: Option<f32>,
    pub shield: Option<u32>,
    pub damage_per_tick: Option<u32>,
    pub speed_multiplier: Option<f32>,
}

impl EffectPayload {
    pub fn with_duration(duration: f32) -> Self {
        Self {
            duration: Some(duration),
            ..Self::default()
        }
    }

    pub fn with_shield(shield: u32) -> Self {
        Self {
            shield: Some(shield),
            ..Self::default()
        }
    }

    pub fn with_damage_per_tick(damage: u32) -> Self {
        Self {
            damage_per_tick: Some(damage),
            ..Self::default()
        }
    }
}

/// One active effect on one character.
///
/// # Invariants
///
/// - `1 <= stacks <= max_stacks` of the kind
/// - `remaining > 0` unless the kind is infinite
/// - `shield > 0` for shielded kinds
///
/// Instances violating the last two are removed by the registry on the same
/// call that crossed the threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    /// Seconds left before expiry.
    pub remaining: f32,
    /// Duration restored by a refresh.
    pub base_duration: f32,
    pub stacks: u8,
    /// Remaining shield pool.
    pub shield: u32,
    /// Shield pool restored by a refresh.
    pub base_shield: u32,
    /// Caster handle; may point at a character that no longer exists.
    pub source: Option<CharacterId>,
    pub damage_per_tick: u32,
    pub speed_multiplier: f32,
    /// Time accumulated toward the next periodic pulse.
    pub tick_progress: f32,
}

impl StatusEffect {
    /// Creates a fresh instance at one stack.
    pub fn new(
        kind: StatusEffectKind,
        def: &StatusEffectDef,
        source: Option<CharacterId>,
        payload: EffectPayload,
    ) -> Self {
        let duration = payload.duration.unwrap_or(def.base_duration).max(0.0);
        let shield = payload.shield.unwrap_or(def.shield);
        Self {
            kind,
            remaining: duration,
            base_duration: duration,
            stacks: 1,
            shield,
            base_shield: shield,
            source,
            damage_per_tick: payload.damage_per_tick.unwrap_or(def.damage_per_tick),
            speed_multiplier: payload.speed_multiplier.unwrap_or(def.speed_multiplier),
            tick_progress: 0.0,
        }
    }

    /// Periodic damage for one pulse at the current stack count.
    #[inline]
    pub fn pulse_damage(&self) -> u32 {
        self.damage_per_tick.saturating_mul(u32::from(self.stacks))
    }

    /// True once duration has run out (never for infinite kinds).
    #[inline]
    pub fn is_expired(&self, def: &StatusEffectDef) -> bool {
        !def.is_infinite() && self.remaining <= 0.0
    }

    /// True once a shielded kind has no pool left.
    #[inline]
    pub fn is_depleted(&self, def: &StatusEffectDef) -> bool {
        def.is_shielded() && self.shield == 0
    }
}
