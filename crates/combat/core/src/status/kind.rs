//! Status effect identities and their semantic flags.

use bitflags::bitflags;

/// Closed set of status effect identities.
///
/// The behavior of each kind (duration, stack cap, tick cadence, hooks) is
/// data in a [`StatusEffectTable`](super::StatusEffectTable), not code here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    // ========================================================================
    // Crowd Control (forces the no-op branch)
    // ========================================================================
    /// Hard stun: cannot act.
    Stun,

    /// Frozen solid: cannot act or move.
    Frozen,

    /// Displaced: cannot act while airborne.
    Knockback,

    // ========================================================================
    // Buffs
    // ========================================================================
    /// Takes no damage.
    Invulnerable,

    /// Cannot be targeted by enemies.
    Invisible,

    /// Absorbs incoming damage until its pool is spent.
    Barrier,

    // ========================================================================
    // Debuffs
    // ========================================================================
    /// Stacking chill; freezes at max stacks.
    Frost,

    /// Stacking slow; stuns at max stacks.
    Slow,

    /// Fire damage over time.
    Burn,

    /// Poison damage over time.
    Poison,

    /// Lingering curse with no expiry.
    Cursed,

    /// Marker consumed by [`StatusEffectKind::Execute`].
    Marked,

    // ========================================================================
    // Amplifiers (consume a marker kind)
    // ========================================================================
    /// Converts `Marked` stacks into burst damage and a stun.
    Execute,

    /// Converts `Frost` stacks into burst damage and a freeze.
    Shatter,

    // ========================================================================
    // Custom
    // ========================================================================
    /// Spell-driven aura identified by the spell's aura slot.
    Aura(u8),
}

impl StatusEffectKind {
    /// Every kind except the open-ended [`StatusEffectKind::Aura`] family.
    pub const BUILTIN: [StatusEffectKind; 14] = [
        StatusEffectKind::Stun,
        StatusEffectKind::Frozen,
        StatusEffectKind::Knockback,
        StatusEffectKind::Invulnerable,
        StatusEffectKind::Invisible,
        StatusEffectKind::Barrier,
        StatusEffectKind::Frost,
        StatusEffectKind::Slow,
        StatusEffectKind::Burn,
        StatusEffectKind::Poison,
        StatusEffectKind::Cursed,
        StatusEffectKind::Marked,
        StatusEffectKind::Execute,
        StatusEffectKind::Shatter,
    ];

    /// Variant label for logs (auras share one label).
    pub fn label(self) -> &'static str {
        self.into()
    }
}

bitflags! {
    /// Fixed semantic properties of a kind.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct KindFlags: u16 {
        /// Duration never counts down.
        const INFINITE       = 1 << 0;
        /// Carries a shield pool; removed when the pool reaches zero.
        const SHIELDED       = 1 << 1;
        /// The character cannot act while this is live.
        const INCAPACITATING = 1 << 2;
        /// Enemies cannot pick this character as a target.
        const UNTARGETABLE   = 1 << 3;
        /// Incoming hits deal no damage.
        const INVULNERABLE   = 1 << 4;
        /// Harmful to the bearer.
        const DEBUFF         = 1 << 5;
        /// Never persists; only the kind's apply hook fires.
        const INSTANT        = 1 << 6;
    }
}
