//! Status effects, characters and hit resolution for real-time combat.
//!
//! `combat-core` holds the stateful half of the combat engine: every
//! character's [`StatusEffectRegistry`], the life and resource pools it
//! protects, and the combat functions that route hits and effect
//! applications between characters. Decision making lives in
//! `combat-runtime`, which reads this crate's state and calls back into it.
//!
//! Every mutating entry point is gated by [`Authority`]: only the single
//! authoritative copy changes, replicas accept snapshots.
pub mod authority;
pub mod character;
pub mod combat;
pub mod config;
pub mod error;
pub mod status;

pub use authority::Authority;
pub use character::{
    Character, CharacterError, CharacterId, CharacterSnapshot, CharacterSpec, CharacterTable,
    Meter, Team,
};
pub use combat::{
    Consumption, EffectResolution, EffectSpec, HitOutcome, HitResult, apply_effect, apply_on_hit,
    resolve_hit,
};
pub use config::CombatConfig;
pub use error::{CombatError, ErrorSeverity, report};
pub use status::{
    ApplyHook, ApplyOutcome, EffectError, EffectPayload, KindFlags, MaxStackRule,
    RegistrySnapshot, RemovalReason, StatusEffect, StatusEffectDef, StatusEffectKind,
    StatusEffectRegistry, StatusEffectTable, StatusEvent, TickReport,
};
