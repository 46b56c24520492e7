//! Combat resolution.
//!
//! Free functions that route hits and effect applications into characters.
//! All of them are gated on the target being alive and on the roster being
//! authoritative; a gated call returns a neutral result and changes nothing.
//!
//! # Core Functions
//!
//! - `resolve_hit`: invulnerability check, shields, then life
//! - `apply_effect`: runs a kind's apply hook, otherwise `Registry::apply`
//! - `apply_on_hit`: a spell's on-hit effect list, once per hit

pub mod apply;
pub mod hit;

pub use apply::{Consumption, EffectResolution, EffectSpec, apply_effect, apply_on_hit};
pub use hit::{HitOutcome, HitResult, resolve_hit};
