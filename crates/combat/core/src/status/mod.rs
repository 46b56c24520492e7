//! Status effect system.
//!
//! Status effects are timed, stacking, optionally shielded modifiers on a
//! character. Kinds are a closed set ([`StatusEffectKind`]); what each kind
//! does is data ([`StatusEffectDef`]) looked up in a shared
//! [`StatusEffectTable`]. Each character owns one [`StatusEffectRegistry`].
//!
//! # Time
//!
//! Durations are seconds of simulation time. An instance is removed on the
//! same call that brings its remaining duration to zero or below, so a live
//! instance always has time left (infinite kinds excepted).

pub mod def;
pub mod effect;
pub mod error;
pub mod events;
pub mod kind;
pub mod registry;

pub use def::{ApplyHook, MaxStackRule, StatusEffectDef, StatusEffectTable};
pub use effect::{EffectPayload, StatusEffect};
pub use error::EffectError;
pub use events::{RemovalReason, StatusEvent};
pub use kind::{KindFlags, StatusEffectKind};
pub use registry::{ApplyOutcome, RegistrySnapshot, StatusEffectRegistry, TickReport};
