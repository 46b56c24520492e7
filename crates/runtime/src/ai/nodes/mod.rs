//! Checker and task leaves over [`AiContext`](crate::ai::AiContext).

pub mod checkers;
pub mod tasks;

pub use checkers::{
    HasDodgeCharge, HasState, IsCasting, IsDodging, IsInHostileZone, IsIncapacitated,
    IsInProjectilePath, IsLifeBelow, IsThreatImminent,
};
pub use tasks::{ApplySelfState, Attack, Dodge, ExitZone, Idle, Reposition};
