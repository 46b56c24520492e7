//! Topic-based event bus for replication.
//!
//! The simulation publishes status transitions, combat resolutions and tree
//! outcomes; the networking collaborator subscribes to the topics it needs.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CombatEvent, DecisionEvent};
