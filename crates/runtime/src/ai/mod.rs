//! Combat decision making on top of `behavior-tree`.
//!
//! # Organization
//!
//! - [`context`]: the per-tick [`AiContext`] blackboard
//! - [`nodes`]: checker and task leaves
//! - [`definition`]: serializable topology and validation
//! - [`archetype`]: built-in topologies

pub mod action;
pub mod archetype;
pub mod context;
pub mod definition;
pub mod error;
pub mod nodes;

pub use action::CombatAction;
pub use archetype::{Archetype, ArchetypeParams};
pub use context::AiContext;
pub use definition::{CheckerSpec, TaskSpec, TreeDefinition, fallback_tree, spawn_tree};
pub use error::TreeError;

/// Behavior tree over [`AiContext`].
pub type CombatTree = behavior_tree::BehaviorTree<AiContext>;
