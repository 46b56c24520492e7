//! Real-time combat runtime.
//!
//! This crate drives `combat-core` characters with `behavior-tree` decision
//! trees at a fixed tick, and publishes what happened for replication.
//!
//! Modules are organized by responsibility:
//! - [`simulation`] hosts the fixed-order step and authority handling
//! - [`ai`] provides the blackboard, leaves, tree definitions and archetypes
//! - [`sensors`] defines the trigger predicates consumed by leaves
//! - [`events`] provides the topic-based event bus
//! - [`config`], [`loaders`] and [`logging`] cover startup
pub mod ai;
pub mod config;
pub mod error;
pub mod events;
pub mod loaders;
pub mod logging;
pub mod sensors;
pub mod simulation;

pub use ai::{
    AiContext, Archetype, ArchetypeParams, CheckerSpec, CombatAction, CombatTree, TaskSpec,
    TreeDefinition, TreeError, fallback_tree, spawn_tree,
};
pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use events::{CombatEvent, DecisionEvent, Event, EventBus, Topic};
pub use loaders::{ConfigLoader, EffectTableLoader, LoadResult, TreeLoader};
pub use sensors::{SensorReadings, SharedSensors, TriggerPredicates};
pub use simulation::{AttackProfile, Simulation, StepReport};
