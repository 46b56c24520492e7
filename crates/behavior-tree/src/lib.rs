//! Tick-driven behavior tree library for real-time combat agents.
//!
//! This library provides a small, deterministic behavior tree that is
//! re-evaluated from the root once per simulation tick.
//!
//! - **Fresh evaluation**: no running-child pointer survives between ticks
//! - **Running state**: multi-tick tasks keep their own progress and report `Running`
//! - **Read-only checkers**: conditions borrow the context immutably
//! - **Deterministic randomness**: one seeded stream and one threshold per tree
//!
//! # Architecture
//!
//! - [`DecisionNode`]: one node type with four variants (selector, sequence, checker, task)
//! - [`Checker`] / [`Task`]: leaf contracts
//! - [`Status`]: Success, Failure or Running
//! - [`BehaviorTree`]: owns the root and the randomness threshold
//! - [`activation_roll`]: the probabilistic activation helper

pub mod builder;
mod composite;
pub mod leaf;
pub mod node;
pub mod status;
pub mod tree;

// Re-export core types for ergonomic API
pub use leaf::{Chance, ChanceChecker, FnChecker, FnTask, activation_roll};
pub use node::{Checker, DecisionNode, NodeKind, Task};
pub use status::Status;
pub use tree::BehaviorTree;
