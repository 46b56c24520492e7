//! Builder utilities for ergonomic behavior tree construction.
//!
//! This module provides helper functions to reduce boilerplate when building
//! behavior trees. Instead of writing `DecisionNode::checker(FnChecker::new(..))`,
//! you can use shorter functions like `check_fn(..)`.

use crate::leaf::{Chance, ChanceChecker, FnChecker, FnTask};
use crate::{Checker, DecisionNode, Status, Task};

/// Creates a sequence node.
///
/// Shorthand for `DecisionNode::sequence(children)`.
#[inline]
pub fn sequence<C>(children: Vec<DecisionNode<C>>) -> DecisionNode<C> {
    DecisionNode::sequence(children)
}

/// Creates a selector node.
///
/// Shorthand for `DecisionNode::selector(children)`.
#[inline]
pub fn selector<C>(children: Vec<DecisionNode<C>>) -> DecisionNode<C> {
    DecisionNode::selector(children)
}

/// Wraps a checker value.
#[inline]
pub fn checker<C>(checker: impl Checker<C> + 'static) -> DecisionNode<C> {
    DecisionNode::checker(checker)
}

/// Wraps a task value.
#[inline]
pub fn task<C>(task: impl Task<C> + 'static) -> DecisionNode<C> {
    DecisionNode::task(task)
}

/// Creates a checker from a closure.
#[inline]
pub fn check_fn<C, F>(name: &'static str, f: F) -> DecisionNode<C>
where
    F: Fn(&C, &mut Chance<'_>) -> bool + Send + 'static,
{
    DecisionNode::checker(FnChecker::new(name, f))
}

/// Creates a task from a closure.
#[inline]
pub fn task_fn<C, F>(name: &'static str, f: F) -> DecisionNode<C>
where
    F: FnMut(&mut C) -> Status + Send + 'static,
{
    DecisionNode::task(FnTask::new(name, f))
}

/// Creates a probabilistic checker driven by the tree's randomness threshold.
#[inline]
pub fn chance<C>() -> DecisionNode<C> {
    DecisionNode::checker(ChanceChecker)
}
