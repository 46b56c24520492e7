//! Composite node evaluation.
//!
//! Composite nodes control the execution flow of their children. This module
//! implements the two combinators behind [`DecisionNode::Selector`] (OR logic)
//! and [`DecisionNode::Sequence`] (AND logic).
//!
//! Neither combinator remembers which child was active last tick. A `Running`
//! child stops the walk and is reported upward; next tick the walk starts from
//! the first child again.

use crate::leaf::Chance;
use crate::{DecisionNode, Status};

/// Tries children in declaration order until one does not fail.
///
/// # Semantics
///
/// - If a child returns `Success`, the selector **stops immediately** and returns `Success`
/// - If a child returns `Running`, the selector **stops** and returns `Running`
/// - If a child returns `Failure`, the selector **continues** to the next child
/// - If all children return `Failure`, the selector returns `Failure`
pub(crate) fn select<C>(
    children: &mut [DecisionNode<C>],
    ctx: &mut C,
    chance: &mut Chance<'_>,
) -> Status {
    for child in children.iter_mut() {
        match child.evaluate(ctx, chance) {
            Status::Failure => continue,
            status => return status,
        }
    }
    Status::Failure
}

/// Runs children in declaration order until one does not succeed.
///
/// # Semantics
///
/// - If a child returns `Failure`, the sequence **stops immediately** and returns `Failure`
/// - If a child returns `Running`, the sequence **stops** and returns `Running`
/// - If a child returns `Success`, the sequence **continues** to the next child
/// - If all children return `Success`, the sequence returns `Success`
pub(crate) fn sequence<C>(
    children: &mut [DecisionNode<C>],
    ctx: &mut C,
    chance: &mut Chance<'_>,
) -> Status {
    for child in children.iter_mut() {
        match child.evaluate(ctx, chance) {
            Status::Success => continue,
            status => return status,
        }
    }
    Status::Success
}
