//! Decision node contract.
//!
//! A behavior tree is built from one node type, [`DecisionNode`], with four
//! variants. Composites ([`DecisionNode::Selector`], [`DecisionNode::Sequence`])
//! own an ordered list of children. Leaves wrap a [`Checker`] (pure read) or a
//! [`Task`] (the only place side effects are allowed).
//!
//! The tree is generic over a context type `C`, which is the blackboard the
//! leaves read from and, for tasks, write to.

use crate::composite;
use crate::leaf::Chance;
use crate::Status;

/// A read-only condition leaf.
///
/// Checkers receive the context by shared reference, so they cannot mutate
/// it. They answer with a boolean, which the tree maps to `Success` or
/// `Failure`; a checker can never be `Running`.
pub trait Checker<C>: Send {
    /// Evaluates the condition.
    ///
    /// `chance` exposes the tree-level randomness threshold for probabilistic
    /// checkers. Deterministic checkers simply ignore it.
    fn check(&self, ctx: &C, chance: &mut Chance<'_>) -> bool;

    /// Name used in diagnostics.
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// An action leaf.
///
/// Tasks take `&mut self` so multi-tick actions can keep their own progress
/// between ticks and report `Running` until they resolve. A task whose
/// precondition does not hold returns `Failure`; it must not panic.
pub trait Task<C>: Send {
    /// Runs (or continues) the action for this tick.
    fn run(&mut self, ctx: &mut C) -> Status;

    /// Name used in diagnostics.
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Discriminant of a [`DecisionNode`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Selector,
    Sequence,
    Checker,
    Task,
}

/// One unit of a behavior tree.
///
/// # Invariants
///
/// - Composite nodes have at least one child (enforced by the constructors).
/// - Leaf nodes have no children.
/// - Topology never changes after construction.
pub enum DecisionNode<C> {
    /// Tries children left to right; the first `Success` wins.
    Selector(Vec<DecisionNode<C>>),
    /// Runs children left to right; the first `Failure` aborts.
    Sequence(Vec<DecisionNode<C>>),
    /// Pure condition.
    Checker(Box<dyn Checker<C>>),
    /// Side-effecting action.
    Task(Box<dyn Task<C>>),
}

impl<C> DecisionNode<C> {
    /// Creates a selector node.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A selector with no children is
    /// meaningless and indicates a programming error. Trees assembled from
    /// data are validated before reaching this constructor.
    pub fn selector(children: Vec<DecisionNode<C>>) -> Self {
        assert!(
            !children.is_empty(),
            "Selector must have at least one child"
        );
        DecisionNode::Selector(children)
    }

    /// Creates a sequence node.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn sequence(children: Vec<DecisionNode<C>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        DecisionNode::Sequence(children)
    }

    /// Wraps a checker as a leaf node.
    pub fn checker(checker: impl Checker<C> + 'static) -> Self {
        DecisionNode::Checker(Box::new(checker))
    }

    /// Wraps a task as a leaf node.
    pub fn task(task: impl Task<C> + 'static) -> Self {
        DecisionNode::Task(Box::new(task))
    }

    /// Evaluates this node for the current tick.
    pub fn evaluate(&mut self, ctx: &mut C, chance: &mut Chance<'_>) -> Status {
        match self {
            DecisionNode::Selector(children) => composite::select(children, ctx, chance),
            DecisionNode::Sequence(children) => composite::sequence(children, ctx, chance),
            DecisionNode::Checker(checker) => Status::from_check(checker.check(ctx, chance)),
            DecisionNode::Task(task) => task.run(ctx),
        }
    }

    /// Returns the variant of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            DecisionNode::Selector(_) => NodeKind::Selector,
            DecisionNode::Sequence(_) => NodeKind::Sequence,
            DecisionNode::Checker(_) => NodeKind::Checker,
            DecisionNode::Task(_) => NodeKind::Task,
        }
    }

    /// Direct children (empty for leaves).
    pub fn children(&self) -> &[DecisionNode<C>] {
        match self {
            DecisionNode::Selector(children) | DecisionNode::Sequence(children) => children,
            DecisionNode::Checker(_) | DecisionNode::Task(_) => &[],
        }
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    /// Depth of the subtree rooted here (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(DecisionNode::depth)
            .max()
            .unwrap_or(0)
    }

    /// Label of the node: the leaf's name, or the composite kind.
    pub fn label(&self) -> &'static str {
        match self {
            DecisionNode::Selector(_) => "selector",
            DecisionNode::Sequence(_) => "sequence",
            DecisionNode::Checker(checker) => checker.name(),
            DecisionNode::Task(task) => task.name(),
        }
    }
}

impl<C> core::fmt::Debug for DecisionNode<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecisionNode::Selector(children) => f.debug_tuple("Selector").field(children).finish(),
            DecisionNode::Sequence(children) => f.debug_tuple("Sequence").field(children).finish(),
            DecisionNode::Checker(checker) => write!(f, "Checker({})", checker.name()),
            DecisionNode::Task(task) => write!(f, "Task({})", task.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::{FnChecker, FnTask};

    fn leaf_ok() -> DecisionNode<()> {
        DecisionNode::task(FnTask::new("ok", |_: &mut ()| Status::Success))
    }

    #[test]
    fn depth_and_children() {
        let tree = DecisionNode::selector(vec![
            DecisionNode::sequence(vec![
                DecisionNode::checker(FnChecker::new("yes", |_: &(), _| true)),
                leaf_ok(),
            ]),
            leaf_ok(),
        ]);

        assert_eq!(tree.kind(), NodeKind::Selector);
        assert_eq!(tree.child_count(), 2);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.children()[1].child_count(), 0);
        assert_eq!(tree.children()[0].children()[0].label(), "yes");
    }

    #[test]
    #[should_panic(expected = "Selector must have at least one child")]
    fn empty_selector_panics() {
        let _ = DecisionNode::<()>::selector(Vec::new());
    }

    #[test]
    #[should_panic(expected = "Sequence must have at least one child")]
    fn empty_sequence_panics() {
        let _ = DecisionNode::<()>::sequence(Vec::new());
    }
}
