//! Per-character behavior tree.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::leaf::{Chance, clamp_threshold};
use crate::{DecisionNode, Status};

/// Owns the root node of one controlled character and its randomness knob.
///
/// The tree is evaluated once per simulation tick via [`BehaviorTree::tick`].
/// Every tick walks the tree from the root; no running-child pointer is kept.
/// The random stream is seeded, so a given seed and sequence of contexts
/// always produces the same decisions.
pub struct BehaviorTree<C> {
    root: DecisionNode<C>,
    randomness: f32,
    rng: ChaCha8Rng,
    last_status: Option<Status>,
}

impl<C> BehaviorTree<C> {
    /// Creates a tree with the given root, randomness threshold and seed.
    ///
    /// The threshold is clamped to `[0, 1]`.
    pub fn new(root: DecisionNode<C>, randomness: f32, seed: u64) -> Self {
        Self {
            root,
            randomness: clamp_threshold(randomness),
            rng: ChaCha8Rng::seed_from_u64(seed),
            last_status: None,
        }
    }

    /// Evaluates the root once for this tick.
    pub fn tick(&mut self, ctx: &mut C) -> Status {
        let mut chance = Chance::new(self.randomness, &mut self.rng);
        let status = self.root.evaluate(ctx, &mut chance);
        self.last_status = Some(status);
        status
    }

    /// Randomness threshold used by probabilistic checkers.
    pub fn randomness(&self) -> f32 {
        self.randomness
    }

    /// Retunes the randomness threshold (clamped to `[0, 1]`).
    pub fn set_randomness(&mut self, randomness: f32) {
        self.randomness = clamp_threshold(randomness);
    }

    /// Outcome of the most recent tick, for diagnostics.
    pub fn last_status(&self) -> Option<Status> {
        self.last_status
    }

    pub fn root(&self) -> &DecisionNode<C> {
        &self.root
    }
}

impl<C> core::fmt::Debug for BehaviorTree<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BehaviorTree")
            .field("root", &self.root)
            .field("randomness", &self.randomness)
            .field("last_status", &self.last_status)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{chance, selector, task_fn};

    fn coin_tree(randomness: f32, seed: u64) -> BehaviorTree<Vec<bool>> {
        let root = selector(vec![
            crate::builder::sequence(vec![
                chance(),
                task_fn("heads", |log: &mut Vec<bool>| {
                    log.push(true);
                    Status::Success
                }),
            ]),
            task_fn("tails", |log: &mut Vec<bool>| {
                log.push(false);
                Status::Success
            }),
        ]);
        BehaviorTree::new(root, randomness, seed)
    }

    #[test]
    fn same_seed_same_decisions() {
        let mut a = coin_tree(0.5, 99);
        let mut b = coin_tree(0.5, 99);
        let (mut log_a, mut log_b) = (Vec::new(), Vec::new());

        for _ in 0..64 {
            a.tick(&mut log_a);
            b.tick(&mut log_b);
        }

        assert_eq!(log_a, log_b);
        assert!(log_a.contains(&true) && log_a.contains(&false));
    }

    #[test]
    fn threshold_extremes_are_deterministic() {
        let mut never = coin_tree(0.0, 1);
        let mut always = coin_tree(1.0, 1);
        let (mut n, mut a) = (Vec::new(), Vec::new());

        for _ in 0..32 {
            never.tick(&mut n);
            always.tick(&mut a);
        }

        assert!(n.iter().all(|heads| !heads));
        assert!(a.iter().all(|heads| *heads));
    }

    #[test]
    fn set_randomness_clamps_and_records_last_status() {
        let mut tree = coin_tree(0.5, 3);
        tree.set_randomness(4.0);
        assert_eq!(tree.randomness(), 1.0);
        assert_eq!(tree.last_status(), None);

        tree.tick(&mut Vec::new());
        assert_eq!(tree.last_status(), Some(Status::Success));
    }
}
