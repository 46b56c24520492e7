//! Leaf helpers: probabilistic activation and closure-backed leaves.

use rand::Rng;
use rand::RngCore;

use crate::node::{Checker, Task};
use crate::Status;

/// Draws a uniform value in `[0, 1)` and succeeds iff it is below `threshold`.
///
/// This is the single source of stochastic branching in a tree. The threshold
/// belongs to the tree, not to individual nodes, so one knob tunes a whole
/// character archetype. A threshold of `0.0` never activates and `1.0` always
/// does.
pub fn activation_roll<R: RngCore + ?Sized>(threshold: f32, rng: &mut R) -> bool {
    let draw: f32 = rng.r#gen();
    draw < threshold
}

/// Tree-level randomness handed to checkers during one evaluation.
pub struct Chance<'t> {
    threshold: f32,
    rng: &'t mut dyn RngCore,
}

impl<'t> Chance<'t> {
    /// Creates a chance source; the threshold is clamped to `[0, 1]`.
    pub fn new(threshold: f32, rng: &'t mut dyn RngCore) -> Self {
        Self {
            threshold: clamp_threshold(threshold),
            rng,
        }
    }

    /// The randomness threshold of the tree being evaluated.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Performs one activation roll against the tree threshold.
    pub fn roll(&mut self) -> bool {
        activation_roll(self.threshold, self.rng)
    }
}

pub(crate) fn clamp_threshold(threshold: f32) -> f32 {
    if threshold.is_nan() {
        0.0
    } else {
        threshold.clamp(0.0, 1.0)
    }
}

/// Checker that succeeds with the tree's randomness threshold as probability.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChanceChecker;

impl<C> Checker<C> for ChanceChecker {
    fn check(&self, _ctx: &C, chance: &mut Chance<'_>) -> bool {
        chance.roll()
    }

    fn name(&self) -> &'static str {
        "chance"
    }
}

/// Checker backed by a closure.
pub struct FnChecker<F> {
    name: &'static str,
    f: F,
}

impl<F> FnChecker<F> {
    pub fn new<C>(name: &'static str, f: F) -> Self
    where
        F: Fn(&C, &mut Chance<'_>) -> bool + Send,
    {
        Self { name, f }
    }
}

impl<C, F> Checker<C> for FnChecker<F>
where
    F: Fn(&C, &mut Chance<'_>) -> bool + Send,
{
    fn check(&self, ctx: &C, chance: &mut Chance<'_>) -> bool {
        (self.f)(ctx, chance)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Task backed by a closure.
pub struct FnTask<F> {
    name: &'static str,
    f: F,
}

impl<F> FnTask<F> {
    pub fn new<C>(name: &'static str, f: F) -> Self
    where
        F: FnMut(&mut C) -> Status + Send,
    {
        Self { name, f }
    }
}

impl<C, F> Task<C> for FnTask<F>
where
    F: FnMut(&mut C) -> Status + Send,
{
    fn run(&mut self, ctx: &mut C) -> Status {
        (self.f)(ctx)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn zero_threshold_never_activates() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!((0..1_000).all(|_| !activation_roll(0.0, &mut rng)));
    }

    #[test]
    fn full_threshold_always_activates() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!((0..1_000).all(|_| activation_roll(1.0, &mut rng)));
    }

    #[test]
    fn half_threshold_is_roughly_half() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let hits = (0..10_000)
            .filter(|_| activation_roll(0.5, &mut rng))
            .count();
        assert!((4_500..5_500).contains(&hits), "hits = {hits}");
    }

    #[test]
    fn chance_clamps_threshold() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(Chance::new(3.0, &mut rng).threshold(), 1.0);
        assert_eq!(Chance::new(-1.0, &mut rng).threshold(), 0.0);
        assert_eq!(Chance::new(f32::NAN, &mut rng).threshold(), 0.0);
    }
}
