//! Integer pools (life, resource) tracked per character.

/// Integer meter with a fixed maximum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meter {
    pub current: u32,
    pub maximum: u32,
}

impl Meter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    /// A meter starting at its maximum.
    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    /// Removes up to `amount` and returns how much was actually removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.current);
        self.current -= taken;
        taken
    }

    /// Adds up to `amount` (capped at maximum) and returns how much was added.
    pub fn fill(&mut self, amount: u32) -> u32 {
        let added = amount.min(self.maximum - self.current);
        self.current += added;
        added
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Fill ratio in `[0, 1]`; an empty-capacity meter reads as full.
    pub fn ratio(&self) -> f32 {
        if self.maximum == 0 {
            return 1.0;
        }
        self.current as f32 / self.maximum as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_and_fill_clamp() {
        let mut meter = Meter::full(10);
        assert_eq!(meter.drain(4), 4);
        assert_eq!(meter.drain(20), 6);
        assert!(meter.is_empty());
        assert_eq!(meter.fill(15), 10);
        assert_eq!(meter.current, 10);
    }

    #[test]
    fn new_clamps_to_maximum() {
        assert_eq!(Meter::new(50, 20).current, 20);
        assert_eq!(Meter::new(0, 0).ratio(), 1.0);
    }
}
