//! Trigger predicates consumed by decision nodes.
//!
//! Geometry (zones, projectiles, casting bars) is owned by the embedding game.
//! The runtime only asks yes/no questions through [`TriggerPredicates`].

use std::sync::Arc;

/// Boolean sensors for one character.
///
/// Implementations must be pure and cheap: they are queried every tick,
/// possibly several times per evaluation.
pub trait TriggerPredicates: Send + Sync {
    /// Standing inside a hostile area effect right now.
    fn is_in_hostile_zone(&self) -> bool;

    /// A hostile zone will cover this position within `margin_seconds`.
    fn is_hostile_zone_imminent(&self, margin_seconds: f32) -> bool;

    /// Inside the path of a projectile in flight.
    fn is_in_projectile_path(&self) -> bool;

    /// Currently channeling or casting.
    fn is_casting(&self) -> bool;
}

/// Shared sensor handle attached to a controller.
pub type SharedSensors = Arc<dyn TriggerPredicates>;

/// Plain-value sensor readings.
///
/// Used by headless simulation and tests, where the "geometry" is whatever
/// the caller wrote into the fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SensorReadings {
    pub in_hostile_zone: bool,
    /// Seconds until the nearest hostile zone lands here, if one is incoming.
    pub zone_eta: Option<f32>,
    pub in_projectile_path: bool,
    pub casting: bool,
}

impl SensorReadings {
    pub fn in_zone() -> Self {
        Self {
            in_hostile_zone: true,
            ..Self::default()
        }
    }

    pub fn zone_in(eta: f32) -> Self {
        Self {
            zone_eta: Some(eta),
            ..Self::default()
        }
    }

    pub fn projectile() -> Self {
        Self {
            in_projectile_path: true,
            ..Self::default()
        }
    }

    pub fn shared(self) -> SharedSensors {
        Arc::new(self)
    }
}

impl TriggerPredicates for SensorReadings {
    fn is_in_hostile_zone(&self) -> bool {
        self.in_hostile_zone
    }

    fn is_hostile_zone_imminent(&self, margin_seconds: f32) -> bool {
        self.zone_eta.is_some_and(|eta| eta <= margin_seconds)
    }

    fn is_in_projectile_path(&self) -> bool {
        self.in_projectile_path
    }

    fn is_casting(&self) -> bool {
        self.casting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imminence_respects_margin() {
        let sensors = SensorReadings::zone_in(0.8);
        assert!(sensors.is_hostile_zone_imminent(1.0));
        assert!(!sensors.is_hostile_zone_imminent(0.5));
        assert!(!SensorReadings::default().is_hostile_zone_imminent(10.0));
    }
}
