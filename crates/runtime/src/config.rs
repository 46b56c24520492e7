//! Runtime configuration.

use combat_core::CombatConfig;
use serde::{Deserialize, Serialize};

use crate::ai::ArchetypeParams;
use crate::error::{Result, RuntimeError};

/// Tunables of one simulation, usually loaded from TOML.
///
/// ```toml
/// tick_seconds = 0.05
/// seed = 7
/// randomness = 0.8
///
/// [combat]
/// dodge_charges = 3
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Fixed simulation step in seconds.
    pub tick_seconds: f32,
    /// Base seed; each tree is seeded from it and its character id.
    pub seed: u64,
    /// Tree-level randomness threshold in `[0, 1]`.
    pub randomness: f32,
    /// Seconds of warning that make a zone imminent.
    pub threat_margin: f32,
    /// Ticks a dodge lasts.
    pub dodge_ticks: u32,
    /// Damage of a basic attack.
    pub attack_damage: u32,
    /// Per-topic event bus capacity.
    pub event_buffer: usize,
    pub combat: CombatConfig,
}

impl RuntimeConfig {
    pub const DEFAULT_TICK_SECONDS: f32 = 0.1;
    pub const DEFAULT_RANDOMNESS: f32 = 0.8;
    pub const DEFAULT_THREAT_MARGIN: f32 = 0.5;
    pub const DEFAULT_DODGE_TICKS: u32 = 3;
    pub const DEFAULT_ATTACK_DAMAGE: u32 = 10;
    pub const DEFAULT_EVENT_BUFFER: usize = 256;

    /// Parses TOML and validates the result.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| RuntimeError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.tick_seconds.is_finite() && self.tick_seconds > 0.0) {
            return Err(RuntimeError::InvalidConfig(format!(
                "tick_seconds must be positive, got {}",
                self.tick_seconds
            )));
        }
        if !(0.0..=1.0).contains(&self.randomness) {
            return Err(RuntimeError::InvalidConfig(format!(
                "randomness must be within [0, 1], got {}",
                self.randomness
            )));
        }
        if !(self.threat_margin.is_finite() && self.threat_margin >= 0.0) {
            return Err(RuntimeError::InvalidConfig(format!(
                "threat_margin must be non-negative, got {}",
                self.threat_margin
            )));
        }
        if self.event_buffer == 0 {
            return Err(RuntimeError::InvalidConfig(
                "event_buffer must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn archetype_params(&self) -> ArchetypeParams {
        ArchetypeParams {
            threat_margin: self.threat_margin,
            dodge_ticks: self.dodge_ticks,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_seconds: Self::DEFAULT_TICK_SECONDS,
            seed: 0,
            randomness: Self::DEFAULT_RANDOMNESS,
            threat_margin: Self::DEFAULT_THREAT_MARGIN,
            dodge_ticks: Self::DEFAULT_DODGE_TICKS,
            attack_damage: Self::DEFAULT_ATTACK_DAMAGE,
            event_buffer: Self::DEFAULT_EVENT_BUFFER,
            combat: CombatConfig::default(),
        }
    }
}
