/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Seconds of invulnerability granted by a successful dodge.
    pub dodge_invulnerability: f32,
    /// Dodge charges a character spawns with.
    pub dodge_charges: u8,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Fixed roster size per match.
    pub const MAX_CHARACTERS: usize = 64;
    /// Distinct effect kinds that may be live on one character at once.
    pub const MAX_STATUS_EFFECTS: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DODGE_INVULNERABILITY: f32 = 0.4;
    pub const DEFAULT_DODGE_CHARGES: u8 = 2;

    pub fn new() -> Self {
        Self {
            dodge_invulnerability: Self::DEFAULT_DODGE_INVULNERABILITY,
            dodge_charges: Self::DEFAULT_DODGE_CHARGES,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
