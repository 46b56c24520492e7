//! Common error infrastructure for combat-core.
//!
//! Domain-specific errors (e.g. `EffectError`, `CharacterError`) live next to
//! the modules that raise them. Most of them never cross an API boundary:
//! mutation entry points clamp to a safe value and [`report`] the error so the
//! tick can continue.
//!
//! # Taxonomy
//!
//! - **Configuration**: missing references at construction time; fatal for the character
//! - **Sensor unavailable**: a leaf's collaborator is absent; the leaf fails closed
//! - **Invariant**: programmer error, clamped and logged
//! - **Authority**: mutation attempted on a replica; silently ignored, never an error

/// Severity level of an error, used for categorization and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Expected degradation, recovered on the next tick.
    ///
    /// Examples: sensor component missing, roster full on optional spawn
    Recoverable,

    /// Invalid input that was rejected.
    ///
    /// Examples: unknown character id
    Validation,

    /// Unexpected state inconsistency; indicates a bug.
    ///
    /// Examples: shield hit on a non-shielded kind, stack underflow
    Internal,

    /// The character or tree cannot be used.
    ///
    /// Examples: tree definition without a fallback branch
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all combat errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Logs an error that was recovered locally.
///
/// Internal and fatal errors are logged at error level, the rest at warn.
pub fn report<E: CombatError>(error: &E) {
    let severity = error.severity();
    if severity.is_internal() {
        tracing::error!(
            target: "combat::error",
            code = error.error_code(),
            severity = severity.as_str(),
            "{}", error
        );
    } else {
        tracing::warn!(
            target: "combat::error",
            code = error.error_code(),
            severity = severity.as_str(),
            "{}", error
        );
    }
}
