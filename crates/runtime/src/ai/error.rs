//! Tree configuration errors.

use combat_core::{CombatError, ErrorSeverity};

/// A tree definition that cannot be turned into a usable tree.
///
/// All variants are configuration errors: the character falls back to the
/// minimal always-attack tree.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TreeError {
    /// A selector or sequence without children.
    #[error("empty {kind} at {path}")]
    EmptyComposite { kind: &'static str, path: String },

    /// The root can fail, leaving the character with nothing to do.
    #[error("root has no unconditional fallback task as its last child")]
    MissingFallback,

    /// A leaf parameter outside its valid range.
    #[error("invalid {name} = {value} at {path}")]
    InvalidParameter {
        name: &'static str,
        value: f32,
        path: String,
    },
}

impl CombatError for TreeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            TreeError::EmptyComposite { .. } => "TREE_EMPTY_COMPOSITE",
            TreeError::MissingFallback => "TREE_MISSING_FALLBACK",
            TreeError::InvalidParameter { .. } => "TREE_INVALID_PARAMETER",
        }
    }
}
