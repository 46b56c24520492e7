//! Content loaders for reading runtime data from files.
//!
//! - [`ConfigLoader`]: [`RuntimeConfig`] from TOML
//! - [`TreeLoader`]: [`TreeDefinition`] from RON
//! - [`EffectTableLoader`]: status effect overrides from RON

use std::path::Path;

use combat_core::{StatusEffectDef, StatusEffectKind, StatusEffectTable};

use crate::ai::TreeDefinition;
use crate::config::RuntimeConfig;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Loader for runtime configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<RuntimeConfig> {
        let content = read_file(path)?;
        RuntimeConfig::from_toml_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))
    }
}

/// Loader for tree topologies from RON files.
pub struct TreeLoader;

impl TreeLoader {
    /// Parses and validates a tree definition.
    ///
    /// Validation errors are returned here so content problems surface at load
    /// time; [`crate::ai::spawn_tree`] still guards against them at spawn.
    pub fn load(path: &Path) -> LoadResult<TreeDefinition> {
        let content = read_file(path)?;
        let definition: TreeDefinition = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tree RON {}: {}", path.display(), e))?;
        definition
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid tree {}: {}", path.display(), e))?;
        Ok(definition)
    }
}

/// Loader for status effect table overrides from RON files.
pub struct EffectTableLoader;

impl EffectTableLoader {
    /// Loads overrides and applies them over the built-in table.
    ///
    /// RON format: `[(Burn, (base_duration: 2.0, max_stacks: 3)), ...]`;
    /// fields left out keep their generic defaults.
    pub fn load(path: &Path) -> LoadResult<StatusEffectTable> {
        let content = read_file(path)?;
        let overrides: Vec<(StatusEffectKind, StatusEffectDef)> = ron::from_str(&content)
            .map_err(|e| {
                anyhow::anyhow!("Failed to parse effect table RON {}: {}", path.display(), e)
            })?;

        tracing::debug!(
            target: "runtime::loaders",
            path = %path.display(),
            count = overrides.len(),
            "effect overrides loaded"
        );

        let mut table = StatusEffectTable::default();
        table.extend(overrides);
        Ok(table)
    }
}
