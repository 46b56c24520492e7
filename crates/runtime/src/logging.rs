//! Diagnostic sink setup.
//!
//! Nothing in the simulation installs a subscriber on its own. Embedders (and
//! tests that want output) call [`init`] once at startup.

use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber filtered by `RUST_LOG`, defaulting to `info`.
///
/// Returns false if a global subscriber was already installed.
pub fn init() -> bool {
    init_with("info")
}

/// Like [`init`] with an explicit default directive when `RUST_LOG` is unset.
pub fn init_with(default_directive: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    #[test]
    fn second_init_reports_existing_subscriber() {
        super::init_with("warn");
        assert!(!super::init());
    }
}
