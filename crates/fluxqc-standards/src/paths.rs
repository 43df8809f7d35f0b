//! Resource directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the resources directory.
pub const RESOURCES_ENV_VAR: &str = "FLUXQC_RESOURCES_DIR";

/// Get the resources root directory.
///
/// Resolution order:
/// 1. `FLUXQC_RESOURCES_DIR` environment variable
/// 2. `resources/` directory relative to workspace root
pub fn resources_root() -> PathBuf {
    if let Ok(root) = std::env::var(RESOURCES_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../resources")
}

/// Default message table.
pub fn messages_path() -> PathBuf {
    resources_root().join("messages.csv")
}

/// Default variable dictionary.
pub fn dictionary_path() -> PathBuf {
    resources_root().join("variables.csv")
}
