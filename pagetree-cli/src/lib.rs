// All outline processing is in pagetree-core
// This CLI acts as a thin wrapper around the core library

use std::path::{Path, PathBuf};

// Re-export core types for convenience
pub use pagetree_core::*;

/// Per-user config location: `<config_dir>/pagetree/config.yaml`.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pagetree").join("config.yaml"))
}

/// Explicit `--config` wins, then the per-user file if it exists.
pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(PathBuf::from(path)),
        None => user_config_path().filter(|p| p.is_file()),
    }
}

/// `<stem>[_<config stem>]_<suffix>.<ext>` next to the working directory.
pub fn default_output_path(
    input: &Path,
    config: Option<&Path>,
    suffix: &str,
    format: OutputFormat,
) -> String {
    let input_name = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let config_suffix = config
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .map(|s| format!("_{s}"))
        .unwrap_or_default();
    format!("{input_name}{config_suffix}_{suffix}.{}", format.extension())
}
