//! Project root resolution.

use std::path::PathBuf;

/// Directory that holds the dataset for this invocation.
///
/// The first workspace root that exists as a directory wins. Without one, the
/// current directory is used, then the home directory, then `.`.
pub fn resolve_project_root(workspaces: &[PathBuf]) -> PathBuf {
    if let Some(root) = workspaces.iter().find(|w| w.is_dir()) {
        return root.clone();
    }

    if !workspaces.is_empty() {
        tracing::warn!("no workspace root exists, falling back");
    }

    std::env::current_dir()
        .ok()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
