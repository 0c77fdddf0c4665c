//! Locating feature files on disk.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use walkdir::WalkDir;

/// Collect every `.feature` file beneath `root`, sorted by path.
///
/// # Errors
///
/// Returns an error if `root` or one of its subdirectories cannot be read.
pub fn discover_features(root: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry =
            entry.wrap_err_with(|| format!("failed to scan features in {}", root.display()))?;
        if entry.file_type().is_file() && is_feature_file(entry.path()) {
            found.push(entry.into_path());
        }
    }
    found.sort();
    log::debug!("discovered {} feature files under {}", found.len(), root.display());
    Ok(found)
}

fn is_feature_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "feature")
}
