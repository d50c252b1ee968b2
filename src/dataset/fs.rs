use std::path::Path;

use super::DatasetError;

/// Create `dir` and any missing parents.
///
/// Returns `true` when the directory was created and `false` when it was
/// already there. Any other failure (a file in the way, permissions) is
/// returned to the caller.
pub fn ensure_dir(dir: &Path) -> Result<bool, DatasetError> {
    if dir.is_dir() {
        tracing::info!(dir = %dir.display(), "Directory already exists, ignoring");
        return Ok(false);
    }

    std::fs::create_dir_all(dir)?;
    tracing::info!(dir = %dir.display(), "Directory created");
    Ok(true)
}
