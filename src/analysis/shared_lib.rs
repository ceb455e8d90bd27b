use crate::error::{MigrateError, Result};
use crate::fs::{FileSystem, FileType};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const SCRIPT_EXTENSION: &str = "groovy";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharedLibrarySummary {
    pub files: u32,
}

/// Counts `*.groovy` files under each configured path, relative to `source_root`.
///
/// Paths that do not exist contribute zero. A path that exists but cannot be
/// listed is reported as [`MigrateError::NotFound`]. Symlinked scripts are
/// counted by name; symlinked directories are never entered.
pub fn count_shared_library_files(
    fs: &dyn FileSystem,
    source_root: &Path,
    paths: &[String],
) -> Result<SharedLibrarySummary> {
    let mut total = 0u32;

    for configured in paths {
        let path = source_root.join(configured);
        if !fs.exists(&path) {
            debug!(path = %path.display(), "Shared library path missing, skipping");
            continue;
        }

        let found = count_in(fs, &path)?;
        debug!(path = %path.display(), files = found, "Counted shared library scripts");
        total += found;
    }

    Ok(SharedLibrarySummary { files: total })
}

fn count_in(fs: &dyn FileSystem, path: &Path) -> Result<u32> {
    if fs.is_file(path) {
        return Ok(u32::from(is_script(path)));
    }

    let entries = fs.read_dir(path).map_err(|e| MigrateError::NotFound {
        path: path.to_path_buf(),
        message: format!("{:#}", e),
    })?;

    let mut count = 0;
    for entry in entries {
        count += match entry.file_type() {
            FileType::File | FileType::Symlink => u32::from(is_script(entry.path())),
            FileType::Directory => count_in(fs, entry.path())?,
        };
    }
    Ok(count)
}

fn is_script(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(SCRIPT_EXTENSION)
}
