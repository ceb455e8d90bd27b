//! Per-run metadata record
//!
//! One `metadata.json` is written per repository and branch. It is the only
//! input the rollup reads, so its shape is the contract between runs:
//!
//! ```json
//! {
//!   "repo": "acme/payments",
//!   "branch": "main",
//!   "classification": "enterprise",
//!   "jenkins": { "stages": 9, "parallel": 3, "matrix": 0, "uses_docker": true, "uses_credentials": false },
//!   "shared": { "files": 2 }
//! }
//! ```

use crate::analysis::{Classification, JenkinsAnalysis, SharedLibrarySummary};
use crate::error::{MigrateError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const METADATA_FILE: &str = "metadata.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub repo: String,
    pub branch: String,
    pub classification: Classification,
    pub jenkins: JenkinsAnalysis,
    pub shared: SharedLibrarySummary,
}

impl MetadataRecord {
    pub fn new(
        repo: impl Into<String>,
        branch: impl Into<String>,
        jenkins: JenkinsAnalysis,
        shared: SharedLibrarySummary,
    ) -> Self {
        Self {
            repo: repo.into(),
            branch: branch.into(),
            classification: crate::analysis::classify(&jenkins, &shared),
            jenkins,
            shared,
        }
    }
}

/// `<artifacts_root>/<repo with '/' replaced by '-'>/<branch>`
pub fn run_dir(artifacts_root: &Path, repo: &str, branch: &str) -> PathBuf {
    artifacts_root.join(repo.replace('/', "-")).join(branch)
}

/// Writes the record and returns the run directory it was written to.
pub fn save_metadata(artifacts_root: &Path, record: &MetadataRecord) -> Result<PathBuf> {
    let base = run_dir(artifacts_root, &record.repo, &record.branch);
    fs::create_dir_all(&base).map_err(|e| MigrateError::io(&base, e))?;

    let json =
        serde_json::to_string_pretty(record).map_err(|e| MigrateError::Serialize(e.to_string()))?;
    let path = base.join(METADATA_FILE);
    fs::write(&path, json).map_err(|e| MigrateError::io(&path, e))?;

    info!(
        path = %path.display(),
        classification = %record.classification,
        "Saved metadata"
    );
    Ok(base)
}

pub fn load_metadata(path: &Path) -> Result<MetadataRecord> {
    let content = fs::read_to_string(path).map_err(|e| MigrateError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| MigrateError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
