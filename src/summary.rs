//! Enterprise-wide rollup over every `metadata.json` under the artifacts root

use crate::analysis::Classification;
use crate::error::{MigrateError, Result};
use crate::output::METADATA_FILE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

pub const SUMMARY_FILE: &str = "enterprise-summary.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnterpriseSummary {
    pub total_repos: u64,
    pub simple: u64,
    #[serde(rename = "multi-stage")]
    pub multi_stage: u64,
    pub enterprise: u64,
    #[serde(rename = "shared-lib-heavy")]
    pub shared_lib_heavy: u64,
}

impl EnterpriseSummary {
    pub fn record(&mut self, classification: Classification) {
        self.total_repos += 1;
        match classification {
            Classification::Simple => self.simple += 1,
            Classification::MultiStage => self.multi_stage += 1,
            Classification::Enterprise => self.enterprise += 1,
            Classification::SharedLibHeavy => self.shared_lib_heavy += 1,
        }
    }

    pub fn count(&self, classification: Classification) -> u64 {
        match classification {
            Classification::Simple => self.simple,
            Classification::MultiStage => self.multi_stage,
            Classification::Enterprise => self.enterprise,
            Classification::SharedLibHeavy => self.shared_lib_heavy,
        }
    }
}

// The rollup only needs the label, so older records with sparse analysis
// sections still count.
#[derive(Deserialize)]
struct ClassifiedRecord {
    classification: String,
}

/// Tallies every metadata record found under `artifacts_root`.
///
/// A record whose classification is not one of the four known labels fails
/// the whole rollup.
pub fn collect_summary(artifacts_root: &Path) -> Result<EnterpriseSummary> {
    let mut summary = EnterpriseSummary::default();

    if !artifacts_root.exists() {
        debug!(path = %artifacts_root.display(), "Artifacts root missing, summary is empty");
        return Ok(summary);
    }

    for entry in WalkDir::new(artifacts_root) {
        let entry = entry.map_err(|e| MigrateError::Read {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| artifacts_root.to_path_buf()),
            message: e.to_string(),
        })?;

        if !entry.file_type().is_file() || entry.file_name() != METADATA_FILE {
            continue;
        }

        let classification = read_classification(entry.path())?;
        debug!(path = %entry.path().display(), %classification, "Counted metadata record");
        summary.record(classification);
    }

    Ok(summary)
}

fn read_classification(path: &Path) -> Result<Classification> {
    let content = fs::read_to_string(path).map_err(|e| MigrateError::io(path, e))?;
    let record: ClassifiedRecord =
        serde_json::from_str(&content).map_err(|e| MigrateError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    record
        .classification
        .parse::<Classification>()
        .map_err(|message| MigrateError::Parse {
            path: path.to_path_buf(),
            message,
        })
}

/// Collects the rollup and writes it to `<artifacts_root>/enterprise-summary.json`.
pub fn write_summary(artifacts_root: &Path) -> Result<(EnterpriseSummary, PathBuf)> {
    let summary = collect_summary(artifacts_root)?;

    fs::create_dir_all(artifacts_root).map_err(|e| MigrateError::io(artifacts_root, e))?;
    let path = artifacts_root.join(SUMMARY_FILE);
    let json = serde_json::to_string_pretty(&summary)
        .map_err(|e| MigrateError::Serialize(e.to_string()))?;
    fs::write(&path, json).map_err(|e| MigrateError::io(&path, e))?;

    info!(
        path = %path.display(),
        total_repos = summary.total_repos,
        "Wrote enterprise summary"
    );
    Ok((summary, path))
}
