use crate::error::{MigrateError, Result};
use crate::fs::FileSystem;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Marker counts taken from one Jenkinsfile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JenkinsAnalysis {
    pub stages: u32,
    pub parallel: u32,
    pub matrix: u32,
    pub uses_docker: bool,
    pub uses_credentials: bool,
}

pub struct JenkinsfileScanner {
    stage_re: Regex,
    parallel_re: Regex,
    matrix_re: Regex,
}

impl JenkinsfileScanner {
    pub fn new() -> Self {
        Self {
            stage_re: Regex::new(r"stage\s*\(").expect("valid regex"),
            parallel_re: Regex::new(r"parallel\s*\{").expect("valid regex"),
            matrix_re: Regex::new(r"matrix\s*\{").expect("valid regex"),
        }
    }

    pub fn scan(&self, content: &str) -> JenkinsAnalysis {
        JenkinsAnalysis {
            stages: count(&self.stage_re, content),
            parallel: count(&self.parallel_re, content),
            matrix: count(&self.matrix_re, content),
            uses_docker: content.to_lowercase().contains("docker"),
            uses_credentials: content.contains("withCredentials"),
        }
    }

    /// Scans the file at `path`. A missing file yields the empty analysis.
    pub fn analyze_file(&self, fs: &dyn FileSystem, path: &Path) -> Result<JenkinsAnalysis> {
        if !fs.is_file(path) {
            debug!(path = %path.display(), "Jenkinsfile not found, using empty analysis");
            return Ok(JenkinsAnalysis::default());
        }

        let content = fs
            .read_to_string_lossy(path)
            .map_err(|e| MigrateError::Read {
                path: path.to_path_buf(),
                message: format!("{:#}", e),
            })?;
        let analysis = self.scan(&content);
        debug!(
            path = %path.display(),
            stages = analysis.stages,
            parallel = analysis.parallel,
            matrix = analysis.matrix,
            uses_docker = analysis.uses_docker,
            uses_credentials = analysis.uses_credentials,
            "Scanned Jenkinsfile"
        );
        Ok(analysis)
    }
}

impl Default for JenkinsfileScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn count(re: &Regex, content: &str) -> u32 {
    re.find_iter(content).count() as u32
}
