use super::jenkinsfile::JenkinsAnalysis;
use super::shared_lib::SharedLibrarySummary;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MULTI_STAGE_THRESHOLD: u32 = 5;
const ENTERPRISE_THRESHOLD: u32 = 15;
const SHARED_LIB_HEAVY_THRESHOLD: u32 = 30;

/// Migration complexity, ordered from simplest to hardest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    Simple,
    MultiStage,
    Enterprise,
    SharedLibHeavy,
}

impl Classification {
    pub const ALL: [Classification; 4] = [
        Classification::Simple,
        Classification::MultiStage,
        Classification::Enterprise,
        Classification::SharedLibHeavy,
    ];

    /// Each threshold is exclusive, so a score sitting on a boundary lands in
    /// the more complex bucket.
    pub fn from_score(score: u32) -> Self {
        if score < MULTI_STAGE_THRESHOLD {
            Classification::Simple
        } else if score < ENTERPRISE_THRESHOLD {
            Classification::MultiStage
        } else if score < SHARED_LIB_HEAVY_THRESHOLD {
            Classification::Enterprise
        } else {
            Classification::SharedLibHeavy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Simple => "simple",
            Classification::MultiStage => "multi-stage",
            Classification::Enterprise => "enterprise",
            Classification::SharedLibHeavy => "shared-lib-heavy",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Classification::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown classification '{}'. Valid options: simple, multi-stage, enterprise, shared-lib-heavy",
                    s
                )
            })
    }
}

/// `stages + 2 * parallel + shared library files`
pub fn complexity_score(jenkins: &JenkinsAnalysis, shared: &SharedLibrarySummary) -> u32 {
    jenkins
        .stages
        .saturating_add(jenkins.parallel.saturating_mul(2))
        .saturating_add(shared.files)
}

pub fn classify(jenkins: &JenkinsAnalysis, shared: &SharedLibrarySummary) -> Classification {
    Classification::from_score(complexity_score(jenkins, shared))
}
