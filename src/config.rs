use crate::templates::CompositeLayout;
use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_JENKINS_PATH: &str = "Jenkinsfile";
pub const DEFAULT_SOURCE_DIR: &str = "../source";
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";
pub const DEFAULT_PR_BASE: &str = "master";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Environment variable {0} is not set")]
    MissingVar(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Where the legacy pipeline lives and which files to look at.
///
/// Shared by `migrate` and the read-only `analyze` command, which has no
/// repository or branch identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub source_root: PathBuf,
    pub jenkins_path: PathBuf,
    pub shared_lib_paths: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from(DEFAULT_SOURCE_DIR),
            jenkins_path: PathBuf::from(DEFAULT_JENKINS_PATH),
            shared_lib_paths: Vec::new(),
        }
    }
}

impl SourceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source_root = lookup("ACTIONPORT_SOURCE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_DIR));

        let jenkins_path = lookup("JENKINS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_JENKINS_PATH));

        let shared_lib_paths = match lookup("SHARED_LIB_PATHS") {
            Some(raw) => parse_shared_lib_paths(&raw)?,
            None => Vec::new(),
        };

        Ok(Self {
            source_root,
            jenkins_path,
            shared_lib_paths,
        })
    }

    pub fn jenkinsfile(&self) -> PathBuf {
        self.source_root.join(&self.jenkins_path)
    }
}

/// Output root for runs and the rollup: `ACTIONPORT_ARTIFACTS_DIR` or `artifacts`.
pub fn artifacts_root_from_env() -> PathBuf {
    artifacts_root_from_lookup(|key| env::var(key).ok())
}

fn artifacts_root_from_lookup<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    lookup("ACTIONPORT_ARTIFACTS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACTS_DIR))
}

/// Parses the JSON-encoded `SHARED_LIB_PATHS` list.
pub fn parse_shared_lib_paths(raw: &str) -> Result<Vec<String>, ConfigError> {
    serde_json::from_str::<Vec<String>>(raw).map_err(|e| ConfigError::ParseError {
        field: "SHARED_LIB_PATHS".to_string(),
        error: e.to_string(),
    })
}

/// Everything one migration run needs, read from the environment once at startup.
#[derive(Clone)]
pub struct MigrateConfig {
    pub repo_name: String,
    pub branch_name: String,
    pub repo_type: String,
    pub source: SourceConfig,
    pub artifacts_root: PathBuf,
    pub composite_layout: CompositeLayout,
    pub auto_pr: bool,
    pub github_token: Option<String>,
    pub github_api: String,
    pub pr_base: String,
}

impl MigrateConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required =
            |key: &str| lookup(key).ok_or_else(|| ConfigError::MissingVar(key.to_string()));

        let repo_name = required("REPO_NAME")?;
        let branch_name = required("BRANCH_NAME")?;
        let repo_type = required("TYPE")?;

        let source = SourceConfig::from_lookup(&lookup)?;

        let artifacts_root = artifacts_root_from_lookup(&lookup);

        let composite_layout = match lookup("ACTIONPORT_COMPOSITE_LAYOUT") {
            Some(raw) => raw.parse::<CompositeLayout>().map_err(|error| ConfigError::ParseError {
                field: "ACTIONPORT_COMPOSITE_LAYOUT".to_string(),
                error,
            })?,
            None => CompositeLayout::default(),
        };

        // Anything other than the literal "true" leaves PR creation off.
        let auto_pr = lookup("AUTO_PR").as_deref() == Some("true");

        let github_token = lookup("GH_PAT").filter(|t| !t.is_empty());

        let github_api = lookup("ACTIONPORT_GITHUB_API")
            .unwrap_or_else(|| DEFAULT_GITHUB_API.to_string());

        let pr_base = lookup("ACTIONPORT_PR_BASE").unwrap_or_else(|| DEFAULT_PR_BASE.to_string());

        Ok(Self {
            repo_name,
            branch_name,
            repo_type,
            source,
            artifacts_root,
            composite_layout,
            auto_pr,
            github_token,
            github_api,
            pr_base,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repo_name.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "REPO_NAME must not be empty".to_string(),
            ));
        }

        if self.branch_name.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "BRANCH_NAME must not be empty".to_string(),
            ));
        }

        if self.auto_pr && self.github_token.is_none() {
            return Err(ConfigError::ValidationFailed(
                "AUTO_PR is enabled but GH_PAT is not set".to_string(),
            ));
        }

        Ok(())
    }
}

// Hand-written so the token never reaches logs through `{:?}`.
impl fmt::Debug for MigrateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrateConfig")
            .field("repo_name", &self.repo_name)
            .field("branch_name", &self.branch_name)
            .field("repo_type", &self.repo_type)
            .field("source", &self.source)
            .field("artifacts_root", &self.artifacts_root)
            .field("composite_layout", &self.composite_layout)
            .field("auto_pr", &self.auto_pr)
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("github_api", &self.github_api)
            .field("pr_base", &self.pr_base)
            .finish()
    }
}

impl fmt::Display for MigrateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Actionport Configuration:")?;
        writeln!(f, "  Repository: {}", self.repo_name)?;
        writeln!(f, "  Branch: {}", self.branch_name)?;
        writeln!(f, "  Type: {}", self.repo_type)?;
        writeln!(f, "  Source Root: {}", self.source.source_root.display())?;
        writeln!(f, "  Jenkinsfile: {}", self.source.jenkins_path.display())?;
        writeln!(f, "  Shared Library Paths: {:?}", self.source.shared_lib_paths)?;
        writeln!(f, "  Artifacts Root: {}", self.artifacts_root.display())?;
        writeln!(f, "  Composite Layout: {}", self.composite_layout)?;
        writeln!(f, "  Auto PR: {}", self.auto_pr)?;
        writeln!(f, "  GitHub API: {}", self.github_api)?;
        writeln!(f, "  PR Base: {}", self.pr_base)?;
        Ok(())
    }
}
