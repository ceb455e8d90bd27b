//! GitHub Actions scaffolding written next to each run's metadata
//!
//! Both documents are fixed stubs with a single placeholder step. Which ones a
//! run writes is decided independently: the reusable workflow follows the
//! classification, the composite action follows the shared-library file count.

pub mod composite;
pub mod reusable;

pub use composite::{
    composite_action, should_emit_composite, write_composite_action, CompositeAction,
};
pub use reusable::{
    reusable_workflow, should_emit_reusable, write_reusable_workflow, ReusableWorkflow,
};

use crate::error::{MigrateError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

pub const DEFAULT_REUSABLE_MESSAGE: &str = "echo Running reusable workflow";
pub const DEFAULT_COMPOSITE_MESSAGE: &str = "echo Running composite action";

/// Directory under `.github/actions/` that receives the composite action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompositeLayout {
    #[default]
    Composite,
    Generated,
}

impl CompositeLayout {
    pub fn dir_name(&self) -> &'static str {
        match self {
            CompositeLayout::Composite => "composite",
            CompositeLayout::Generated => "generated",
        }
    }
}

impl fmt::Display for CompositeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for CompositeLayout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "composite" => Ok(CompositeLayout::Composite),
            "generated" => Ok(CompositeLayout::Generated),
            _ => Err(format!(
                "Invalid composite layout: {}. Valid options: composite, generated",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOptions {
    pub reusable_message: String,
    pub composite_message: String,
    pub composite_layout: CompositeLayout,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            reusable_message: DEFAULT_REUSABLE_MESSAGE.to_string(),
            composite_message: DEFAULT_COMPOSITE_MESSAGE.to_string(),
            composite_layout: CompositeLayout::default(),
        }
    }
}

impl TemplateOptions {
    pub fn with_layout(composite_layout: CompositeLayout) -> Self {
        Self {
            composite_layout,
            ..Default::default()
        }
    }
}

/// One entry of a `steps:` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
}

impl Step {
    pub fn uses(action: &str) -> Self {
        Self {
            uses: Some(action.to_string()),
            run: None,
            shell: None,
        }
    }

    pub fn run(command: &str) -> Self {
        Self {
            uses: None,
            run: Some(command.to_string()),
            shell: None,
        }
    }

    pub fn with_shell(mut self, shell: &str) -> Self {
        self.shell = Some(shell.to_string());
        self
    }
}

/// Serializes `document` to YAML at `path`, creating parents and overwriting.
pub(crate) fn write_yaml<T: Serialize>(path: &Path, document: &T) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| MigrateError::io(parent, e))?;
    }

    let yaml = serde_yaml::to_string(document).map_err(|e| MigrateError::Serialize(e.to_string()))?;
    fs::write(path, yaml).map_err(|e| MigrateError::io(path, e))?;

    debug!(path = %path.display(), "Wrote template");
    Ok(path.to_path_buf())
}
