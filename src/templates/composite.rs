use super::{write_yaml, Step, TemplateOptions};
use crate::analysis::SharedLibrarySummary;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Shared libraries larger than this get a composite action stub.
pub const COMPOSITE_FILE_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeAction {
    pub name: String,
    pub description: String,
    pub runs: CompositeRuns,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeRuns {
    pub using: String,
    pub steps: Vec<Step>,
}

pub fn should_emit_composite(shared: &SharedLibrarySummary) -> bool {
    shared.files > COMPOSITE_FILE_THRESHOLD
}

pub fn composite_action(options: &TemplateOptions) -> CompositeAction {
    CompositeAction {
        name: "Composite Action".to_string(),
        description: "Generated composite action".to_string(),
        runs: CompositeRuns {
            using: "composite".to_string(),
            steps: vec![Step::run(&options.composite_message).with_shell("bash")],
        },
    }
}

pub fn composite_action_path(run_dir: &Path, options: &TemplateOptions) -> PathBuf {
    run_dir
        .join(".github/actions")
        .join(options.composite_layout.dir_name())
        .join("action.yml")
}

/// Writes `action.yml` under `run_dir` and returns its path.
pub fn write_composite_action(run_dir: &Path, options: &TemplateOptions) -> Result<PathBuf> {
    write_yaml(
        &composite_action_path(run_dir, options),
        &composite_action(options),
    )
}
