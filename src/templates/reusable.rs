use super::{write_yaml, Step, TemplateOptions};
use crate::analysis::Classification;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const REUSABLE_WORKFLOW_PATH: &str = ".github/workflows/_reusable.yml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReusableWorkflow {
    pub name: String,
    pub on: WorkflowTriggers,
    pub jobs: WorkflowJobs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowTriggers {
    pub workflow_call: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowJobs {
    pub build: WorkflowJob,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowJob {
    #[serde(rename = "runs-on")]
    pub runs_on: String,
    pub steps: Vec<Step>,
}

/// Only the two most complex classes get a callable workflow.
pub fn should_emit_reusable(classification: Classification) -> bool {
    matches!(
        classification,
        Classification::Enterprise | Classification::SharedLibHeavy
    )
}

pub fn reusable_workflow(options: &TemplateOptions) -> ReusableWorkflow {
    ReusableWorkflow {
        name: "Reusable CI".to_string(),
        on: WorkflowTriggers {
            workflow_call: BTreeMap::new(),
        },
        jobs: WorkflowJobs {
            build: WorkflowJob {
                runs_on: "ubuntu-latest".to_string(),
                steps: vec![
                    Step::uses("actions/checkout@v4"),
                    Step::run(&options.reusable_message),
                ],
            },
        },
    }
}

/// Writes `_reusable.yml` under `run_dir` and returns its path.
pub fn write_reusable_workflow(run_dir: &Path, options: &TemplateOptions) -> Result<PathBuf> {
    write_yaml(
        &run_dir.join(REUSABLE_WORKFLOW_PATH),
        &reusable_workflow(options),
    )
}
