//! One migration run, end to end

use crate::analysis::{
    complexity_score, count_shared_library_files, Classification, JenkinsAnalysis,
    JenkinsfileScanner, SharedLibrarySummary,
};
use crate::config::{ConfigError, MigrateConfig, SourceConfig};
use crate::error::Result;
use crate::fs::FileSystem;
use crate::github::PullRequestCreator;
use crate::output::{save_metadata, MetadataRecord, METADATA_FILE};
use crate::templates::{
    should_emit_composite, should_emit_reusable, write_composite_action, write_reusable_workflow,
    TemplateOptions,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// Scan, count and classify without writing anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub classification: Classification,
    pub score: u32,
    pub jenkins: JenkinsAnalysis,
    pub shared: SharedLibrarySummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub repo: String,
    pub branch: String,
    pub repo_type: String,
    pub classification: Classification,
    pub score: u32,
    pub metadata_path: PathBuf,
    pub templates: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request_url: Option<String>,
}

pub fn analyze(fs: &dyn FileSystem, source: &SourceConfig) -> Result<AnalysisReport> {
    let jenkins = JenkinsfileScanner::new().analyze_file(fs, &source.jenkinsfile())?;
    let shared = count_shared_library_files(fs, &source.source_root, &source.shared_lib_paths)?;
    let score = complexity_score(&jenkins, &shared);

    Ok(AnalysisReport {
        classification: Classification::from_score(score),
        score,
        jenkins,
        shared,
    })
}

pub struct MigrationRunner<'a> {
    config: &'a MigrateConfig,
    fs: &'a dyn FileSystem,
    pr_creator: Option<&'a dyn PullRequestCreator>,
    options: TemplateOptions,
}

impl<'a> MigrationRunner<'a> {
    pub fn new(config: &'a MigrateConfig, fs: &'a dyn FileSystem) -> Self {
        Self {
            config,
            fs,
            pr_creator: None,
            options: TemplateOptions::with_layout(config.composite_layout),
        }
    }

    /// Used only when the config enables `AUTO_PR`.
    pub fn with_pr_creator(mut self, creator: &'a dyn PullRequestCreator) -> Self {
        self.pr_creator = Some(creator);
        self
    }

    pub fn with_template_options(mut self, options: TemplateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn run(&self) -> Result<RunReport> {
        let config = self.config;
        info!(
            repo = %config.repo_name,
            branch = %config.branch_name,
            repo_type = %config.repo_type,
            "Starting migration analysis"
        );

        let analysis = analyze(self.fs, &config.source)?;
        info!(
            classification = %analysis.classification,
            score = analysis.score,
            shared_files = analysis.shared.files,
            "Classified repository"
        );

        let record = MetadataRecord {
            repo: config.repo_name.clone(),
            branch: config.branch_name.clone(),
            classification: analysis.classification,
            jenkins: analysis.jenkins,
            shared: analysis.shared,
        };
        let run_dir = save_metadata(&config.artifacts_root, &record)?;

        let mut templates = Vec::new();
        if should_emit_reusable(analysis.classification) {
            templates.push(write_reusable_workflow(&run_dir, &self.options)?);
        } else {
            debug!("Skipping reusable workflow");
        }

        if should_emit_composite(&analysis.shared) {
            templates.push(write_composite_action(&run_dir, &self.options)?);
        } else {
            debug!("Skipping composite action");
        }

        let pull_request_url = match (config.auto_pr, self.pr_creator) {
            (true, Some(creator)) => creator
                .create_pull_request(&config.repo_name, &config.branch_name)?
                .html_url,
            (true, None) => {
                return Err(ConfigError::ValidationFailed(
                    "AUTO_PR is enabled but no pull request client is configured".to_string(),
                )
                .into())
            }
            (false, _) => None,
        };

        Ok(RunReport {
            repo: record.repo,
            branch: record.branch,
            repo_type: config.repo_type.clone(),
            classification: analysis.classification,
            score: analysis.score,
            metadata_path: run_dir.join(METADATA_FILE),
            templates,
            pull_request_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_GITHUB_API;
    use crate::error::MigrateError;
    use crate::fs::MockFileSystem;
    use crate::github::PullRequest;
    use crate::templates::CompositeLayout;
    use std::cell::RefCell;
    use std::path::Path;
    use tempfile::TempDir;

    struct RecordingCreator {
        calls: RefCell<Vec<(String, String)>>,
        fail: bool,
    }

    impl RecordingCreator {
        fn new(fail: bool) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail,
            }
        }
    }

    impl PullRequestCreator for RecordingCreator {
        fn create_pull_request(&self, repo: &str, head: &str) -> Result<PullRequest> {
            self.calls
                .borrow_mut()
                .push((repo.to_string(), head.to_string()));
            if self.fail {
                return Err(MigrateError::network("connection reset"));
            }
            Ok(PullRequest {
                number: Some(12),
                html_url: Some(format!("https://github.com/{}/pull/12", repo)),
            })
        }
    }

    fn config(artifacts: &Path, shared: &[&str], auto_pr: bool) -> MigrateConfig {
        MigrateConfig {
            repo_name: "acme/payments".to_string(),
            branch_name: "main".to_string(),
            repo_type: "java".to_string(),
            source: SourceConfig {
                source_root: PathBuf::from("/source"),
                jenkins_path: PathBuf::from("Jenkinsfile"),
                shared_lib_paths: shared.iter().map(|s| s.to_string()).collect(),
            },
            artifacts_root: artifacts.to_path_buf(),
            composite_layout: CompositeLayout::Composite,
            auto_pr,
            github_token: auto_pr.then(|| "token".to_string()),
            github_api: DEFAULT_GITHUB_API.to_string(),
            pr_base: "master".to_string(),
        }
    }

    fn source_fs(stages: usize, groovy_files: usize) -> MockFileSystem {
        let fs = MockFileSystem::with_root(PathBuf::from("/source"));
        let body: String = (0..stages)
            .map(|i| format!("stage('s{}') {{ steps {{ sh 'true' }} }}\n", i))
            .collect();
        fs.add_file("Jenkinsfile", &format!("pipeline {{ stages {{\n{}}} }}", body));
        fs.add_dir("vars");
        for i in 0..groovy_files {
            fs.add_file(format!("vars/step{}.groovy", i), "def call() {}");
        }
        fs
    }

    fn template_names(report: &RunReport) -> Vec<String> {
        report
            .templates
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_simple_repo_emits_nothing() {
        let temp = TempDir::new().unwrap();
        let fs = source_fs(2, 1);
        let config = config(temp.path(), &["vars"], false);

        let report = MigrationRunner::new(&config, &fs).run().unwrap();

        assert_eq!(report.classification, Classification::Simple);
        assert_eq!(report.score, 3);
        assert!(report.templates.is_empty());
        assert!(report.metadata_path.is_file());
        assert_eq!(
            report.metadata_path,
            temp.path().join("acme-payments/main/metadata.json")
        );
    }

    #[test]
    fn test_reusable_only() {
        let temp = TempDir::new().unwrap();
        let fs = source_fs(16, 0);
        let config = config(temp.path(), &["vars"], false);

        let report = MigrationRunner::new(&config, &fs).run().unwrap();

        assert_eq!(report.classification, Classification::Enterprise);
        assert_eq!(template_names(&report), vec!["_reusable.yml"]);
    }

    #[test]
    fn test_composite_only() {
        let temp = TempDir::new().unwrap();
        let fs = source_fs(0, 4);
        let config = config(temp.path(), &["vars"], false);

        let report = MigrationRunner::new(&config, &fs).run().unwrap();

        assert_eq!(report.classification, Classification::Simple);
        assert_eq!(template_names(&report), vec!["action.yml"]);
        assert!(temp
            .path()
            .join("acme-payments/main/.github/actions/composite/action.yml")
            .is_file());
    }

    #[test]
    fn test_both_templates() {
        let temp = TempDir::new().unwrap();
        let fs = source_fs(10, 20);
        let config = config(temp.path(), &["vars"], false);

        let report = MigrationRunner::new(&config, &fs).run().unwrap();

        assert_eq!(report.classification, Classification::SharedLibHeavy);
        assert_eq!(template_names(&report), vec!["_reusable.yml", "action.yml"]);
    }

    #[test]
    fn test_missing_jenkinsfile_and_libraries() {
        let temp = TempDir::new().unwrap();
        let fs = MockFileSystem::with_root(PathBuf::from("/source"));
        let config = config(temp.path(), &["vars", "src"], false);

        let report = MigrationRunner::new(&config, &fs).run().unwrap();

        assert_eq!(report.classification, Classification::Simple);
        assert_eq!(report.score, 0);
        let record = crate::output::load_metadata(&report.metadata_path).unwrap();
        assert_eq!(record.jenkins, JenkinsAnalysis::default());
        assert_eq!(record.shared.files, 0);
    }

    #[test]
    fn test_generated_layout_option() {
        let temp = TempDir::new().unwrap();
        let fs = source_fs(0, 5);
        let mut config = config(temp.path(), &["vars"], false);
        config.composite_layout = CompositeLayout::Generated;

        MigrationRunner::new(&config, &fs).run().unwrap();

        assert!(temp
            .path()
            .join("acme-payments/main/.github/actions/generated/action.yml")
            .is_file());
    }

    #[test]
    fn test_pull_request_opened_when_enabled() {
        let temp = TempDir::new().unwrap();
        let fs = source_fs(1, 0);
        let config = config(temp.path(), &[], true);
        let creator = RecordingCreator::new(false);

        let report = MigrationRunner::new(&config, &fs)
            .with_pr_creator(&creator)
            .run()
            .unwrap();

        assert_eq!(
            creator.calls.borrow().as_slice(),
            &[("acme/payments".to_string(), "main".to_string())]
        );
        assert_eq!(
            report.pull_request_url.as_deref(),
            Some("https://github.com/acme/payments/pull/12")
        );
    }

    #[test]
    fn test_pull_request_skipped_when_disabled() {
        let temp = TempDir::new().unwrap();
        let fs = source_fs(1, 0);
        let config = config(temp.path(), &[], false);
        let creator = RecordingCreator::new(false);

        let report = MigrationRunner::new(&config, &fs)
            .with_pr_creator(&creator)
            .run()
            .unwrap();

        assert!(creator.calls.borrow().is_empty());
        assert!(report.pull_request_url.is_none());
    }

    #[test]
    fn test_pull_request_failure_surfaces_after_metadata_written() {
        let temp = TempDir::new().unwrap();
        let fs = source_fs(1, 0);
        let config = config(temp.path(), &[], true);
        let creator = RecordingCreator::new(true);

        let err = MigrationRunner::new(&config, &fs)
            .with_pr_creator(&creator)
            .run()
            .unwrap_err();

        assert!(matches!(err, MigrateError::Network { .. }));
        assert!(temp.path().join("acme-payments/main/metadata.json").is_file());
    }

    #[test]
    fn test_auto_pr_without_creator_fails() {
        let temp = TempDir::new().unwrap();
        let fs = source_fs(1, 0);
        let config = config(temp.path(), &[], true);

        let err = MigrationRunner::new(&config, &fs).run().unwrap_err();

        assert!(matches!(
            err,
            MigrateError::Config(ConfigError::ValidationFailed(ref msg)) if msg.contains("AUTO_PR")
        ));
    }

    #[test]
    fn test_custom_template_messages_reach_written_files() {
        let temp = TempDir::new().unwrap();
        let fs = source_fs(10, 20);
        let config = config(temp.path(), &["vars"], false);
        let options = TemplateOptions {
            reusable_message: "make ci".to_string(),
            composite_message: "make lib".to_string(),
            composite_layout: CompositeLayout::Generated,
        };

        let report = MigrationRunner::new(&config, &fs)
            .with_template_options(options)
            .run()
            .unwrap();

        let run_dir = temp.path().join("acme-payments/main");
        let workflow =
            std::fs::read_to_string(run_dir.join(".github/workflows/_reusable.yml")).unwrap();
        let action =
            std::fs::read_to_string(run_dir.join(".github/actions/generated/action.yml")).unwrap();

        assert_eq!(report.templates.len(), 2);
        assert!(workflow.contains("run: make ci"));
        assert!(action.contains("run: make lib"));
        assert!(!action.contains("echo Running composite action"));
    }

    #[test]
    fn test_analyze_is_read_only() {
        let fs = source_fs(6, 2);
        let source = SourceConfig {
            source_root: PathBuf::from("/source"),
            jenkins_path: PathBuf::from("Jenkinsfile"),
            shared_lib_paths: vec!["vars".to_string()],
        };

        let report = analyze(&fs, &source).unwrap();
        assert_eq!(report.score, 8);
        assert_eq!(report.classification, Classification::MultiStage);
    }
}
