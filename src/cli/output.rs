//! Report rendering for the CLI
//!
//! JSON and YAML are serde dumps of the report types. The human format is a
//! short aligned listing meant for terminals and CI logs.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

use crate::analysis::Classification;
use crate::migrate::{AnalysisReport, RunReport};
use crate::summary::EnterpriseSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_run(&self, report: &RunReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(report, "run report"),
            OutputFormat::Yaml => to_yaml(report, "run report"),
            OutputFormat::Human => Ok(self.format_run_human(report)),
        }
    }

    pub fn format_analysis(&self, report: &AnalysisReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(report, "analysis"),
            OutputFormat::Yaml => to_yaml(report, "analysis"),
            OutputFormat::Human => Ok(self.format_analysis_human(report)),
        }
    }

    pub fn format_summary(&self, summary: &EnterpriseSummary, path: &Path) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(summary, "summary"),
            OutputFormat::Yaml => to_yaml(summary, "summary"),
            OutputFormat::Human => Ok(self.format_summary_human(summary, path)),
        }
    }

    fn format_run_human(&self, report: &RunReport) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Migration Result");
        let _ = writeln!(out, "================");
        let _ = writeln!(out, "Repository:     {} ({})", report.repo, report.repo_type);
        let _ = writeln!(out, "Branch:         {}", report.branch);
        let _ = writeln!(
            out,
            "Classification: {} (score {})",
            report.classification, report.score
        );
        let _ = writeln!(out, "Metadata:       {}", report.metadata_path.display());

        if report.templates.is_empty() {
            let _ = writeln!(out, "Templates:      none");
        } else {
            let _ = writeln!(out, "Templates:");
            for template in &report.templates {
                let _ = writeln!(out, "  - {}", template.display());
            }
        }

        if let Some(ref url) = report.pull_request_url {
            let _ = writeln!(out, "Pull Request:   {}", url);
        }
        out
    }

    fn format_analysis_human(&self, report: &AnalysisReport) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Pipeline Analysis");
        let _ = writeln!(out, "=================");
        let _ = writeln!(
            out,
            "Classification:   {} (score {})",
            report.classification, report.score
        );
        let _ = writeln!(out, "Stages:           {}", report.jenkins.stages);
        let _ = writeln!(out, "Parallel blocks:  {}", report.jenkins.parallel);
        let _ = writeln!(out, "Matrix blocks:    {}", report.jenkins.matrix);
        let _ = writeln!(out, "Uses Docker:      {}", yes_no(report.jenkins.uses_docker));
        let _ = writeln!(out, "Uses credentials: {}", yes_no(report.jenkins.uses_credentials));
        let _ = writeln!(out, "Shared lib files: {}", report.shared.files);
        out
    }

    fn format_summary_human(&self, summary: &EnterpriseSummary, path: &Path) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Enterprise Summary");
        let _ = writeln!(out, "==================");
        let _ = writeln!(out, "Total repositories: {}", summary.total_repos);
        for classification in Classification::ALL {
            let _ = writeln!(
                out,
                "  {:<18}{}",
                format!("{}:", classification),
                summary.count(classification)
            );
        }
        let _ = writeln!(out, "Written to: {}", path.display());
        out
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn to_json<T: Serialize>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {} to JSON", what))
}

fn to_yaml<T: Serialize>(value: &T, what: &str) -> Result<String> {
    serde_yaml::to_string(value).with_context(|| format!("Failed to serialize {} to YAML", what))
}
