use crate::templates::CompositeLayout;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Jenkins to GitHub Actions migration scaffolding
#[derive(Parser, Debug)]
#[command(
    name = "actionport",
    about = "Classify Jenkins pipelines and scaffold GitHub Actions",
    version,
    long_about = "actionport scans a Jenkinsfile and its shared libraries, classifies the \
                  repository by migration complexity, and writes GitHub Actions scaffolding \
                  plus a metadata record under the artifacts directory."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Run one migration for the repository described by the environment",
        long_about = "Reads REPO_NAME, BRANCH_NAME, TYPE, SHARED_LIB_PATHS, JENKINS_PATH, \
                      AUTO_PR and GH_PAT from the environment, writes metadata.json and any \
                      templates under artifacts/<repo>/<branch>/, and optionally opens a pull \
                      request.\n\n\
                      Examples:\n  \
                      actionport migrate\n  \
                      actionport migrate --source ../source --artifacts out\n  \
                      actionport migrate --composite-layout generated --no-pr"
    )]
    Migrate(MigrateArgs),

    #[command(
        about = "Classify a checkout without writing anything",
        long_about = "Scans the Jenkinsfile and shared library paths and prints the \
                      classification. No repository identity is required.\n\n\
                      Examples:\n  \
                      actionport analyze /path/to/checkout\n  \
                      actionport analyze --shared-lib-path vars --format json"
    )]
    Analyze(AnalyzeArgs),

    #[command(
        about = "Roll up every metadata.json into enterprise-summary.json",
        long_about = "Walks the artifacts directory, tallies classifications and writes \
                      enterprise-summary.json at its root.\n\n\
                      Examples:\n  \
                      actionport summary\n  \
                      actionport summary --artifacts out --format json"
    )]
    Summary(SummaryArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct MigrateArgs {
    #[arg(
        long,
        value_name = "DIR",
        help = "Legacy repository checkout (overrides ACTIONPORT_SOURCE_DIR)"
    )]
    pub source: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Output root (overrides ACTIONPORT_ARTIFACTS_DIR)")]
    pub artifacts: Option<PathBuf>,

    #[arg(
        long,
        value_enum,
        help = "Directory name under .github/actions/ for the composite action"
    )]
    pub composite_layout: Option<CompositeLayoutArg>,

    #[arg(long, help = "Never open a pull request, even when AUTO_PR=true")]
    pub no_pr: bool,

    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    #[arg(
        value_name = "PATH",
        help = "Legacy repository checkout (defaults to ACTIONPORT_SOURCE_DIR or ../source)"
    )]
    pub source: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Pipeline file relative to the checkout")]
    pub jenkins_path: Option<PathBuf>,

    #[arg(
        long = "shared-lib-path",
        value_name = "DIR",
        help = "Shared library directory relative to the checkout (repeatable, replaces SHARED_LIB_PATHS)"
    )]
    pub shared_lib_paths: Vec<String>,

    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct SummaryArgs {
    #[arg(
        long,
        value_name = "DIR",
        help = "Artifacts root (overrides ACTIONPORT_ARTIFACTS_DIR)"
    )]
    pub artifacts: Option<PathBuf>,

    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeLayoutArg {
    Composite,
    Generated,
}

impl From<CompositeLayoutArg> for CompositeLayout {
    fn from(arg: CompositeLayoutArg) -> Self {
        match arg {
            CompositeLayoutArg::Composite => CompositeLayout::Composite,
            CompositeLayoutArg::Generated => CompositeLayout::Generated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_migrate_args() {
        let args = CliArgs::parse_from(["actionport", "migrate"]);
        match args.command {
            Commands::Migrate(migrate_args) => {
                assert_eq!(migrate_args.format, OutputFormatArg::Human);
                assert!(migrate_args.source.is_none());
                assert!(migrate_args.artifacts.is_none());
                assert!(migrate_args.composite_layout.is_none());
                assert!(!migrate_args.no_pr);
            }
            _ => panic!("Expected Migrate command"),
        }
    }

    #[test]
    fn test_migrate_with_options() {
        let args = CliArgs::parse_from([
            "actionport",
            "migrate",
            "--source",
            "/checkout",
            "--artifacts",
            "out",
            "--composite-layout",
            "generated",
            "--no-pr",
            "--format",
            "json",
        ]);

        match args.command {
            Commands::Migrate(migrate_args) => {
                assert_eq!(migrate_args.source, Some(PathBuf::from("/checkout")));
                assert_eq!(migrate_args.artifacts, Some(PathBuf::from("out")));
                assert_eq!(migrate_args.composite_layout, Some(CompositeLayoutArg::Generated));
                assert!(migrate_args.no_pr);
                assert_eq!(migrate_args.format, OutputFormatArg::Json);
            }
            _ => panic!("Expected Migrate command"),
        }
    }

    #[test]
    fn test_analyze_repeated_shared_lib_paths() {
        let args = CliArgs::parse_from([
            "actionport",
            "analyze",
            "/checkout",
            "--shared-lib-path",
            "vars",
            "--shared-lib-path",
            "src",
        ]);

        match args.command {
            Commands::Analyze(analyze_args) => {
                assert_eq!(analyze_args.source, Some(PathBuf::from("/checkout")));
                assert_eq!(analyze_args.shared_lib_paths, vec!["vars", "src"]);
                assert!(analyze_args.jenkins_path.is_none());
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_summary_command() {
        let args = CliArgs::parse_from(["actionport", "summary", "--format", "yaml"]);
        match args.command {
            Commands::Summary(summary_args) => {
                assert_eq!(summary_args.format, OutputFormatArg::Yaml);
                assert!(summary_args.artifacts.is_none());
            }
            _ => panic!("Expected Summary command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["actionport", "-v", "summary"]);
        assert!(args.verbose);
        assert!(!args.quiet);

        let args = CliArgs::parse_from(["actionport", "--log-level", "debug", "analyze"]);
        assert_eq!(args.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(CliArgs::try_parse_from(["actionport", "-v", "-q", "summary"]).is_err());
    }

    #[test]
    fn test_layout_arg_conversion() {
        assert_eq!(
            CompositeLayout::from(CompositeLayoutArg::Generated),
            CompositeLayout::Generated
        );
    }
}
