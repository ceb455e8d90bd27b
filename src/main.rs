use actionport::cli::commands::{AnalyzeArgs, CliArgs, Commands, MigrateArgs, SummaryArgs};
use actionport::cli::output::OutputFormatter;
use actionport::config::{artifacts_root_from_env, MigrateConfig, SourceConfig};
use actionport::fs::RealFileSystem;
use actionport::github::GitHubClient;
use actionport::util::logging::{config_from_env, init_logging, parse_level, LoggingConfig};
use actionport::{analyze, write_summary, MigrationRunner, NAME, VERSION};

use clap::Parser;
use std::process;
use tracing::{debug, error, info, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Migrate(migrate_args) => handle_migrate(migrate_args),
        Commands::Analyze(analyze_args) => handle_analyze(analyze_args),
        Commands::Summary(summary_args) => handle_summary(summary_args),
    };

    process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let env_config = config_from_env();

    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        env_config.level
    };

    init_logging(LoggingConfig {
        level,
        ..env_config
    });
}

fn handle_migrate(args: &MigrateArgs) -> i32 {
    let mut config = match MigrateConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            eprintln!("\nSet REPO_NAME, BRANCH_NAME and TYPE before running 'actionport migrate'.");
            return 1;
        }
    };

    if let Some(ref source) = args.source {
        config.source.source_root = source.clone();
    }
    if let Some(ref artifacts) = args.artifacts {
        config.artifacts_root = artifacts.clone();
    }
    if let Some(layout) = args.composite_layout {
        config.composite_layout = layout.into();
    }
    if args.no_pr && config.auto_pr {
        debug!("Pull request creation disabled by --no-pr");
        config.auto_pr = false;
    }

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return 1;
    }
    debug!("{}", config);

    let fs = RealFileSystem::new();
    let client = if config.auto_pr {
        match GitHubClient::from_config(&config) {
            Ok(client) => Some(client),
            Err(e) => {
                error!("Failed to initialize GitHub client: {}", e);
                return 1;
            }
        }
    } else {
        None
    };

    let mut runner = MigrationRunner::new(&config, &fs);
    if let Some(ref client) = client {
        runner = runner.with_pr_creator(client);
    }

    let report = match runner.run() {
        Ok(report) => report,
        Err(e) => {
            error!("Migration failed: {}", e);
            return 1;
        }
    };

    info!(
        classification = %report.classification,
        templates = report.templates.len(),
        "Migration complete"
    );

    print_output(OutputFormatter::new(args.format.into()).format_run(&report))
}

fn handle_analyze(args: &AnalyzeArgs) -> i32 {
    let mut source = match SourceConfig::from_env() {
        Ok(source) => source,
        Err(e) => {
            error!("Configuration error: {}", e);
            return 1;
        }
    };

    if let Some(ref root) = args.source {
        source.source_root = root.clone();
    }
    if let Some(ref jenkins_path) = args.jenkins_path {
        source.jenkins_path = jenkins_path.clone();
    }
    if !args.shared_lib_paths.is_empty() {
        source.shared_lib_paths = args.shared_lib_paths.clone();
    }

    if !source.source_root.is_dir() {
        error!(
            "Source path is not a directory: {}",
            source.source_root.display()
        );
        return 1;
    }

    info!("Analyzing {}", source.source_root.display());
    let report = match analyze(&RealFileSystem::new(), &source) {
        Ok(report) => report,
        Err(e) => {
            error!("Analysis failed: {}", e);
            return 1;
        }
    };

    print_output(OutputFormatter::new(args.format.into()).format_analysis(&report))
}

fn handle_summary(args: &SummaryArgs) -> i32 {
    let artifacts_root = args
        .artifacts
        .clone()
        .unwrap_or_else(artifacts_root_from_env);

    let (summary, path) = match write_summary(&artifacts_root) {
        Ok(result) => result,
        Err(e) => {
            error!("Summary failed: {}", e);
            return 1;
        }
    };

    print_output(OutputFormatter::new(args.format.into()).format_summary(&summary, &path))
}

fn print_output(formatted: anyhow::Result<String>) -> i32 {
    match formatted {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
            0
        }
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            1
        }
    }
}
