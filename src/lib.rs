//! actionport - Jenkins pipeline classification and GitHub Actions scaffolding
//!
//! A run scans one checked-out repository's `Jenkinsfile` and shared library
//! directories, scores how hard the migration will be, and writes
//! `artifacts/<repo>/<branch>/metadata.json` together with whichever GitHub
//! Actions stubs the score calls for. A separate rollup tallies every record
//! written so far.
//!
//! # Project Structure
//!
//! - [`analysis`]: marker scanning, shared-library counting, classification
//! - [`templates`]: reusable workflow and composite action emitters
//! - [`output`]: the per-run metadata record
//! - [`summary`]: enterprise-wide rollup
//! - [`github`]: pull request creation
//! - [`migrate`]: the orchestrated run
//! - [`config`]: environment-driven configuration

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod github;
pub mod migrate;
pub mod output;
pub mod summary;
pub mod templates;
pub mod util;

pub use analysis::{Classification, JenkinsAnalysis, SharedLibrarySummary};
pub use config::{ConfigError, MigrateConfig, SourceConfig};
pub use error::MigrateError;
pub use migrate::{analyze, AnalysisReport, MigrationRunner, RunReport};
pub use summary::{collect_summary, write_summary, EnterpriseSummary};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NAME: &str = env!("CARGO_PKG_NAME");
