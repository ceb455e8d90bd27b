pub mod commands;
pub mod output;

pub use commands::{AnalyzeArgs, CliArgs, Commands, MigrateArgs, SummaryArgs};
pub use output::{OutputFormat, OutputFormatter};
