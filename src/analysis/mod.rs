//! Heuristic analysis of a legacy Jenkins pipeline
//!
//! Nothing here parses Groovy. The scanner counts textual markers, the
//! shared-library counter counts script files, and the classifier turns both
//! into one of four migration-complexity labels.

pub mod classify;
pub mod jenkinsfile;
pub mod shared_lib;

pub use classify::{classify, complexity_score, Classification};
pub use jenkinsfile::{JenkinsAnalysis, JenkinsfileScanner};
pub use shared_lib::{count_shared_library_files, SharedLibrarySummary};
