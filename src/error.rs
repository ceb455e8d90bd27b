use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("Path not found: {} ({message})", .path.display())]
    NotFound { path: PathBuf, message: String },

    #[error("{}", format_network(.message, .status_code))]
    Network {
        message: String,
        status_code: Option<u16>,
    },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("Failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Serialization failed: {0}")]
    Serialize(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn format_network(message: &str, status_code: &Option<u16>) -> String {
    match status_code {
        Some(code) => format!("Network error ({}): {}", code, message),
        None => format!("Network error: {}", message),
    }
}

impl MigrateError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MigrateError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        MigrateError::Network {
            message: message.into(),
            status_code: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MigrateError>;
