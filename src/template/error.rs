use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Unsupported package manager: {0} (expected one of npm, yarn, pnpm, bun)")]
    UnsupportedPackageManager(String),

    #[error("Invalid project name: {0}")]
    InvalidProjectName(String),

    #[error("Failed to read templates file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid templates file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum CloneError {
    #[error("Destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    #[error("git clone failed: {0}")]
    GitFailed(String),

    #[error("Failed to run git: {0}")]
    Io(#[from] std::io::Error),
}
