use std::io;

use thiserror::Error;

/// Application-wide error type shared by both devkit binaries.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("No Docker images found.")]
    NoImages,

    #[error("No image selected.")]
    NoSelection,

    #[error("Invalid image reference for a mount directory: '{0}'")]
    InvalidImage(String),

    #[error("Operation cancelled (ctrl+c).")]
    Interrupted,

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("{0}")]
    ContainerRuntime(String),

    #[error("Maven failed:\n{0}")]
    BuildTool(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid POM: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Registry error: {0}")]
    Registry(String),
}

impl AppError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        AppError::Config(msg.into())
    }

    /// Process exit code for this error; cancelling the selection is not a failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Interrupted => 0,
            _ => 1,
        }
    }

    pub fn registry<S: Into<String>>(msg: S) -> Self {
        AppError::Registry(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupted_exits_cleanly() {
        assert_eq!(AppError::Interrupted.exit_code(), 0);
        assert_eq!(AppError::NoImages.exit_code(), 1);
        assert_eq!(AppError::NoSelection.exit_code(), 1);
    }
}
