//! Error types for the installer.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstallerError {
    /// The companion application is not installed, or not reachable.
    #[error("Command '{command}' not found")]
    NotFound { command: String },

    /// `message` names the action, as in "Failed to write desktop file".
    #[error("Failed to {message} {}: {source}", .path.display())]
    Io {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg_attr(not(windows), allow(dead_code))]
    #[error("Registry error at {key}: {source}")]
    Registry {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[cfg_attr(not(any(windows, target_os = "macos")), allow(dead_code))]
    #[error("Failed to create shortcut {}: {message}", .path.display())]
    Shortcut { path: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[cfg_attr(
        any(windows, target_os = "macos", target_os = "linux"),
        allow(dead_code)
    )]
    #[error("Unsupported operating system: {0}")]
    UnsupportedPlatform(String),
}

pub type Result<T> = std::result::Result<T, InstallerError>;

impl InstallerError {
    pub fn io(message: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InstallerError::Io {
            message: message.into(),
            path: path.into(),
            source,
        }
    }
}
