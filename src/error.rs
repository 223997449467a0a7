//! Error types for commit-gate.

use std::path::PathBuf;

use thiserror::Error;

/// Gate error type.
///
/// Check findings are not errors: they end up in a `CheckResult`. Everything
/// here aborts the run and blocks the commit.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Not inside a git repository: {0}")]
    NotARepository(PathBuf),

    #[error("Required file not found: {0}")]
    PreconditionMissing(PathBuf),

    #[error("Failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {command} failed: {stderr}")]
    Git { command: String, stderr: String },
}

impl Error {
    pub fn git(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::Git {
            command: command.into(),
            stderr: stderr.into(),
        }
    }
}
