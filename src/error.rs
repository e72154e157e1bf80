//! Error types shared by the tool adapters, the orchestrator and the entry point.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that abort a formatting run.
///
/// Formatting problems reported by a tool are not errors; they are collected
/// as diff entries. Everything here means the run could not be completed.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The tool binary could not be found on `PATH`
    #[error("Tool '{tool}' not found in PATH")]
    ToolNotFound { tool: String },

    /// The tool ran but exited with an unexpected status
    #[error("'{command}' failed with {status}: {stderr}")]
    InvocationFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// Reading a file or spawning a process failed
    #[error("I/O error on {path}: {source}")]
    Io { source: io::Error, path: PathBuf },

    /// A git query failed
    #[error("git: {0}")]
    Git(String),

    /// An exclude pattern is not a valid regular expression
    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExclude { pattern: String, source: regex::Error },

    /// Two registered tools claim the same extension
    #[error("Extension '{extension}' is claimed by both {first} and {second}")]
    DuplicateExtension {
        extension: String,
        first: String,
        second: String,
    },

    /// Two registered tools share a name
    #[error("Tool '{0}' is registered more than once")]
    DuplicateTool(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl FormatError {
    pub(crate) fn io(source: io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }
}

pub type FormatResult<T> = Result<T, FormatError>;
