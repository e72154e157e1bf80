//! Configuration file loading for fmtcheck.
//!
//! Configuration is optional. When present it lives in `.fmtcheck.toml` or
//! `fmtcheck.toml`, found by walking up from the current directory until the
//! directory that contains `.git`:
//!
//! ```toml
//! exclude = ["^third_party/", "_pb2\\.py$"]
//!
//! [tools]
//! clang-format = ["clang-format-17"]
//! yapf = ["python3", "-m", "yapf"]
//! ```

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Configuration file names, in order of precedence
pub const CONFIG_FILES: &[&str] = &[".fmtcheck.toml", "fmtcheck.toml"];

/// Prevent runaway traversal on odd filesystems
const MAX_DEPTH: usize = 100;

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config file at {path}: {message}")]
    ParseError { path: String, message: String },

    /// A tool command prefix is empty
    #[error("Command for tool '{tool}' must not be empty")]
    EmptyCommand { tool: &'static str },
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Regular expressions excluding repository-relative paths from git listing
    pub exclude: Vec<String>,

    /// Command prefixes used to invoke each formatter
    pub tools: ToolCommands,
}

/// Command prefix per built-in tool. Mode-specific arguments are appended.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ToolCommands {
    pub clang_format: Vec<String>,
    pub gn: Vec<String>,
    pub gofmt: Vec<String>,
    pub yapf: Vec<String>,
}

impl Default for ToolCommands {
    fn default() -> Self {
        Self {
            clang_format: vec!["clang-format".to_string()],
            gn: vec!["gn".to_string()],
            gofmt: vec!["gofmt".to_string()],
            yapf: vec!["python".to_string(), "-m".to_string(), "yapf".to_string()],
        }
    }
}

impl ToolCommands {
    fn validate(&self) -> Result<(), ConfigError> {
        let commands: [(&'static str, &Vec<String>); 4] = [
            ("clang-format", &self.clang_format),
            ("gn", &self.gn),
            ("gofmt", &self.gofmt),
            ("yapf", &self.yapf),
        ];
        for (tool, command) in commands {
            if command.first().is_none_or(|binary| binary.is_empty()) {
                return Err(ConfigError::EmptyCommand { tool });
            }
        }
        Ok(())
    }
}

impl Config {
    /// Parse configuration from TOML text. `path` is only used in error messages.
    pub fn from_toml(content: &str, path: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        config.tools.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let display_path = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            source,
            path: display_path.clone(),
        })?;
        let config = Self::from_toml(&content, &display_path)?;
        log::debug!("[fmtcheck-config] Loaded {display_path}");
        Ok(config)
    }

    /// Resolve the configuration the CLI should use.
    ///
    /// An explicit path wins. Otherwise, unless `isolated`, the nearest config
    /// file above `start_dir` is used. Falls back to defaults.
    pub fn load(explicit: Option<&Path>, isolated: bool, start_dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }
        if isolated {
            log::debug!("[fmtcheck-config] Isolated mode, using defaults");
            return Ok(Self::default());
        }
        match discover_config_upward(start_dir) {
            Some(path) => Self::load_file(&path),
            None => Ok(Self::default()),
        }
    }
}

/// Find the nearest configuration file, stopping at the repository root.
pub fn discover_config_upward(start_dir: &Path) -> Option<PathBuf> {
    let mut current_dir = start_dir.to_path_buf();

    for _ in 0..MAX_DEPTH {
        log::debug!("[fmtcheck-config] Searching for config in: {}", current_dir.display());

        for config_name in CONFIG_FILES {
            let config_path = current_dir.join(config_name);
            if config_path.is_file() {
                log::debug!("[fmtcheck-config] Found config file: {}", config_path.display());
                return Some(config_path);
            }
        }

        if current_dir.join(".git").exists() {
            log::debug!("[fmtcheck-config] Reached repository root at {}", current_dir.display());
            break;
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => break,
        }
    }

    None
}
