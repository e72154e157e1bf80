//! Formatting check and fix orchestration over external formatters.
//!
//! Files are matched to a formatter by extension, each formatter is asked for
//! the canonical form of its files, and the differences are reported as
//! colorized unified diffs or applied in place.

pub mod config;
pub mod diff;
pub mod error;
pub mod exit_codes;
pub mod formatter;
pub mod git;
pub mod report;
pub mod run;
pub mod tools;

pub use config::{Config, ConfigError, ToolCommands};
pub use error::{FormatError, FormatResult};
pub use formatter::CodeFormatter;
pub use git::{Git, VersionControl};
pub use run::{RunOptions, run, run_with_output};
pub use tools::{DiffResult, FormatTool, ToolRegistry};
