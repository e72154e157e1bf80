//! Adapters for the external formatting tools.
//!
//! Each adapter wraps one formatter binary behind the [`FormatTool`] trait:
//! - **check** runs the tool without touching the files and returns a
//!   colorized diff for every file whose formatting differs
//! - **fix** rewrites the files in place
//!
//! # Built-in Tools
//!
//! | Tool           | Extensions                           |
//! |----------------|--------------------------------------|
//! | `clang-format` | `.h .hh .hpp .c .cc .cpp`            |
//! | `gn format`    | `.gn .gni`                           |
//! | `gofmt`        | `.go`                                |
//! | `yapf`         | `.py`                                |
//!
//! The command used to start each binary comes from [`ToolCommands`](crate::config::ToolCommands).

pub mod clang_format;
pub mod executor;
pub mod gn;
pub mod gofmt;
pub mod registry;
pub mod yapf;

pub use clang_format::ClangFormat;
pub use executor::{ToolOutput, execute, execute_checked};
pub use gn::GnFormat;
pub use gofmt::GoFormat;
pub use registry::ToolRegistry;
pub use yapf::Yapf;

use crate::diff::render_diff;
use crate::error::{FormatError, FormatResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Diffs keyed by path, sorted by path.
///
/// An empty map means no formatting errors. An empty diff means the tool
/// reported a problem with the file but no diff is available.
pub type DiffResult = BTreeMap<PathBuf, String>;

/// A formatter that can check and fix files of the types it claims.
pub trait FormatTool {
    /// Human-readable language name, e.g. `C and C++`. Unique within a registry.
    fn name(&self) -> &str;

    /// File name suffixes handled by this tool, including the leading dot.
    fn extensions(&self) -> &[&str];

    /// Return a diff for every file whose formatting differs from the tool's output.
    fn check(&self, paths: &[PathBuf]) -> FormatResult<DiffResult>;

    /// Reformat the files in place.
    fn fix(&self, paths: &[PathBuf]) -> FormatResult<()>;

    /// Whether this tool claims `path`.
    fn handles(&self, path: &Path) -> bool {
        let name = path.to_string_lossy();
        self.extensions().iter().any(|ext| name.ends_with(ext))
    }
}

/// Check files one at a time with a tool that prints the formatted file.
///
/// `formatter` receives the path and the original bytes and returns the
/// formatted bytes.
pub(crate) fn check_files<F>(paths: &[PathBuf], mut formatter: F) -> FormatResult<DiffResult>
where
    F: FnMut(&Path, &[u8]) -> FormatResult<Vec<u8>>,
{
    let mut errors = DiffResult::new();

    for path in paths {
        let original = fs::read(path).map_err(|e| FormatError::io(e, path))?;
        let formatted = formatter(path, &original)?;

        // Buffers that differ only in undecodable bytes render no diff
        let diff = render_diff(&path.display().to_string(), &original, &formatted);
        if !diff.is_empty() {
            errors.insert(path.clone(), diff);
        }
    }

    Ok(errors)
}

/// Paths as command-line arguments.
pub(crate) fn path_args(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.display().to_string()).collect()
}
