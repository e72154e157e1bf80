//! GN build file formatting with `gn format`.

use super::executor::execute_checked;
use super::{DiffResult, FormatTool, check_files, path_args};
use crate::error::FormatResult;
use std::path::PathBuf;

const EXTENSIONS: &[&str] = &[".gn", ".gni"];

/// Runs `gn format`. Check mode feeds the file through `--stdin`.
pub struct GnFormat {
    command: Vec<String>,
}

impl GnFormat {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl FormatTool for GnFormat {
    fn name(&self) -> &str {
        "GN"
    }

    fn extensions(&self) -> &[&str] {
        EXTENSIONS
    }

    fn check(&self, paths: &[PathBuf]) -> FormatResult<DiffResult> {
        check_files(paths, |_, data| {
            Ok(execute_checked(&self.command, &["format", "--stdin"], Some(data))?.stdout)
        })
    }

    fn fix(&self, paths: &[PathBuf]) -> FormatResult<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut args = vec!["format".to_string()];
        args.extend(path_args(paths));
        execute_checked(&self.command, &args, None)?;
        Ok(())
    }
}
