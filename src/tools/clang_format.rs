//! C and C++ formatting with `clang-format`.

use super::executor::execute_checked;
use super::{DiffResult, FormatTool, check_files, path_args};
use crate::error::FormatResult;
use std::path::PathBuf;

const EXTENSIONS: &[&str] = &[".h", ".hh", ".hpp", ".c", ".cc", ".cpp"];

/// Runs `clang-format --style=file`, which picks up the nearest `.clang-format`.
pub struct ClangFormat {
    command: Vec<String>,
}

impl ClangFormat {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl FormatTool for ClangFormat {
    fn name(&self) -> &str {
        "C and C++"
    }

    fn extensions(&self) -> &[&str] {
        EXTENSIONS
    }

    fn check(&self, paths: &[PathBuf]) -> FormatResult<DiffResult> {
        check_files(paths, |path, _| {
            let path = path.display().to_string();
            Ok(execute_checked(&self.command, &["--style=file", path.as_str()], None)?.stdout)
        })
    }

    fn fix(&self, paths: &[PathBuf]) -> FormatResult<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut args = vec!["--style=file".to_string(), "-i".to_string()];
        args.extend(path_args(paths));
        execute_checked(&self.command, &args, None)?;
        Ok(())
    }
}
