//! Go formatting with `gofmt`.

use super::executor::execute_checked;
use super::{DiffResult, FormatTool, check_files, path_args};
use crate::error::FormatResult;
use std::path::PathBuf;

const EXTENSIONS: &[&str] = &[".go"];

pub struct GoFormat {
    command: Vec<String>,
}

impl GoFormat {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl FormatTool for GoFormat {
    fn name(&self) -> &str {
        "Go"
    }

    fn extensions(&self) -> &[&str] {
        EXTENSIONS
    }

    fn check(&self, paths: &[PathBuf]) -> FormatResult<DiffResult> {
        check_files(paths, |path, _| {
            let path = path.display().to_string();
            Ok(execute_checked(&self.command, &[path.as_str()], None)?.stdout)
        })
    }

    fn fix(&self, paths: &[PathBuf]) -> FormatResult<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut args = vec!["-w".to_string()];
        args.extend(path_args(paths));
        execute_checked(&self.command, &args, None)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn test_handles_go_files() {
        let tool = GoFormat::new(vec!["gofmt".to_string()]);
        assert!(tool.handles(Path::new("main.go")));
        assert!(!tool.handles(Path::new("main.gox")));
    }

    #[test]
    #[cfg(unix)]
    fn test_formatted_files_produce_no_entries() {
        let temp_dir = tempdir().unwrap();
        let a = temp_dir.path().join("a.go");
        let b = temp_dir.path().join("b.go");
        fs::write(&a, "package a\n").unwrap();
        fs::write(&b, "package b\n").unwrap();

        // `cat <path>` echoes the file unchanged
        let tool = GoFormat::new(vec!["cat".to_string()]);
        assert!(tool.check(&[a, b]).unwrap().is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn test_failing_tool_aborts_check() {
        let temp_dir = tempdir().unwrap();
        let a = temp_dir.path().join("a.go");
        fs::write(&a, "package a\n").unwrap();

        let tool = GoFormat::new(vec!["false".to_string()]);
        assert!(matches!(tool.check(&[a]), Err(FormatError::InvocationFailed { .. })));
    }
}
