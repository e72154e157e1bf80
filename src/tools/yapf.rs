//! Python formatting with `yapf`.
//!
//! Unlike the other tools, yapf checks every file in one process and prints a
//! combined diff, which is split back into per-file diffs here.

use super::executor::{execute, execute_checked};
use super::{DiffResult, FormatTool, path_args};
use crate::diff::colorize_diff;
use crate::error::FormatResult;
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

const EXTENSIONS: &[&str] = &[".py"];

/// Start of one file's section in yapf's `--diff` output
static DIFF_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^--- (.*?)\s+\(original\)\r?$").expect("valid regex"));

pub struct Yapf {
    command: Vec<String>,
}

impl Yapf {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

/// Split yapf's combined diff output into colorized per-file diffs.
pub fn split_diff(raw_diff: &str) -> DiffResult {
    let starts: Vec<(usize, &str)> = DIFF_START
        .captures_iter(raw_diff)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let path = caps.get(1)?;
            Some((whole.start(), path.as_str()))
        })
        .collect();

    let mut errors = DiffResult::new();
    for (index, (start, path)) in starts.iter().enumerate() {
        let end = starts.get(index + 1).map_or(raw_diff.len(), |(next, _)| *next);
        errors.insert(PathBuf::from(path), colorize_diff(&raw_diff[*start..end]));
    }
    errors
}

impl FormatTool for Yapf {
    fn name(&self) -> &str {
        "Python"
    }

    fn extensions(&self) -> &[&str] {
        EXTENSIONS
    }

    fn check(&self, paths: &[PathBuf]) -> FormatResult<DiffResult> {
        // With no files yapf would read stdin
        if paths.is_empty() {
            return Ok(DiffResult::new());
        }
        let mut args = vec!["--parallel".to_string(), "--diff".to_string()];
        args.extend(path_args(paths));

        // yapf exits non-zero when it finds changes, so the status is not checked
        let output = execute(&self.command, &args, None)?;

        let mut errors = if output.stdout.is_empty() {
            DiffResult::new()
        } else {
            split_diff(&String::from_utf8_lossy(&output.stdout))
        };

        if !output.stderr.is_empty() {
            log::error!("yapf encountered an error:\n{}", output.stderr_lossy());
            for path in paths {
                errors.entry(path.clone()).or_default();
            }
        }

        Ok(errors)
    }

    fn fix(&self, paths: &[PathBuf]) -> FormatResult<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut args = vec!["--parallel".to_string(), "--in-place".to_string()];
        args.extend(path_args(paths));
        execute_checked(&self.command, &args, None)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    const COMBINED: &str = "\
--- /src/a.py\t(original)
+++ /src/a.py\t(reformatted)
@@ -1 +1 @@
-x=1
+x = 1
--- /src/b.py\t(original)
+++ /src/b.py\t(reformatted)
@@ -1 +1 @@
-y=2
+y = 2
";

    #[test]
    #[serial]
    fn test_split_diff_per_file() {
        colored::control::set_override(false);
        let errors = split_diff(COMBINED);
        colored::control::unset_override();

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[&PathBuf::from("/src/a.py")],
            "--- /src/a.py\t(original)\n+++ /src/a.py\t(reformatted)\n@@ -1 +1 @@\n-x=1\n+x = 1\n"
        );
        assert!(errors[&PathBuf::from("/src/b.py")].ends_with("+y = 2\n"));
    }

    #[test]
    fn test_split_diff_accepts_double_space_separator() {
        let errors = split_diff("--- dir/c.py  (original)\n+++ dir/c.py  (reformatted)\n");
        assert!(errors.contains_key(&PathBuf::from("dir/c.py")));
    }

    #[test]
    fn test_split_diff_without_headers_is_empty() {
        assert!(split_diff("nothing to see\n").is_empty());
        assert!(split_diff("").is_empty());
    }

    #[test]
    #[cfg(unix)]
    #[serial]
    fn test_stderr_marks_remaining_files_unknown() {
        let script = "printf '%s\\t(original)\\n%s\\t(reformatted)\\n' '--- /src/a.py' '+++ /src/a.py'; \
                      echo 'cannot parse /src/b.py' >&2";
        let tool = Yapf::new(vec![
            "sh".to_string(),
            "-c".to_string(),
            script.to_string(),
            "fake-yapf".to_string(),
        ]);
        let a = PathBuf::from("/src/a.py");
        let b = PathBuf::from("/src/b.py");

        colored::control::set_override(false);
        let errors = tool.check(&[a.clone(), b.clone()]).unwrap();
        colored::control::unset_override();

        assert_eq!(errors.len(), 2);
        assert!(errors[&a].starts_with("--- /src/a.py"));
        assert_eq!(errors[&b], "");
    }

    #[test]
    fn test_empty_input_spawns_nothing() {
        let tool = Yapf::new(vec!["fmtcheck-no-such-yapf".to_string()]);
        assert!(tool.check(&[]).unwrap().is_empty());
        assert!(tool.fix(&[]).is_ok());
    }

    #[test]
    #[cfg(unix)]
    fn test_fix_requires_success() {
        let tool = Yapf::new(vec!["false".to_string()]);
        assert!(tool.fix(&[PathBuf::from("/src/a.py")]).is_err());
    }
}
