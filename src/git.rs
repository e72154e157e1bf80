//! Listing the files of a git repository.

use crate::error::{FormatError, FormatResult};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Version-control queries used to find the files to format.
pub trait VersionControl {
    /// Whether the working directory is inside a repository.
    fn is_repository(&self) -> bool;

    /// Absolute path of the repository's top-level directory.
    fn repository_root(&self) -> FormatResult<PathBuf>;

    /// Tracked files under `paths` (everything when empty), as absolute paths.
    ///
    /// With `base`, only files changed since that revision are listed. Files
    /// whose repository-relative path matches any of `exclude` are dropped.
    fn list_files(&self, base: Option<&str>, paths: &[PathBuf], exclude: &[Regex]) -> FormatResult<Vec<PathBuf>>;
}

/// Compile exclude patterns, reporting the first invalid one.
pub fn compile_excludes(patterns: &[String]) -> FormatResult<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| FormatError::InvalidExclude {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

/// [`VersionControl`] backed by the `git` command line.
pub struct Git {
    dir: PathBuf,
}

impl Git {
    /// Queries run in `dir`, normally the current directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn run(&self, args: &[&str]) -> FormatResult<Vec<u8>> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.dir)
            .output()
            .map_err(|e| FormatError::Git(format!("failed to run git: {e}")))?;

        if output.status.success() {
            Ok(output.stdout)
        } else {
            Err(FormatError::Git(format!(
                "'git {}' failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }
}

impl VersionControl for Git {
    fn is_repository(&self) -> bool {
        self.run(&["rev-parse", "--is-inside-work-tree"])
            .is_ok_and(|out| out.trim_ascii() == b"true")
    }

    fn repository_root(&self) -> FormatResult<PathBuf> {
        let out = self.run(&["rev-parse", "--show-toplevel"])?;
        Ok(PathBuf::from(String::from_utf8_lossy(out.trim_ascii()).into_owned()))
    }

    fn list_files(&self, base: Option<&str>, paths: &[PathBuf], exclude: &[Regex]) -> FormatResult<Vec<PathBuf>> {
        let root = self.repository_root()?;
        let pathspecs: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();

        let mut args: Vec<&str> = match base {
            None => vec!["ls-files", "-z", "--full-name"],
            Some(base) => vec!["diff", "-z", "--name-only", "--diff-filter=d", base],
        };
        args.push("--");
        args.extend(pathspecs.iter().map(String::as_str));

        let out = self.run(&args)?;
        let files = parse_listing(&out, &root, exclude);
        log::debug!("git listed {} files", files.len());
        Ok(files)
    }
}

/// Turn NUL-separated repository-relative names into existing absolute paths.
fn parse_listing(out: &[u8], root: &Path, exclude: &[Regex]) -> Vec<PathBuf> {
    String::from_utf8_lossy(out)
        .split('\0')
        .filter(|name| !name.is_empty())
        .filter(|name| !exclude.iter().any(|pattern| pattern.is_match(name)))
        .map(|name| root.join(name))
        .filter(|path| path.is_file())
        .collect()
}
