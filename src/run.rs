//! Top-level check/fix flow shared by the binary and the integration tests.

use crate::error::{FormatError, FormatResult};
use crate::exit_codes::{FORMAT_ERRORS, SUCCESS};
use crate::formatter::CodeFormatter;
use crate::git::{VersionControl, compile_excludes};
use crate::report::{plural, write_format_check};
use crate::tools::ToolRegistry;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

/// What to format and how.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Files or directories given on the command line
    pub paths: Vec<PathBuf>,
    /// Regular expressions excluding repository-relative paths from git listing
    pub exclude: Vec<String>,
    /// Only consider files changed since this revision
    pub base: Option<String>,
    /// Apply fixes instead of only reporting
    pub fix: bool,
}

/// Explicitly given paths that are existing regular files, made absolute.
fn explicit_files(paths: &[PathBuf], cwd: &Path) -> FormatResult<Vec<PathBuf>> {
    paths
        .iter()
        .map(|path| cwd.join(path))
        .filter(|path| path.is_file())
        .map(|path| path.canonicalize().map_err(|e| FormatError::io(e, path)))
        .collect()
}

/// Resolve the files to check: explicit files plus, in a repository, the
/// tracked files under `paths`. Returns `None` when `--base` is unusable.
fn resolve_files(options: &RunOptions, vcs: &dyn VersionControl, cwd: &Path) -> FormatResult<Option<Vec<PathBuf>>> {
    let in_repository = vcs.is_repository();
    if !in_repository && options.base.is_some() {
        log::error!("A base commit may only be provided if running from a Git repo");
        return Ok(None);
    }

    let exclude = compile_excludes(&options.exclude)?;
    let mut files: BTreeSet<PathBuf> = explicit_files(&options.paths, cwd)?.into_iter().collect();

    if in_repository {
        let repo = vcs.repository_root()?;
        let cwd_resolved = cwd.canonicalize().unwrap_or_else(|_| cwd.to_path_buf());
        let repo_resolved = repo.canonicalize().unwrap_or_else(|_| repo.clone());
        match cwd_resolved.strip_prefix(&repo_resolved) {
            Ok(subdir) if !subdir.as_os_str().is_empty() => log::info!(
                "Checking files in the {} subdirectory of the {} repository",
                subdir.display(),
                repo.display()
            ),
            _ => log::info!("Checking files in the {} repository", repo.display()),
        }

        files.extend(vcs.list_files(options.base.as_deref(), &options.paths, &exclude)?);
    }

    Ok(Some(files.into_iter().collect()))
}

/// Check, and optionally fix, formatting. Diffs go to `out`.
///
/// Returns the process exit code. Errors are tool or setup failures that
/// aborted the run.
pub fn run_with_output<W: Write>(
    options: &RunOptions,
    vcs: &dyn VersionControl,
    registry: &ToolRegistry,
    cwd: &Path,
    out: &mut W,
) -> FormatResult<i32> {
    let Some(files) = resolve_files(options, vcs, cwd)? else {
        return Ok(FORMAT_ERRORS);
    };

    log::debug!(
        "Found {} files:\n{}",
        files.len(),
        files.iter().map(|f| f.display().to_string()).collect::<Vec<_>>().join("\n")
    );

    let formatter = CodeFormatter::new(registry, files);
    log::info!("Checking formatting for {}", plural(formatter.paths().len(), "file"));

    let errors = formatter.check()?;
    write_format_check(out, &errors, !options.fix, cwd).map_err(|e| FormatError::io(e, "<stdout>"))?;

    if errors.is_empty() {
        log::info!("Congratulations! No formatting changes needed");
        return Ok(SUCCESS);
    }

    if options.fix {
        formatter.fix()?;
        // TODO: re-run the check to confirm the fixes took
        log::info!("Formatting fixes applied successfully");
        return Ok(SUCCESS);
    }

    log::error!("Formatting errors found");
    Ok(FORMAT_ERRORS)
}

/// [`run_with_output`] writing diffs to stdout.
pub fn run(options: &RunOptions, vcs: &dyn VersionControl, registry: &ToolRegistry, cwd: &Path) -> FormatResult<i32> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(options, vcs, registry, cwd, &mut out)
}
