//! Printing of formatting check results.

use crate::tools::DiffResult;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// `1 file`, `3 files`.
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Express `path` relative to `cwd`, or resolved and absolute if it lies outside.
pub fn path_relative_to_cwd(path: &Path, cwd: &Path) -> PathBuf {
    let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let cwd = cwd.canonicalize().unwrap_or_else(|_| cwd.to_path_buf());
    match resolved.strip_prefix(&cwd) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => resolved,
    }
}

/// One copy-and-pastable fix command per file with errors.
pub fn fix_commands(errors: &DiffResult, cwd: &Path) -> Vec<String> {
    errors
        .keys()
        .map(|path| format!("  fmtcheck --fix {}", path_relative_to_cwd(path, cwd).display()))
        .collect()
}

/// Write the diffs of a check and, optionally, the commands that fix them.
///
/// Nothing is written when there are no errors.
pub fn write_format_check<W: Write>(
    out: &mut W,
    errors: &DiffResult,
    show_fix_commands: bool,
    cwd: &Path,
) -> io::Result<()> {
    if errors.is_empty() {
        return Ok(());
    }

    log::warn!(
        "Found {} with formatting errors. Format changes:",
        plural(errors.len(), "file")
    );
    for diff in errors.values() {
        write!(out, "{diff}")?;
    }
    out.flush()?;

    if show_fix_commands {
        log::warn!("To fix formatting, run:\n\n{}\n", fix_commands(errors, cwd).join("\n"));
    }

    Ok(())
}

/// Print the result of a check to stdout.
pub fn print_format_check(errors: &DiffResult, show_fix_commands: bool) -> io::Result<()> {
    let cwd = std::env::current_dir()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_format_check(&mut out, errors, show_fix_commands, &cwd)
}
