//! Subprocess execution for external formatters.
//!
//! Output is captured as raw bytes; decoding is left to the caller. No timeout
//! is applied, so a hung tool hangs the run.

use crate::error::{FormatError, FormatResult};
use std::io::{self, Read, Write};
use std::process::{Command, Stdio};
use std::thread;

/// Result of executing a tool.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Standard output from the tool.
    pub stdout: Vec<u8>,
    /// Standard error from the tool.
    pub stderr: Vec<u8>,
    /// Human-readable exit status, e.g. `exit status: 1`.
    pub status: String,
    /// Whether the tool exited with status 0.
    pub success: bool,
}

impl ToolOutput {
    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim_end().to_string()
    }
}

/// Run `command` (binary plus fixed arguments) followed by `args`.
///
/// When `input` is given it is written to the tool's stdin; otherwise stdin is null.
pub fn execute<S: AsRef<str>>(command: &[String], args: &[S], input: Option<&[u8]>) -> FormatResult<ToolOutput> {
    let Some((binary, base_args)) = command.split_first() else {
        return Err(FormatError::ToolNotFound { tool: String::new() });
    };

    let mut cmd = Command::new(binary);
    cmd.args(base_args)
        .args(args.iter().map(AsRef::<str>::as_ref))
        .stdin(if input.is_some() { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    log::debug!("Running {}", command_line(command, args));

    let mut child = cmd.spawn().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            FormatError::ToolNotFound { tool: binary.clone() }
        } else {
            FormatError::io(e, binary)
        }
    })?;

    let stdout_handle = child
        .stdout
        .take()
        .map(|stdout| thread::spawn(move || read_pipe(stdout)));
    let stderr_handle = child
        .stderr
        .take()
        .map(|stderr| thread::spawn(move || read_pipe(stderr)));

    // Write stdin if required; dropping the handle closes the pipe
    let written = match (input, child.stdin.take()) {
        (Some(data), Some(mut stdin)) => stdin.write_all(data),
        _ => Ok(()),
    };

    // Always reap the child so its status and stderr are available
    let status = child.wait().map_err(|e| FormatError::io(e, binary))?;
    let stdout = join_reader(stdout_handle).map_err(|e| FormatError::io(e, binary))?;
    let stderr = join_reader(stderr_handle).map_err(|e| FormatError::io(e, binary))?;

    match written {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            log::debug!("{binary} exited before reading all of its input");
        }
        Err(e) => return Err(FormatError::io(e, binary)),
        Ok(()) => {}
    }

    Ok(ToolOutput {
        stdout,
        stderr,
        status: status.to_string(),
        success: status.success(),
    })
}

/// Run a tool and require a zero exit status.
pub fn execute_checked<S: AsRef<str>>(
    command: &[String],
    args: &[S],
    input: Option<&[u8]>,
) -> FormatResult<ToolOutput> {
    let output = execute(command, args, input)?;
    if output.success {
        Ok(output)
    } else {
        Err(FormatError::InvocationFailed {
            command: command_line(command, args),
            status: output.status.clone(),
            stderr: output.stderr_lossy(),
        })
    }
}

/// Shell-like rendering of a command for logs and error messages.
pub fn command_line<S: AsRef<str>>(command: &[String], args: &[S]) -> String {
    command
        .iter()
        .map(String::as_str)
        .chain(args.iter().map(AsRef::<str>::as_ref))
        .collect::<Vec<_>>()
        .join(" ")
}

fn read_pipe<R: Read>(mut pipe: R) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    pipe.read_to_end(&mut buf)?;
    Ok(buf)
}

fn join_reader(handle: Option<thread::JoinHandle<io::Result<Vec<u8>>>>) -> io::Result<Vec<u8>> {
    match handle {
        Some(handle) => handle
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("Output reader thread panicked"))),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tool_not_found() {
        let result = execute(&cmd(&["nonexistent-tool-xyz123"]), &["--version"], None);
        assert!(matches!(result, Err(FormatError::ToolNotFound { tool }) if tool == "nonexistent-tool-xyz123"));
    }

    #[test]
    fn test_empty_command() {
        let result = execute::<&str>(&[], &[], None);
        assert!(matches!(result, Err(FormatError::ToolNotFound { .. })));
    }

    #[test]
    fn test_command_line_joins_prefix_and_args() {
        assert_eq!(
            command_line(&cmd(&["python", "-m", "yapf"]), &["--diff", "a.py"]),
            "python -m yapf --diff a.py"
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_stdin_is_forwarded() {
        let output = execute(&cmd(&["cat"]), &[] as &[&str], Some(b"hello\xffworld")).unwrap();
        assert!(output.success);
        assert_eq!(output.stdout, b"hello\xffworld");
    }

    #[test]
    #[cfg(unix)]
    fn test_non_zero_exit_is_invocation_failure() {
        let result = execute_checked(&cmd(&["sh", "-c", "echo broken >&2; exit 3"]), &[] as &[&str], None);
        match result {
            Err(FormatError::InvocationFailed { stderr, .. }) => assert_eq!(stderr, "broken"),
            other => panic!("expected invocation failure, got {other:?}"),
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_tool_rejecting_input_early_reports_its_stderr() {
        let input = vec![b'x'; 4 << 20];
        let result = execute_checked(
            &cmd(&["sh", "-c", "echo 'parse error' >&2; exit 1"]),
            &[] as &[&str],
            Some(&input),
        );
        match result {
            Err(FormatError::InvocationFailed { status, stderr, .. }) => {
                assert_eq!(stderr, "parse error");
                assert_eq!(status, "exit status: 1");
            }
            other => panic!("expected invocation failure, got {other:?}"),
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_non_zero_exit_is_reported_not_raised() {
        let output = execute(&cmd(&["sh", "-c", "exit 1"]), &[] as &[&str], None).unwrap();
        assert!(!output.success);
    }
}
