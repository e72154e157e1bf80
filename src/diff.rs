//! Colorized unified diffs between a file and its formatted version.

use colored::Colorize;
use similar::TextDiff;

/// Lines of unchanged context around each hunk
const CONTEXT_LINES: usize = 3;

fn colorize_diff_line(line: &str) -> String {
    if line.starts_with("--- ") || line.starts_with("+++ ") {
        line.bold().white().to_string()
    } else if line.starts_with('-') {
        line.red().to_string()
    } else if line.starts_with('+') {
        line.green().to_string()
    } else if line.starts_with("@@ ") {
        line.cyan().to_string()
    } else {
        line.to_string()
    }
}

/// Colorizes raw unified diff text line by line.
///
/// Line endings are kept out of the escape sequences so that the output
/// splits into the same lines as the input.
pub fn colorize_diff(diff: &str) -> String {
    let mut out = String::with_capacity(diff.len());
    for line in diff.split_inclusive('\n') {
        let (body, ending) = match line.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (line, ""),
        };
        out.push_str(&colorize_diff_line(body));
        out.push_str(ending);
    }
    out
}

/// Renders the uncolored unified diff, or an empty string when the buffers match.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn unified_diff(path: &str, original: &[u8], formatted: &[u8]) -> String {
    if original == formatted {
        return String::new();
    }

    let original = String::from_utf8_lossy(original);
    let formatted = String::from_utf8_lossy(formatted);

    TextDiff::from_lines(&*original, &*formatted)
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .header(&format!("{path}  (original)"), &format!("{path}  (reformatted)"))
        .to_string()
}

/// Renders a colorized unified diff labelled with `path`.
pub fn render_diff(path: &str, original: &[u8], formatted: &[u8]) -> String {
    colorize_diff(&unified_diff(path, original, formatted))
}
