/// Exit codes for fmtcheck
///
/// CI systems can tell formatting problems apart from a broken setup.
/// Success - No formatting changes needed, or all changes were applied
pub const SUCCESS: i32 = 0;

/// Formatting errors found and not fixed, or `--base` given outside a git repository
pub const FORMAT_ERRORS: i32 = 1;

/// Tool error - A formatter failed, is missing, or the configuration is invalid
pub const TOOL_ERROR: i32 = 2;

/// Helper functions for consistent exit behavior
pub mod exit {
    use super::TOOL_ERROR;

    /// Exit with the given code
    pub fn with_code(code: i32) -> ! {
        std::process::exit(code);
    }

    /// Exit with tool error code (2)
    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR);
    }
}
