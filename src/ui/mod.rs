//! User interface module - terminal output.
//!
//! tdver never prompts; every operation runs to completion and reports once.
//! See [formatter] for the output functions.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{display_error, display_result, display_success, result_lines};
