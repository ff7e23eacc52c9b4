//! Pure formatting functions for UI output.
//!
//! Results go to stdout and failures to stderr. The plain version printed
//! by a passing `check` is left undecorated so it can be piped.

use console::style;

use crate::cli::orchestration::WorkflowResult;

/// Format and print an error message in red.
///
/// Multi-line messages keep their line structure; only the first line is
/// prefixed.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// The lines a successful operation reports, without styling.
pub fn result_lines(result: &WorkflowResult) -> Vec<String> {
    match result {
        WorkflowResult::Initialized { .. } => vec!["TDVer repository initialized.".to_string()],
        WorkflowResult::Valid { version } => vec![version.to_string()],
        WorkflowResult::Released { previous, new, .. } => vec![
            "Updated version.".to_string(),
            format!("old: {}", previous),
            format!("new: {}", new),
        ],
        WorkflowResult::BranchCreated { branch } => {
            vec![format!("Maintenance branch {} created.", branch)]
        }
    }
}

/// Print the report of a successful operation.
pub fn display_result(result: &WorkflowResult) {
    let mut lines = result_lines(result).into_iter();
    match result {
        WorkflowResult::Valid { .. } => lines.for_each(|line| println!("{}", line)),
        _ => {
            if let Some(headline) = lines.next() {
                display_success(&headline);
            }
            lines.for_each(|line| println!("  {}", line));
        }
    }
}
