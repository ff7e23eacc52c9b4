use thiserror::Error;

use crate::domain::{Part, Version};

/// Unified error type for tdver operations
#[derive(Error, Debug)]
pub enum TdverError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),

    /// The changeset requires an increment that has not been released yet.
    #[error(
        " Current version: {current}\nRequired version: {required}\nVersion part {} must increment for this changeset per TDVer rules.",
        .part.label()
    )]
    IncrementRequired {
        part: Part,
        current: Version,
        required: Version,
    },

    /// The changeset requires an increment that collides with released history.
    ///
    /// `existing` is the released version the increment runs into. It differs
    /// from `required` when a dev bump is judged as a patch bump.
    #[error(
        " Current version: {current}\nRequired version: {required}\nThis changeset requires an increment to the {} version part per TDVer rules, but the specified version ({existing}) already exists.",
        .part.name()
    )]
    PolicyViolation {
        part: Part,
        current: Version,
        required: Version,
        existing: Version,
    },

    #[error("{0}")]
    NoRelease(String),

    #[error("{0}")]
    NoSupport(String),

    #[error("Not supported: {0}")]
    Unsupported(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience type alias for Results in tdver
pub type Result<T> = std::result::Result<T, TdverError>;

impl TdverError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TdverError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        TdverError::Version(msg.into())
    }

    pub fn no_release(msg: impl Into<String>) -> Self {
        TdverError::NoRelease(msg.into())
    }

    pub fn no_support(msg: impl Into<String>) -> Self {
        TdverError::NoSupport(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        TdverError::Unsupported(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TdverError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TdverError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_increment_required_message() {
        let err = TdverError::IncrementRequired {
            part: Part::B,
            current: Version::new(1, 0, 0, 0),
            required: Version::new(1, 1, 0, 0),
        };
        let lines: Vec<String> = err.to_string().lines().map(String::from).collect();
        assert_eq!(
            lines,
            vec![
                " Current version: 1.0.0",
                "Required version: 1.1.0",
                "Version part B must increment for this changeset per TDVer rules.",
            ]
        );
    }

    #[test]
    fn test_policy_violation_message() {
        let err = TdverError::PolicyViolation {
            part: Part::D,
            current: Version::new(1, 0, 0, 0),
            required: Version::new(1, 0, 0, 1),
            existing: Version::new(1, 0, 1, 0),
        };
        let lines: Vec<String> = err.to_string().lines().map(String::from).collect();
        assert_eq!(lines[0], " Current version: 1.0.0");
        assert_eq!(lines[1], "Required version: 1.0.0-1");
        assert!(lines[2].contains("increment to the d version part"));
        assert!(lines[2].contains("(1.0.1) already exists"));
    }

    #[test]
    fn test_action_errors_carry_bare_message() {
        assert_eq!(
            TdverError::no_release("A release doesn't seem to be possible.").to_string(),
            "A release doesn't seem to be possible."
        );
        assert_eq!(TdverError::no_support("nope").to_string(), "nope");
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (TdverError::config("x"), "Configuration error"),
            (TdverError::version("x"), "Version error"),
            (TdverError::unsupported("x"), "Not supported"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
