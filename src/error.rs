//! Crate error type.
//!
//! Every fallible operation in the library returns [`Result`]. Parse
//! failures are surfaced to the caller and never recovered into a
//! placeholder time; defined skip rules (unassigned terminal, unknown
//! aircraft class, all-tabu neighborhood) are not errors.

use std::path::PathBuf;

use crate::models::TerminalId;
use crate::validation::ValidationError;

/// Errors produced by ingestion, validation, scheduling and reporting.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A clock string is not of the form `H:MM am|pm`.
    #[error("invalid time '{input}': {reason}")]
    InvalidTime {
        /// The rejected input.
        input: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// A calendar date is not of the form `YYYY-MM-DD`.
    #[error("invalid date '{input}'")]
    InvalidDate {
        /// The rejected input.
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A terminal field is neither an integer nor an unassigned sentinel.
    #[error("invalid terminal '{0}'")]
    InvalidTerminal(String),

    /// Neither the estimated nor the scheduled arrival time is present.
    #[error("flight '{code}' has no arrival time")]
    MissingArrival {
        /// Flight code.
        code: String,
    },

    /// A flight record failed to parse.
    #[error("record at line {line}: {source}")]
    Record {
        /// 1-based line in the input file.
        line: u64,
        #[source]
        source: Box<Error>,
    },

    /// A terminal queue was handed to the scheduler without conveyors.
    #[error("terminal {0} has no conveyors")]
    NoConveyors(TerminalId),

    /// Input failed validation; every detected problem is listed.
    #[error("{} validation error(s): {}", .0.len(), join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// A results log row could not be interpreted.
    #[error("invalid results log row {row}: {reason}")]
    InvalidResults {
        /// 1-based data row (header excluded).
        row: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// A configuration file could not be parsed.
    #[error("invalid configuration in {path}")]
    Config {
        /// Path of the configuration file.
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Underlying I/O failure (missing or unreadable file).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CSV reader or writer failure.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_record_error_display() {
        let err = Error::Record {
            line: 3,
            source: Box::new(Error::InvalidTerminal("X".into())),
        };
        assert_eq!(err.to_string(), "record at line 3: invalid terminal 'X'");
    }

    #[test]
    fn test_validation_error_display() {
        let err = Error::Validation(vec![
            ValidationError::new(ValidationErrorKind::DuplicateCode, "Duplicate flight code: AA1"),
            ValidationError::new(ValidationErrorKind::NoConveyors, "Terminal 6 has no conveyors"),
        ]);
        let text = err.to_string();
        assert!(text.starts_with("2 validation error(s)"));
        assert!(text.contains("AA1"));
        assert!(text.contains("Terminal 6"));
    }
}
