//! Input validation for flight sets.
//!
//! Checks structural integrity of flights against a terminal layout
//! before scheduling. Detects:
//! - Duplicate flight codes
//! - Flights routed to a terminal missing from the layout
//! - Flights routed to a terminal without conveyors
//! - Negative processing times
//!
//! Unassigned flights are not errors; the scheduler skips them.

use std::collections::HashSet;

use crate::models::{Flight, TerminalLayout};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two flights share the same code.
    DuplicateCode,
    /// A flight references a terminal that is not in the layout.
    UnknownTerminal,
    /// A flight references a terminal with zero conveyors.
    NoConveyors,
    /// A flight has a negative processing time.
    NegativeSize,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a flight set against a terminal layout.
///
/// Checks:
/// 1. No duplicate codes among assigned flights
/// 2. Every assigned terminal exists in the layout
/// 3. Every assigned terminal has at least one conveyor
/// 4. No flight has a negative size
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_flights(flights: &[Flight], layout: &TerminalLayout) -> ValidationResult {
    let mut errors = Vec::new();
    let mut codes = HashSet::new();

    for flight in flights {
        if flight.size_ms < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeSize,
                format!("Flight '{}' has negative size {} ms", flight.code, flight.size_ms),
            ));
        }

        let Some(terminal) = flight.terminal else {
            continue;
        };
        if !codes.insert(flight.code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCode,
                format!("Duplicate flight code: {}", flight.code),
            ));
        }

        match layout.conveyor_count(terminal) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTerminal,
                format!("Flight '{}' references unknown terminal {terminal}", flight.code),
            )),
            Some(0) => errors.push(ValidationError::new(
                ValidationErrorKind::NoConveyors,
                format!(
                    "Flight '{}' is routed to terminal {terminal}, which has no conveyors",
                    flight.code
                ),
            )),
            Some(_) => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_flights() -> Vec<Flight> {
        vec![
            Flight::new("AA100", 0, 1_000).with_terminal(1),
            Flight::new("BA200", 500, 2_000).with_terminal(8),
            Flight::new("LH300", 700, 1_500),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_flights(&sample_flights(), &TerminalLayout::reference()).is_ok());
    }

    #[test]
    fn test_duplicate_code() {
        let flights = vec![
            Flight::new("AA100", 0, 1_000).with_terminal(1),
            Flight::new("AA100", 10, 1_000).with_terminal(2),
        ];
        let errors = validate_flights(&flights, &TerminalLayout::reference()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateCode);
        assert!(errors[0].message.contains("AA100"));
    }

    #[test]
    fn test_unknown_terminal() {
        let flights = vec![Flight::new("X1", 0, 1).with_terminal(42)];
        let errors = validate_flights(&flights, &TerminalLayout::reference()).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::UnknownTerminal);
    }

    #[test]
    fn test_terminal_without_conveyors() {
        let flights = vec![Flight::new("X1", 0, 1).with_terminal(6)];
        let errors = validate_flights(&flights, &TerminalLayout::reference()).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NoConveyors);
        assert!(errors[0].to_string().contains("terminal 6"));
    }

    #[test]
    fn test_unassigned_is_not_an_error() {
        let flights = vec![Flight::new("X1", 0, 1)];
        assert!(validate_flights(&flights, &TerminalLayout::new()).is_ok());
    }

    #[test]
    fn test_unassigned_duplicate_code_ignored() {
        let flights = vec![
            Flight::new("A", 0, 1_000).with_terminal(1),
            Flight::new("A", 0, 1_000),
            Flight::new("B", 0, 1_000),
            Flight::new("B", 0, 1_000),
        ];
        assert!(validate_flights(&flights, &TerminalLayout::reference()).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let flights = vec![
            Flight::new("A", 0, -5).with_terminal(0),
            Flight::new("A", 0, 1).with_terminal(99),
        ];
        let errors = validate_flights(&flights, &TerminalLayout::reference()).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [
                ValidationErrorKind::NegativeSize,
                ValidationErrorKind::NoConveyors,
                ValidationErrorKind::DuplicateCode,
                ValidationErrorKind::UnknownTerminal,
            ]
        );
    }
}
