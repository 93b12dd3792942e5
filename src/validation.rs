//! Up-front configuration validation.
//!
//! Checks a scheduling configuration before any request is submitted, so
//! configuration mistakes surface as a batch instead of one rejection at a
//! time. Detects:
//! - Missing base rates
//! - Missing per-minute rates for an intended class/service pair
//! - Non-positive Round-Robin quanta
//!
//! The engine enforces the same rules operation-by-operation; this module
//! exists for callers that want every problem reported at once.

use crate::dispatching::Discipline;
use crate::models::{RateTable, RoomClass};

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
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A class has no base rate.
    MissingBaseRate,
    /// A class/service pair has no per-minute rate.
    MissingServiceRate,
    /// Round-Robin quantum is zero or negative.
    NonPositiveQuantum,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a scheduling configuration.
///
/// `services` lists every service type the caller intends to schedule; each
/// must be priced for every class, since any room class may order any
/// service.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(
    rates: &RateTable,
    services: &[&str],
    discipline: &Discipline,
) -> ValidationResult {
    let mut errors = Vec::new();

    for class in RoomClass::ALL {
        if rates.base_cents(class).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingBaseRate,
                format!("no base rate for class {class}"),
            ));
        }
        for service in services {
            if rates.per_minute_cents(class, service).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MissingServiceRate,
                    format!("no per-minute rate for {class} / {service}"),
                ));
            }
        }
    }

    if let Discipline::RoundRobin { quantum_minutes } = discipline {
        if *quantum_minutes <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveQuantum,
                format!("time quantum must be positive, got {quantum_minutes}"),
            ));
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

    #[test]
    fn test_standard_config_is_valid() {
        let rates = RateTable::standard();
        let services = ["Housekeeping", "Butler Service"];
        assert!(validate_config(&rates, &services, &Discipline::Priority).is_ok());
    }

    #[test]
    fn test_missing_base_rate() {
        let rates = RateTable::new().with_per_minute(RoomClass::Vip, "Butler Service", 200);
        let errors = validate_config(&rates, &[], &Discipline::Fcfs).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::MissingBaseRate));
    }

    #[test]
    fn test_missing_service_rate() {
        let rates = RateTable::standard();
        let errors = validate_config(&rates, &["Spa"], &Discipline::Fcfs).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::MissingServiceRate));
        assert!(errors[0].message.contains("Spa"));
    }

    #[test]
    fn test_non_positive_quantum() {
        let rates = RateTable::standard();
        let discipline = Discipline::RoundRobin { quantum_minutes: 0 };
        let errors = validate_config(&rates, &[], &discipline).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonPositiveQuantum));
    }

    #[test]
    fn test_multiple_errors_collected() {
        let rates = RateTable::new();
        let discipline = Discipline::RoundRobin { quantum_minutes: -1 };
        let errors = validate_config(&rates, &["Housekeeping"], &discipline).unwrap_err();
        // 3 missing bases + 3 missing service rates + bad quantum.
        assert_eq!(errors.len(), 7);
    }
}
