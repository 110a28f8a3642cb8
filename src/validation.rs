//! Input validation for fleet loading problems.
//!
//! Checks structural integrity of the package list before optimizing.
//! Detects:
//! - An empty package list
//! - Duplicate package IDs
//! - Non-positive weights
//! - NaN / infinite weights or profits
//!
//! A package heavier than a truck's capacity is *not* an error: it simply
//! can never be loaded and ends up among the leftovers.

use std::collections::HashSet;
use std::fmt;

use crate::models::Package;

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
    /// No packages were supplied.
    Empty,
    /// Two packages share the same ID.
    DuplicateId,
    /// A package has a weight of zero or less.
    NonPositiveWeight,
    /// A package has a NaN or infinite weight or profit.
    NonFiniteValue,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a package list.
///
/// Checks:
/// 1. At least one package
/// 2. No duplicate IDs
/// 3. Finite weight and profit
/// 4. Weight > 0
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_packages(packages: &[Package]) -> ValidationResult {
    if packages.is_empty() {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::Empty,
            "Package list is empty",
        )]);
    }

    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for p in packages {
        if !ids.insert(p.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate package ID: {}", p.id),
            ));
        }

        if !p.weight.is_finite() || !p.profit.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFiniteValue,
                format!(
                    "Package {} has non-finite weight ({}) or profit ({})",
                    p.id, p.weight, p.profit
                ),
            ));
        } else if p.weight <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveWeight,
                format!("Package {} weight must be greater than 0, got {}", p.id, p.weight),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
