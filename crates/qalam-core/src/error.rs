//! # Domain Errors
//!
//! ## Where Errors Live
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Qalam error enums                                 │
//! │                                                                         │
//! │  qalam-core errors (this file)                                         │
//! │  ├── CoreError        - Arithmetic and argument failures               │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  qalam-services errors (separate crate)                                │
//! │  ├── ConfigError      - Settings load/save failures                    │
//! │  └── EInvoiceError    - E-invoicing client failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → handler response                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Failures from VAT arithmetic, settings checks, and entity validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An argument could not be turned into a usable value.
    ///
    /// ## When This Occurs
    /// - A NaN or infinite `f64` amount handed to [`crate::vat::amount_from_f64`]
    #[error("Invalid argument {name}: {reason}")]
    InvalidArgument { name: String, reason: String },

    /// Decimal arithmetic left the representable range.
    ///
    /// `rust_decimal` panics on overflow in its operator impls, so every
    /// money operation uses the checked variants and reports this instead.
    #[error("Arithmetic overflow while computing {operation}")]
    Overflow { operation: &'static str },

    /// Settings failed their consistency checks.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// A catalog or settings field was rejected.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Why a single field was rejected. `field` is the serde field name so
/// handlers can point the form at it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Empty or whitespace only.
    #[error("{field} is required")]
    Required { field: String },

    /// Longer than `max` characters (not bytes).
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Outside an inclusive range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., non-digit tax number, malformed phone).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Not one of a closed set of codes.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result alias used across qalam-core.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::Overflow {
            operation: "calculate_vat",
        };
        assert_eq!(
            err.to_string(),
            "Arithmetic overflow while computing calculate_vat"
        );

        let err = CoreError::InvalidArgument {
            name: "amount".to_string(),
            reason: "must be finite".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid argument amount: must be finite");
    }

    #[test]
    fn test_field_rejection_messages() {
        let err = ValidationError::TooLong {
            field: "name_ar".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "name_ar must be at most 200 characters");

        let err = ValidationError::OutOfRange {
            field: "vat_rate".to_string(),
            min: "0".to_string(),
            max: "100".to_string(),
        };
        assert_eq!(err.to_string(), "vat_rate must be between 0 and 100");
    }

    #[test]
    fn test_field_rejection_lifts_into_core_error() {
        fn check(sku: &str) -> CoreResult<()> {
            if sku.is_empty() {
                Err(ValidationError::Required {
                    field: "sku".to_string(),
                })?;
            }
            Ok(())
        }

        let err = check("").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: sku is required");
        assert!(check("PEN-001").is_ok());
    }
}
