//! # Tax Number Module
//!
//! Structural validation of Egyptian Tax Authority identifiers.
//!
//! ## Accepted Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Tax Registration Number (9 digits)     123456789                       │
//! │  National / extended ID  (14 digits)    29001011234567                  │
//! │                                                                         │
//! │  Everything else is rejected:                                           │
//! │    ""               → empty                                             │
//! │    "12345678"       → 8 digits                                          │
//! │    "310-123-456"    → separator characters                              │
//! │    "1234567890123A" → non-digit                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Surrounding whitespace is trimmed before checking. Arabic-Indic
//! (`٠`-`٩`) and Extended Arabic-Indic (`۰`-`۹`) digits are accepted and
//! stored as ASCII. No checksum is verified; the authority publishes none
//! for local use.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::ValidationResult;

const FIELD: &str = "tax_number";

/// Which of the two accepted lengths a number has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxNumberKind {
    /// 9-digit tax registration number.
    Registration,
    /// 14-digit identifier.
    Extended,
}

impl TaxNumberKind {
    fn from_len(len: usize) -> Option<Self> {
        match len {
            9 => Some(TaxNumberKind::Registration),
            14 => Some(TaxNumberKind::Extended),
            _ => None,
        }
    }
}

/// A tax number that passed structural validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaxNumber {
    digits: String,
    kind: TaxNumberKind,
}

impl TaxNumber {
    /// The trimmed digits, always ASCII.
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    pub fn kind(&self) -> TaxNumberKind {
        self.kind
    }
}

impl std::fmt::Display for TaxNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.digits)
    }
}

/// Stateless validator for tax identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxNumberValidator;

impl TaxNumberValidator {
    pub fn new() -> Self {
        TaxNumberValidator
    }

    /// Returns true for a 9- or 14-digit number. Never errors.
    ///
    /// ## Example
    /// ```rust
    /// use qalam_core::tax_number::TaxNumberValidator;
    ///
    /// let validator = TaxNumberValidator::new();
    /// assert!(validator.is_valid("123456789"));
    /// assert!(!validator.is_valid("12345678"));
    /// ```
    pub fn is_valid(&self, value: &str) -> bool {
        self.validate(value).is_ok()
    }

    /// Async form of [`is_valid`](Self::is_valid).
    ///
    /// Exists so callers can keep one await-based call site if a remote
    /// lookup against the authority is added later. The result is always
    /// identical to the synchronous check.
    pub async fn is_valid_async(&self, value: &str) -> bool {
        self.is_valid(value)
    }

    /// Validates and returns the parsed number, or the reason it failed.
    pub fn validate(&self, value: &str) -> ValidationResult<TaxNumber> {
        let clean = value.trim();

        if clean.is_empty() {
            return Err(ValidationError::Required {
                field: FIELD.to_string(),
            });
        }

        let digits: String = clean
            .chars()
            .map(ascii_digit)
            .collect::<Option<_>>()
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: FIELD.to_string(),
                reason: "must contain digits only".to_string(),
            })?;

        let kind = TaxNumberKind::from_len(digits.len()).ok_or_else(|| {
            ValidationError::InvalidFormat {
                field: FIELD.to_string(),
                reason: format!("must be 9 or 14 digits, got {}", digits.len()),
            }
        })?;

        Ok(TaxNumber { digits, kind })
    }
}

/// Maps ASCII and Arabic-Indic digits to their ASCII form.
fn ascii_digit(c: char) -> Option<char> {
    let zero = match c {
        '0'..='9' => return Some(c),
        '\u{0660}'..='\u{0669}' => 0x0660,
        '\u{06F0}'..='\u{06F9}' => 0x06F0,
        _ => return None,
    };
    char::from_digit(c as u32 - zero, 10)
}

// =============================================================================
// Unit Tests
// =============================================================================
