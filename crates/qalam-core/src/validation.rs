//! # Catalog Field Rules
//!
//! Checks applied to branch, category and product fields before they are
//! stored or sent to the tax authority.
//!
//! ## Where These Run
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  request body ──serde──► Branch / Product ──validate()──► repository    │
//! │                                  │                                      │
//! │                                  ├── validate_sku                       │
//! │                                  ├── validate_bilingual_name            │
//! │                                  ├── validate_phone      (+20 / 0)      │
//! │                                  ├── validate_price                     │
//! │                                  └── TaxNumberValidator  (9 / 14)       │
//! │                                                                         │
//! │  StoreSettings::validate reuses validate_vat_rate and                   │
//! │  validate_decimal_places for the VAT section.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```rust
//! use qalam_core::validation::{validate_bilingual_name, validate_sku};
//!
//! assert!(validate_sku("PEN-BIC-BLUE").is_ok());
//! assert!(validate_bilingual_name("name", "قلم جاف أزرق", "Blue Ballpoint Pen").is_ok());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;

/// Outcome of a single field check.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest display name accepted in either language.
pub const MAX_NAME_LENGTH: usize = 200;

/// Longest SKU accepted.
pub const MAX_SKU_LENGTH: usize = 50;

/// Most decimal places a money setting may ask for.
pub const MAX_DECIMAL_PLACES: u32 = 10;

// =============================================================================
// Text Fields
// =============================================================================

/// SKUs are printed on shelf labels and encoded in Code 128 barcodes, so
/// only ASCII letters, digits, `-` and `_` are allowed, up to
/// [`MAX_SKU_LENGTH`]. Surrounding whitespace is ignored.
///
/// ```rust
/// use qalam_core::validation::validate_sku;
///
/// assert!(validate_sku("NB-A4-100").is_ok());
/// assert!(validate_sku(" NB-A4-100 ").is_ok());
/// assert!(validate_sku("دفتر").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    const FIELD: &str = "sku";
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: FIELD.to_string(),
        });
    }

    if sku.len() > MAX_SKU_LENGTH {
        return Err(ValidationError::TooLong {
            field: FIELD.to_string(),
            max: MAX_SKU_LENGTH,
        });
    }

    if let Some(bad) = sku
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_')))
    {
        return Err(ValidationError::InvalidFormat {
            field: FIELD.to_string(),
            reason: format!("unexpected character {bad:?}"),
        });
    }

    Ok(())
}

/// Validates an Arabic/English name pair.
///
/// Egyptian receipts must carry both names, so neither may be blank.
/// Length is counted in characters, not bytes, since Arabic letters take
/// two bytes each in UTF-8.
pub fn validate_bilingual_name(field: &str, name_ar: &str, name_en: &str) -> ValidationResult<()> {
    for (suffix, value) in [("ar", name_ar), ("en", name_en)] {
        let value = value.trim();
        if value.is_empty() {
            return Err(ValidationError::Required {
                field: format!("{field}_{suffix}"),
            });
        }
        if value.chars().count() > MAX_NAME_LENGTH {
            return Err(ValidationError::TooLong {
                field: format!("{field}_{suffix}"),
                max: MAX_NAME_LENGTH,
            });
        }
    }

    Ok(())
}

/// Validates an Egyptian phone number.
///
/// ## Rules
/// - International form `+20` followed by 10 digits (mobile), or
/// - Local form `0` followed by 10 digits
/// - Spaces and hyphens are ignored
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let compact: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if compact.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let national = compact
        .strip_prefix("+20")
        .or_else(|| compact.strip_prefix('0'));

    match national {
        Some(rest) if rest.len() == 10 && rest.chars().all(|c| c.is_ascii_digit()) => Ok(()),
        _ => Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "expected +20XXXXXXXXXX or 0XXXXXXXXXX".to_string(),
        }),
    }
}

// =============================================================================
// Amounts and Precision
// =============================================================================

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative
/// - Zero is allowed (free samples)
///
/// ## Example
/// ```rust
/// use qalam_core::validation::validate_price;
/// use rust_decimal::Decimal;
///
/// assert!(validate_price("sale_price", Decimal::new(12_500, 3)).is_ok());
/// assert!(validate_price("sale_price", Decimal::ZERO).is_ok());
/// assert!(validate_price("sale_price", Decimal::new(-1, 0)).is_err());
/// ```
pub fn validate_price(field: &str, amount: Decimal) -> ValidationResult<()> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a VAT rate in percent.
///
/// ## Rules
/// - Must be between 0 and 100 inclusive
pub fn validate_vat_rate(rate: Decimal) -> ValidationResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: "vat_rate".to_string(),
            min: "0".to_string(),
            max: "100".to_string(),
        });
    }

    Ok(())
}

/// Validates a rounding precision.
pub fn validate_decimal_places(places: u32) -> ValidationResult<()> {
    if places > MAX_DECIMAL_PLACES {
        return Err(ValidationError::OutOfRange {
            field: "decimal_places".to_string(),
            min: "0".to_string(),
            max: MAX_DECIMAL_PLACES.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sku_rules() {
        assert!(validate_sku("PEN-BIC-BLUE").is_ok());
        assert!(validate_sku("NB_A4_100").is_ok());
        assert!(validate_sku(&"X".repeat(MAX_SKU_LENGTH)).is_ok());

        assert!(matches!(validate_sku("  "), Err(ValidationError::Required { .. })));
        assert!(matches!(
            validate_sku(&"X".repeat(MAX_SKU_LENGTH + 1)),
            Err(ValidationError::TooLong { max: 50, .. })
        ));
        match validate_sku("PEN BLUE") {
            Err(ValidationError::InvalidFormat { reason, .. }) => {
                assert_eq!(reason, "unexpected character ' '")
            }
            other => panic!("expected InvalidFormat, got {other:?}"),
        }
        assert!(validate_sku("قلم").is_err());
    }

    #[test]
    fn test_validate_bilingual_name() {
        assert!(validate_bilingual_name("name", "دفتر", "Notebook").is_ok());

        let err = validate_bilingual_name("name", "", "Notebook").unwrap_err();
        assert_eq!(
            err,
            ValidationError::Required {
                field: "name_ar".to_string()
            }
        );

        let err = validate_bilingual_name("name", "دفتر", "  ").unwrap_err();
        assert_eq!(
            err,
            ValidationError::Required {
                field: "name_en".to_string()
            }
        );

        // 200 Arabic letters are 400 bytes but still within the limit
        assert!(validate_bilingual_name("name", &"ق".repeat(200), "x").is_ok());
        assert!(validate_bilingual_name("name", &"ق".repeat(201), "x").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+201001234567").is_ok());
        assert!(validate_phone("01001234567").is_ok());
        assert!(validate_phone("+20 100 123 4567").is_ok());
        assert!(validate_phone("010-0123-4567").is_ok());

        assert!(validate_phone("").is_err());
        assert!(validate_phone("+2010012345").is_err());
        assert!(validate_phone("+441001234567").is_err());
        assert!(validate_phone("0100123456a").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("cost", Decimal::ZERO).is_ok());
        assert!(validate_price("cost", Decimal::new(1099, 2)).is_ok());
        assert!(validate_price("cost", Decimal::new(-1, 3)).is_err());
    }

    #[test]
    fn test_validate_vat_rate() {
        assert!(validate_vat_rate(Decimal::ZERO).is_ok());
        assert!(validate_vat_rate(Decimal::from(14)).is_ok());
        assert!(validate_vat_rate(Decimal::ONE_HUNDRED).is_ok());
        assert!(validate_vat_rate(Decimal::new(10001, 2)).is_err());
        assert!(validate_vat_rate(Decimal::from(-5)).is_err());
    }

    #[test]
    fn test_validate_decimal_places() {
        assert!(validate_decimal_places(0).is_ok());
        assert!(validate_decimal_places(3).is_ok());
        assert!(validate_decimal_places(10).is_ok());
        assert!(validate_decimal_places(11).is_err());
    }
}
