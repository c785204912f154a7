//! # VAT Module
//!
//! Egyptian value-added tax arithmetic on exact decimal amounts.
//!
//! ## Why Decimal, Not Float?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Egyptian pounds carry THREE minor digits (1 EGP = 1000 milliemes),     │
//! │  so prices like 12.345 must survive every step exactly.                │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal                                             │
//! │    96-bit integer mantissa + base-10 scale                              │
//! │    12.345 × 0.14 = 1.72830 exactly, then rounded to 1.728              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Formulas
//! ```text
//! vat   = round(net × rate / 100, dp)
//! gross = round(net + vat, dp)
//! net   = round(gross / (1 + rate / 100), dp)
//! ```
//!
//! ## Usage
//! ```rust
//! use qalam_core::vat::{VatCalculator, VatConfig};
//! use rust_decimal::Decimal;
//!
//! let calc = VatCalculator::new(&VatConfig::default()).unwrap();
//! let net = Decimal::new(100_000, 3); // 100.000 EGP
//!
//! assert_eq!(calc.calculate_vat(net).unwrap(), Decimal::new(14_000, 3));
//! assert_eq!(calc.calculate_gross(net).unwrap(), Decimal::new(114_000, 3));
//! ```

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::validation::{validate_decimal_places, validate_vat_rate};

/// Egyptian standard VAT rate in percent.
pub const DEFAULT_VAT_RATE_PERCENT: i64 = 14;

/// Minor-unit digits for EGP amounts (milliemes).
pub const DEFAULT_DECIMAL_PLACES: u32 = 3;

// =============================================================================
// Rounding Mode
// =============================================================================

/// How midpoints are resolved when rounding to the configured precision.
///
/// ## Comparison at 3 decimal places
/// ```text
/// ┌──────────────┬──────────────┬─────────────────────┐
/// │ exact value  │  HalfEven    │  HalfAwayFromZero   │
/// ├──────────────┼──────────────┼─────────────────────┤
/// │  0.0025      │  0.002       │  0.003              │
/// │  0.0035      │  0.004       │  0.004              │
/// │ -0.0025      │ -0.002       │ -0.003              │
/// └──────────────┴──────────────┴─────────────────────┘
/// ```
///
/// `HalfEven` (Bankers Rounding) is the default: it carries no systematic
/// bias across many invoices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Round half to even (Bankers Rounding).
    #[default]
    HalfEven,

    /// Round half away from zero (schoolbook rounding).
    HalfAwayFromZero,
}

impl RoundingMode {
    pub(crate) fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingMode::HalfAwayFromZero => RoundingStrategy::MidpointAwayFromZero,
        }
    }
}

// =============================================================================
// VAT Configuration
// =============================================================================

/// VAT settings. The single canonical definition used by every layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatConfig {
    /// Rate in percent (14 means 14%).
    #[serde(default = "default_vat_rate")]
    pub rate: Decimal,

    /// Digits kept after rounding.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,

    /// Midpoint rule used by every rounding step.
    #[serde(default)]
    pub rounding: RoundingMode,
}

fn default_vat_rate() -> Decimal {
    Decimal::from(DEFAULT_VAT_RATE_PERCENT)
}

fn default_decimal_places() -> u32 {
    DEFAULT_DECIMAL_PLACES
}

impl Default for VatConfig {
    fn default() -> Self {
        VatConfig {
            rate: default_vat_rate(),
            decimal_places: default_decimal_places(),
            rounding: RoundingMode::default(),
        }
    }
}

// =============================================================================
// VAT Breakdown
// =============================================================================

/// Net, tax and gross for one amount, all at the configured precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VatBreakdown {
    #[ts(as = "String")]
    pub net: Decimal,
    #[ts(as = "String")]
    pub vat: Decimal,
    #[ts(as = "String")]
    pub gross: Decimal,
}

// =============================================================================
// VAT Calculator
// =============================================================================

/// Computes VAT, gross and net amounts at a fixed rate.
///
/// The rate and precision are captured at construction and never change
/// for the lifetime of the calculator.
///
/// ## User Workflow
/// ```text
/// Shelf price (net): 25.000 EGP
///      │
///      ▼
/// calculate_vat() ──► 3.500 EGP
///      │
///      ▼
/// calculate_gross() ──► 28.500 EGP printed on the receipt
///      │
///      ▼
/// extract_net(28.500) ──► 25.000 EGP for the ETA e-invoice line
/// ```
///
/// Negative amounts (refunds, credit notes) are not rejected; the same
/// arithmetic applies.
#[derive(Debug, Clone)]
pub struct VatCalculator {
    rate: Decimal,
    /// rate / 100, computed once.
    fraction: Decimal,
    decimal_places: u32,
    rounding: RoundingMode,
}

impl VatCalculator {
    /// Builds a calculator from validated settings.
    ///
    /// ## Errors
    /// - rate outside 0..=100
    /// - more than 10 decimal places
    pub fn new(config: &VatConfig) -> CoreResult<Self> {
        validate_vat_rate(config.rate)?;
        validate_decimal_places(config.decimal_places)?;

        let fraction = config
            .rate
            .checked_div(Decimal::ONE_HUNDRED)
            .ok_or(CoreError::Overflow {
                operation: "vat_fraction",
            })?;

        Ok(VatCalculator {
            rate: config.rate,
            fraction,
            decimal_places: config.decimal_places,
            rounding: config.rounding,
        })
    }

    /// Returns the rate in percent.
    #[inline]
    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Returns the rounding precision.
    #[inline]
    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    /// Returns the midpoint rule.
    #[inline]
    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// Rounds an amount with this calculator's precision and midpoint rule.
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.decimal_places, self.rounding.strategy())
    }

    /// Tax due on a net amount.
    ///
    /// ## Example
    /// ```rust
    /// use qalam_core::vat::{VatCalculator, VatConfig};
    /// use rust_decimal::Decimal;
    ///
    /// let calc = VatCalculator::new(&VatConfig::default()).unwrap();
    /// // 12.345 × 14% = 1.7283 → 1.728
    /// let vat = calc.calculate_vat(Decimal::new(12_345, 3)).unwrap();
    /// assert_eq!(vat, Decimal::new(1_728, 3));
    /// ```
    pub fn calculate_vat(&self, net_amount: Decimal) -> CoreResult<Decimal> {
        let raw = net_amount
            .checked_mul(self.fraction)
            .ok_or(CoreError::Overflow {
                operation: "calculate_vat",
            })?;
        Ok(self.round(raw))
    }

    /// Net amount plus its rounded VAT.
    pub fn calculate_gross(&self, net_amount: Decimal) -> CoreResult<Decimal> {
        let vat = self.calculate_vat(net_amount)?;
        let gross = net_amount
            .checked_add(vat)
            .ok_or(CoreError::Overflow {
                operation: "calculate_gross",
            })?;
        Ok(self.round(gross))
    }

    /// Recovers the net amount from a VAT-inclusive price.
    ///
    /// The result can differ from the original net by one unit of the last
    /// kept digit because both directions round.
    pub fn extract_net(&self, gross_amount: Decimal) -> CoreResult<Decimal> {
        let divisor = Decimal::ONE
            .checked_add(self.fraction)
            .ok_or(CoreError::Overflow {
                operation: "extract_net",
            })?;
        let raw = gross_amount
            .checked_div(divisor)
            .ok_or(CoreError::Overflow {
                operation: "extract_net",
            })?;
        Ok(self.round(raw))
    }

    /// Computes the full net / VAT / gross triple for a net amount.
    ///
    /// The net is rounded first and the other two are derived from it, so
    /// `net + vat == gross` holds exactly for any input precision.
    pub fn breakdown(&self, net_amount: Decimal) -> CoreResult<VatBreakdown> {
        let net = self.round(net_amount);
        let vat = self.calculate_vat(net)?;
        let gross = net.checked_add(vat).ok_or(CoreError::Overflow {
            operation: "breakdown",
        })?;
        Ok(VatBreakdown { net, vat, gross })
    }
}

// =============================================================================
// Float Boundary
// =============================================================================

/// Converts a float coming from an untyped boundary (JSON numbers, scanner
/// input) into a decimal amount.
///
/// NaN and infinities are rejected with [`CoreError::InvalidArgument`];
/// they are never propagated into a calculation.
pub fn amount_from_f64(value: f64) -> CoreResult<Decimal> {
    if !value.is_finite() {
        return Err(CoreError::InvalidArgument {
            name: "amount".to_string(),
            reason: format!("{value} is not a finite number"),
        });
    }

    Decimal::from_f64(value).ok_or_else(|| CoreError::InvalidArgument {
        name: "amount".to_string(),
        reason: format!("{value} is outside the decimal range"),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
