//! # Currency Formatting
//!
//! Display strings for Egyptian pound amounts.
//!
//! ## Output Examples (3 decimal places)
//! ```text
//! ┌──────────────┬────────────────────┬──────────────────────┐
//! │ amount       │ ar-EG              │ en-EG                │
//! ├──────────────┼────────────────────┼──────────────────────┤
//! │ 1234.5       │ 1٬234٫500          │ 1,234.500            │
//! │  with code   │ 1٬234٫500 ج.م.     │ EGP 1,234.500        │
//! │ -12.3456     │ -12٫346            │ -12.346              │
//! └──────────────┴────────────────────┴──────────────────────┘
//! ```
//!
//! Formatting is for display only. Amounts stored or sent to the tax
//! authority stay as [`Decimal`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::vat::RoundingMode;

/// Arabic currency abbreviation for the Egyptian pound.
const EGP_ARABIC_SYMBOL: &str = "ج.م.";

/// Display conventions supported by the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    /// Arabic (Egypt): Arabic thousands and decimal separators.
    #[default]
    #[serde(rename = "ar-EG")]
    ArEg,

    /// English (Egypt): Latin separators.
    #[serde(rename = "en-EG")]
    EnEg,
}

impl Locale {
    fn group_separator(&self) -> &'static str {
        match self {
            Locale::ArEg => "\u{066C}",
            Locale::EnEg => ",",
        }
    }

    fn decimal_separator(&self) -> &'static str {
        match self {
            Locale::ArEg => "\u{066B}",
            Locale::EnEg => ".",
        }
    }
}

/// Formats amounts at a fixed precision for one currency.
#[derive(Debug, Clone)]
pub struct CurrencyFormatter {
    currency: String,
    decimal_places: u32,
    rounding: RoundingMode,
}

impl CurrencyFormatter {
    pub fn new(currency: impl Into<String>, decimal_places: u32) -> Self {
        CurrencyFormatter {
            currency: currency.into(),
            decimal_places,
            rounding: RoundingMode::default(),
        }
    }

    /// Uses `rounding` instead of half-even. Pass the VAT calculator's mode
    /// so displayed totals match the computed ones.
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Rounds with the configured mode and formats with grouping, no
    /// currency marker.
    ///
    /// ## Example
    /// ```rust
    /// use qalam_core::currency::{CurrencyFormatter, Locale};
    /// use rust_decimal::Decimal;
    ///
    /// let fmt = CurrencyFormatter::new("EGP", 3);
    /// assert_eq!(fmt.format(Decimal::new(12345, 1), Locale::EnEg), "1,234.500");
    /// ```
    pub fn format(&self, amount: Decimal, locale: Locale) -> String {
        let rounded = amount.round_dp_with_strategy(self.decimal_places, self.rounding.strategy());
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let text = format!("{:.*}", self.decimal_places as usize, rounded.abs());

        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (text.as_str(), None),
        };

        let mut out = String::with_capacity(text.len() + 8);
        if negative {
            out.push('-');
        }
        out.push_str(&group_thousands(int_part, locale.group_separator()));
        if let Some(frac) = frac_part {
            out.push_str(locale.decimal_separator());
            out.push_str(frac);
        }
        out
    }

    /// Like [`format`](Self::format) with the currency marker added.
    pub fn format_with_currency(&self, amount: Decimal, locale: Locale) -> String {
        let number = self.format(amount, locale);
        match locale {
            Locale::ArEg if self.currency == "EGP" => format!("{number} {EGP_ARABIC_SYMBOL}"),
            Locale::ArEg => format!("{number} {}", self.currency),
            Locale::EnEg => format!("{} {number}", self.currency),
        }
    }
}

fn group_thousands(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt() -> CurrencyFormatter {
        CurrencyFormatter::new("EGP", 3)
    }

    #[test]
    fn test_english_format() {
        assert_eq!(fmt().format(Decimal::new(12345, 1), Locale::EnEg), "1,234.500");
        assert_eq!(fmt().format(Decimal::ZERO, Locale::EnEg), "0.000");
        assert_eq!(
            fmt().format(Decimal::new(1_234_567_891, 3), Locale::EnEg),
            "1,234,567.891"
        );
        assert_eq!(fmt().format(Decimal::new(999, 0), Locale::EnEg), "999.000");
    }

    #[test]
    fn test_arabic_format() {
        assert_eq!(
            fmt().format(Decimal::new(12345, 1), Locale::ArEg),
            "1\u{066C}234\u{066B}500"
        );
    }

    #[test]
    fn test_rounding_and_sign() {
        assert_eq!(fmt().format(Decimal::new(-123456, 4), Locale::EnEg), "-12.346");
        // -0.0001 rounds to zero and loses its sign
        assert_eq!(fmt().format(Decimal::new(-1, 4), Locale::EnEg), "0.000");
    }

    #[test]
    fn test_with_currency() {
        assert_eq!(
            fmt().format_with_currency(Decimal::new(25, 0), Locale::EnEg),
            "EGP 25.000"
        );
        assert_eq!(
            fmt().format_with_currency(Decimal::new(25, 0), Locale::ArEg),
            "25\u{066B}000 ج.م."
        );
        let usd = CurrencyFormatter::new("USD", 2);
        assert_eq!(
            usd.format_with_currency(Decimal::new(25, 0), Locale::ArEg),
            "25\u{066B}00 USD"
        );
    }

    #[test]
    fn test_rounding_mode_applied() {
        let midpoint = Decimal::new(125, 4);
        assert_eq!(fmt().format(midpoint, Locale::EnEg), "0.012");

        let away = fmt().with_rounding(RoundingMode::HalfAwayFromZero);
        assert_eq!(away.format(midpoint, Locale::EnEg), "0.013");
        assert_eq!(away.format(-midpoint, Locale::EnEg), "-0.013");

        let whole = CurrencyFormatter::new("EGP", 0).with_rounding(RoundingMode::HalfAwayFromZero);
        assert_eq!(whole.format(Decimal::new(12345, 1), Locale::EnEg), "1,235");
    }

    #[test]
    fn test_zero_decimal_places() {
        let whole = CurrencyFormatter::new("EGP", 0);
        assert_eq!(whole.format(Decimal::new(12345, 1), Locale::EnEg), "1,234");
    }
}
