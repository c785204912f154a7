//! # Localization Module
//!
//! Arabic/English string lookup for receipts and UI labels.
//!
//! ## Lookup Rules
//! ```text
//! localize("Receipt", "ar")   → "إيصال"
//! localize("Receipt", "fr")   → "Receipt"   (unknown language → English)
//! localize("Receipt", "")     → "Receipt"   (blank language   → English)
//! localize("NoSuchKey", "ar") → "NoSuchKey" (unknown key      → key itself)
//! ```
//!
//! Tables belong to a [`Localizer`] instance, built once from the store
//! settings, rather than to any process-wide static.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// =============================================================================
// Language
// =============================================================================

/// A language with a translation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ar,
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::En => "en",
        }
    }

    /// True for right-to-left scripts.
    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Ar)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ar" | "ar-eg" => Ok(Language::Ar),
            "en" | "en-eg" | "en-us" => Ok(Language::En),
            _ => Err(ValidationError::NotAllowed {
                field: "language".to_string(),
                allowed: vec!["ar".to_string(), "en".to_string()],
            }),
        }
    }
}

// =============================================================================
// Built-in Tables
// =============================================================================

const ARABIC: &[(&str, &str)] = &[
    ("Hello", "مرحبا"),
    ("Goodbye", "مع السلامة"),
    ("Receipt", "إيصال"),
    ("TaxInvoice", "فاتورة ضريبية"),
    ("Subtotal", "الإجمالي قبل الضريبة"),
    ("Vat", "ضريبة القيمة المضافة"),
    ("Total", "الإجمالي"),
    ("TaxRegistrationNumber", "رقم التسجيل الضريبي"),
    ("Branch", "الفرع"),
    ("Closed", "مغلق"),
    ("Open", "مفتوح"),
];

const ENGLISH: &[(&str, &str)] = &[
    ("Hello", "Hello"),
    ("Goodbye", "Goodbye"),
    ("Receipt", "Receipt"),
    ("TaxInvoice", "Tax Invoice"),
    ("Subtotal", "Subtotal"),
    ("Vat", "VAT"),
    ("Total", "Total"),
    ("TaxRegistrationNumber", "Tax Registration Number"),
    ("Branch", "Branch"),
    ("Closed", "Closed"),
    ("Open", "Open"),
];

fn builtin_table(language: Language) -> HashMap<String, String> {
    let pairs = match language {
        Language::Ar => ARABIC,
        Language::En => ENGLISH,
    };
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// =============================================================================
// Localizer
// =============================================================================

/// Translation tables keyed by language.
///
/// English is always present because it is the fallback.
#[derive(Debug, Clone)]
pub struct Localizer {
    tables: HashMap<Language, HashMap<String, String>>,
}

impl Localizer {
    /// Builds tables for the given languages (English is added if missing).
    pub fn new(languages: &[Language]) -> Self {
        let mut tables = HashMap::new();
        tables.insert(Language::En, builtin_table(Language::En));
        for &language in languages {
            tables
                .entry(language)
                .or_insert_with(|| builtin_table(language));
        }
        Localizer { tables }
    }

    /// Adds or replaces one translation.
    pub fn insert(&mut self, language: Language, key: impl Into<String>, value: impl Into<String>) {
        self.tables
            .entry(language)
            .or_default()
            .insert(key.into(), value.into());
    }

    fn resolve(&self, language: &str) -> Language {
        language
            .parse::<Language>()
            .ok()
            .filter(|lang| self.tables.contains_key(lang))
            .unwrap_or(Language::En)
    }

    /// Translates `key`, falling back to English and then to the key.
    pub fn localize(&self, key: &str, language: &str) -> String {
        let language = self.resolve(language);
        self.tables
            .get(&language)
            .and_then(|table| table.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Full table for a language, or the English table if unsupported.
    pub fn translations(&self, language: &str) -> &HashMap<String, String> {
        let language = self.resolve(language);
        // English is inserted in `new` and never removed.
        &self.tables[&language]
    }

    pub fn supports(&self, language: Language) -> bool {
        self.tables.contains_key(&language)
    }
}

impl Default for Localizer {
    fn default() -> Self {
        Localizer::new(&[Language::Ar, Language::En])
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parsing() {
        assert_eq!("ar".parse::<Language>().unwrap(), Language::Ar);
        assert_eq!(" EN ".parse::<Language>().unwrap(), Language::En);
        assert_eq!("ar-EG".parse::<Language>().unwrap(), Language::Ar);
        assert!("fr".parse::<Language>().is_err());
        assert!(Language::Ar.is_rtl());
        assert!(!Language::En.is_rtl());
    }

    #[test]
    fn test_localize() {
        let localizer = Localizer::default();
        assert_eq!(localizer.localize("Hello", "ar"), "مرحبا");
        assert_eq!(localizer.localize("Hello", "en"), "Hello");
        assert_eq!(localizer.localize("Hello", "fr"), "Hello");
        assert_eq!(localizer.localize("Hello", ""), "Hello");
        assert_eq!(localizer.localize("NoSuchKey", "ar"), "NoSuchKey");
    }

    #[test]
    fn test_translations_fallback() {
        let localizer = Localizer::default();
        assert_eq!(localizer.translations("ar")["Goodbye"], "مع السلامة");
        assert_eq!(localizer.translations("xx")["Goodbye"], "Goodbye");
    }

    #[test]
    fn test_english_only_localizer_falls_back() {
        let localizer = Localizer::new(&[Language::En]);
        assert!(!localizer.supports(Language::Ar));
        assert_eq!(localizer.localize("Hello", "ar"), "Hello");
    }

    #[test]
    fn test_insert_overrides() {
        let mut localizer = Localizer::default();
        localizer.insert(Language::Ar, "Pens", "أقلام");
        assert_eq!(localizer.localize("Pens", "ar"), "أقلام");
        assert_eq!(localizer.localize("Pens", "en"), "Pens");
    }
}
