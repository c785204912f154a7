//! # Store Settings
//!
//! The one configuration value every service is built from.
//!
//! ## Settings Layout
//! ```toml
//! country_code = "EG"
//! default_language = "ar"
//! currency = "EGP"
//! time_zone = "Africa/Cairo"
//! utc_offset_minutes = 120
//! supported_languages = ["ar", "en"]
//!
//! [vat]
//! rate = "14"
//! decimal_places = 3
//! rounding = "half_even"
//!
//! [business_hours]
//! opening = "09:00:00"
//! closing = "22:00:00"
//! closed_days = ["Sun"]
//!
//! [audit]
//! capacity = 1000
//! ```
//!
//! Loading from disk and the environment lives in `qalam-services`; this
//! module only defines the shape, the defaults and the consistency rules.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::business_hours::BusinessHoursConfig;
use crate::error::{CoreError, CoreResult};
use crate::localization::Language;
use crate::validation::{validate_decimal_places, validate_vat_rate};
use crate::vat::VatConfig;

/// Default number of audit entries kept in memory.
pub const DEFAULT_AUDIT_CAPACITY: usize = 1000;

// =============================================================================
// Audit Settings
// =============================================================================

/// Audit log sizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Entries kept before the oldest are dropped.
    #[serde(default = "default_audit_capacity")]
    pub capacity: usize,
}

fn default_audit_capacity() -> usize {
    DEFAULT_AUDIT_CAPACITY
}

impl Default for AuditConfig {
    fn default() -> Self {
        AuditConfig {
            capacity: default_audit_capacity(),
        }
    }
}

// =============================================================================
// Store Settings
// =============================================================================

/// Complete store configuration.
///
/// Loaded once at process start and then shared read-only; nothing in the
/// workspace mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// ISO 3166 country code.
    #[serde(default = "default_country_code")]
    pub country_code: String,

    /// Language used when a request does not ask for one.
    #[serde(default = "default_language")]
    pub default_language: String,

    /// ISO 4217 currency code.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// IANA time zone identifier, informational.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,

    /// Offset applied when converting instants to branch wall-clock time.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,

    /// Languages with translation tables.
    #[serde(default = "default_supported_languages")]
    pub supported_languages: Vec<String>,

    #[serde(default)]
    pub vat: VatConfig,

    #[serde(default)]
    pub business_hours: BusinessHoursConfig,

    #[serde(default)]
    pub audit: AuditConfig,
}

fn default_country_code() -> String {
    "EG".to_string()
}

fn default_language() -> String {
    "ar".to_string()
}

fn default_currency() -> String {
    "EGP".to_string()
}

fn default_time_zone() -> String {
    "Africa/Cairo".to_string()
}

fn default_utc_offset_minutes() -> i32 {
    120
}

fn default_supported_languages() -> Vec<String> {
    vec!["ar".to_string(), "en".to_string()]
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            country_code: default_country_code(),
            default_language: default_language(),
            currency: default_currency(),
            time_zone: default_time_zone(),
            utc_offset_minutes: default_utc_offset_minutes(),
            supported_languages: default_supported_languages(),
            vat: VatConfig::default(),
            business_hours: BusinessHoursConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

impl StoreSettings {
    /// Checks the settings for values no service can work with.
    pub fn validate(&self) -> CoreResult<()> {
        validate_vat_rate(self.vat.rate)?;
        validate_decimal_places(self.vat.decimal_places)?;

        if self.audit.capacity == 0 {
            return Err(CoreError::InvalidSettings(
                "audit.capacity must be at least 1".to_string(),
            ));
        }

        if self.currency.trim().is_empty() {
            return Err(CoreError::InvalidSettings(
                "currency must not be empty".to_string(),
            ));
        }

        self.utc_offset()?;

        if self.supported_languages.is_empty() {
            return Err(CoreError::InvalidSettings(
                "supported_languages must not be empty".to_string(),
            ));
        }

        for code in &self.supported_languages {
            code.parse::<Language>()?;
        }

        if !self
            .supported_languages
            .iter()
            .any(|code| code == &self.default_language)
        {
            return Err(CoreError::InvalidSettings(format!(
                "default_language '{}' is not in supported_languages {:?}",
                self.default_language, self.supported_languages
            )));
        }

        Ok(())
    }

    /// The configured UTC offset as a chrono value.
    pub fn utc_offset(&self) -> CoreResult<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                CoreError::InvalidSettings(format!(
                    "utc_offset_minutes {} is out of range",
                    self.utc_offset_minutes
                ))
            })
    }

    /// The default language, falling back to English if it fails to parse.
    pub fn language(&self) -> Language {
        self.default_language.parse().unwrap_or(Language::En)
    }

    /// Parsed supported languages; unknown codes are skipped.
    pub fn languages(&self) -> Vec<Language> {
        self.supported_languages
            .iter()
            .filter_map(|code| code.parse().ok())
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
