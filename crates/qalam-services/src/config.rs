//! # Settings Loader
//!
//! Reads [`StoreSettings`] from `qalam.toml`, layers environment overrides
//! on top, and validates the result.
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌──────────────────┐    ┌──────────────────┐    ┌──────────────────┐
//! │  serde defaults  │───►│   qalam.toml     │───►│  QALAM_* env     │
//! │  (VAT 14, 3 dp,  │    │  (explicit path  │    │  overrides       │
//! │   09:00-22:00)   │    │   or config dir) │    │                  │
//! └──────────────────┘    └──────────────────┘    └────────┬─────────┘
//!                                                          │
//!                                                          ▼
//!                                               StoreSettings::validate()
//! ```
//!
//! ## Environment Variables
//! | Variable                   | Field                    |
//! |----------------------------|--------------------------|
//! | `QALAM_VAT_RATE`           | `vat.rate`               |
//! | `QALAM_DECIMAL_PLACES`     | `vat.decimal_places`     |
//! | `QALAM_CURRENCY`           | `currency`               |
//! | `QALAM_DEFAULT_LANGUAGE`   | `default_language`       |
//! | `QALAM_TIME_ZONE`          | `time_zone`              |
//! | `QALAM_UTC_OFFSET_MINUTES` | `utc_offset_minutes`     |
//! | `QALAM_AUDIT_CAPACITY`     | `audit.capacity`         |
//!
//! Values that fail to parse are logged and ignored.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use qalam_core::StoreSettings;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "qalam.toml";

/// `<config dir>/qalam.toml` for this platform, if one exists.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("eg", "qalam", "backoffice")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Loads settings from file, environment, and defaults.
///
/// A missing file is not an error; defaults are used instead.
pub fn load_settings(config_path: Option<PathBuf>) -> ConfigResult<StoreSettings> {
    let mut settings = StoreSettings::default();

    if let Some(path) = config_path.or_else(default_config_path) {
        if path.exists() {
            info!(?path, "Loading store settings from file");
            settings = read_settings_file(&path)?;
        } else {
            debug!(?path, "Settings file not found, using defaults");
        }
    }

    apply_env_overrides(&mut settings);
    settings.validate()?;

    Ok(settings)
}

/// Parses and validates settings from TOML text. No env overrides.
pub fn load_settings_from_str(contents: &str) -> ConfigResult<StoreSettings> {
    let settings: StoreSettings = toml::from_str(contents)?;
    settings.validate()?;
    Ok(settings)
}

/// Loads settings or falls back to defaults, logging the failure.
pub fn load_settings_or_default(config_path: Option<PathBuf>) -> StoreSettings {
    load_settings(config_path).unwrap_or_else(|e| {
        warn!("Failed to load store settings: {}. Using defaults.", e);
        StoreSettings::default()
    })
}

/// Writes settings as pretty TOML, creating parent directories.
pub fn save_settings(settings: &StoreSettings, config_path: Option<PathBuf>) -> ConfigResult<()> {
    let path = config_path
        .or_else(default_config_path)
        .ok_or(ConfigError::NoConfigPath)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(settings)?;
    std::fs::write(&path, contents)?;

    info!(?path, "Store settings saved");
    Ok(())
}

fn read_settings_file(path: &Path) -> ConfigResult<StoreSettings> {
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// Applies `QALAM_*` overrides from the process environment.
pub fn apply_env_overrides(settings: &mut StoreSettings) {
    apply_overrides(settings, |key| std::env::var(key).ok());
}

/// Applies overrides from any key lookup.
///
/// Split out from [`apply_env_overrides`] so tests don't mutate the
/// process environment.
pub fn apply_overrides<F>(settings: &mut StoreSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(rate) = parsed::<Decimal, _>(&lookup, "QALAM_VAT_RATE") {
        debug!(%rate, "Overriding VAT rate from environment");
        settings.vat.rate = rate;
    }

    if let Some(dp) = parsed::<u32, _>(&lookup, "QALAM_DECIMAL_PLACES") {
        debug!(decimal_places = dp, "Overriding decimal places from environment");
        settings.vat.decimal_places = dp;
    }

    if let Some(currency) = lookup("QALAM_CURRENCY") {
        debug!(currency = %currency, "Overriding currency from environment");
        settings.currency = currency.trim().to_uppercase();
    }

    if let Some(language) = lookup("QALAM_DEFAULT_LANGUAGE") {
        settings.default_language = language.trim().to_lowercase();
    }

    if let Some(zone) = lookup("QALAM_TIME_ZONE") {
        settings.time_zone = zone;
    }

    if let Some(minutes) = parsed::<i32, _>(&lookup, "QALAM_UTC_OFFSET_MINUTES") {
        debug!(minutes, "Overriding UTC offset from environment");
        settings.utc_offset_minutes = minutes;
    }

    if let Some(capacity) = parsed::<usize, _>(&lookup, "QALAM_AUDIT_CAPACITY") {
        settings.audit.capacity = capacity;
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparsable environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(Some(dir.path().join("absent.toml"))).unwrap();

        assert_eq!(settings.vat.decimal_places, StoreSettings::default().vat.decimal_places);
        assert_eq!(settings.audit.capacity, StoreSettings::default().audit.capacity);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = load_settings_from_str(
            r#"
            currency = "EGP"

            [vat]
            rate = "5"
            "#,
        )
        .unwrap();

        assert_eq!(settings.vat.rate, Decimal::from(5));
        assert_eq!(settings.vat.decimal_places, 3);
        assert_eq!(settings.country_code, "EG");
        assert_eq!(settings.business_hours.closed_days, vec![Weekday::Sun]);
    }

    #[test]
    fn test_invalid_file_rejected() {
        let err = load_settings_from_str("[vat]\nrate = \"-3\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = load_settings_from_str("this is not toml = = =").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut settings = StoreSettings::default();
        settings.vat.rate = Decimal::from(10);
        settings.audit.capacity = 250;
        save_settings(&settings, Some(path.clone())).unwrap();

        let loaded = read_settings_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_or_default_on_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[audit]\ncapacity = \"lots\"\n").unwrap();

        let settings = load_settings_or_default(Some(path));
        assert_eq!(settings, StoreSettings::default());
    }

    #[test]
    fn test_overrides_applied() {
        let mut settings = StoreSettings::default();
        let lookup = lookup_from(&[
            ("QALAM_VAT_RATE", "5"),
            ("QALAM_DECIMAL_PLACES", "2"),
            ("QALAM_CURRENCY", " egp "),
            ("QALAM_DEFAULT_LANGUAGE", "EN"),
            ("QALAM_UTC_OFFSET_MINUTES", "180"),
            ("QALAM_AUDIT_CAPACITY", "50"),
        ]);

        apply_overrides(&mut settings, lookup);

        assert_eq!(settings.vat.rate, Decimal::from(5));
        assert_eq!(settings.vat.decimal_places, 2);
        assert_eq!(settings.currency, "EGP");
        assert_eq!(settings.default_language, "en");
        assert_eq!(settings.utc_offset_minutes, 180);
        assert_eq!(settings.audit.capacity, 50);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_unparsable_override_ignored() {
        let mut settings = StoreSettings::default();
        let before = settings.clone();

        apply_overrides(
            &mut settings,
            lookup_from(&[("QALAM_VAT_RATE", "fourteen"), ("QALAM_AUDIT_CAPACITY", "-1")]),
        );

        assert_eq!(settings, before);
    }
}
