//! # Service Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────────────────────┐      ┌──────────────────────────────┐    │
//! │  │      ConfigError         │      │       EInvoiceError          │    │
//! │  │                          │      │                              │    │
//! │  │  Io / Parse / Serialize  │      │  Unavailable                 │    │
//! │  │  NoConfigPath            │      │  Rejected                    │    │
//! │  │  Invalid (CoreError)     │      │                              │    │
//! │  └──────────────────────────┘      └──────────────────────────────┘    │
//! │                                                                         │
//! │  The audit log has no error type: logging never fails the caller.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use qalam_core::CoreError;
use thiserror::Error;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for e-invoicing operations.
pub type EInvoiceResult<T> = Result<T, EInvoiceError>;

/// Failures while loading or saving [`qalam_core::StoreSettings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the settings file failed.
    #[error("Config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid TOML for `StoreSettings`.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Settings could not be rendered as TOML.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// No explicit path and no platform config directory.
    #[error("No config path available")]
    NoConfigPath,

    /// Settings parsed but failed validation.
    #[error("Invalid config: {0}")]
    Invalid(#[from] CoreError),
}

/// Failures reported by an e-invoicing client.
///
/// The sandbox never produces these; a live authority client does.
#[derive(Debug, Error)]
pub enum EInvoiceError {
    /// The authority could not be reached.
    #[error("E-invoicing service unavailable: {0}")]
    Unavailable(String),

    /// The authority refused the document.
    #[error("Invoice {invoice_id} rejected: {reason}")]
    Rejected { invoice_id: String, reason: String },
}
