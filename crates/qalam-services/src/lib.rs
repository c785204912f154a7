//! # qalam-services: Stateful Services for the Qalam Back Office
//!
//! The layer between request handlers and the pure rules in `qalam-core`.
//!
//! ## Modules
//!
//! - [`audit`] - Bounded, thread-safe audit log
//! - [`einvoice`] - E-invoicing client trait and sandbox
//! - [`config`] - `qalam.toml` loading with `QALAM_*` overrides
//! - [`services`] - `StoreServices` container
//! - [`telemetry`] - Tracing subscriber setup
//! - [`error`] - Service error types
//!
//! ## Example Usage
//!
//! ```rust
//! use qalam_services::{config, StoreServices};
//!
//! let settings = config::load_settings_from_str("[vat]\nrate = \"14\"\n").unwrap();
//! let services = StoreServices::new(settings).unwrap();
//!
//! services.audit.log("admin", "settings.load", None);
//! assert!(services.tax_numbers.is_valid("123456789"));
//! ```

pub mod audit;
pub mod config;
pub mod einvoice;
pub mod error;
pub mod services;
pub mod telemetry;

pub use audit::{AuditEntry, AuditLog};
pub use einvoice::{EInvoiceService, InvoiceStatus, InvoiceSubmission, SandboxEInvoiceService};
pub use error::{ConfigError, ConfigResult, EInvoiceError, EInvoiceResult};
pub use services::StoreServices;
