//! # qalam-core: Pure Business Logic for the Qalam Back Office
//!
//! Domain rules for Egyptian stationery stores, written as pure functions
//! and immutable services with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Qalam Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               HTTP handlers (outside this workspace)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    qalam-services                               │   │
//! │  │    StoreServices, AuditLog, EInvoiceService, config loading     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ qalam-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌────────────┐  ┌──────────┐  │   │
//! │  │   │    vat    │  │ tax_number │  │  business  │  │  types   │  │   │
//! │  │   │ VatCalc   │  │ Validator  │  │   _hours   │  │ Branch   │  │   │
//! │  │   └───────────┘  └────────────┘  └────────────┘  │ Product  │  │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌────────────┐  └──────────┘  │   │
//! │  │   │ settings  │  │  currency  │  │localization│                │   │
//! │  │   └───────────┘  └────────────┘  └────────────┘                │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO SHARED STATE          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`vat`] - VAT / gross / net arithmetic on `Decimal`
//! - [`tax_number`] - ETA tax identifier validation
//! - [`business_hours`] - Open day and open time checks
//! - [`settings`] - The single `StoreSettings` configuration type
//! - [`localization`] - Arabic/English lookups
//! - [`currency`] - EGP display formatting
//! - [`types`] - Catalog entities with embedded audit metadata
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use qalam_core::settings::StoreSettings;
//! use qalam_core::vat::VatCalculator;
//! use rust_decimal::Decimal;
//!
//! let settings = StoreSettings::default();
//! let calc = VatCalculator::new(&settings.vat).unwrap();
//!
//! // A 25 EGP notebook at 14% VAT
//! let gross = calc.calculate_gross(Decimal::from(25)).unwrap();
//! assert_eq!(gross, Decimal::new(28_500, 3));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod business_hours;
pub mod currency;
pub mod error;
pub mod localization;
pub mod settings;
pub mod tax_number;
pub mod types;
pub mod validation;
pub mod vat;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use business_hours::{BusinessHours, BusinessHoursConfig};
pub use currency::{CurrencyFormatter, Locale};
pub use error::{CoreError, CoreResult, ValidationError};
pub use localization::{Language, Localizer};
pub use settings::{AuditConfig, StoreSettings};
pub use tax_number::{TaxNumber, TaxNumberKind, TaxNumberValidator};
pub use types::*;
pub use vat::{RoundingMode, VatBreakdown, VatCalculator, VatConfig};
