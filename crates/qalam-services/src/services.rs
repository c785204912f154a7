//! # Service Container
//!
//! Builds every back-office service from one validated [`StoreSettings`].
//!
//! ```text
//!                         StoreSettings
//!                               │ validate()
//!       ┌──────────┬────────────┼─────────────┬──────────────┬───────────┐
//!       ▼          ▼            ▼             ▼              ▼           ▼
//!  VatCalculator  TaxNumber  BusinessHours  Arc<AuditLog>  Localizer  Currency
//!                 Validator                                           Formatter
//!                                                 Arc<dyn EInvoiceService>
//! ```
//!
//! Callers hold one `StoreServices` and pass references (or clones of the
//! `Arc` fields) to request handlers. Nothing here is global.

use std::sync::Arc;

use qalam_core::{
    BusinessHours, CurrencyFormatter, Localizer, StoreSettings, TaxNumberValidator, VatCalculator,
};
use tracing::info;

use crate::audit::AuditLog;
use crate::einvoice::{EInvoiceService, SandboxEInvoiceService};
use crate::error::ConfigResult;

/// Every service the back office needs, built once at startup.
#[derive(Clone)]
pub struct StoreServices {
    pub settings: StoreSettings,
    pub vat: VatCalculator,
    pub tax_numbers: TaxNumberValidator,
    pub business_hours: BusinessHours,
    pub audit: Arc<AuditLog>,
    pub einvoice: Arc<dyn EInvoiceService>,
    pub localizer: Localizer,
    pub currency: CurrencyFormatter,
}

impl StoreServices {
    /// Builds the services with the sandbox e-invoicing client.
    pub fn new(settings: StoreSettings) -> ConfigResult<Self> {
        Self::with_einvoice(settings, Arc::new(SandboxEInvoiceService::new()))
    }

    /// Builds the services around a caller-supplied e-invoicing client.
    pub fn with_einvoice(
        settings: StoreSettings,
        einvoice: Arc<dyn EInvoiceService>,
    ) -> ConfigResult<Self> {
        settings.validate()?;

        let vat = VatCalculator::new(&settings.vat)?;
        let business_hours =
            BusinessHours::new(settings.business_hours.clone(), settings.utc_offset()?);
        let audit = Arc::new(AuditLog::new(settings.audit.capacity));
        let localizer = Localizer::new(&settings.languages());
        let currency =
            CurrencyFormatter::new(settings.currency.clone(), settings.vat.decimal_places)
                .with_rounding(settings.vat.rounding);

        info!(
            vat_rate = %vat.rate(),
            decimal_places = vat.decimal_places(),
            currency = %settings.currency,
            audit_capacity = audit.capacity(),
            "Store services ready"
        );

        Ok(StoreServices {
            settings,
            vat,
            tax_numbers: TaxNumberValidator::new(),
            business_hours,
            audit,
            einvoice,
            localizer,
            currency,
        })
    }
}

impl std::fmt::Debug for StoreServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreServices")
            .field("settings", &self.settings)
            .field("audit_len", &self.audit.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::einvoice::InvoiceStatus;
    use crate::error::ConfigError;
    use chrono::NaiveDate;
    use qalam_core::{Language, Locale, RoundingMode};
    use rust_decimal::Decimal;

    #[test]
    fn test_defaults_build_every_service() {
        let services = StoreServices::new(StoreSettings::default()).unwrap();

        assert_eq!(services.vat.rate(), Decimal::from(14));
        assert_eq!(services.vat.decimal_places(), 3);
        assert!(services.tax_numbers.is_valid("123456789"));
        assert_eq!(services.audit.capacity(), 1000);
        assert!(services.localizer.supports(Language::Ar));
        assert_eq!(services.currency.currency(), "EGP");

        let monday_10 = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert!(services.business_hours.is_open_at(monday_10));
    }

    #[test]
    fn test_settings_flow_into_services() {
        let mut settings = StoreSettings::default();
        settings.vat.rate = Decimal::from(10);
        settings.vat.decimal_places = 2;
        settings.audit.capacity = 3;

        let services = StoreServices::new(settings).unwrap();

        assert_eq!(
            services.vat.calculate_gross(Decimal::from(100)).unwrap(),
            Decimal::from(110)
        );
        assert_eq!(
            services.currency.format(Decimal::new(123_456, 2), Locale::EnEg),
            "1,234.56"
        );

        for i in 0..5 {
            services.audit.log("u", &i.to_string(), None);
        }
        assert_eq!(services.audit.len(), 3);
    }

    #[test]
    fn test_currency_follows_vat_rounding() {
        let mut settings = StoreSettings::default();
        settings.vat.rounding = RoundingMode::HalfAwayFromZero;

        let services = StoreServices::new(settings).unwrap();
        let midpoint = Decimal::new(125, 4);
        assert_eq!(services.vat.round(midpoint), Decimal::new(13, 3));
        assert_eq!(services.currency.format(midpoint, Locale::EnEg), "0.013");
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = StoreSettings::default();
        settings.audit.capacity = 0;

        let err = StoreServices::new(settings).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_clones_share_audit_log() {
        let services = StoreServices::new(StoreSettings::default()).unwrap();
        let handle = services.clone();

        handle.audit.log("cashier", "sale.complete", Some("receipt 42"));
        assert_eq!(services.audit.get_recent(1)[0].action, "sale.complete");
    }

    #[tokio::test]
    async fn test_einvoice_through_container() {
        let services = StoreServices::new(StoreSettings::default()).unwrap();

        let submission = services.einvoice.submit_invoice("{}").await.unwrap();
        services
            .audit
            .log("admin", "invoice.submit", Some(&submission.invoice_id));

        let status = services
            .einvoice
            .get_invoice_status(&submission.invoice_id)
            .await
            .unwrap();
        assert_eq!(status, InvoiceStatus::Accepted);
        assert_eq!(
            services.audit.get_recent(1)[0].details.as_deref(),
            Some(submission.invoice_id.as_str())
        );
    }
}
