//! # Domain Types
//!
//! Bilingual catalog entities for the stationery back office.
//!
//! ## Type Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Branch       │   │    Product      │   │    Category     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name_ar/en     │   │  sku            │   │  name_ar/en     │       │
//! │  │  tax reg. no.   │◄──│  branch_id      │──►│  parent_id      │       │
//! │  │  hours          │   │  name_ar/en     │   └─────────────────┘       │
//! │  │  audit ◆        │   │  sale_price     │   ┌─────────────────┐       │
//! │  └─────────────────┘   │  vat_rate_id    │──►│    VatRate      │       │
//! │                        │  audit ◆        │   │  rate, eta code │       │
//! │                        └─────────────────┘   │  audit ◆        │       │
//! │                                              └─────────────────┘       │
//! │                                                                         │
//! │  ◆ AuditMetadata is EMBEDDED in every entity (composition).             │
//! │    It carries created/updated stamps and the soft-delete marker.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Soft Delete
//! Entities are never physically removed. [`SoftDelete::soft_delete`]
//! stamps a [`Deletion`] and [`not_deleted`] filters such rows out of any
//! collection being read.

use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::business_hours::{BusinessHours, BusinessHoursConfig};
use crate::error::{CoreResult, ValidationError};
use crate::localization::Language;
use crate::tax_number::TaxNumberValidator;
use crate::validation::{
    validate_bilingual_name, validate_phone, validate_price, validate_sku, validate_vat_rate,
    ValidationResult,
};
use crate::vat::{RoundingMode, VatBreakdown, VatCalculator, VatConfig};

// =============================================================================
// Audit Metadata
// =============================================================================

/// Who deleted a record, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Deletion {
    #[ts(as = "String")]
    pub at: DateTime<Utc>,
    pub by: String,
}

/// Creation, update and deletion stamps shared by every entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuditMetadata {
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
    pub updated_by: String,
    pub deleted: Option<Deletion>,
}

impl AuditMetadata {
    /// Stamps a freshly created record.
    pub fn created(by: impl Into<String>, at: DateTime<Utc>) -> Self {
        let by = by.into();
        AuditMetadata {
            created_at: at,
            created_by: by.clone(),
            updated_at: at,
            updated_by: by,
            deleted: None,
        }
    }

    /// Records an update.
    pub fn touch(&mut self, by: impl Into<String>, at: DateTime<Utc>) {
        self.updated_at = at;
        self.updated_by = by.into();
    }

    /// Marks the record deleted. A second call keeps the first stamp.
    pub fn mark_deleted(&mut self, by: impl Into<String>, at: DateTime<Utc>) {
        if self.deleted.is_some() {
            return;
        }
        let by = by.into();
        self.touch(by.clone(), at);
        self.deleted = Some(Deletion { at, by });
    }

    /// Clears the deletion marker.
    pub fn restore(&mut self, by: impl Into<String>, at: DateTime<Utc>) {
        self.deleted = None;
        self.touch(by, at);
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted.is_some()
    }
}

/// Access to the embedded [`AuditMetadata`] of an entity.
pub trait SoftDelete {
    fn audit(&self) -> &AuditMetadata;

    fn audit_mut(&mut self) -> &mut AuditMetadata;

    fn is_deleted(&self) -> bool {
        self.audit().is_deleted()
    }

    fn soft_delete(&mut self, by: &str, at: DateTime<Utc>) {
        self.audit_mut().mark_deleted(by, at);
    }

    fn restore(&mut self, by: &str, at: DateTime<Utc>) {
        self.audit_mut().restore(by, at);
    }
}

/// Read-time filter that hides soft-deleted records.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use qalam_core::types::{not_deleted, AuditMetadata, Category, SoftDelete};
///
/// let now = Utc::now();
/// let mut pens = Category::new("أقلام", "Pens", AuditMetadata::created("SYSTEM", now));
/// let paper = Category::new("ورق", "Paper", AuditMetadata::created("SYSTEM", now));
/// pens.soft_delete("admin", now);
///
/// let rows = vec![pens, paper];
/// let visible: Vec<_> = not_deleted(&rows).collect();
/// assert_eq!(visible.len(), 1);
/// assert_eq!(visible[0].name_en, "Paper");
/// ```
pub fn not_deleted<'a, T, I>(items: I) -> impl Iterator<Item = &'a T>
where
    T: SoftDelete + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().filter(|item| !item.is_deleted())
}

macro_rules! impl_soft_delete {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl SoftDelete for $ty {
                fn audit(&self) -> &AuditMetadata {
                    &self.audit
                }

                fn audit_mut(&mut self) -> &mut AuditMetadata {
                    &mut self.audit
                }
            }
        )+
    };
}

impl_soft_delete!(Branch, Category, VatRate, Product);

fn pick<'a>(language: Language, ar: &'a str, en: &'a str) -> &'a str {
    match language {
        Language::Ar => ar,
        Language::En => en,
    }
}

// =============================================================================
// Branch
// =============================================================================

/// A physical store location.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Branch {
    #[ts(as = "String")]
    pub id: Uuid,

    pub name_ar: String,
    pub name_en: String,
    pub address_ar: String,
    pub address_en: String,

    /// ETA registration number, often printed as `310-123-456`.
    pub tax_registration_number: Option<String>,
    /// ETA activity code (e.g. 47891 for stationery retail).
    pub tax_activity_code: Option<String>,
    pub commercial_registration: Option<String>,

    pub governorate_ar: String,
    pub governorate_en: String,
    pub city_ar: String,
    pub city_en: String,

    pub phone: String,
    pub secondary_phone: Option<String>,
    pub email: Option<String>,

    /// Trading hours for this branch.
    pub hours: BusinessHoursConfig,

    pub is_active: bool,
    pub is_headquarters: bool,

    pub audit: AuditMetadata,
}

impl Branch {
    /// Creates an active branch with default hours and empty location fields.
    pub fn new(
        name_ar: impl Into<String>,
        name_en: impl Into<String>,
        phone: impl Into<String>,
        audit: AuditMetadata,
    ) -> Self {
        Branch {
            id: Uuid::new_v4(),
            name_ar: name_ar.into(),
            name_en: name_en.into(),
            address_ar: String::new(),
            address_en: String::new(),
            tax_registration_number: None,
            tax_activity_code: None,
            commercial_registration: None,
            governorate_ar: String::new(),
            governorate_en: String::new(),
            city_ar: String::new(),
            city_en: String::new(),
            phone: phone.into(),
            secondary_phone: None,
            email: None,
            hours: BusinessHoursConfig::default(),
            is_active: true,
            is_headquarters: false,
            audit,
        }
    }

    pub fn name(&self, language: Language) -> &str {
        pick(language, &self.name_ar, &self.name_en)
    }

    /// A checker for this branch's hours at the given offset.
    pub fn business_hours(&self, offset: FixedOffset) -> BusinessHours {
        BusinessHours::new(self.hours.clone(), offset)
    }

    /// Checks names, phones and the tax registration number.
    ///
    /// Hyphens in the registration number are ignored.
    pub fn validate(&self, tax_numbers: &TaxNumberValidator) -> ValidationResult<()> {
        validate_bilingual_name("name", &self.name_ar, &self.name_en)?;
        validate_phone(&self.phone)?;
        if let Some(phone) = &self.secondary_phone {
            validate_phone(phone)?;
        }

        if let Some(trn) = &self.tax_registration_number {
            tax_numbers.validate(&trn.replace('-', ""))?;
        }

        Ok(())
    }
}

// =============================================================================
// Category
// =============================================================================

/// A product grouping, optionally nested under a parent.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    #[ts(as = "String")]
    pub id: Uuid,
    pub name_ar: String,
    pub name_en: String,
    pub description_ar: Option<String>,
    pub description_en: Option<String>,
    #[ts(as = "Option<String>")]
    pub parent_category_id: Option<Uuid>,
    pub is_active: bool,
    pub audit: AuditMetadata,
}

impl Category {
    pub fn new(name_ar: impl Into<String>, name_en: impl Into<String>, audit: AuditMetadata) -> Self {
        Category {
            id: Uuid::new_v4(),
            name_ar: name_ar.into(),
            name_en: name_en.into(),
            description_ar: None,
            description_en: None,
            parent_category_id: None,
            is_active: true,
            audit,
        }
    }

    pub fn name(&self, language: Language) -> &str {
        pick(language, &self.name_ar, &self.name_en)
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_bilingual_name("name", &self.name_ar, &self.name_en)?;
        if self.parent_category_id == Some(self.id) {
            return Err(ValidationError::InvalidFormat {
                field: "parent_category_id".to_string(),
                reason: "a category cannot be its own parent".to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// VAT Rate
// =============================================================================

/// A named VAT rate as registered with the tax authority.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VatRate {
    #[ts(as = "String")]
    pub id: Uuid,
    /// Percent (14 means 14%).
    #[ts(as = "String")]
    pub rate: Decimal,
    pub name_ar: String,
    pub name_en: String,
    pub description: Option<String>,
    /// ETA tax type, e.g. `T1` for standard VAT.
    pub eta_tax_type_code: Option<String>,
    pub audit: AuditMetadata,
}

impl VatRate {
    pub fn new(
        rate: Decimal,
        name_ar: impl Into<String>,
        name_en: impl Into<String>,
        audit: AuditMetadata,
    ) -> Self {
        VatRate {
            id: Uuid::new_v4(),
            rate,
            name_ar: name_ar.into(),
            name_en: name_en.into(),
            description: None,
            eta_tax_type_code: None,
            audit,
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_bilingual_name("name", &self.name_ar, &self.name_en)?;
        validate_vat_rate(self.rate)
    }

    /// Calculator settings for this rate at the store's precision.
    pub fn vat_config(&self, decimal_places: u32, rounding: RoundingMode) -> VatConfig {
        VatConfig {
            rate: self.rate,
            decimal_places,
            rounding,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A stationery item sold at a branch.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    #[ts(as = "String")]
    pub id: Uuid,
    #[ts(as = "String")]
    pub branch_id: Uuid,
    #[ts(as = "String")]
    pub category_id: Uuid,
    #[ts(as = "String")]
    pub vat_rate_id: Uuid,

    pub sku: String,
    /// GS1 Egypt barcode.
    pub barcode: Option<String>,

    pub name_ar: String,
    pub name_en: String,
    pub description_ar: Option<String>,
    pub description_en: Option<String>,

    /// Prices are net of VAT.
    #[ts(as = "String")]
    pub cost_price: Decimal,
    #[ts(as = "String")]
    pub sale_price: Decimal,
    #[ts(as = "Option<String>")]
    pub wholesale_price: Option<Decimal>,

    /// ETA item classification (GS1 or EGS code).
    pub eta_item_code: Option<String>,
    pub eta_unit_code: Option<String>,

    #[ts(as = "String")]
    pub minimum_stock_level: Decimal,
    #[ts(as = "String")]
    pub maximum_stock_level: Decimal,
    #[ts(as = "String")]
    pub reorder_point: Decimal,

    pub is_active: bool,
    pub requires_tax_invoice: bool,
    pub is_exempt_from_vat: bool,

    #[ts(as = "Option<String>")]
    pub last_restocked: Option<DateTime<Utc>>,

    pub audit: AuditMetadata,
}

impl Product {
    /// Creates an active, taxable product with nil references.
    ///
    /// Use [`with_refs`](Self::with_refs) to attach it to a branch,
    /// category and VAT rate.
    pub fn new(
        sku: impl Into<String>,
        name_ar: impl Into<String>,
        name_en: impl Into<String>,
        sale_price: Decimal,
        audit: AuditMetadata,
    ) -> Self {
        Product {
            id: Uuid::new_v4(),
            branch_id: Uuid::nil(),
            category_id: Uuid::nil(),
            vat_rate_id: Uuid::nil(),
            sku: sku.into(),
            barcode: None,
            name_ar: name_ar.into(),
            name_en: name_en.into(),
            description_ar: None,
            description_en: None,
            cost_price: Decimal::ZERO,
            sale_price,
            wholesale_price: None,
            eta_item_code: None,
            eta_unit_code: None,
            minimum_stock_level: Decimal::ZERO,
            maximum_stock_level: Decimal::ZERO,
            reorder_point: Decimal::ZERO,
            is_active: true,
            requires_tax_invoice: true,
            is_exempt_from_vat: false,
            last_restocked: None,
            audit,
        }
    }

    pub fn with_refs(mut self, branch: &Branch, category: &Category, vat_rate: &VatRate) -> Self {
        self.branch_id = branch.id;
        self.category_id = category.id;
        self.vat_rate_id = vat_rate.id;
        self
    }

    pub fn name(&self, language: Language) -> &str {
        pick(language, &self.name_ar, &self.name_en)
    }

    /// Net, VAT and gross for the sale price.
    ///
    /// Exempt products carry zero VAT and a gross equal to the net.
    pub fn vat_inclusive_price(&self, calculator: &VatCalculator) -> CoreResult<VatBreakdown> {
        if self.is_exempt_from_vat {
            let net = calculator.round(self.sale_price);
            return Ok(VatBreakdown {
                net,
                vat: Decimal::ZERO,
                gross: net,
            });
        }
        calculator.breakdown(self.sale_price)
    }

    /// Checks identifiers, names, prices and stock thresholds.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_sku(&self.sku)?;
        validate_bilingual_name("name", &self.name_ar, &self.name_en)?;
        validate_price("cost_price", self.cost_price)?;
        validate_price("sale_price", self.sale_price)?;
        if let Some(wholesale) = self.wholesale_price {
            validate_price("wholesale_price", wholesale)?;
        }

        if self.maximum_stock_level > Decimal::ZERO
            && self.minimum_stock_level > self.maximum_stock_level
        {
            return Err(ValidationError::OutOfRange {
                field: "minimum_stock_level".to_string(),
                min: "0".to_string(),
                max: self.maximum_stock_level.to_string(),
            });
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
