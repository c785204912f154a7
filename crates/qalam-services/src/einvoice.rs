//! # E-Invoicing
//!
//! Client seam for the Egyptian Tax Authority e-invoicing system.
//!
//! ## Flow
//! ```text
//! ┌──────────────┐  submit_invoice(payload)   ┌──────────────────────────┐
//! │  Back office │ ─────────────────────────► │  dyn EInvoiceService     │
//! │              │ ◄───────────────────────── │                          │
//! │              │   InvoiceSubmission        │  SandboxEInvoiceService  │
//! │              │   { id: "SAMPLE-<hex>" }   │  (no network, always OK) │
//! │              │                            │                          │
//! │              │  get_invoice_status(id)    │  live ETA client         │
//! │              │ ─────────────────────────► │  (not in this workspace) │
//! │              │ ◄─── InvoiceStatus ─────── │                          │
//! └──────────────┘                            └──────────────────────────┘
//! ```
//!
//! The sandbox keeps no state: ids are never looked up, and both the
//! submission receipt and every status query answer `Accepted`.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::EInvoiceResult;

/// Prefix on identifiers issued by the sandbox.
pub const SANDBOX_ID_PREFIX: &str = "SAMPLE-";

// =============================================================================
// Types
// =============================================================================

/// Lifecycle state of a submitted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Pending,
    Accepted,
    Rejected,
    Cancelled,
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Accepted => "Accepted",
            InvoiceStatus::Rejected => "Rejected",
            InvoiceStatus::Cancelled => "Cancelled",
        };
        f.write_str(s)
    }
}

/// Receipt for a submitted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSubmission {
    pub invoice_id: String,
    pub status: InvoiceStatus,
    pub submitted_at: DateTime<Utc>,
    /// The submitted document, returned as received.
    pub payload_echo: String,
}

// =============================================================================
// Service Trait
// =============================================================================

/// Submits documents to the tax authority and polls their status.
#[async_trait]
pub trait EInvoiceService: Send + Sync {
    /// Submits one document. The payload is opaque to this layer.
    async fn submit_invoice(&self, payload: &str) -> EInvoiceResult<InvoiceSubmission>;

    /// Current status of a previously submitted document.
    async fn get_invoice_status(&self, invoice_id: &str) -> EInvoiceResult<InvoiceStatus>;
}

// =============================================================================
// Sandbox
// =============================================================================

/// Offline stand-in used until the live client is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct SandboxEInvoiceService;

impl SandboxEInvoiceService {
    pub fn new() -> Self {
        SandboxEInvoiceService
    }
}

#[async_trait]
impl EInvoiceService for SandboxEInvoiceService {
    async fn submit_invoice(&self, payload: &str) -> EInvoiceResult<InvoiceSubmission> {
        let invoice_id = format!("{SANDBOX_ID_PREFIX}{}", Uuid::new_v4().simple());
        info!(invoice_id = %invoice_id, bytes = payload.len(), "Sandbox invoice submitted");

        Ok(InvoiceSubmission {
            invoice_id,
            status: InvoiceStatus::Accepted,
            submitted_at: Utc::now(),
            payload_echo: payload.to_string(),
        })
    }

    async fn get_invoice_status(&self, invoice_id: &str) -> EInvoiceResult<InvoiceStatus> {
        debug!(invoice_id, "Sandbox status query");
        Ok(InvoiceStatus::Accepted)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn is_sandbox_id(id: &str) -> bool {
        id.strip_prefix(SANDBOX_ID_PREFIX).is_some_and(|hex| {
            hex.len() == 32 && hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        })
    }

    #[tokio::test]
    async fn test_submit_returns_sample_id() {
        let service = SandboxEInvoiceService::new();
        let payload = r#"{"total": "28.500"}"#;
        let submission = service.submit_invoice(payload).await.unwrap();

        assert!(is_sandbox_id(&submission.invoice_id), "{}", submission.invoice_id);
        assert_eq!(submission.status, InvoiceStatus::Accepted);
        assert_eq!(submission.payload_echo, payload);
    }

    #[tokio::test]
    async fn test_submit_ids_are_unique() {
        let service = SandboxEInvoiceService::new();
        let mut ids = HashSet::new();
        for _ in 0..100 {
            ids.insert(service.submit_invoice("").await.unwrap().invoice_id);
        }
        assert_eq!(ids.len(), 100);
    }

    #[tokio::test]
    async fn test_status_always_accepted() {
        let service: Arc<dyn EInvoiceService> = Arc::new(SandboxEInvoiceService::new());

        let submitted = service.submit_invoice("{}").await.unwrap();
        assert_eq!(submitted.status, InvoiceStatus::Accepted);
        assert_eq!(
            service.get_invoice_status(&submitted.invoice_id).await.unwrap(),
            InvoiceStatus::Accepted
        );
        assert_eq!(
            service.get_invoice_status("never-submitted").await.unwrap(),
            InvoiceStatus::Accepted
        );
        assert_eq!(service.get_invoice_status("").await.unwrap(), InvoiceStatus::Accepted);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(InvoiceStatus::Accepted.to_string(), "Accepted");
        assert_eq!(InvoiceStatus::Cancelled.to_string(), "Cancelled");
    }
}
