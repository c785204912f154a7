//! # Audit Log
//!
//! Bounded in-memory record of user actions, newest first on read.
//!
//! ## Storage Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    AuditLog (capacity = 1000)                           │
//! │                                                                         │
//! │   Mutex<VecDeque<AuditEntry>>                                           │
//! │                                                                         │
//! │   front (oldest)                                        back (newest)   │
//! │   ┌──────┬──────┬──────┬─────────────────────┬──────┬──────┐            │
//! │   │  e1  │  e2  │  e3  │        ...          │ e999 │ e1000│ ◄── log()  │
//! │   └──────┴──────┴──────┴─────────────────────┴──────┴──────┘            │
//! │      │                                                                  │
//! │      ▼ pop_front() while len > capacity  (strict FIFO eviction)         │
//! │                                                                         │
//! │   get_recent(n): iterate from back, take n, clone                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Append and trim happen under one lock acquisition, so a reader never
//! sees the deque above capacity and no append is lost. The lock is held
//! for O(1) work on write and for one copy on read; nothing inside it does
//! I/O. A poisoned lock is recovered rather than reported, because logging
//! must never fail the caller.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;
use uuid::Uuid;

use qalam_core::settings::DEFAULT_AUDIT_CAPACITY;

// =============================================================================
// Audit Entry
// =============================================================================

/// One logged action. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
    pub action: String,
    pub details: Option<String>,
}

/// `timestamp|user|action|details` with an empty last field when there
/// are no details.
impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
            self.user_id,
            self.action,
            self.details.as_deref().unwrap_or_default()
        )
    }
}

// =============================================================================
// Audit Log
// =============================================================================

/// Thread-safe bounded audit log.
///
/// Share it behind an `Arc`; all methods take `&self`.
#[derive(Debug)]
pub struct AuditLog {
    entries: Mutex<VecDeque<AuditEntry>>,
    capacity: usize,
}

impl AuditLog {
    /// Creates a log that keeps at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        AuditLog {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<AuditEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends an entry, evicting the oldest ones beyond capacity.
    ///
    /// Never fails and never blocks on I/O.
    ///
    /// ## Example
    /// ```rust
    /// use qalam_services::audit::AuditLog;
    ///
    /// let log = AuditLog::new(2);
    /// log.log("u1", "product.create", Some("PEN-BIC-BLUE"));
    /// log.log("u1", "product.update", None);
    /// log.log("u2", "branch.create", None);
    ///
    /// let recent = log.get_recent(10);
    /// assert_eq!(recent.len(), 2);
    /// assert_eq!(recent[0].action, "branch.create");
    /// assert_eq!(recent[1].action, "product.update");
    /// ```
    pub fn log(&self, user_id: &str, action: &str, details: Option<&str>) {
        let id = Uuid::new_v4();
        let user_id = user_id.to_string();
        let action = action.to_string();
        let details = details.map(str::to_string);

        let evicted = {
            let mut entries = self.lock();
            // Stamped under the lock so timestamps follow deque order.
            entries.push_back(AuditEntry {
                id,
                timestamp: Utc::now(),
                user_id,
                action,
                details,
            });

            let mut evicted = 0usize;
            while entries.len() > self.capacity {
                entries.pop_front();
                evicted += 1;
            }
            evicted
        };

        if evicted > 0 {
            trace!(evicted, capacity = self.capacity, "audit log trimmed");
        }
    }

    /// Up to `count` entries, most recently logged first.
    pub fn get_recent(&self, count: usize) -> Vec<AuditEntry> {
        self.lock().iter().rev().take(count).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        AuditLog::new(DEFAULT_AUDIT_CAPACITY)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
