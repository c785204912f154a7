//! # Business Hours Module
//!
//! Decides whether a branch is open on a given day and at a given time.
//!
//! ## Window Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SAME-DAY WINDOW (opening <= closing)        09:00 ─────── 22:00        │
//! │                                                                         │
//! │  00:00        09:00                      22:00              24:00       │
//! │    │ closed     [████████ open ███████████)     closed        │         │
//! │                  ▲ inclusive               ▲ exclusive                  │
//! │                                                                         │
//! │  OVERNIGHT WINDOW (opening > closing)        20:00 ─────── 02:00        │
//! │                                                                         │
//! │  00:00    02:00                       20:00                 24:00       │
//! │    [█ open █)       closed              [████████ open ███████│         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The day check always uses the calendar date of the instant being tested,
//! including for the after-midnight part of an overnight window.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Opening hours for a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BusinessHoursConfig {
    /// First open minute (inclusive).
    #[serde(default = "default_opening")]
    #[ts(as = "String")]
    pub opening: NaiveTime,

    /// First closed minute (exclusive).
    #[serde(default = "default_closing")]
    #[ts(as = "String")]
    pub closing: NaiveTime,

    /// Weekdays the branch does not trade at all.
    #[serde(default = "default_closed_days")]
    #[ts(as = "Vec<String>")]
    pub closed_days: Vec<Weekday>,
}

fn default_opening() -> NaiveTime {
    NaiveTime::MIN + chrono::Duration::hours(9)
}

fn default_closing() -> NaiveTime {
    NaiveTime::MIN + chrono::Duration::hours(22)
}

fn default_closed_days() -> Vec<Weekday> {
    vec![Weekday::Sun]
}

impl Default for BusinessHoursConfig {
    fn default() -> Self {
        BusinessHoursConfig {
            opening: default_opening(),
            closing: default_closing(),
            closed_days: default_closed_days(),
        }
    }
}

impl BusinessHoursConfig {
    /// Returns true when the window wraps past midnight.
    pub fn is_overnight(&self) -> bool {
        self.opening > self.closing
    }
}

/// Answers open/closed questions for one [`BusinessHoursConfig`].
#[derive(Debug, Clone)]
pub struct BusinessHours {
    config: BusinessHoursConfig,
    offset: FixedOffset,
}

impl BusinessHours {
    /// Creates a checker for wall-clock times at the given UTC offset.
    pub fn new(config: BusinessHoursConfig, offset: FixedOffset) -> Self {
        BusinessHours { config, offset }
    }

    pub fn config(&self) -> &BusinessHoursConfig {
        &self.config
    }

    pub fn closed_days(&self) -> &[Weekday] {
        &self.config.closed_days
    }

    pub fn opening(&self) -> NaiveTime {
        self.config.opening
    }

    pub fn closing(&self) -> NaiveTime {
        self.config.closing
    }

    /// True unless the date falls on a closed weekday.
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !self.config.closed_days.contains(&date.weekday())
    }

    /// True when a local wall-clock time is inside the open window.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::{FixedOffset, NaiveDate};
    /// use qalam_core::business_hours::{BusinessHours, BusinessHoursConfig};
    ///
    /// let hours = BusinessHours::new(
    ///     BusinessHoursConfig::default(),
    ///     FixedOffset::east_opt(2 * 3600).unwrap(),
    /// );
    /// // 2024-01-01 is a Monday
    /// let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// assert!(hours.is_open_at(monday.and_hms_opt(10, 0, 0).unwrap()));
    /// assert!(!hours.is_open_at(monday.and_hms_opt(22, 0, 0).unwrap()));
    /// ```
    pub fn is_open_at(&self, local: NaiveDateTime) -> bool {
        if !self.is_working_day(local.date()) {
            return false;
        }

        let time = local.time();
        let BusinessHoursConfig {
            opening, closing, ..
        } = self.config;

        if opening <= closing {
            time >= opening && time < closing
        } else {
            time >= opening || time < closing
        }
    }

    /// Same check for an absolute instant, converted to local time first.
    pub fn is_open_at_instant(&self, instant: DateTime<Utc>) -> bool {
        let local = instant.with_timezone(&self.offset).naive_local();
        self.is_open_at(local)
    }

    /// Checks the current wall clock.
    pub fn is_open_now(&self) -> bool {
        self.is_open_at_instant(Utc::now())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn cairo() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // 2024-01-01 is a Monday, 2024-01-07 is a Sunday

    #[test]
    fn test_default_schedule() {
        let hours = BusinessHours::new(BusinessHoursConfig::default(), cairo());
        assert_eq!(hours.opening(), hm(9, 0));
        assert_eq!(hours.closing(), hm(22, 0));
        assert_eq!(hours.closed_days(), &[Weekday::Sun]);
    }

    #[test]
    fn test_working_days() {
        let hours = BusinessHours::new(BusinessHoursConfig::default(), cairo());
        assert!(hours.is_working_day(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert!(hours.is_working_day(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()));
        assert!(!hours.is_working_day(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()));
    }

    #[test]
    fn test_same_day_window_boundaries() {
        let hours = BusinessHours::new(BusinessHoursConfig::default(), cairo());
        assert!(hours.is_open_at(at(2024, 1, 1, 10, 0)));
        assert!(hours.is_open_at(at(2024, 1, 1, 9, 0)));
        assert!(hours.is_open_at(at(2024, 1, 1, 21, 59)));
        assert!(!hours.is_open_at(at(2024, 1, 1, 22, 0)));
        assert!(!hours.is_open_at(at(2024, 1, 1, 8, 59)));
    }

    #[test]
    fn test_closed_day_ignores_time() {
        let hours = BusinessHours::new(BusinessHoursConfig::default(), cairo());
        assert!(!hours.is_open_at(at(2024, 1, 7, 10, 0)));
        assert!(!hours.is_open_at(at(2024, 1, 7, 15, 30)));
    }

    #[test]
    fn test_overnight_window() {
        let config = BusinessHoursConfig {
            opening: hm(20, 0),
            closing: hm(2, 0),
            closed_days: vec![Weekday::Fri],
        };
        assert!(config.is_overnight());
        let hours = BusinessHours::new(config, cairo());

        assert!(hours.is_open_at(at(2024, 1, 1, 20, 0)));
        assert!(hours.is_open_at(at(2024, 1, 1, 23, 30)));
        assert!(hours.is_open_at(at(2024, 1, 2, 1, 59)));
        assert!(!hours.is_open_at(at(2024, 1, 2, 2, 0)));
        assert!(!hours.is_open_at(at(2024, 1, 2, 12, 0)));
        // Friday 2024-01-05 is closed, including its early hours
        assert!(!hours.is_open_at(at(2024, 1, 5, 1, 0)));
        assert!(!hours.is_open_at(at(2024, 1, 5, 21, 0)));
    }

    #[test]
    fn test_instant_uses_offset() {
        let hours = BusinessHours::new(BusinessHoursConfig::default(), cairo());
        // 07:30 UTC on Monday = 09:30 Cairo → open
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 7, 30, 0).unwrap();
        assert!(hours.is_open_at_instant(instant));
        // 20:30 UTC on Monday = 22:30 Cairo → closed
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 20, 30, 0).unwrap();
        assert!(!hours.is_open_at_instant(instant));
        // 22:30 UTC Saturday = 00:30 Sunday Cairo → closed day
        let instant = Utc.with_ymd_and_hms(2024, 1, 6, 22, 30, 0).unwrap();
        assert!(!hours.is_open_at_instant(instant));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: BusinessHoursConfig =
            serde_json::from_str(r#"{ "closed_days": ["Fri", "Sat"] }"#).unwrap();
        assert_eq!(config.opening, hm(9, 0));
        assert_eq!(config.closed_days, vec![Weekday::Fri, Weekday::Sat]);
    }
}
