//! Feed timestamps.
//!
//! - [`Clock`]: injected time source so renders are reproducible in tests
//! - [`to_rfc822`]: `Day, D Mon YYYY HH:MM:SS +ZZZZ` as used by RSS 2.0
//! - [`parse_item_date`]: dates accepted in feed definition files
//!
//! # Examples
//!
//! ```ignore
//! let dt = parse_item_date("2024-06-05T14:30:45+02:00", utc).unwrap();
//! assert_eq!(to_rfc822(&dt), "Wed, 5 Jun 2024 14:30:45 +0200");
//! ```

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};

/// RSS date layout: abbreviated weekday, unpadded day, numeric offset.
const RFC822: &str = "%a, %-d %b %Y %H:%M:%S %z";

/// Time source for channel `pubDate` / `lastBuildDate`.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Server-local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}

/// Format as RSS 2.0 date.
pub fn to_rfc822(dt: &DateTime<FixedOffset>) -> String {
    dt.format(RFC822).to_string()
}

/// Parse a date from a feed definition.
///
/// Accepts RFC 3339 (`2024-06-15T14:30:45Z`, `...+02:00`), or a naive
/// `YYYY-MM-DDTHH:MM:SS` / `YYYY-MM-DD` which is placed in `offset`.
pub fn parse_item_date(s: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    offset.from_local_datetime(&naive).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_to_rfc822_unpadded_day() {
        let dt = utc().with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(to_rfc822(&dt), "Mon, 1 Jan 2024 00:00:00 +0000");
    }

    #[test]
    fn test_to_rfc822_offset() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let dt = offset.with_ymd_and_hms(2024, 6, 15, 14, 30, 45).unwrap();
        assert_eq!(to_rfc822(&dt), "Sat, 15 Jun 2024 14:30:45 +0200");

        let offset = FixedOffset::west_opt(5 * 3600 + 1800).unwrap();
        let dt = offset.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(to_rfc822(&dt), "Sun, 31 Dec 2023 23:59:59 -0530");
    }

    #[test]
    fn test_fixed_clock() {
        let dt = utc().with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
        let clock = FixedClock(dt);
        assert_eq!(clock.now(), dt);
        assert_eq!((&clock).now(), dt);
    }

    #[test]
    fn test_system_clock_is_current() {
        let before = Local::now().fixed_offset();
        let now = SystemClock.now();
        assert!(now >= before);
    }

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_item_date("2024-06-15T14:30:45+02:00", utc()).unwrap();
        assert_eq!(to_rfc822(&dt), "Sat, 15 Jun 2024 14:30:45 +0200");

        let dt = parse_item_date("2024-06-15T14:30:45Z", utc()).unwrap();
        assert_eq!(to_rfc822(&dt), "Sat, 15 Jun 2024 14:30:45 +0000");
    }

    #[test]
    fn test_parse_naive_uses_offset() {
        let offset = FixedOffset::east_opt(3600).unwrap();
        let dt = parse_item_date("2024-01-01T00:00:00", offset).unwrap();
        assert_eq!(to_rfc822(&dt), "Mon, 1 Jan 2024 00:00:00 +0100");

        let dt = parse_item_date("2024-01-01 08:15:00", offset).unwrap();
        assert_eq!(to_rfc822(&dt), "Mon, 1 Jan 2024 08:15:00 +0100");
    }

    #[test]
    fn test_parse_date_only() {
        let dt = parse_item_date("2024-02-29", utc()).unwrap();
        assert_eq!(to_rfc822(&dt), "Thu, 29 Feb 2024 00:00:00 +0000");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_item_date("", utc()).is_none());
        assert!(parse_item_date("2023-02-29", utc()).is_none());
        assert!(parse_item_date("yesterday", utc()).is_none());
        assert!(parse_item_date("2024-13-01T00:00:00", utc()).is_none());
    }
}
