//! Date and time lines

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use oled_sens_types::{ClockStatus, Reading};
use std::fmt::Display;

/// Format `now` with a user-supplied strftime pattern
///
/// An invalid pattern yields None instead of panicking inside `Display`.
pub(crate) fn format_with<Tz>(now: &DateTime<Tz>, pattern: &str) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }
    Some(now.format_with_items(items.into_iter()).to_string())
}

pub(crate) fn clock_status(date_format: &str, time_format: &str) -> ClockStatus {
    let now = Local::now();
    ClockStatus {
        date: Reading::from(format_with(&now, date_format)),
        time: Reading::from(format_with(&now, time_format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_default_patterns() {
        let at = Utc.with_ymd_and_hms(2026, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(format_with(&at, "%d/%m/%Y").as_deref(), Some("07/03/2026"));
        assert_eq!(format_with(&at, "%H:%M:%S").as_deref(), Some("09:05:02"));
    }

    #[test]
    fn test_invalid_pattern_is_unavailable() {
        let at = Utc.with_ymd_and_hms(2026, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(format_with(&at, "%Q"), None);
    }

    #[test]
    fn test_clock_status_has_both_fields() {
        let status = clock_status("%d/%m/%Y", "%H:%M:%S");
        assert!(status.date.is_available());
        assert!(status.time.is_available());
    }
}
