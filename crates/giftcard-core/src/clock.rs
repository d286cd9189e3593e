//! US Eastern wall-clock time for result timestamps

use chrono::{DateTime, FixedOffset, Offset, Utc};
use chrono_tz::America::New_York;

/// Time-zone label carried on every generated or validated card
pub const TIMEZONE: &str = "America/New_York";

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;

    /// Current time in US Eastern, with the offset in effect at that instant
    fn now_eastern(&self) -> DateTime<FixedOffset> {
        to_eastern(self.now_utc())
    }
}

/// The system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Convert an instant to US Eastern time (EST or EDT as appropriate)
pub fn to_eastern(instant: DateTime<Utc>) -> DateTime<FixedOffset> {
    let local = instant.with_timezone(&New_York);
    local.with_timezone(&local.offset().fix())
}

/// Human-readable Eastern time, e.g. `2024-07-04 03:15:00 PM EDT`
pub fn display_eastern(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&New_York)
        .format("%Y-%m-%d %I:%M:%S %p %Z")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timezone_label_matches_tz_database() {
        assert_eq!(New_York.name(), TIMEZONE);
    }

    #[test]
    fn test_winter_offset_is_est() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 17, 0, 0).unwrap();
        let eastern = to_eastern(instant);
        assert_eq!(eastern.offset().local_minus_utc(), -5 * 3600);
        assert_eq!(eastern.to_rfc3339(), "2024-01-15T12:00:00-05:00");
    }

    #[test]
    fn test_summer_offset_is_edt() {
        let instant = Utc.with_ymd_and_hms(2024, 7, 4, 19, 15, 0).unwrap();
        let eastern = to_eastern(instant);
        assert_eq!(eastern.offset().local_minus_utc(), -4 * 3600);
        assert_eq!(display_eastern(instant), "2024-07-04 03:15:00 PM EDT");
    }

    #[test]
    fn test_fixed_clock() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 17, 0, 0).unwrap();
        let clock = FixedClock(instant);
        assert_eq!(clock.now_utc(), instant);
        assert_eq!(clock.now_eastern(), to_eastern(instant));
    }
}
