use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The (start, end) time range a booking is trying to fill.
///
/// `start` is a wall-clock date and time; `end` is a time of day on the same
/// date. The pair is the identity of a booking: two requests with the same
/// window are the same booking. Ordering is by `(start, end)` and is the
/// stable order used whenever windows are listed for a sitter to pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookingWindow {
    pub start: NaiveDateTime,
    pub end: NaiveTime,
}

impl fmt::Display for BookingWindow {
    /// Renders e.g. "6/21 from 5:00PM to 10:00PM". Every user-facing string
    /// goes through this impl so scheduler notifications, booker
    /// confirmations and disambiguation lists agree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%-m/%-d from %-I:%M%p"),
            self.end.format("%-I:%M%p")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn window(y: i32, mo: u32, d: u32, h: u32, mi: u32, eh: u32, emi: u32) -> BookingWindow {
        BookingWindow {
            start: NaiveDate::from_ymd_opt(y, mo, d)
                .unwrap()
                .and_hms_opt(h, mi, 0)
                .unwrap(),
            end: NaiveTime::from_hms_opt(eh, emi, 0).unwrap(),
        }
    }

    #[test]
    fn formats_without_leading_zeros() {
        let w = window(2026, 6, 21, 17, 0, 22, 0);
        assert_eq!(w.to_string(), "6/21 from 5:00PM to 10:00PM");
    }

    #[test]
    fn formats_minutes_two_digit() {
        let w = window(2026, 12, 3, 9, 5, 11, 30);
        assert_eq!(w.to_string(), "12/3 from 9:05AM to 11:30AM");
    }

    #[test]
    fn formats_noon_and_midnight() {
        let w = window(2026, 1, 1, 0, 0, 12, 0);
        assert_eq!(w.to_string(), "1/1 from 12:00AM to 12:00PM");
    }

    #[test]
    fn orders_by_start_then_end() {
        let a = window(2026, 6, 21, 17, 0, 22, 0);
        let b = window(2026, 6, 22, 17, 0, 22, 0);
        let c = window(2026, 6, 21, 17, 0, 23, 0);
        assert!(a < b);
        assert!(a < c);
        assert!(c < b);
    }
}
