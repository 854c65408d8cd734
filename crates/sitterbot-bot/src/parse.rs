//! Free-text booking-request parsing.
//!
//! Understands `"<start> to <end>"` where start is an optional date
//! ("today", "tomorrow", "M/D"; default today) followed by a time, and end
//! is a time of day. Times accept "5pm", "5:30pm" and 24-hour "17:00".
//! Parsing is pure; `now` is passed in.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use sitterbot_core::types::BookingWindow;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// No " to " separator, so the request has no end time.
    #[error("missing end time")]
    MissingEnd,

    /// A date or time fragment was not understood.
    #[error("unrecognized date or time: {0}")]
    Unrecognized(String),
}

/// Parse a booking request into a window.
pub fn parse_window(body: &str, now: NaiveDateTime) -> Result<BookingWindow, ParseError> {
    let (start_str, end_str) = body.split_once(" to ").ok_or(ParseError::MissingEnd)?;
    let start = parse_start(start_str.trim(), now)?;
    let end_str = end_str.trim();
    let end =
        parse_time(end_str).ok_or_else(|| ParseError::Unrecognized(end_str.to_string()))?;
    Ok(BookingWindow { start, end })
}

fn parse_start(s: &str, now: NaiveDateTime) -> Result<NaiveDateTime, ParseError> {
    // The time is the last whitespace token; anything before it is the date.
    let mut parts = s.rsplitn(2, char::is_whitespace);
    let time_tok = parts.next().unwrap_or_default();
    let date_tok = parts.next().map(str::trim);

    let time =
        parse_time(time_tok).ok_or_else(|| ParseError::Unrecognized(time_tok.to_string()))?;
    let date = match date_tok {
        None | Some("") | Some("today") => now.date(),
        Some("tomorrow") => now.date() + Duration::days(1),
        Some(d) => {
            parse_date(d, now.date()).ok_or_else(|| ParseError::Unrecognized(d.to_string()))?
        }
    };
    Ok(date.and_time(time))
}

/// "5pm", "5:30pm", "12am", "17:00".
fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    let (digits, meridiem) = if let Some(rest) = s.strip_suffix("pm") {
        (rest.trim(), Some(true))
    } else if let Some(rest) = s.strip_suffix("am") {
        (rest.trim(), Some(false))
    } else {
        (s, None)
    };

    let (hour_str, minute_str) = match digits.split_once(':') {
        Some((h, m)) => (h, m),
        None => (digits, "0"),
    };
    let hour: u32 = hour_str.parse().ok()?;
    let minute: u32 = minute_str.parse().ok()?;

    let hour24 = match meridiem {
        Some(pm) => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            match (pm, hour) {
                (true, 12) => 12,
                (true, h) => h + 12,
                (false, 12) => 0,
                (false, h) => h,
            }
        }
        None => hour,
    };
    NaiveTime::from_hms_opt(hour24, minute, 0)
}

/// "M/D" in the current year.
fn parse_date(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let (month_str, day_str) = s.split_once('/')?;
    let month: u32 = month_str.parse().ok()?;
    let day: u32 = day_str.parse().ok()?;
    NaiveDate::from_ymd_opt(today.year(), month, day)
}
