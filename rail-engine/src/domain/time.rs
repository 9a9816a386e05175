//! Minute-of-day time handling.
//!
//! Timetables supply departure and arrival times as minutes since midnight
//! with no date attached. This module wraps those values so that anything
//! holding a [`MinuteOfDay`] can trust it lies within a single day.

use chrono::{Duration, NaiveTime, Timelike};
use std::fmt;

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Error returned when constructing or parsing an invalid time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day with minute precision, in `0..1440`.
///
/// # Examples
///
/// ```
/// use rail_engine::domain::MinuteOfDay;
///
/// let t = MinuteOfDay::new(630).unwrap();
/// assert_eq!(t.to_string(), "10:30");
/// assert_eq!(MinuteOfDay::parse_hhmm("10:30").unwrap(), t);
///
/// assert!(MinuteOfDay::new(-1).is_err());
/// assert!(MinuteOfDay::new(1440).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    /// Create from a minute count, rejecting values outside a single day.
    pub fn new(minutes: i64) -> Result<Self, TimeError> {
        if minutes < 0 {
            return Err(TimeError::new("minute of day must not be negative"));
        }
        if minutes >= i64::from(MINUTES_PER_DAY) {
            return Err(TimeError::new("minute of day must be below 1440"));
        }
        Ok(Self(minutes as u16))
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use rail_engine::domain::MinuteOfDay;
    ///
    /// assert_eq!(MinuteOfDay::parse_hhmm("00:00").unwrap().minutes(), 0);
    /// assert_eq!(MinuteOfDay::parse_hhmm("23:59").unwrap().minutes(), 1439);
    ///
    /// assert!(MinuteOfDay::parse_hhmm("1430").is_err());
    /// assert!(MinuteOfDay::parse_hhmm("14:3").is_err());
    /// assert!(MinuteOfDay::parse_hhmm("24:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Ok(Self((hour * 60 + minute) as u16))
    }

    /// Create from a wall-clock time, discarding seconds.
    pub fn from_time(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> u16 {
        self.0
    }

    /// Returns the duration from `self` until `later`.
    ///
    /// Negative if `later` is actually earlier; no day rollover is assumed.
    pub fn until(&self, later: MinuteOfDay) -> Duration {
        Duration::minutes(i64::from(later.0) - i64::from(self.0))
    }
}

impl fmt::Debug for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MinuteOfDay({:02}:{:02})", self.0 / 60, self.0 % 60)
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Render a duration as `"Xh Ym"`.
///
/// ```
/// use chrono::Duration;
/// use rail_engine::domain::format_duration;
///
/// assert_eq!(format_duration(Duration::minutes(160)), "2h 40m");
/// assert_eq!(format_duration(Duration::minutes(5)), "0h 5m");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_minutes();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    format!("{sign}{}h {}m", total / 60, total % 60)
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Display output always parses back to the same value
        #[test]
        fn display_parses_back(m in 0i64..1440) {
            let t = MinuteOfDay::new(m).unwrap();
            prop_assert_eq!(MinuteOfDay::parse_hhmm(&t.to_string()).unwrap(), t);
        }

        /// Ordering agrees with the underlying minute count
        #[test]
        fn ordering_matches_minutes(a in 0i64..1440, b in 0i64..1440) {
            let ta = MinuteOfDay::new(a).unwrap();
            let tb = MinuteOfDay::new(b).unwrap();
            prop_assert_eq!(ta.cmp(&tb), a.cmp(&b));
        }

        /// Wall-clock conversion agrees with parsing the same clock text
        #[test]
        fn from_time_matches_parse(h in 0u32..24, m in 0u32..60, s in 0u32..60) {
            let time = NaiveTime::from_hms_opt(h, m, s).unwrap();
            let parsed = MinuteOfDay::parse_hhmm(&format!("{h:02}:{m:02}")).unwrap();
            prop_assert_eq!(MinuteOfDay::from_time(time), parsed);
        }
    }
}
