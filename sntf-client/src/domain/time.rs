//! Departure time and weekday types.
//!
//! The backend takes the departure time as a zero-padded "HH:MM" string and
//! the day as an integer where 0 is Sunday and 6 is Saturday. Both types
//! here guarantee those formats by construction.

use std::fmt;

use chrono::{Datelike, NaiveTime, Timelike, Weekday};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct InvalidTime {
    reason: &'static str,
}

impl InvalidTime {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Error returned for a day index outside 0-6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid day of week {0}: must be 0 (Sunday) to 6 (Saturday)")]
pub struct InvalidDay(pub u32);

/// A requested departure time of day, always within 00:00-23:59.
///
/// # Examples
///
/// ```
/// use sntf_client::domain::DepartureTime;
///
/// let t = DepartureTime::parse_hhmm("07:05").unwrap();
/// assert_eq!(t.to_string(), "07:05");
///
/// assert!(DepartureTime::parse_hhmm("7:05").is_err());
/// assert!(DepartureTime::parse_hhmm("24:00").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DepartureTime {
    hour: u8,
    minute: u8,
}

impl DepartureTime {
    /// Create a time from components, rejecting out-of-range values.
    pub fn new(hour: u32, minute: u32) -> Result<Self, InvalidTime> {
        if hour > 23 {
            return Err(InvalidTime::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(InvalidTime::new("minute must be 0-59"));
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Create a time by clamping each component to its maximum.
    ///
    /// ```
    /// use sntf_client::domain::DepartureTime;
    ///
    /// assert_eq!(DepartureTime::saturating(99, 75).to_string(), "23:59");
    /// ```
    pub fn saturating(hour: u32, minute: u32) -> Self {
        Self {
            hour: hour.min(23) as u8,
            minute: minute.min(59) as u8,
        }
    }

    /// Parse a strict, zero-padded "HH:MM" string.
    pub fn parse_hhmm(s: &str) -> Result<Self, InvalidTime> {
        let bytes = s.as_bytes();
        if bytes.len() != 5 {
            return Err(InvalidTime::new("expected HH:MM format"));
        }
        if bytes[2] != b':' {
            return Err(InvalidTime::new("expected colon at position 2"));
        }

        let hour = parse_two_digits(&bytes[0..2])
            .ok_or_else(|| InvalidTime::new("invalid hour digits"))?;
        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| InvalidTime::new("invalid minute digits"))?;

        Self::new(hour, minute)
    }

    /// Take the hour and minute of a wall-clock time.
    pub fn from_naive(time: NaiveTime) -> Self {
        Self::saturating(time.hour(), time.minute())
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.hour as u32
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.minute as u32
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Day of the week as the backend numbers it: 0 = Sunday ... 6 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    pub const SUNDAY: DayOfWeek = DayOfWeek(0);

    /// Create from a 0-6 index.
    pub fn from_index(index: u32) -> Result<Self, InvalidDay> {
        if index > 6 {
            return Err(InvalidDay(index));
        }
        Ok(Self(index as u8))
    }

    /// The day of a calendar date.
    pub fn of<D: Datelike>(date: &D) -> Self {
        Self::from(date.weekday())
    }

    /// Returns the 0-6 index.
    pub fn index(&self) -> u32 {
        self.0 as u32
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        Self(day.num_days_from_sunday() as u8)
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cut a backend time string ("HH:MM" or "HH:MM:SS") down to "HH:MM".
///
/// Shorter strings are returned unchanged.
pub fn truncate_hhmm(s: &str) -> &str {
    match s.char_indices().nth(5) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Parse exactly two ASCII digits.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parse_valid_times() {
        assert_eq!(DepartureTime::parse_hhmm("00:00").unwrap().to_string(), "00:00");
        assert_eq!(DepartureTime::parse_hhmm("23:59").unwrap().to_string(), "23:59");
        let t = DepartureTime::parse_hhmm("14:30").unwrap();
        assert_eq!((t.hour(), t.minute()), (14, 30));
    }

    #[test]
    fn reject_malformed_times() {
        assert!(DepartureTime::parse_hhmm("").is_err());
        assert!(DepartureTime::parse_hhmm("1430").is_err());
        assert!(DepartureTime::parse_hhmm("14-30").is_err());
        assert!(DepartureTime::parse_hhmm("1a:30").is_err());
        assert!(DepartureTime::parse_hhmm("24:00").is_err());
        assert!(DepartureTime::parse_hhmm("12:60").is_err());
    }

    #[test]
    fn saturating_clamps_each_component() {
        assert_eq!(DepartureTime::saturating(24, 0).to_string(), "23:00");
        assert_eq!(DepartureTime::saturating(5, 60).to_string(), "05:59");
        assert_eq!(DepartureTime::saturating(0, 0).to_string(), "00:00");
    }

    #[test]
    fn from_naive_drops_seconds() {
        let t = NaiveTime::from_hms_opt(8, 4, 59).unwrap();
        assert_eq!(DepartureTime::from_naive(t).to_string(), "08:04");
    }

    #[test]
    fn day_of_week_range() {
        assert!(DayOfWeek::from_index(0).is_ok());
        assert!(DayOfWeek::from_index(6).is_ok());
        assert_eq!(DayOfWeek::from_index(7), Err(InvalidDay(7)));
    }

    #[test]
    fn day_of_week_counts_from_sunday() {
        assert_eq!(DayOfWeek::from(Weekday::Sun).index(), 0);
        assert_eq!(DayOfWeek::from(Weekday::Fri).index(), 5);
        assert_eq!(DayOfWeek::from(Weekday::Sat).index(), 6);

        // 2024-03-15 was a Friday
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(DayOfWeek::of(&date).index(), 5);
    }

    #[test]
    fn truncate_backend_times() {
        assert_eq!(truncate_hhmm("08:15:00"), "08:15");
        assert_eq!(truncate_hhmm("08:15"), "08:15");
        assert_eq!(truncate_hhmm("-"), "-");
        assert_eq!(truncate_hhmm(""), "");
    }
}
