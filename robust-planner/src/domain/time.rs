//! Wall-clock time handling for schedule rows.
//!
//! Schedule rows carry times as "HH:MM:SS" strings on a single service day.
//! `ClockTime` orders exactly like the zero-padded strings do. Offsets are
//! applied on a day-aware clock (see [`ClockTime::offset`]), so a time pushed
//! past midnight compares later than every time on the service day instead of
//! wrapping around to the early morning.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Serialize, Serializer};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }

    /// The string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// A time of day on the service day, to the second.
///
/// # Examples
///
/// ```
/// use robust_planner::domain::ClockTime;
///
/// let time = ClockTime::parse("08:25:00").unwrap();
/// assert_eq!(time.to_string(), "08:25:00");
///
/// // Only zero-padded HH:MM:SS is accepted
/// assert!(ClockTime::parse("8:25:00").is_err());
/// assert!(ClockTime::parse("08:25").is_err());
/// assert!(ClockTime::parse("24:00:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Parse a time from "HH:MM:SS" format.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();

        if bytes.len() != 8 {
            return Err(TimeError::new(s, "expected HH:MM:SS format"));
        }

        if bytes[2] != b':' || bytes[5] != b':' {
            return Err(TimeError::new(s, "expected colons at positions 2 and 5"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new(s, "invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new(s, "hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new(s, "invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new(s, "minute must be 0-59"));
        }

        let second = parse_two_digits(&bytes[6..8])
            .ok_or_else(|| TimeError::new(s, "invalid second digits"))?;
        if second > 59 {
            return Err(TimeError::new(s, "second must be 0-59"));
        }

        NaiveTime::from_hms_opt(hour, minute, second)
            .map(Self)
            .ok_or_else(|| TimeError::new(s, "invalid time"))
    }

    /// Create a time from its components, if they are in range.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(Self)
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Returns the second (0-59).
    pub fn second(&self) -> u32 {
        self.0.second()
    }

    pub fn seconds_from_midnight(&self) -> u32 {
        self.0.num_seconds_from_midnight()
    }

    /// This time anchored on the (arbitrary, fixed) service day.
    pub fn on_service_day(&self) -> NaiveDateTime {
        NaiveDate::default().and_time(self.0)
    }

    /// Shift forward by `duration` on the day-aware clock.
    ///
    /// ```
    /// use chrono::Duration;
    /// use robust_planner::domain::ClockTime;
    ///
    /// let late = ClockTime::parse("23:59:00").unwrap();
    /// let early = ClockTime::parse("00:10:00").unwrap();
    ///
    /// // No wrap: two minutes after 23:59 is still later than 00:10
    /// assert!(late.offset(Duration::minutes(2)) > early.on_service_day());
    /// ```
    pub fn offset(&self, duration: Duration) -> NaiveDateTime {
        self.on_service_day() + duration
    }

    /// Shift backward by `duration`, wrapping around midnight.
    pub fn wrapping_sub(&self, duration: Duration) -> Self {
        Self(self.0.overflowing_sub_signed(duration).0)
    }

    /// Minute-of-hour gap from `self` to `later`.
    ///
    /// The elapsed time is taken modulo one day, floored to whole minutes and
    /// then reduced modulo 60, so a 70-minute wait weighs 10.
    ///
    /// ```
    /// use robust_planner::domain::ClockTime;
    ///
    /// let t = |s| ClockTime::parse(s).unwrap();
    /// assert_eq!(t("08:00:00").minute_of_hour_gap(t("08:07:30")), 7);
    /// assert_eq!(t("08:00:00").minute_of_hour_gap(t("09:10:00")), 10);
    /// ```
    pub fn minute_of_hour_gap(&self, later: ClockTime) -> u32 {
        let elapsed = (i64::from(later.seconds_from_midnight())
            - i64::from(self.seconds_from_midnight()))
        .rem_euclid(SECONDS_PER_DAY);
        ((elapsed / 60) % 60) as u32
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({self})")
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
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
