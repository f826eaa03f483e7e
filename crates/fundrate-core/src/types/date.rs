//! Date type for performance calculations.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::error::{CoreError, CoreResult};

/// A calendar date with day granularity.
///
/// This is a newtype wrapper around `chrono::NaiveDate`. Series indices,
/// evaluation windows and day-offset calculations all use it.
///
/// # Example
///
/// ```rust
/// use fundrate_core::types::Date;
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::parse("2024-12-31").unwrap();
/// assert_eq!(start.days_between(&end), 365);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> CoreResult<Self> {
        Self::parse_with_format(s, "%Y-%m-%d")
    }

    /// Creates a date from a string using a `chrono` format specification.
    pub fn parse_with_format(s: &str, format: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s.trim(), format)
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// 1970-01-01.
    #[must_use]
    pub fn epoch() -> Self {
        Date(NaiveDate::default())
    }

    /// Returns today's date.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Calculates the number of calendar days between two dates.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the first day of the year.
    #[must_use]
    pub fn start_of_year(&self) -> Self {
        Date(self.0.with_ordinal(1).unwrap_or(self.0))
    }

    /// Returns the last day of the year.
    #[must_use]
    pub fn end_of_year(&self) -> Self {
        NaiveDate::from_ymd_opt(self.year(), 12, 31).map_or(*self, Date)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Add<i64> for Date {
    type Output = Self;

    /// Adds days to a date.
    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<i64> for Date {
    type Output = Self;

    /// Subtracts days from a date.
    fn sub(self, days: i64) -> Self::Output {
        self.add_days(-days)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

/// An inclusive `[start, end]` window of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First date of the window.
    pub start: Date,
    /// Last date of the window (inclusive).
    pub end: Date,
}

impl DateRange {
    /// Creates a window, rejecting `end < start`.
    pub fn new(start: Date, end: Date) -> CoreResult<Self> {
        if end < start {
            return Err(CoreError::invalid_date(format!(
                "window end {end} precedes start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Returns true if `date` lies inside the window.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days in the window, both ends included.
    #[must_use]
    pub fn len_days(&self) -> usize {
        (self.start.days_between(&self.end) + 1) as usize
    }

    /// Iterates every calendar day of the window.
    pub fn days(&self) -> impl Iterator<Item = Date> {
        let start = self.start;
        (0..self.len_days() as i64).map(move |offset| start.add_days(offset))
    }

    /// Calendar years touched by the window, in order.
    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.start.year()..=self.end.year()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
