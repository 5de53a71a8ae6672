//! Time types for financial calculations.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//!
//! # Examples
//!
//! ```
//! use risk_core::types::Date;
//!
//! let valuation = Date::from_ymd(2014, 10, 16).unwrap();
//! let maturity = Date::from_ymd(2019, 12, 20).unwrap();
//! assert!(maturity > valuation);
//! ```

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 parsing/formatting and standard date arithmetic.
///
/// # Examples
///
/// ```
/// use risk_core::types::Date;
///
/// // Create from year, month, day
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
/// assert_eq!(date.month(), 6);
/// assert_eq!(date.day(), 15);
///
/// // Parse from ISO 8601 string
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// // Calculate days between dates
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 1, 11).unwrap();
/// assert_eq!(end - start, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Arguments
    ///
    /// * `year` - Year (e.g., 2024)
    /// * `month` - Month (1-12)
    /// * `day` - Day (1-31, depending on month)
    ///
    /// # Returns
    ///
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses an ISO 8601 date string (YYYY-MM-DD).
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|_| DateError::ParseError(s.to_string()))
    }

    /// Returns the underlying chrono::NaiveDate.
    #[inline]
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    #[inline]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[inline]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[inline]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the ACT/365F year fraction from this date to `other`.
    ///
    /// Negative when `other` is before this date.
    pub fn year_fraction_to(&self, other: Date) -> f64 {
        (other - *self) as f64 / 365.0
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_ymd_valid() {
        let date = Date::from_ymd(2024, 2, 29).unwrap(); // Leap year
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 2);
        assert_eq!(date.day(), 29);
    }

    #[test]
    fn test_from_ymd_invalid() {
        match Date::from_ymd(2023, 2, 29) {
            Err(DateError::InvalidDate { year, month, day }) => {
                assert_eq!((year, month, day), (2023, 2, 29));
            }
            _ => panic!("Expected InvalidDate error"),
        }
    }

    #[test]
    fn test_parse_iso8601() {
        let date = Date::parse("2014-10-16").unwrap();
        assert_eq!(date, Date::from_ymd(2014, 10, 16).unwrap());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Date::parse("16/10/2014").is_err());
        assert!(Date::parse("not a date").is_err());
    }

    #[test]
    fn test_display() {
        let date = Date::from_ymd(2014, 10, 16).unwrap();
        assert_eq!(format!("{}", date), "2014-10-16");
    }

    #[test]
    fn test_subtraction() {
        let start = Date::from_ymd(2014, 10, 16).unwrap();
        let end = Date::from_ymd(2015, 10, 16).unwrap();
        assert_eq!(end - start, 365);
        assert_eq!(start - end, -365);
    }

    #[test]
    fn test_year_fraction_to() {
        let start = Date::from_ymd(2014, 10, 16).unwrap();
        let end = Date::from_ymd(2015, 10, 16).unwrap();
        assert_relative_eq!(start.year_fraction_to(end), 1.0);
    }

    #[test]
    fn test_ordering() {
        let earlier = Date::from_ymd(2014, 1, 1).unwrap();
        let later = Date::from_ymd(2014, 12, 31).unwrap();
        assert!(earlier < later);
    }
}
