//! Calendar date value type
//!
//! A `Date` is either a fully valid `YYYY/MM/DD` date inside
//! [`Date::MIN_YEAR`, `Date::MAX_YEAR`] or the canonical empty date.
//! Comparisons involving an empty date are always false, `!=` included,
//! which is why `Date` implements `PartialEq`/`PartialOrd` but not
//! `Eq`/`Ord`. Note that `a != b` is therefore not `!(a == b)`.
//!
//! Serde goes through the same `YYYY/MM/DD` text as `Display`/`FromStr`,
//! so a deserialized date is validated like any other.

use std::cmp::Ordering;
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DateError;
use crate::scanner::InputScanner;

/// Number of days in `month` of `year`, or `None` if the month is invalid
pub fn days_in_month(month: u32, year: i32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// A validated date, or empty
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Date(Option<NaiveDate>);

impl Date {
    pub const MIN_YEAR: i32 = 2000;
    pub const MAX_YEAR: i32 = 2030;

    /// The canonical empty date
    pub const fn empty() -> Self {
        Date(None)
    }

    /// Build a date, falling back to the empty date on any invalid field
    pub fn new(year: i32, month: i32, day: i32) -> Self {
        Self::try_new(year, month, day).unwrap_or_default()
    }

    /// Build a date, reporting the first invalid field (year, month, day)
    pub fn try_new(year: i32, month: i32, day: i32) -> Result<Self, DateError> {
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
            return Err(DateError::YearOutOfRange);
        }
        let month = u32::try_from(month)
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or(DateError::MonthOutOfRange)?;
        let max_day = days_in_month(month, year).ok_or(DateError::MonthOutOfRange)?;
        let day = u32::try_from(day)
            .ok()
            .filter(|d| (1..=max_day).contains(d))
            .ok_or(DateError::DayOutOfRange)?;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(|date| Date(Some(date)))
            .ok_or(DateError::DayOutOfRange)
    }

    /// Read `year sep month sep day` from a scanner.
    ///
    /// The scanner's failed flag is cleared first. Any single
    /// non-whitespace character is accepted as separator. A missing or
    /// malformed number yields [`DateError::StreamFailure`] and leaves the
    /// scanner failed; range errors leave it usable.
    pub fn scan<R: BufRead>(input: &mut InputScanner<R>) -> Result<Self, DateError> {
        input.clear();
        let year = input.read_int();
        input.read_char();
        let month = input.read_int();
        input.read_char();
        let day = input.read_int();

        match (year, month, day) {
            (Some(year), Some(month), Some(day)) if !input.failed() => {
                Self::try_new(year, month, day)
            }
            _ => Err(DateError::StreamFailure),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Year, or 0 when empty
    pub fn year(&self) -> i32 {
        self.0.map_or(0, |d| d.year())
    }

    /// Month, or 0 when empty
    pub fn month(&self) -> u32 {
        self.0.map_or(0, |d| d.month())
    }

    /// Day of month, or 0 when empty
    pub fn day(&self) -> u32 {
        self.0.map_or(0, |d| d.day())
    }

    /// Ordering key: `year * 372 + month * 13 + day` (0 when empty)
    pub fn comparator(&self) -> i64 {
        i64::from(self.year()) * 372 + i64::from(self.month()) * 13 + i64::from(self.day())
    }

    /// "Not equal" that, like every other comparison, is false when either
    /// side is empty. `!=` on `Date` uses this.
    pub fn differs_from(&self, other: &Date) -> bool {
        matches!(
            self.partial_cmp(other),
            Some(Ordering::Less | Ordering::Greater)
        )
    }
}

impl PartialEq for Date {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }

    #[allow(clippy::partialeq_ne_impl)]
    fn ne(&self, other: &Self) -> bool {
        self.differs_from(other)
    }
}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_empty() || other.is_empty() {
            return None;
        }
        Some(self.comparator().cmp(&other.comparator()))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(date) => write!(f, "{}", date.format("%Y/%m/%d")),
            None => Ok(()),
        }
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(3, '/').map(|part| part.trim().parse::<i32>());

        match (parts.next(), parts.next(), parts.next()) {
            (Some(Ok(year)), Some(Ok(month)), Some(Ok(day))) => Self::try_new(year, month, day),
            _ => Err(DateError::StreamFailure),
        }
    }
}

impl TryFrom<String> for Date {
    type Error = DateError;

    /// An empty string is the empty date
    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.trim().is_empty() {
            Ok(Date::empty())
        } else {
            s.parse()
        }
    }
}

impl From<Date> for String {
    fn from(date: Date) -> Self {
        date.to_string()
    }
}
