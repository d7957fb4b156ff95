//! Analysis period tokens and date ranges
//!
//! A period token is one of a closed set of relative selectors
//! ("last-6-months", ...). Tokens are resolved against "today" by
//! [`crate::services::PeriodResolver`] into an inclusive [`DateRange`].

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::PocketError;

/// Named relative period selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PeriodToken {
    /// First day of the current month through today
    CurrentMonth,
    /// The whole previous calendar month
    LastMonth,
    /// Today minus 3 calendar months through today
    LastThreeMonths,
    /// Today minus 6 calendar months through today
    #[default]
    LastSixMonths,
    /// Today minus 12 calendar months through today
    LastYear,
    /// Everything up to today
    AllTime,
}

impl PeriodToken {
    /// Every token, in the order they are offered to users
    pub const ALL: [PeriodToken; 6] = [
        PeriodToken::CurrentMonth,
        PeriodToken::LastMonth,
        PeriodToken::LastThreeMonths,
        PeriodToken::LastSixMonths,
        PeriodToken::LastYear,
        PeriodToken::AllTime,
    ];

    /// Textual form of every token
    pub const ALL_TOKENS: [&'static str; 6] = [
        "current-month",
        "last-month",
        "last-3-months",
        "last-6-months",
        "last-year",
        "all-time",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentMonth => "current-month",
            Self::LastMonth => "last-month",
            Self::LastThreeMonths => "last-3-months",
            Self::LastSixMonths => "last-6-months",
            Self::LastYear => "last-year",
            Self::AllTime => "all-time",
        }
    }

    /// Number of calendar months a rolling token looks back, if it is one
    pub fn months_back(&self) -> Option<u32> {
        match self {
            Self::LastThreeMonths => Some(3),
            Self::LastSixMonths => Some(6),
            Self::LastYear => Some(12),
            _ => None,
        }
    }
}

impl fmt::Display for PeriodToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PeriodToken {
    type Err = PocketError;

    /// Parse a token. Unknown input is an error, never a silent default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|token| token.as_str() == needle)
            .ok_or_else(|| PocketError::InvalidPeriod(s.to_string()))
    }
}

impl Serialize for PeriodToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PeriodToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Inclusive date window `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Check if a date falls within the window (both ends inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}
