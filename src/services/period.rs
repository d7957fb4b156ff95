//! Period resolver
//!
//! Turns a [`PeriodToken`] into a concrete inclusive date window anchored to
//! "today". Today is injected rather than read from the clock so that a
//! whole analysis pass sees one consistent anchor.

use chrono::{Local, Months, NaiveDate};

use crate::error::PocketResult;
use crate::models::{DateRange, PeriodToken, YearMonth};

/// Lower bound used for `all-time`
pub fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Resolves period tokens relative to a fixed "today"
#[derive(Debug, Clone, Copy)]
pub struct PeriodResolver {
    today: NaiveDate,
}

impl PeriodResolver {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Anchor on the local calendar date
    pub fn today_local() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn current_month(&self) -> YearMonth {
        YearMonth::of(self.today)
    }

    pub fn previous_month(&self) -> YearMonth {
        self.current_month().prev()
    }

    /// Resolve a token into its date window
    pub fn resolve(&self, token: PeriodToken) -> DateRange {
        match token {
            PeriodToken::CurrentMonth => {
                DateRange::new(self.current_month().first_day(), self.today)
            }
            PeriodToken::LastMonth => {
                let month = self.previous_month();
                DateRange::new(month.first_day(), month.last_day())
            }
            PeriodToken::LastThreeMonths | PeriodToken::LastSixMonths | PeriodToken::LastYear => {
                let months = token.months_back().unwrap_or(0);
                DateRange::new(self.months_ago(months), self.today)
            }
            PeriodToken::AllTime => DateRange::new(epoch().min(self.today), self.today),
        }
    }

    /// Parse and resolve a token given as text
    ///
    /// Unknown tokens produce [`crate::error::PocketError::InvalidPeriod`].
    pub fn resolve_str(&self, token: &str) -> PocketResult<(PeriodToken, DateRange)> {
        let token: PeriodToken = token.parse()?;
        Ok((token, self.resolve(token)))
    }

    /// Today minus `n` calendar months, clamped to the end of shorter months
    /// (March 31st minus one month is February 28th/29th)
    fn months_ago(&self, n: u32) -> NaiveDate {
        self.today
            .checked_sub_months(Months::new(n))
            .unwrap_or_else(epoch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PocketError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_current_month() {
        let resolver = PeriodResolver::new(date(2024, 3, 15));
        let range = resolver.resolve(PeriodToken::CurrentMonth);
        assert_eq!(range, DateRange::new(date(2024, 3, 1), date(2024, 3, 15)));
    }

    #[test]
    fn test_last_month_is_whole_previous_month() {
        let resolver = PeriodResolver::new(date(2024, 3, 15));
        let range = resolver.resolve(PeriodToken::LastMonth);
        assert_eq!(range, DateRange::new(date(2024, 2, 1), date(2024, 2, 29)));

        let january = PeriodResolver::new(date(2024, 1, 10));
        let range = january.resolve(PeriodToken::LastMonth);
        assert_eq!(range, DateRange::new(date(2023, 12, 1), date(2023, 12, 31)));
    }

    #[test]
    fn test_rolling_windows() {
        let resolver = PeriodResolver::new(date(2024, 8, 31));

        assert_eq!(
            resolver.resolve(PeriodToken::LastThreeMonths).start,
            date(2024, 5, 31)
        );
        // February has no 31st; clamps to the last day
        assert_eq!(
            resolver.resolve(PeriodToken::LastSixMonths).start,
            date(2024, 2, 29)
        );
        assert_eq!(
            resolver.resolve(PeriodToken::LastYear).start,
            date(2023, 8, 31)
        );
    }

    #[test]
    fn test_all_time_starts_at_epoch() {
        let resolver = PeriodResolver::new(date(2024, 3, 15));
        let range = resolver.resolve(PeriodToken::AllTime);
        assert_eq!(range.start, date(1970, 1, 1));
        assert_eq!(range.end, date(2024, 3, 15));
    }

    #[test]
    fn test_every_window_is_ordered_and_ends_no_later_than_today() {
        for today in [date(2024, 1, 1), date(2024, 2, 29), date(2023, 12, 31)] {
            let resolver = PeriodResolver::new(today);
            for token in PeriodToken::ALL {
                let range = resolver.resolve(token);
                assert!(range.start <= range.end, "{} on {}", token, today);
                if token == PeriodToken::LastMonth {
                    assert!(range.end < today);
                } else {
                    assert_eq!(range.end, today, "{} on {}", token, today);
                }
            }
        }
    }

    #[test]
    fn test_resolve_str_rejects_unknown_tokens() {
        let resolver = PeriodResolver::new(date(2024, 3, 15));
        let (token, _) = resolver.resolve_str("last-3-months").unwrap();
        assert_eq!(token, PeriodToken::LastThreeMonths);

        let err = resolver.resolve_str("last-2-months").unwrap_err();
        assert!(matches!(err, PocketError::InvalidPeriod(_)));
    }
}
