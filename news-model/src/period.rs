//! Inclusive date ranges for archive listings.

use chrono::NaiveDate;

/// An inclusive `[from, to]` range of Unix timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First second included.
    pub from: i64,
    /// Last second included.
    pub to: i64,
}

impl DateRange {
    /// Range from explicit bounds. `from > to` is allowed and matches nothing.
    #[must_use]
    pub const fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }

    /// A calendar year in UTC.
    ///
    /// ```
    /// use news_model::DateRange;
    ///
    /// let range = DateRange::year(2024).unwrap();
    /// assert_eq!(range.from, 1_704_067_200);
    /// assert_eq!(range.to, 1_735_689_599);
    /// ```
    #[must_use]
    pub fn year(year: i32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let next = NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?;
        Some(Self::between(first, next))
    }

    /// A calendar month in UTC. `month` is 1-based.
    #[must_use]
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some(Self::between(first, next))
    }

    /// A single day in UTC.
    #[must_use]
    pub fn day(year: i32, month: u32, day: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, day)?;
        let next = first.succ_opt()?;
        Some(Self::between(first, next))
    }

    /// Whether `timestamp` falls inside the range, bounds included.
    #[must_use]
    pub const fn contains(&self, timestamp: i64) -> bool {
        self.from <= timestamp && timestamp <= self.to
    }

    fn between(first: NaiveDate, next: NaiveDate) -> Self {
        let from = first.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
        let to = next.and_time(chrono::NaiveTime::MIN).and_utc().timestamp() - 1;
        Self { from, to }
    }
}
