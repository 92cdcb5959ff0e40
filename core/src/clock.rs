//! Calendar clock: decides which day "today" is in a fixed UTC offset.
//!
//! Seeds are built from calendar dates, so every caller must agree on the
//! timezone. Only `today()` and `tomorrow()` read the wall clock; the rest
//! of the crate takes dates as arguments.

use crate::error::{FortuneError, FortuneResult};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

/// UTC+08:00 (Asia/Shanghai), in minutes.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 8 * 60;

/// Days shown in a luck history listing, today included.
pub const HISTORY_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FortuneClock {
    pub utc_offset_minutes: i32,
}

impl Default for FortuneClock {
    fn default() -> Self {
        Self::new(DEFAULT_UTC_OFFSET_MINUTES)
    }
}

impl FortuneClock {
    pub fn new(utc_offset_minutes: i32) -> Self {
        Self { utc_offset_minutes }
    }

    /// The configured offset. Out-of-range offsets fall back to UTC.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).unwrap_or_else(|| {
            log::warn!("utc offset {} minutes out of range, using UTC", self.utc_offset_minutes);
            Utc.fix()
        })
    }

    /// The calendar date at `instant` in this clock's offset.
    pub fn today_at(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset()).date_naive()
    }

    pub fn today(&self) -> NaiveDate {
        self.today_at(Utc::now())
    }

    /// The day after `today_at(instant)`; the preview date for "tomorrow".
    pub fn tomorrow_at(&self, instant: DateTime<Utc>) -> NaiveDate {
        next_day(self.today_at(instant))
    }

    pub fn tomorrow(&self) -> NaiveDate {
        self.tomorrow_at(Utc::now())
    }
}

pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

/// `YYYY-MM-DD`, zero padded.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date(value: &str) -> FortuneResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| FortuneError::InvalidDate { value: value.to_string() })
}

/// Inclusive `(start, end)` of the history window ending on `today`.
pub fn history_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today
        .checked_sub_signed(Duration::days(HISTORY_DAYS - 1))
        .unwrap_or(today);
    (start, today)
}
