//! Wall-clock source for entry timestamps.
//!
//! Dates render as `DD/MM/YYYY` and times as `HH:MM`, both in local time.

use chrono::{Local, NaiveDate, NaiveDateTime};

pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const TIME_FORMAT: &str = "%H:%M";

/// Source of the current local date and time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Builds a clock at `year-month-day hour:minute`; returns `None` for an
    /// impossible date or time.
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Display strings for one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub date: String,
    pub time: String,
}

impl Stamp {
    pub fn from_datetime(value: NaiveDateTime) -> Self {
        Self {
            date: value.format(DATE_FORMAT).to_string(),
            time: value.format(TIME_FORMAT).to_string(),
        }
    }

    pub fn now(clock: &dyn Clock) -> Self {
        Self::from_datetime(clock.now())
    }
}

#[cfg(test)]
mod tests {
    use super::{FixedClock, Stamp};

    #[test]
    fn stamp_uses_day_first_date_and_24h_time() {
        let clock = FixedClock::at(2026, 3, 7, 9, 5).expect("valid instant");
        let stamp = Stamp::now(&clock);
        assert_eq!(stamp.date, "07/03/2026");
        assert_eq!(stamp.time, "09:05");
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(FixedClock::at(2026, 2, 30, 0, 0).is_none());
    }
}
