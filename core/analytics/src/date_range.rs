//! FILENAME: core/analytics/src/date_range.rs
//! PURPOSE: Inclusive calendar-day windows driven by the day-range selector.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Longest window a custom selector may request (ten years).
pub const MAX_RANGE_DAYS: u32 = 3650;

/// Day-range selector options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RangePreset {
    Last7,
    Last30,
    Last90,
    Last365,
    Custom(u32),
}

impl RangePreset {
    /// Map a raw day count onto a preset, falling back to `Custom`.
    pub fn from_days(days: u32) -> Self {
        match days {
            7 => RangePreset::Last7,
            30 => RangePreset::Last30,
            90 => RangePreset::Last90,
            365 => RangePreset::Last365,
            other => RangePreset::Custom(other),
        }
    }

    /// Number of days covered; custom values are clamped to 1..=MAX_RANGE_DAYS.
    pub fn days(&self) -> u32 {
        match self {
            RangePreset::Last7 => 7,
            RangePreset::Last30 => 30,
            RangePreset::Last90 => 90,
            RangePreset::Last365 => 365,
            RangePreset::Custom(days) => (*days).clamp(1, MAX_RANGE_DAYS),
        }
    }
}

impl Default for RangePreset {
    fn default() -> Self {
        RangePreset::Last30
    }
}

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range; the bounds are swapped if given in reverse order.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            DateRange { start, end }
        } else {
            DateRange { start: end, end: start }
        }
    }

    /// The `days`-long window ending on (and including) `end`.
    /// `days` is clamped to 1..=MAX_RANGE_DAYS; the start never goes below
    /// the earliest representable date.
    pub fn ending_on(end: NaiveDate, days: u32) -> Self {
        let span = days.clamp(1, MAX_RANGE_DAYS) as i64 - 1;
        DateRange {
            start: end.checked_sub_signed(Duration::days(span)).unwrap_or(NaiveDate::MIN),
            end,
        }
    }

    pub fn from_preset(preset: RangePreset, today: NaiveDate) -> Self {
        Self::ending_on(today, preset.days())
    }

    /// Number of days in the range, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The window of equal length immediately before this one.
    pub fn previous(&self) -> Self {
        let end = self.start.pred_opt().unwrap_or(self.start);
        DateRange {
            start: end
                .checked_sub_signed(Duration::days(self.days() - 1))
                .unwrap_or(NaiveDate::MIN),
            end,
        }
    }

    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.days()).map(move |offset| start + Duration::days(offset))
    }
}
