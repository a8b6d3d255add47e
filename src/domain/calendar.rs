//! Calendar math for month bounds, week buckets, and grid layout.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Inclusive first and last day of the month containing `reference`.
///
/// Returns `None` when the month cannot be represented; callers treat that
/// as an empty result rather than an error.
pub fn month_bounds(reference: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let start = reference.with_day(1)?;
    let (next_year, next_month) = if start.month() == 12 {
        (start.year() + 1, 1)
    } else {
        (start.year(), start.month() + 1)
    };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some((start, first_next - Duration::days(1)))
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    (first_next - Duration::days(1)).day()
}

/// Start of the week containing `date`, where weeks begin on `first_weekday`.
pub fn week_start(date: NaiveDate, first_weekday: Weekday) -> NaiveDate {
    let offset = weekday_offset(date.weekday(), first_weekday);
    date - Duration::days(offset as i64)
}

/// Day-of-month number used as a grid key.
pub fn day_index(date: NaiveDate) -> u32 {
    date.day()
}

/// Column distance of `day` from the configured first weekday, in `0..7`.
fn weekday_offset(day: Weekday, first: Weekday) -> u32 {
    (7 + day.num_days_from_monday() - first.num_days_from_monday()) % 7
}

/// Cell layout for one month rendered as a 7-column calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    /// Empty cells before day 1 so day-of-week columns align.
    pub leading_blanks: u32,
    pub total_days: u32,
}

impl MonthGrid {
    /// Layout for the month containing `month`, or `None` fail-closed.
    pub fn for_month(month: NaiveDate, first_weekday: Weekday) -> Option<Self> {
        let (start, end) = month_bounds(month)?;
        Some(Self {
            leading_blanks: weekday_offset(start.weekday(), first_weekday),
            total_days: end.day(),
        })
    }

    /// Blank cells after the last day that pad the grid to full weeks.
    pub fn trailing_blanks(&self) -> u32 {
        (7 - (self.leading_blanks + self.total_days) % 7) % 7
    }
}
