//! Calendar-day utilities for the insured period
//!
//! History APIs are queried one calendar day at a time and cannot answer for days
//! that have not finished yet, so the evaluator needs both the full list of days in
//! the insured period and the subset that lies strictly in the past.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use crate::types::DateRange;

/// Every local calendar day from `start` to `end`, both included.
pub fn generate_date_sequence(start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<NaiveDate> {
    generate_date_sequence_in(start, end, &Local)
}

/// Same as [`generate_date_sequence`], resolving calendar days in `tz`
pub fn generate_date_sequence_in<Tz: TimeZone>(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    tz: &Tz,
) -> Vec<NaiveDate> {
    let first = start.with_timezone(tz).date_naive();
    let last = end.with_timezone(tz).date_naive();
    DateRange::new(first, last).days()
}

/// Format a day as `YYYY-MM-DD`, the form the history API expects
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_dates(dates: &[NaiveDate]) -> Vec<String> {
    dates.iter().copied().map(format_date).collect()
}

/// Keep only the days strictly before today's local calendar day
pub fn filter_to_past_dates(dates: &[NaiveDate]) -> Vec<NaiveDate> {
    filter_past_dates_before(dates, Local::now().date_naive())
}

/// Keep only the days strictly before `today`
pub fn filter_past_dates_before(dates: &[NaiveDate], today: NaiveDate) -> Vec<NaiveDate> {
    dates.iter().copied().filter(|d| *d < today).collect()
}
