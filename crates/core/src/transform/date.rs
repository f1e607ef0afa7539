use std::collections::HashSet;
use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use super::types::DateDim;
use crate::source::Transaction;

/// Calendar date of a transaction timestamp.
///
/// Timestamps are wall-clock values, so the date is taken as-is without any
/// zone conversion.
pub fn calendar_date(timestamp: &NaiveDateTime) -> NaiveDate {
    timestamp.date()
}

/// Years that fit the eight digits of a `YYYYMMDD` key.
pub const DATE_KEY_YEARS: RangeInclusive<i32> = 0..=9999;

/// Encodes a date as a `YYYYMMDD` integer.
///
/// Only meaningful for years in [`DATE_KEY_YEARS`]; source validation
/// rejects transactions outside that range.
pub fn date_key(date: NaiveDate) -> u32 {
    date.year() as u32 * 10_000 + date.month() * 100 + date.day()
}

/// Builds one date dimension row per distinct calendar date, in order of
/// first appearance.
pub fn build_date_dimension(transactions: &[Transaction]) -> Vec<DateDim> {
    let mut seen = HashSet::new();
    transactions
        .iter()
        .map(|t| calendar_date(&t.timestamp))
        .filter(|date| seen.insert(*date))
        .map(date_row)
        .collect()
}

/// Derives every calendar attribute from the date alone.
pub fn date_row(date: NaiveDate) -> DateDim {
    let month = date.month();
    let day_of_week = date.weekday().num_days_from_sunday();

    DateDim {
        date_key: date_key(date),
        full_date: date,
        day: date.day(),
        month,
        quarter: (month + 2) / 3,
        year: date.year(),
        day_of_week,
        day_name: date.format("%A").to_string(),
        month_name: date.format("%B").to_string(),
        is_weekend: matches!(day_of_week, 0 | 6),
    }
}
