// Date utility functions
// Calendar-day helpers shared by the timeline core, storage and report code.

use chrono::{Datelike, Duration, Months, NaiveDate};

/// Wire format for calendar days (`YYYY-MM-DD`).
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), ISO_DATE_FORMAT).ok()
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Long human form used in tooltips and the preview label, e.g. `Jan 10, 2024`.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 30,
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// January 1st of `year`, saturating at chrono's supported range.
pub fn first_of_year(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN)
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

/// Continuous month coordinate of a day: whole months since year 0 plus the
/// elapsed fraction of the day's own month (`(day - 1) / days_in_month`).
pub fn month_index(date: NaiveDate) -> f64 {
    let whole = date.year() as f64 * 12.0 + date.month0() as f64;
    let dim = days_in_month(date.year(), date.month()) as f64;
    whole + date.day0() as f64 / dim
}

/// Fractional number of months from `from` to `to`, with day-level precision.
pub fn fractional_months_between(from: NaiveDate, to: NaiveDate) -> f64 {
    month_index(to) - month_index(from)
}

/// Inverse of [`month_index`], rounding to the nearest day.
pub fn date_from_month_index(index: f64) -> NaiveDate {
    let whole = index.floor();
    let fraction = index - whole;
    let whole = whole as i64;
    let year = whole.div_euclid(12) as i32;
    let month = whole.rem_euclid(12) as u32 + 1;
    let dim = days_in_month(year, month);

    let day0 = (fraction * dim as f64).round() as u32;
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return if index < 0.0 { NaiveDate::MIN } else { NaiveDate::MAX };
    };
    if day0 >= dim {
        // Rounded past the last day: first day of the following month.
        return add_months(first, 1);
    }
    first.with_day(day0 + 1).unwrap_or(first)
}
