//! Calendar-day comparison and display formatting

use std::fmt::Display;

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};

/// Calendar date of `instant` as seen in `tz`
pub fn local_date<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Whether `instant` falls on the same calendar date as `reference`.
///
/// The comparison happens in the timezone carried by `reference`, so two
/// instants two minutes apart on either side of local midnight are different
/// days, while instants 23 hours apart on the same local date are the same day.
pub fn is_same_day<Tz: TimeZone>(instant: &DateTime<Utc>, reference: &DateTime<Tz>) -> bool {
    local_date(instant, &reference.timezone()) == reference.date_naive()
}

/// The `days` calendar dates ending at `last`, oldest first.
///
/// Dates that would precede the earliest representable date are skipped.
pub fn trailing_dates(last: NaiveDate, days: usize) -> Vec<NaiveDate> {
    (0..days as u64)
        .rev()
        .filter_map(|offset| last.checked_sub_days(Days::new(offset)))
        .collect()
}

/// Clock time such as "8:05 AM"
pub fn format_time<Tz>(instant: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant.with_timezone(tz).format("%-I:%M %p").to_string()
}

/// Short weekday label such as "Mon"
pub fn day_label(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// Long drill-down title such as "Monday, Oct 12"
pub fn day_title(date: NaiveDate) -> String {
    date.format("%A, %b %-d").to_string()
}
