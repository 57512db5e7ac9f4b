// Rest-day calendar. The set is fixed in code, not read from configuration.

use chrono::{Datelike, NaiveDateTime, Weekday};

/// Days on which no activity is recorded, regardless of the probability gate.
pub const REST_DAYS: [Weekday; 2] = [Weekday::Sat, Weekday::Sun];

pub fn is_rest_day(day: Weekday) -> bool {
    REST_DAYS.contains(&day)
}

/// The rest day `now` falls on, if any.
pub fn rest_day_of(now: NaiveDateTime) -> Option<Weekday> {
    let day = now.weekday();
    is_rest_day(day).then_some(day)
}
