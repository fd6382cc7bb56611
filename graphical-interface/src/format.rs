use chrono::{Datelike, NaiveDate, Weekday};

use crate::types::ProtestDate;

/// `"250 m"` below one kilometer, `"1.3 km"` from there on.
pub fn format_distance(meters: f64) -> String {
    let rounded = meters.round();
    if rounded < 1000.0 {
        format!("{} m", rounded as i64)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

/// `dd.mm`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m").to_string()
}

pub fn day_of_week(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// The earliest date on or after `today`, earlier times first on the same day.
pub fn upcoming_date(dates: &[ProtestDate], today: NaiveDate) -> Option<&ProtestDate> {
    dates
        .iter()
        .filter(|entry| entry.date >= today)
        .min_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)))
}

/// `"Day Tuesday 20.10 at 19:00"`
pub fn format_protest_date(entry: &ProtestDate) -> String {
    format!(
        "Day {} {} at {}",
        day_of_week(entry.date),
        format_date(entry.date),
        entry.time.format("%H:%M")
    )
}
