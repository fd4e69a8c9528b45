use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};

use crate::task::Day;

/// Day of the week for the real-world local date.
pub fn today() -> Day {
    day_of(Local::now().date_naive())
}

pub fn day_of(date: NaiveDate) -> Day {
    Day::from_weekday(date.weekday())
}

/// Inclusive bounds of the Monday-first week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let back = i64::from(date.weekday().num_days_from_monday());
    let start = date - Duration::days(back);
    (start, start + Duration::days(6))
}

/// Inclusive bounds of the calendar month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date.with_day(1).unwrap_or(date);
    let next_month = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    };
    let end = next_month
        .map(|first| first - Duration::days(1))
        .unwrap_or(date);
    (start, end)
}

/// Header clock line, e.g. "Monday 31 August 2026, 14:03:22".
pub fn format_timestamp(now: DateTime<Local>) -> String {
    now.format("%A %-d %B %Y, %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{day_of, month_bounds, week_bounds};
    use crate::task::Day;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn weeks_start_on_monday() {
        let (start, end) = week_bounds(date(2026, 8, 26));
        assert_eq!(start, date(2026, 8, 24));
        assert_eq!(end, date(2026, 8, 30));
        assert_eq!(day_of(start), Day::Monday);
        assert_eq!(day_of(end), Day::Sunday);
    }

    #[test]
    fn sunday_belongs_to_the_preceding_week() {
        let (start, end) = week_bounds(date(2026, 8, 30));
        assert_eq!(start, date(2026, 8, 24));
        assert_eq!(end, date(2026, 8, 30));
    }

    #[test]
    fn month_bounds_handle_december_rollover() {
        let (start, end) = month_bounds(date(2026, 12, 15));
        assert_eq!(start, date(2026, 12, 1));
        assert_eq!(end, date(2026, 12, 31));
    }

    #[test]
    fn month_bounds_handle_february() {
        let (start, end) = month_bounds(date(2026, 2, 10));
        assert_eq!(start, date(2026, 2, 1));
        assert_eq!(end, date(2026, 2, 28));
    }
}
