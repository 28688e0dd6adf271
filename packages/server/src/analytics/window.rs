use chrono::{Datelike, Duration, Months, NaiveDate};

/// Days without maintenance after which a blade is due for inspection.
pub const OVERDUE_AFTER_DAYS: i64 = 180;
/// Length of the dashboard trend window.
pub const TREND_WINDOW_MONTHS: u32 = 12;

/// First and last day of the calendar year containing `today`.
pub fn calendar_year(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_yo_opt(today.year(), 1).unwrap_or(today);
    let end = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
    (start, end)
}

/// Earliest date included in the trailing trend window.
pub fn trend_window_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(TREND_WINDOW_MONTHS))
        .unwrap_or(NaiveDate::MIN)
}

/// A blade is overdue when its latest record is strictly before this date.
pub fn overdue_cutoff(today: NaiveDate) -> NaiveDate {
    today - Duration::days(OVERDUE_AFTER_DAYS)
}

/// Abbreviated month name of a `YYYY-MM` bucket ("2026-03" -> "Mar").
/// Unparseable input is returned unchanged.
pub fn month_label(period: &str) -> String {
    NaiveDate::parse_from_str(&format!("{period}-01"), "%Y-%m-%d")
        .map(|d| d.format("%b").to_string())
        .unwrap_or_else(|_| period.to_string())
}
