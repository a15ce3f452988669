use chrono::NaiveDate;

/// Separator between start and end of a multi-day booking
pub const RANGE_SEPARATOR: char = '→';

pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    if start == end {
        start.format("%Y-%m-%d").to_string()
    } else {
        format!("{} {} {}", start.format("%Y-%m-%d"), RANGE_SEPARATOR, end.format("%Y-%m-%d"))
    }
}

/// Splits a stored date string back into start and end.
/// A string without the separator is both.
pub fn split_date_range(date: &str) -> (String, String) {
    match date.split_once(RANGE_SEPARATOR) {
        Some((start, end)) => (start.trim().to_string(), end.trim().to_string()),
        None => {
            let single = date.trim().to_string();
            (single.clone(), single)
        }
    }
}
