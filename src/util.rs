use chrono::{Datelike, NaiveDate};

pub const DAY_FORMAT: &str = "%Y-%m-%d";

pub fn day_key(date: &NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// Parse a strict, zero-padded `YYYY-MM-DD` day.
pub fn parse_day(which: &'static str, input: &str) -> crate::error::Result<NaiveDate> {
    let shaped = input.len() == 10
        && input
            .bytes()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { b == b'-' } else { b.is_ascii_digit() });
    if !shaped {
        return Err(crate::error::DaystatError::DateShape {
            which,
            input: input.to_string(),
        });
    }
    NaiveDate::parse_from_str(input, DAY_FORMAT).map_err(|source| {
        crate::error::DaystatError::InvalidDate {
            which,
            input: input.to_string(),
            source,
        }
    })
}

/// `2023-01-01 ~ 01-03` within one year, both dates in full otherwise.
pub fn format_day_range(start: &NaiveDate, end: &NaiveDate) -> String {
    if start.year() == end.year() {
        format!("{} ~ {}", day_key(start), end.format("%m-%d"))
    } else {
        format!("{} ~ {}", day_key(start), day_key(end))
    }
}

fn clip(text: &str, width: usize) -> Option<String> {
    if text.chars().count() >= width {
        Some(text.chars().take(width).collect())
    } else {
        None
    }
}

pub fn center_text(text: &str, width: usize) -> String {
    if let Some(cut) = clip(text, width) {
        return cut;
    }
    let slack = width - text.chars().count();
    let left = slack / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(slack - left))
}

pub fn pad_text(text: &str, width: usize) -> String {
    if let Some(cut) = clip(text, width) {
        return cut;
    }
    format!("{text:<width$}")
}

pub fn plural_days(days: i64) -> &'static str {
    if days > 1 {
        "days"
    } else {
        "day"
    }
}
