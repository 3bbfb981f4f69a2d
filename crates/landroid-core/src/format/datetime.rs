//! Timestamp parsing and short date/time rendering.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde_json::Value;

use super::locale::{DateOrder, DateTimeStyle};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Parse a timestamp the way the backends deliver them: RFC 3339, a naive
/// date-time (taken as UTC), a bare date (midnight UTC) or epoch
/// milliseconds.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_text(s.trim()),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn parse_text(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|f| DateTime::parse_from_str(s, f).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Render `instant` in `offset` with the locale's short date + time style.
pub fn render(instant: DateTime<Utc>, offset: FixedOffset, style: &DateTimeStyle) -> String {
    let local = instant.with_timezone(&offset);
    format!(
        "{}{}{}",
        render_date(&local, style),
        style.joiner,
        render_time(&local, style)
    )
}

fn render_date(local: &DateTime<FixedOffset>, style: &DateTimeStyle) -> String {
    let pad = |n: u32| {
        if style.padded {
            format!("{n:02}")
        } else {
            n.to_string()
        }
    };
    let day = pad(local.day());
    let month = pad(local.month());
    let year = if style.two_digit_year {
        format!("{:02}", local.year().rem_euclid(100))
    } else {
        local.year().to_string()
    };

    let sep = style.separator;
    match style.order {
        DateOrder::DayMonthYear => format!("{day}{sep}{month}{sep}{year}"),
        DateOrder::MonthDayYear => format!("{month}{sep}{day}{sep}{year}"),
        DateOrder::YearMonthDay => format!("{year}{sep}{month}{sep}{day}"),
    }
}

fn render_time(local: &DateTime<FixedOffset>, style: &DateTimeStyle) -> String {
    if style.hour12 {
        let (pm, hour) = local.hour12();
        let suffix = if pm { "PM" } else { "AM" };
        format!("{hour}:{:02}\u{202f}{suffix}", local.minute())
    } else {
        format!("{:02}:{:02}", local.hour(), local.minute())
    }
}
