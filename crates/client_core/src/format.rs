use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const DEFAULT_DATE_FORMAT: &str = "%Y/%m/%d";
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepts the date shapes the backend is known to emit: bare ISO dates,
/// RFC 3339 timestamps, naive timestamps and RFC 2822 / HTTP dates such as
/// `Fri, 01 May 2020 00:00:00 GMT`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(raw) {
        return Some(ts.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|ts| ts.date())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateStyle {
    pattern: String,
}

impl Default for DateStyle {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

impl DateStyle {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Display form of a stored date. Values that do not parse, or a pattern
    /// chrono rejects, fall back to the raw text.
    pub fn format(&self, raw: &str) -> String {
        let Some(date) = parse_date(raw) else {
            return raw.to_string();
        };
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.pattern)).is_err() {
            tracing::warn!(pattern = %self.pattern, "invalid date format pattern");
            return raw.to_string();
        }
        out
    }
}

/// Normalizes a stored date for a date input (`YYYY-MM-DD`).
pub fn iso_date(raw: &str) -> Option<String> {
    parse_date(raw).map(|date| date.format(ISO_DATE_FORMAT).to_string())
}
