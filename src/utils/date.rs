//! Date helpers for the CLI layer.

use chrono::{Local, NaiveDate};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolve an optional CLI date argument, defaulting to today.
pub fn resolve_date(arg: Option<&String>) -> Option<NaiveDate> {
    match arg {
        Some(s) => parse_date(s),
        None => Some(today()),
    }
}
