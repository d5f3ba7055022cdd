//! Terminal formatting helpers for listings.

use crate::models::inconsistency::Severity;
use ansi_term::Colour;

/// Severity rendered with its conventional colour.
pub fn paint_severity(sev: Severity) -> String {
    let label = sev.to_db_str().to_uppercase();
    match sev {
        Severity::Low => Colour::Cyan.paint(label).to_string(),
        Severity::Medium => Colour::Yellow.paint(label).to_string(),
        Severity::High => Colour::Red.paint(label).to_string(),
        Severity::Critical => Colour::Red.bold().paint(label).to_string(),
    }
}

/// Worked-vs-expected delta: green surplus, red shortfall.
pub fn paint_delta(mins: i64) -> String {
    let text = crate::utils::time::format_minutes(mins);
    if mins > 0 {
        Colour::Green.paint(text).to_string()
    } else if mins < 0 {
        Colour::Red.paint(text).to_string()
    } else {
        text
    }
}
