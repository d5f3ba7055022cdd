use serde::Serialize;

/// Output of the daily summary calculator, all values in minutes.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub worked_minutes: i64,
    pub expected_minutes: i64,
    /// Positive part of worked - expected.
    pub overtime_minutes: i64,
    /// Positive part of expected - worked.
    pub shortfall_minutes: i64,
}
