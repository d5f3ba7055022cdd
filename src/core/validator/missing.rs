//! Missing-event detector: flags incomplete daily sequences.
//!
//! Known limitation: the "clock-out without clock-in" rule false-positives on
//! shifts that started the previous calendar day and closed after midnight.
//! Records of that shape need a correction or an explicit Ignored resolution.

use crate::models::inconsistency::{Inconsistency, InconsistencyKind, Severity};
use crate::models::punch::{PunchEvent, PunchKind};

/// Check the three missing-pair rules, each independent, each reported once
/// per day referencing the timestamp-earliest event of the anchor kind.
/// Storage order is never authoritative, so the anchor is picked by parsed
/// timestamp (id breaks ties, unparseable timestamps sort last).
pub fn detect_missing(events: &[PunchEvent]) -> Vec<Inconsistency> {
    let mut findings = Vec::new();

    let first_of = |kind: PunchKind| {
        events
            .iter()
            .filter(|e| e.kind == kind)
            .min_by_key(|e| {
                let ts = e.parsed_timestamp();
                (ts.is_none(), ts, e.id)
            })
    };
    let has = |kind: PunchKind| events.iter().any(|e| e.kind == kind);

    if let Some(anchor) = first_of(PunchKind::ClockIn)
        && !has(PunchKind::ClockOut)
    {
        findings.push(Inconsistency::new(
            InconsistencyKind::MissingEvent,
            Severity::High,
            format!(
                "clock-in at {} has no matching clock-out",
                anchor.time_str()
            ),
            vec![anchor.id],
        ));
    }

    if let Some(anchor) = first_of(PunchKind::BreakStart)
        && !has(PunchKind::BreakEnd)
    {
        findings.push(Inconsistency::new(
            InconsistencyKind::MissingEvent,
            Severity::High,
            format!(
                "break-start at {} has no matching break-end",
                anchor.time_str()
            ),
            vec![anchor.id],
        ));
    }

    if let Some(anchor) = first_of(PunchKind::ClockOut)
        && !has(PunchKind::ClockIn)
    {
        findings.push(Inconsistency::new(
            InconsistencyKind::MissingEvent,
            Severity::High,
            format!(
                "clock-out at {} has no matching clock-in",
                anchor.time_str()
            ),
            vec![anchor.id],
        ));
    }

    findings
}
