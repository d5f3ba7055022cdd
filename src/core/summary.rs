//! Daily summary calculator: worked/expected/overtime/shortfall minutes
//! derived from a validated day.

use crate::models::daily_record::DailyRecord;
use crate::models::day_summary::DaySummary;
use crate::models::punch::{PunchEvent, PunchKind};
use chrono::NaiveDateTime;
use uuid::Uuid;

/// Compute the day's hours from the record's reconciled view.
///
/// Events implicated in an unresolved High/Critical inconsistency do not
/// count. When the anchor events are missing (clock-in/clock-out, plus the
/// break pair when lunch control applies) the day yields zero worked minutes;
/// callers re-validate before summarizing, so the matching missing-event
/// finding is already on the record. Out-of-order anchors also yield zero
/// rather than a negative duration.
pub fn summarize(record: &DailyRecord, lunch_control: bool, expected_minutes: i64) -> DaySummary {
    let blocked = blocked_event_ids(record);

    let usable: Vec<&PunchEvent> = record
        .current_events()
        .into_iter()
        .filter(|e| !blocked.contains(&e.id))
        .collect();

    let worked_minutes = worked_minutes(&usable, lunch_control);

    DaySummary {
        worked_minutes,
        expected_minutes,
        overtime_minutes: (worked_minutes - expected_minutes).max(0),
        shortfall_minutes: (expected_minutes - worked_minutes).max(0),
    }
}

fn worked_minutes(events: &[&PunchEvent], lunch_control: bool) -> i64 {
    let clock_in = earliest(events, PunchKind::ClockIn);
    let clock_out = latest(events, PunchKind::ClockOut);

    let (Some(clock_in), Some(clock_out)) = (clock_in, clock_out) else {
        return 0;
    };

    let gross = (clock_out - clock_in).num_minutes();
    if gross < 0 {
        return 0;
    }

    if !lunch_control {
        return gross;
    }

    let break_start = earliest(events, PunchKind::BreakStart);
    let break_end = latest(events, PunchKind::BreakEnd);

    let (Some(break_start), Some(break_end)) = (break_start, break_end) else {
        // Lunch control requires the break pair; an incomplete day counts zero.
        return 0;
    };

    let lunch = (break_end - break_start).num_minutes();
    if lunch < 0 {
        return 0;
    }

    (gross - lunch).max(0)
}

fn earliest(events: &[&PunchEvent], kind: PunchKind) -> Option<NaiveDateTime> {
    events
        .iter()
        .filter(|e| e.kind == kind)
        .filter_map(|e| e.parsed_timestamp())
        .min()
}

fn latest(events: &[&PunchEvent], kind: PunchKind) -> Option<NaiveDateTime> {
    events
        .iter()
        .filter(|e| e.kind == kind)
        .filter_map(|e| e.parsed_timestamp())
        .max()
}

fn blocked_event_ids(record: &DailyRecord) -> Vec<Uuid> {
    let mut ids = Vec::new();
    for inc in &record.inconsistencies {
        if !inc.resolved && inc.severity.blocks_summary() {
            ids.extend(inc.involved_event_ids.iter().copied());
        }
    }
    ids
}
