//! Sequence validator: checks that a day's punches follow the legal order
//! (clock-in, optional break pair, clock-out) and flags rapid repeats.

use crate::models::inconsistency::{Inconsistency, InconsistencyKind, Severity};
use crate::models::punch::{PunchEvent, PunchKind};
use chrono::NaiveDateTime;

/// Validate one day's events against the allowed-predecessor table.
///
/// Pure function: the input is not mutated, the result depends only on the
/// input set (events are re-sorted by timestamp internally, so the caller's
/// ordering is irrelevant). Events whose timestamp cannot be parsed are
/// excluded from ordering and reported as `MalformedRecord` instead of
/// aborting the whole validation.
pub fn validate(events: &[PunchEvent], duplicate_window_secs: i64) -> Vec<Inconsistency> {
    let mut findings = Vec::new();

    // -----------------------------
    // Split parseable vs malformed
    // -----------------------------
    let mut sorted: Vec<(&PunchEvent, NaiveDateTime)> = Vec::new();
    for ev in events {
        match ev.parsed_timestamp() {
            Some(ts) => sorted.push((ev, ts)),
            None => findings.push(Inconsistency::new(
                InconsistencyKind::MalformedRecord,
                Severity::High,
                format!(
                    "{} event has an unreadable timestamp '{}' and was excluded from ordering",
                    ev.kind.label(),
                    ev.timestamp
                ),
                vec![ev.id],
            )),
        }
    }

    // Timestamp ascending; equal timestamps fall back to id order so the
    // result is stable regardless of storage order.
    sorted.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.id.cmp(&b.0.id)));

    let is_rapid_repeat = |prev: &PunchEvent,
                           prev_ts: NaiveDateTime,
                           curr: &PunchEvent,
                           curr_ts: NaiveDateTime| {
        prev.kind == curr.kind && (curr_ts - prev_ts).num_seconds() < duplicate_window_secs
    };

    // -----------------------------
    // Allowed-predecessor check
    // -----------------------------
    // The first event of the day is never checked here: clock-in is the only
    // kind with "first of day" in its allowed set. A day opening with
    // break-start or clock-out surfaces through the missing-event rules;
    // a lone break-end has no pair rule and stays unflagged.
    // A rapid same-kind repeat is reported once, as a duplicate, below.
    for w in sorted.windows(2) {
        let (prev, prev_ts) = w[0];
        let (curr, curr_ts) = w[1];

        if is_rapid_repeat(prev, prev_ts, curr, curr_ts) {
            continue;
        }

        if !allowed_predecessor(curr.kind, prev.kind) {
            findings.push(Inconsistency::new(
                InconsistencyKind::InvalidSequence,
                Severity::High,
                format!(
                    "{} at {} cannot follow {} at {}",
                    curr.kind.label(),
                    curr.time_str(),
                    prev.kind.label(),
                    prev.time_str()
                ),
                vec![curr.id, prev.id],
            ));
        }
    }

    // -----------------------------
    // Rapid same-kind repeats
    // -----------------------------
    for w in sorted.windows(2) {
        let (prev, prev_ts) = w[0];
        let (curr, curr_ts) = w[1];

        if is_rapid_repeat(prev, prev_ts, curr, curr_ts) {
            findings.push(Inconsistency::new(
                InconsistencyKind::Duplicate,
                Severity::Medium,
                format!(
                    "two {} events within {} seconds ({} and {})",
                    prev.kind.label(),
                    duplicate_window_secs,
                    prev.time_str(),
                    curr.time_str()
                ),
                vec![prev.id, curr.id],
            ));
        }
    }

    findings
}

fn allowed_predecessor(curr: PunchKind, prev: PunchKind) -> bool {
    curr.allowed_predecessors().contains(&prev)
}
