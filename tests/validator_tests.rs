mod common;
use common::ev;

use rponto::core::validator::sequence::validate;
use rponto::models::inconsistency::{InconsistencyKind, Severity};
use rponto::models::punch::PunchKind;

const WINDOW: i64 = 60;

#[test]
fn clean_day_yields_no_findings() {
    let events = vec![
        ev(PunchKind::ClockIn, "2025-10-01 08:00"),
        ev(PunchKind::BreakStart, "2025-10-01 12:00"),
        ev(PunchKind::BreakEnd, "2025-10-01 13:00"),
        ev(PunchKind::ClockOut, "2025-10-01 17:00"),
    ];

    assert!(validate(&events, WINDOW).is_empty());
}

#[test]
fn break_end_without_break_start_is_invalid_sequence() {
    // clock-in followed directly by break-end
    let events = vec![
        ev(PunchKind::ClockIn, "2025-10-01 08:00"),
        ev(PunchKind::BreakEnd, "2025-10-01 09:00"),
    ];

    let findings = validate(&events, WINDOW);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind, InconsistencyKind::InvalidSequence);
    assert_eq!(findings[0].severity, Severity::High);
    // Both events referenced, offending event first
    assert_eq!(findings[0].involved_event_ids.len(), 2);
    assert_eq!(findings[0].involved_event_ids[0], events[1].id);
    assert!(findings[0].description.contains("break-end"));
    assert!(findings[0].description.contains("clock-in"));
}

#[test]
fn rapid_double_clock_in_is_reported_once_as_duplicate() {
    let first = ev(PunchKind::ClockIn, "2025-10-01 08:00:00");
    let second = ev(PunchKind::ClockIn, "2025-10-01 08:00:30");
    let events = vec![first.clone(), second.clone()];

    let findings = validate(&events, WINDOW);
    assert_eq!(findings.len(), 1, "a double-tap is one anomaly, not two");
    assert_eq!(findings[0].kind, InconsistencyKind::Duplicate);
    assert_eq!(findings[0].severity, Severity::Medium);
    assert!(findings[0].involved_event_ids.contains(&first.id));
    assert!(findings[0].involved_event_ids.contains(&second.id));
}

#[test]
fn same_kind_repeat_outside_window_is_invalid_sequence_not_duplicate() {
    let events = vec![
        ev(PunchKind::ClockIn, "2025-10-01 08:00"),
        ev(PunchKind::ClockIn, "2025-10-01 10:00"),
    ];

    let findings = validate(&events, WINDOW);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind, InconsistencyKind::InvalidSequence);
}

#[test]
fn validation_is_idempotent() {
    let events = vec![
        ev(PunchKind::ClockIn, "2025-10-01 08:00"),
        ev(PunchKind::BreakEnd, "2025-10-01 09:00"),
        ev(PunchKind::ClockIn, "2025-10-01 09:00:10"),
    ];

    let first: Vec<_> = validate(&events, WINDOW)
        .into_iter()
        .map(|f| (f.kind, f.involved_event_ids))
        .collect();
    let second: Vec<_> = validate(&events, WINDOW)
        .into_iter()
        .map(|f| (f.kind, f.involved_event_ids))
        .collect();

    assert_eq!(first, second);
}

#[test]
fn input_order_does_not_change_the_findings() {
    let a = ev(PunchKind::ClockIn, "2025-10-01 08:00");
    let b = ev(PunchKind::BreakEnd, "2025-10-01 09:00");
    let c = ev(PunchKind::ClockOut, "2025-10-01 17:00");

    let ordered = vec![a.clone(), b.clone(), c.clone()];
    let shuffled = vec![c, a, b];

    let keyed = |events: &[rponto::models::punch::PunchEvent]| {
        let mut findings: Vec<_> = validate(events, WINDOW)
            .into_iter()
            .map(|f| (f.kind, f.involved_event_ids))
            .collect();
        findings.sort();
        findings
    };

    assert_eq!(keyed(&ordered), keyed(&shuffled));
}

#[test]
fn malformed_timestamp_is_reported_and_excluded_not_fatal() {
    let good_in = ev(PunchKind::ClockIn, "2025-10-01 08:00");
    let broken = ev(PunchKind::BreakStart, "not-a-timestamp");
    let good_out = ev(PunchKind::ClockOut, "2025-10-01 17:00");

    let findings = validate(&[good_in, broken.clone(), good_out], WINDOW);

    // Exactly the malformed record is flagged; the remaining pair is a
    // perfectly legal in/out day.
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind, InconsistencyKind::MalformedRecord);
    assert_eq!(findings[0].involved_event_ids, vec![broken.id]);
    assert!(findings[0].description.contains("not-a-timestamp"));
}

#[test]
fn equal_timestamps_fall_back_to_id_order() {
    let a = ev(PunchKind::ClockIn, "2025-10-01 08:00");
    let b = ev(PunchKind::ClockOut, "2025-10-01 08:00");

    let one = validate(&[a.clone(), b.clone()], WINDOW);
    let two = validate(&[b, a], WINDOW);

    let key = |findings: Vec<rponto::models::inconsistency::Inconsistency>| {
        findings
            .into_iter()
            .map(|f| (f.kind, f.involved_event_ids))
            .collect::<Vec<_>>()
    };
    assert_eq!(key(one), key(two));
}
