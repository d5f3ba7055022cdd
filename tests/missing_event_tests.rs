mod common;
use common::ev;

use rponto::core::validator::missing::detect_missing;
use rponto::models::inconsistency::{InconsistencyKind, Severity};
use rponto::models::punch::PunchKind;

#[test]
fn lone_break_start_is_reported_once_referencing_it() {
    let anchor = ev(PunchKind::BreakStart, "2025-10-01 12:00");

    let findings = detect_missing(std::slice::from_ref(&anchor));

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind, InconsistencyKind::MissingEvent);
    assert_eq!(findings[0].severity, Severity::High);
    assert_eq!(findings[0].involved_event_ids, vec![anchor.id]);
}

#[test]
fn clock_in_without_clock_out_is_missing_event() {
    let anchor = ev(PunchKind::ClockIn, "2025-10-01 08:00");

    let findings = detect_missing(std::slice::from_ref(&anchor));

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind, InconsistencyKind::MissingEvent);
    assert_eq!(findings[0].involved_event_ids, vec![anchor.id]);
    assert!(findings[0].description.contains("clock-in"));
}

#[test]
fn clock_out_without_clock_in_is_missing_event() {
    // Cross-midnight shifts hit this rule as a false positive; the record
    // then needs a correction or an explicit Ignored resolution.
    let anchor = ev(PunchKind::ClockOut, "2025-10-01 06:00");

    let findings = detect_missing(std::slice::from_ref(&anchor));

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind, InconsistencyKind::MissingEvent);
    assert_eq!(findings[0].involved_event_ids, vec![anchor.id]);
}

#[test]
fn each_missing_pair_category_is_reported_once_per_day() {
    // Two open clock-ins, still one finding, anchored on the first.
    let first = ev(PunchKind::ClockIn, "2025-10-01 08:00");
    let second = ev(PunchKind::ClockIn, "2025-10-01 13:00");

    let findings = detect_missing(&[first.clone(), second]);

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].involved_event_ids, vec![first.id]);
}

#[test]
fn anchor_is_the_timestamp_earliest_not_the_insertion_first() {
    // Stored later-first: the finding must still anchor on 08:00.
    let later = ev(PunchKind::ClockIn, "2025-10-01 13:00");
    let earlier = ev(PunchKind::ClockIn, "2025-10-01 08:00");

    let findings = detect_missing(&[later, earlier.clone()]);

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].involved_event_ids, vec![earlier.id]);
}

#[test]
fn lone_break_end_is_not_flagged_by_the_pair_rules() {
    // No rule pairs break-end backwards; a day opening with one stays clean
    // here and in the sequence validator.
    let events = vec![ev(PunchKind::BreakEnd, "2025-10-01 13:00")];
    assert!(detect_missing(&events).is_empty());
}

#[test]
fn complete_day_has_no_missing_events() {
    let events = vec![
        ev(PunchKind::ClockIn, "2025-10-01 08:00"),
        ev(PunchKind::BreakStart, "2025-10-01 12:00"),
        ev(PunchKind::BreakEnd, "2025-10-01 13:00"),
        ev(PunchKind::ClockOut, "2025-10-01 17:00"),
    ];

    assert!(detect_missing(&events).is_empty());
}

#[test]
fn all_three_rules_are_independent() {
    // break-start open AND clock-in open: two findings, one per category.
    let events = vec![
        ev(PunchKind::ClockIn, "2025-10-01 08:00"),
        ev(PunchKind::BreakStart, "2025-10-01 12:00"),
    ];

    let findings = detect_missing(&events);
    assert_eq!(findings.len(), 2);
    assert!(
        findings
            .iter()
            .all(|f| f.kind == InconsistencyKind::MissingEvent)
    );
}

#[test]
fn detection_is_idempotent() {
    let events = vec![ev(PunchKind::ClockIn, "2025-10-01 08:00")];

    let first: Vec<_> = detect_missing(&events)
        .into_iter()
        .map(|f| (f.kind, f.involved_event_ids))
        .collect();
    let second: Vec<_> = detect_missing(&events)
        .into_iter()
        .map(|f| (f.kind, f.involved_event_ids))
        .collect();

    assert_eq!(first, second);
}
