mod common;
use common::ev;

use chrono::NaiveDate;
use rponto::core::summary::summarize;
use rponto::core::validator;
use rponto::models::daily_record::DailyRecord;
use rponto::models::punch::{PunchEvent, PunchKind};

const EXPECTED: i64 = 480;

fn record_with(events: Vec<PunchEvent>) -> DailyRecord {
    let mut record = DailyRecord::new(
        NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
        "e1",
    );
    record.events = events;
    record
}

#[test]
fn plain_in_out_day_without_lunch_control() {
    // 08:00 -> 12:00, lunch control disabled: four hours worked, no findings.
    let mut record = record_with(vec![
        ev(PunchKind::ClockIn, "2025-10-01 08:00"),
        ev(PunchKind::ClockOut, "2025-10-01 12:00"),
    ]);

    let fresh = validator::run_all(&record, 60);
    assert!(fresh.is_empty());
    validator::merge_detected(&mut record, fresh);

    let summary = summarize(&record, false, EXPECTED);
    assert_eq!(summary.worked_minutes, 240);
    assert_eq!(summary.expected_minutes, EXPECTED);
    assert_eq!(summary.overtime_minutes, 0);
    assert_eq!(summary.shortfall_minutes, 240);
}

#[test]
fn lunch_control_subtracts_the_break() {
    let record = record_with(vec![
        ev(PunchKind::ClockIn, "2025-10-01 08:00"),
        ev(PunchKind::BreakStart, "2025-10-01 12:00"),
        ev(PunchKind::BreakEnd, "2025-10-01 13:00"),
        ev(PunchKind::ClockOut, "2025-10-01 18:00"),
    ]);

    let summary = summarize(&record, true, EXPECTED);
    assert_eq!(summary.worked_minutes, 540); // 10h - 1h lunch
    assert_eq!(summary.overtime_minutes, 60);
    assert_eq!(summary.shortfall_minutes, 0);
}

#[test]
fn lone_break_start_counts_zero_and_is_flagged_missing() {
    let mut record = record_with(vec![ev(PunchKind::BreakStart, "2025-10-01 12:00")]);

    let fresh = validator::run_all(&record, 60);
    validator::merge_detected(&mut record, fresh);

    assert!(record.inconsistencies.iter().any(|i| {
        i.kind == rponto::models::inconsistency::InconsistencyKind::MissingEvent
    }));

    let summary = summarize(&record, true, EXPECTED);
    assert_eq!(summary.worked_minutes, 0);
    assert_eq!(summary.shortfall_minutes, EXPECTED);
}

#[test]
fn out_of_order_anchors_yield_zero_not_negative() {
    let record = record_with(vec![
        ev(PunchKind::ClockIn, "2025-10-01 17:00"),
        ev(PunchKind::ClockOut, "2025-10-01 08:00"),
    ]);

    let summary = summarize(&record, false, EXPECTED);
    assert_eq!(summary.worked_minutes, 0);
}

#[test]
fn lunch_control_without_break_pair_counts_zero() {
    let record = record_with(vec![
        ev(PunchKind::ClockIn, "2025-10-01 08:00"),
        ev(PunchKind::ClockOut, "2025-10-01 17:00"),
    ]);

    let summary = summarize(&record, true, EXPECTED);
    assert_eq!(summary.worked_minutes, 0);
}

#[test]
fn events_under_unresolved_high_findings_are_not_counted() {
    let mut record = record_with(vec![
        ev(PunchKind::ClockIn, "2025-10-01 08:00"),
        ev(PunchKind::ClockOut, "2025-10-01 12:00"),
    ]);

    // Simulate an unresolved High finding implicating the clock-out.
    let out_id = record.events[1].id;
    record.inconsistencies.push(
        rponto::models::inconsistency::Inconsistency::new(
            rponto::models::inconsistency::InconsistencyKind::OutOfShift,
            rponto::models::inconsistency::Severity::High,
            "clock-out outside the shift window".to_string(),
            vec![out_id],
        ),
    );

    let summary = summarize(&record, false, EXPECTED);
    assert_eq!(summary.worked_minutes, 0, "blocked anchor leaves no clock-out");

    // Resolving the finding brings the hours back.
    record.inconsistencies[0].resolve(
        rponto::models::inconsistency::ResolutionKind::JustificationAccepted,
        "mgr1",
        "shift change approved",
    );
    let summary = summarize(&record, false, EXPECTED);
    assert_eq!(summary.worked_minutes, 240);
}

#[test]
fn merge_detected_is_idempotent_across_revalidation() {
    let mut record = record_with(vec![ev(PunchKind::ClockIn, "2025-10-01 08:00")]);

    let fresh = validator::run_all(&record, 60);
    let added_first = validator::merge_detected(&mut record, fresh);
    assert_eq!(added_first.len(), 1);

    let fresh = validator::run_all(&record, 60);
    let added_second = validator::merge_detected(&mut record, fresh);
    assert!(added_second.is_empty(), "re-validation must add nothing new");
    assert_eq!(record.inconsistencies.len(), 1);
}
