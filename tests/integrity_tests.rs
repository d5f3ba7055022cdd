mod common;
use common::ev;

use rponto::core::integrity::{event_tag, tag_fields, verify_event};
use rponto::models::punch::PunchKind;

const KEY: &str = "test-key";

#[test]
fn tagging_is_deterministic() {
    let event = ev(PunchKind::ClockIn, "2025-10-01 08:00");
    assert_eq!(event_tag(KEY, &event), event_tag(KEY, &event));
}

#[test]
fn every_field_is_tag_sensitive() {
    let base = ev(PunchKind::ClockIn, "2025-10-01 08:00");
    let tag = event_tag(KEY, &base);

    let mut changed = base.clone();
    changed.kind = PunchKind::ClockOut;
    assert_ne!(event_tag(KEY, &changed), tag);

    let mut changed = base.clone();
    changed.timestamp = "2025-10-01 08:01".to_string();
    assert_ne!(event_tag(KEY, &changed), tag);

    let mut changed = base.clone();
    changed.employee_id = "e2".to_string();
    assert_ne!(event_tag(KEY, &changed), tag);

    let mut changed = base.clone();
    changed.version = 2;
    assert_ne!(event_tag(KEY, &changed), tag);
}

#[test]
fn the_key_is_part_of_the_tag() {
    let event = ev(PunchKind::ClockIn, "2025-10-01 08:00");
    assert_ne!(event_tag(KEY, &event), event_tag("other-key", &event));
}

#[test]
fn field_boundaries_cannot_be_shifted() {
    // "ab" + "c" must not collide with "a" + "bc"
    assert_ne!(tag_fields(KEY, &["ab", "c"]), tag_fields(KEY, &["a", "bc"]));
}

#[test]
fn verify_round_trips_a_tagged_event() {
    let mut event = ev(PunchKind::ClockIn, "2025-10-01 08:00");
    event.integrity_tag = event_tag(KEY, &event);
    assert!(verify_event(KEY, &event));
}

#[test]
fn tampered_timestamp_fails_verification() {
    let mut event = ev(PunchKind::ClockIn, "2025-10-01 08:00");
    event.integrity_tag = event_tag(KEY, &event);
    event.timestamp = "2025-10-01 09:00".to_string();
    assert!(!verify_event(KEY, &event));
}

#[test]
fn verify_fails_closed_on_malformed_or_missing_input() {
    // Untagged event
    let event = ev(PunchKind::ClockIn, "2025-10-01 08:00");
    assert!(!verify_event(KEY, &event));

    // Unparseable timestamp
    let mut event = ev(PunchKind::ClockIn, "garbage");
    event.integrity_tag = event_tag(KEY, &event);
    assert!(!verify_event(KEY, &event));

    // Missing employee
    let mut event = ev(PunchKind::ClockIn, "2025-10-01 08:00");
    event.employee_id = String::new();
    event.integrity_tag = event_tag(KEY, &event);
    assert!(!verify_event(KEY, &event));
}
