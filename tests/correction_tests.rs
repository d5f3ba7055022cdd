mod common;
use common::ev;

use chrono::NaiveDate;
use rponto::core::correction::{
    self, MIN_JUSTIFICATION_LEN, TransitionError, ValidationError,
};
use rponto::core::integrity;
use rponto::models::correction::{CorrectionDraft, CorrectionStatus};
use rponto::models::daily_record::DailyRecord;
use rponto::models::punch::PunchKind;

const KEY: &str = "test-key";

fn draft() -> CorrectionDraft {
    CorrectionDraft {
        proposed_timestamp: "2025-10-01 08:05".to_string(),
        justification: "badge reader was offline".to_string(),
        requested_by_id: "mgr1".to_string(),
        requested_by_name: "Marta Lima".to_string(),
        approver_id: None,
        approver_name: None,
        evidence: vec![],
    }
}

#[test]
fn short_justification_is_rejected_regardless_of_other_fields() {
    let original = ev(PunchKind::ClockIn, "2025-10-01 08:00");
    let mut d = draft();
    d.justification = "typo".to_string(); // 5 chars

    let errors = correction::propose(&d, &original, false, KEY).unwrap_err();
    assert!(errors.contains(&ValidationError::JustificationTooShort));
}

#[test]
fn justification_is_trimmed_before_length_check() {
    let original = ev(PunchKind::ClockIn, "2025-10-01 08:00");
    let mut d = draft();
    d.justification = "   short    ".to_string();

    let errors = correction::propose(&d, &original, false, KEY).unwrap_err();
    assert!(errors.contains(&ValidationError::JustificationTooShort));
}

#[test]
fn self_correction_without_approver_is_rejected() {
    let original = ev(PunchKind::ClockIn, "2025-10-01 08:00"); // employee e1
    let mut d = draft();
    d.requested_by_id = "e1".to_string();
    d.requested_by_name = "Ada Souza".to_string();

    let errors = correction::propose(&d, &original, false, KEY).unwrap_err();
    assert!(errors.contains(&ValidationError::SelfCorrectionRequiresApprover));
    assert!(
        errors
            .iter()
            .any(|e| e.to_string().contains("requires approver"))
    );
}

#[test]
fn self_correction_with_approver_and_long_enough_justification_succeeds() {
    let original = ev(PunchKind::ClockIn, "2025-10-01 08:00");
    let mut d = draft();
    d.requested_by_id = "e1".to_string();
    d.requested_by_name = "Ada Souza".to_string();
    d.justification = "a".repeat(MIN_JUSTIFICATION_LEN + 1); // 11 chars
    d.approver_id = Some("mgr1".to_string());
    d.approver_name = Some("Marta Lima".to_string());

    let c = correction::propose(&d, &original, false, KEY).expect("gate should pass");
    assert_eq!(c.status, CorrectionStatus::Pending);
    assert_eq!(c.original_event_id, original.id);
    assert!(integrity::verify_correction(KEY, &c));
}

#[test]
fn all_gate_failures_are_collected_not_short_circuited() {
    let original = ev(PunchKind::ClockIn, "2025-10-01 08:00");
    let d = CorrectionDraft {
        proposed_timestamp: "bogus".to_string(),
        justification: "nope".to_string(),
        requested_by_id: String::new(),
        requested_by_name: String::new(),
        ..Default::default()
    };

    let errors = correction::propose(&d, &original, false, KEY).unwrap_err();
    assert!(errors.contains(&ValidationError::JustificationTooShort));
    assert!(errors.contains(&ValidationError::RequesterNotIdentified));
    assert!(errors.contains(&ValidationError::MalformedProposedTimestamp));
    assert!(errors.len() >= 3);
}

#[test]
fn only_one_pending_correction_per_event() {
    let original = ev(PunchKind::ClockIn, "2025-10-01 08:00");

    let errors = correction::propose(&draft(), &original, true, KEY).unwrap_err();
    assert_eq!(errors, vec![ValidationError::PendingCorrectionExists]);
}

#[test]
fn requester_cannot_approve_their_own_correction() {
    let original = ev(PunchKind::ClockIn, "2025-10-01 08:00");
    let mut c = correction::propose(&draft(), &original, false, KEY).unwrap();

    let err = correction::approve(&mut c, "mgr1", "Marta Lima").unwrap_err();
    assert_eq!(err, TransitionError::ApproverIsRequester);
    assert_eq!(c.status, CorrectionStatus::Pending);
}

#[test]
fn terminal_states_accept_no_further_transitions() {
    let original = ev(PunchKind::ClockIn, "2025-10-01 08:00");
    let mut c = correction::propose(&draft(), &original, false, KEY).unwrap();

    correction::reject(&mut c).unwrap();
    assert_eq!(c.status, CorrectionStatus::Rejected);

    assert!(matches!(
        correction::approve(&mut c, "boss", "B"),
        Err(TransitionError::AlreadyFinal(CorrectionStatus::Rejected))
    ));
    assert!(matches!(
        correction::cancel(&mut c, "mgr1"),
        Err(TransitionError::AlreadyFinal(CorrectionStatus::Rejected))
    ));
}

#[test]
fn only_the_requester_may_cancel() {
    let original = ev(PunchKind::ClockIn, "2025-10-01 08:00");
    let mut c = correction::propose(&draft(), &original, false, KEY).unwrap();

    assert_eq!(
        correction::cancel(&mut c, "someone-else").unwrap_err(),
        TransitionError::NotRequester
    );

    correction::cancel(&mut c, "mgr1").unwrap();
    assert_eq!(c.status, CorrectionStatus::Cancelled);
}

#[test]
fn a_second_correction_builds_on_the_chain_head_not_the_original() {
    let mut record = DailyRecord::new(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(), "e1");
    let mut original = ev(PunchKind::ClockIn, "2025-10-01 08:00");
    original.integrity_tag = integrity::event_tag(KEY, &original);
    record.events.push(original.clone());

    let mut first = correction::propose(&draft(), &original, false, KEY).unwrap();
    correction::approve(&mut first, "boss", "B").unwrap();
    let head = record.current_version_of(original.id).unwrap().clone();
    let s1 = correction::apply(&first, &head, KEY);
    record.events.push(s1.clone());

    // Second correction filed against the same original id.
    let mut d = draft();
    d.proposed_timestamp = "2025-10-01 08:10".to_string();
    let mut second = correction::propose(&d, &original, false, KEY).unwrap();
    correction::approve(&mut second, "boss", "B").unwrap();

    // The chain head is now the first successor, not the original.
    let head = record.current_version_of(original.id).unwrap().clone();
    assert_eq!(head.id, s1.id);
    let s2 = correction::apply(&second, &head, KEY);
    record.events.push(s2.clone());

    let current = record.current_events();
    let clock_ins: Vec<_> = current
        .iter()
        .filter(|e| e.kind == PunchKind::ClockIn)
        .collect();
    assert_eq!(clock_ins.len(), 1, "one live version per logical punch");
    assert_eq!(clock_ins[0].id, s2.id);
    assert_eq!(s2.version, 3);
}

#[test]
fn applying_a_correction_bumps_version_and_retags() {
    let mut original = ev(PunchKind::ClockIn, "2025-10-01 08:00");
    original.integrity_tag = integrity::event_tag(KEY, &original);

    let mut c = correction::propose(&draft(), &original, false, KEY).unwrap();
    correction::approve(&mut c, "boss", "B").unwrap();

    let successor = correction::apply(&c, &original, KEY);

    assert_ne!(successor.id, original.id);
    assert_eq!(successor.version, original.version + 1);
    assert_eq!(successor.timestamp, c.proposed_timestamp);
    assert_eq!(successor.kind, original.kind);
    assert_eq!(successor.employee_id, original.employee_id);
    assert!(integrity::verify_event(KEY, &successor));
    // Original is untouched and still verifies
    assert!(integrity::verify_event(KEY, &original));
    // Successor points back at what it supersedes
    let meta = successor.metadata.as_ref().unwrap();
    assert_eq!(meta.get("supersedes").unwrap(), &original.id.to_string());
}
