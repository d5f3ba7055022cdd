//! Correction workflow: validation gate, approval state machine, and the
//! append-only application of an approved correction.
//!
//! The original event is never touched. Applying a correction appends a new
//! event state with a bumped version and a fresh integrity tag; the superseded
//! id is recorded in the successor's metadata so listings can collapse the
//! chain while the audit trail stays complete.

use crate::core::integrity;
use crate::models::correction::{Correction, CorrectionDraft, CorrectionStatus};
use crate::models::punch::PunchEvent;
use chrono::Local;
use uuid::Uuid;

pub const MIN_JUSTIFICATION_LEN: usize = 10;

/// One unmet precondition of the validation gate. All failures for a draft
/// are collected and returned together, never just the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    JustificationTooShort,
    RequesterNotIdentified,
    SelfCorrectionRequiresApprover,
    PendingCorrectionExists,
    MalformedProposedTimestamp,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            ValidationError::JustificationTooShort => {
                "justification too short (minimum 10 characters)"
            }
            ValidationError::RequesterNotIdentified => "requester not identified",
            ValidationError::SelfCorrectionRequiresApprover => {
                "self-correction requires approver"
            }
            ValidationError::PendingCorrectionExists => {
                "a pending correction already exists for this event"
            }
            ValidationError::MalformedProposedTimestamp => "proposed timestamp is not readable",
        };
        write!(f, "{}", msg)
    }
}

/// Validation gate for a correction draft against its original event.
///
/// `has_pending` tells whether another Pending correction already targets the
/// original event; at most one may be outstanding at a time.
pub fn propose(
    draft: &CorrectionDraft,
    original: &PunchEvent,
    has_pending: bool,
    integrity_key: &str,
) -> Result<Correction, Vec<ValidationError>> {
    let mut errors = Vec::new();

    if draft.justification.trim().len() < MIN_JUSTIFICATION_LEN {
        errors.push(ValidationError::JustificationTooShort);
    }

    if draft.requested_by_id.trim().is_empty() || draft.requested_by_name.trim().is_empty() {
        errors.push(ValidationError::RequesterNotIdentified);
    }

    let self_correction = draft.requested_by_id == original.employee_id;
    if self_correction && draft.approver_id.is_none() {
        errors.push(ValidationError::SelfCorrectionRequiresApprover);
    }

    if has_pending {
        errors.push(ValidationError::PendingCorrectionExists);
    }

    if crate::utils::time::parse_timestamp(&draft.proposed_timestamp).is_none() {
        errors.push(ValidationError::MalformedProposedTimestamp);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let mut correction = Correction {
        id: Uuid::new_v4(),
        original_event_id: original.id,
        proposed_timestamp: draft.proposed_timestamp.clone(),
        justification: draft.justification.trim().to_string(),
        requested_by_id: draft.requested_by_id.clone(),
        requested_by_name: draft.requested_by_name.clone(),
        requested_at: Local::now().to_rfc3339(),
        approver_id: draft.approver_id.clone(),
        approver_name: draft.approver_name.clone(),
        status: CorrectionStatus::Pending,
        integrity_tag: String::new(),
        evidence: draft.evidence.clone(),
    };
    correction.integrity_tag = integrity::correction_tag(integrity_key, &correction);

    Ok(correction)
}

/// Why a state transition was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    AlreadyFinal(CorrectionStatus),
    ApproverIsRequester,
    NotRequester,
}

impl std::fmt::Display for TransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionError::AlreadyFinal(s) => {
                write!(f, "correction is already {}", s.to_db_str())
            }
            TransitionError::ApproverIsRequester => {
                write!(f, "a correction cannot be approved by its requester")
            }
            TransitionError::NotRequester => {
                write!(f, "only the requester may cancel a pending correction")
            }
        }
    }
}

/// Pending → Approved. The approving actor must be distinct from the
/// requester; the approver identity is recorded on the correction.
pub fn approve(
    correction: &mut Correction,
    approver_id: &str,
    approver_name: &str,
) -> Result<(), TransitionError> {
    if correction.status.is_terminal() {
        return Err(TransitionError::AlreadyFinal(correction.status));
    }
    if approver_id == correction.requested_by_id {
        return Err(TransitionError::ApproverIsRequester);
    }
    correction.status = CorrectionStatus::Approved;
    correction.approver_id = Some(approver_id.to_string());
    correction.approver_name = Some(approver_name.to_string());
    Ok(())
}

/// Pending → Rejected.
pub fn reject(correction: &mut Correction) -> Result<(), TransitionError> {
    if correction.status.is_terminal() {
        return Err(TransitionError::AlreadyFinal(correction.status));
    }
    correction.status = CorrectionStatus::Rejected;
    Ok(())
}

/// Pending → Cancelled, by the requester only.
pub fn cancel(correction: &mut Correction, actor_id: &str) -> Result<(), TransitionError> {
    if correction.status.is_terminal() {
        return Err(TransitionError::AlreadyFinal(correction.status));
    }
    if actor_id != correction.requested_by_id {
        return Err(TransitionError::NotRequester);
    }
    correction.status = CorrectionStatus::Cancelled;
    Ok(())
}

/// Build the successor event state for an approved correction: same identity,
/// corrected timestamp, version + 1, fresh tag, and a `supersedes` marker
/// pointing at the original.
pub fn apply(correction: &Correction, original: &PunchEvent, integrity_key: &str) -> PunchEvent {
    let mut metadata = original.metadata.clone().unwrap_or_default();
    metadata.insert("supersedes".to_string(), original.id.to_string());
    metadata.insert("correction_id".to_string(), correction.id.to_string());

    let mut successor = PunchEvent {
        id: Uuid::new_v4(),
        kind: original.kind,
        timestamp: correction.proposed_timestamp.clone(),
        employee_id: original.employee_id.clone(),
        device_id: original.device_id.clone(),
        location: original.location,
        metadata: Some(metadata),
        version: original.version + 1,
        integrity_tag: String::new(),
    };
    successor.integrity_tag = integrity::event_tag(integrity_key, &successor);
    successor
}
