use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrectionStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl CorrectionStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            CorrectionStatus::Pending => "pending",
            CorrectionStatus::Approved => "approved",
            CorrectionStatus::Rejected => "rejected",
            CorrectionStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(CorrectionStatus::Pending),
            "approved" => Some(CorrectionStatus::Approved),
            "rejected" => Some(CorrectionStatus::Rejected),
            "cancelled" => Some(CorrectionStatus::Cancelled),
            _ => None,
        }
    }

    /// Approved, Rejected and Cancelled are final: no further transitions.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, CorrectionStatus::Pending)
    }
}

/// A proposed amendment to an existing event's timestamp.
///
/// The original event is never deleted or mutated: applying an approved
/// correction appends a successor event state and leaves this record as the
/// audit trail for why the timestamp changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Correction {
    pub id: Uuid,
    pub original_event_id: Uuid,
    pub proposed_timestamp: String, // RFC 3339
    pub justification: String,
    pub requested_by_id: String,
    pub requested_by_name: String,
    pub requested_at: String, // RFC 3339
    pub approver_id: Option<String>,
    pub approver_name: Option<String>,
    pub status: CorrectionStatus,
    pub integrity_tag: String,
    pub evidence: Vec<String>,
}

/// Input for the correction workflow's validation gate, as captured from the
/// requester before any id or tag exists.
#[derive(Debug, Clone, Default)]
pub struct CorrectionDraft {
    pub proposed_timestamp: String,
    pub justification: String,
    pub requested_by_id: String,
    pub requested_by_name: String,
    pub approver_id: Option<String>,
    pub approver_name: Option<String>,
    pub evidence: Vec<String>,
}
