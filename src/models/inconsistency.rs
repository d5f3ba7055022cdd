use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InconsistencyKind {
    MissingEvent,
    InvalidSequence,
    Overlap,
    Duplicate,
    OutOfShift,
    /// Event with an unparseable timestamp or missing required field,
    /// excluded from ordering and reported instead of aborting validation.
    MalformedRecord,
}

impl InconsistencyKind {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            InconsistencyKind::MissingEvent => "missing_event",
            InconsistencyKind::InvalidSequence => "invalid_sequence",
            InconsistencyKind::Overlap => "overlap",
            InconsistencyKind::Duplicate => "duplicate",
            InconsistencyKind::OutOfShift => "out_of_shift",
            InconsistencyKind::MalformedRecord => "malformed_record",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "missing_event" => Some(InconsistencyKind::MissingEvent),
            "invalid_sequence" => Some(InconsistencyKind::InvalidSequence),
            "overlap" => Some(InconsistencyKind::Overlap),
            "duplicate" => Some(InconsistencyKind::Duplicate),
            "out_of_shift" => Some(InconsistencyKind::OutOfShift),
            "malformed_record" => Some(InconsistencyKind::MalformedRecord),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }

    /// High and Critical findings exclude the involved events from the
    /// daily summary until resolved.
    pub fn blocks_summary(&self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionKind {
    CorrectionApplied,
    JustificationAccepted,
    Ignored,
}

impl ResolutionKind {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ResolutionKind::CorrectionApplied => "correction_applied",
            ResolutionKind::JustificationAccepted => "justification_accepted",
            ResolutionKind::Ignored => "ignored",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "correction_applied" => Some(ResolutionKind::CorrectionApplied),
            "justification_accepted" => Some(ResolutionKind::JustificationAccepted),
            "ignored" => Some(ResolutionKind::Ignored),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    pub kind: ResolutionKind,
    pub resolved_at: String, // RFC 3339
    pub resolved_by_id: String,
    pub details: String,
}

/// A detected anomaly in a day's punch sequence. Never an error: findings are
/// values that require explicit resolution, and never block new punches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inconsistency {
    pub id: Uuid,
    pub kind: InconsistencyKind,
    pub description: String,
    /// Relevance order: the anchor event first, then related events.
    pub involved_event_ids: Vec<Uuid>,
    pub detected_at: String, // RFC 3339
    pub severity: Severity,
    pub resolved: bool,
    pub resolution: Option<Resolution>,
}

impl Inconsistency {
    pub fn new(
        kind: InconsistencyKind,
        severity: Severity,
        description: String,
        involved_event_ids: Vec<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            description,
            involved_event_ids,
            detected_at: chrono::Local::now().to_rfc3339(),
            severity,
            resolved: false,
            resolution: None,
        }
    }

    /// Flip to resolved with an explicit resolution. The only way `resolved`
    /// ever becomes true.
    pub fn resolve(&mut self, kind: ResolutionKind, resolved_by_id: &str, details: &str) {
        self.resolved = true;
        self.resolution = Some(Resolution {
            kind,
            resolved_at: chrono::Local::now().to_rfc3339(),
            resolved_by_id: resolved_by_id.to_string(),
            details: details.to_string(),
        });
    }

    /// Two findings describe the same anomaly when kind and involved events
    /// match. Used to keep re-validation idempotent.
    pub fn same_finding(&self, other: &Inconsistency) -> bool {
        self.kind == other.kind && self.involved_event_ids == other.involved_event_ids
    }
}
