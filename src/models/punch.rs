use super::location::GeoPoint;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PunchKind {
    ClockIn,
    BreakStart,
    BreakEnd,
    ClockOut,
}

impl PunchKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PunchKind::ClockIn => "in",
            PunchKind::BreakStart => "break_start",
            PunchKind::BreakEnd => "break_end",
            PunchKind::ClockOut => "out",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "in" => Some(PunchKind::ClockIn),
            "break_start" => Some(PunchKind::BreakStart),
            "break_end" => Some(PunchKind::BreakEnd),
            "out" => Some(PunchKind::ClockOut),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (accepts a few spellings)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "in" | "clock-in" | "clockin" => Some(PunchKind::ClockIn),
            "break-start" | "break_start" | "lunch-out" => Some(PunchKind::BreakStart),
            "break-end" | "break_end" | "lunch-in" => Some(PunchKind::BreakEnd),
            "out" | "clock-out" | "clockout" => Some(PunchKind::ClockOut),
            _ => None,
        }
    }

    /// Human-readable label used in descriptions and listings.
    pub fn label(&self) -> &'static str {
        match self {
            PunchKind::ClockIn => "clock-in",
            PunchKind::BreakStart => "break-start",
            PunchKind::BreakEnd => "break-end",
            PunchKind::ClockOut => "clock-out",
        }
    }

    /// Kinds allowed to immediately precede `self` in a day's timeline.
    /// ClockIn additionally accepts "first event of the day" (empty slot),
    /// which the sequence validator handles separately.
    pub fn allowed_predecessors(&self) -> &'static [PunchKind] {
        match self {
            PunchKind::ClockIn => &[PunchKind::ClockOut],
            PunchKind::BreakStart => &[PunchKind::ClockIn, PunchKind::BreakEnd],
            PunchKind::BreakEnd => &[PunchKind::BreakStart],
            PunchKind::ClockOut => &[PunchKind::ClockIn, PunchKind::BreakEnd],
        }
    }
}

/// One observed punch action at a point in time.
///
/// The timestamp is kept as the raw RFC 3339 string it was captured with:
/// storage may hand back malformed values and the validators must be able to
/// represent (and report) those instead of failing the whole day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchEvent {
    pub id: Uuid,
    pub kind: PunchKind,
    pub timestamp: String, // RFC 3339, immutable once tagged
    pub employee_id: String,
    pub device_id: Option<String>,
    pub location: Option<GeoPoint>,
    pub metadata: Option<BTreeMap<String, String>>,
    pub version: i32,
    pub integrity_tag: String,
}

impl PunchEvent {
    /// High-level constructor for events captured at punch time.
    /// Starts at `version = 1` with an empty tag; the caller tags it
    /// before the event is persisted.
    pub fn new(kind: PunchKind, timestamp: String, employee_id: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            timestamp,
            employee_id: employee_id.to_string(),
            device_id: None,
            location: None,
            metadata: None,
            version: 1,
            integrity_tag: String::new(),
        }
    }

    /// Parse the stored timestamp. `None` means the record is malformed and
    /// must be excluded from ordering (and reported by the validator).
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        crate::utils::time::parse_timestamp(&self.timestamp)
    }

    pub fn time_str(&self) -> String {
        match self.parsed_timestamp() {
            Some(ts) => ts.format("%H:%M").to_string(),
            None => "??:??".to_string(),
        }
    }
}
