use super::correction::Correction;
use super::inconsistency::Inconsistency;
use super::punch::PunchEvent;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Aggregate of one employee's one calendar day.
///
/// Insertion order of `events` is NOT authoritative: every ordering decision
/// re-derives from the event timestamps. Once `locked` is true the day takes
/// no further direct punches, only corrections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub employee_id: String,
    pub events: Vec<PunchEvent>,
    pub corrections: Vec<Correction>,
    pub inconsistencies: Vec<Inconsistency>,
    pub locked: bool,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, employee_id: &str) -> Self {
        Self {
            date,
            employee_id: employee_id.to_string(),
            events: Vec::new(),
            corrections: Vec::new(),
            inconsistencies: Vec::new(),
            locked: false,
        }
    }

    pub fn find_event(&self, id: Uuid) -> Option<&PunchEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Latest version of each logical event: a correction appends a successor
    /// row with the same employee/day, so the highest `version` per original
    /// id chain wins. Successor rows carry the original id in metadata under
    /// `supersedes`; here it is enough to keep, per id, the row itself (ids
    /// are unique per version chain entry).
    pub fn current_events(&self) -> Vec<&PunchEvent> {
        let mut superseded: Vec<Uuid> = Vec::new();
        for ev in &self.events {
            if let Some(meta) = &ev.metadata
                && let Some(orig) = meta.get("supersedes")
                && let Ok(id) = orig.parse::<Uuid>()
            {
                superseded.push(id);
            }
        }
        self.events
            .iter()
            .filter(|e| !superseded.contains(&e.id))
            .collect()
    }

    /// Follow the `supersedes` chain from `id` to its live version. Returns
    /// the event itself when nothing supersedes it. Corrections apply on this
    /// head, so repeated corrections of one punch form a single chain.
    pub fn current_version_of(&self, id: Uuid) -> Option<&PunchEvent> {
        let mut head = self.find_event(id)?;
        loop {
            let next = self.events.iter().find(|e| {
                e.metadata
                    .as_ref()
                    .and_then(|m| m.get("supersedes"))
                    .and_then(|s| s.parse::<Uuid>().ok())
                    == Some(head.id)
            });
            match next {
                Some(successor) => head = successor,
                None => return Some(head),
            }
        }
    }

    pub fn has_pending_correction_for(&self, event_id: Uuid) -> bool {
        self.corrections.iter().any(|c| {
            c.original_event_id == event_id
                && c.status == super::correction::CorrectionStatus::Pending
        })
    }
}
