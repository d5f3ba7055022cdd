//! Detection passes over one day's punch events.
//!
//! Both detectors are pure functions of the event set: re-running them after
//! any append yields the same findings for the same input, and the merge step
//! keeps re-validation idempotent on the stored record.

pub mod missing;
pub mod sequence;

use crate::models::daily_record::DailyRecord;
use crate::models::inconsistency::Inconsistency;
use crate::models::punch::PunchEvent;

/// Run every detector over the record's current event view (superseded
/// versions excluded), in detection order.
pub fn run_all(record: &DailyRecord, duplicate_window_secs: i64) -> Vec<Inconsistency> {
    let current: Vec<PunchEvent> = record.current_events().into_iter().cloned().collect();
    let mut findings = sequence::validate(&current, duplicate_window_secs);
    findings.extend(missing::detect_missing(&current));
    findings
}

/// Reconcile freshly detected findings with the record.
///
/// Unresolved findings are not authoritative: any that no longer reproduce
/// are dropped, any that still reproduce keep their identity (so a resolution
/// by id keeps working), and genuinely new ones are added. Resolved findings
/// persist and suppress re-detection of the same anomaly. Returns the
/// findings that were actually new.
pub fn merge_detected(record: &mut DailyRecord, fresh: Vec<Inconsistency>) -> Vec<Inconsistency> {
    record
        .inconsistencies
        .retain(|existing| existing.resolved || fresh.iter().any(|f| f.same_finding(existing)));

    let mut added = Vec::new();
    for finding in fresh {
        let known = record
            .inconsistencies
            .iter()
            .any(|existing| existing.same_finding(&finding));
        if !known {
            record.inconsistencies.push(finding.clone());
            added.push(finding);
        }
    }
    added
}
