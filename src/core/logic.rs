//! High-level pipeline over one day's record: append a punch, re-validate,
//! summarize. Pure with respect to storage; the CLI layer loads and saves
//! records around these calls.

use crate::config::Config;
use crate::core::{integrity, validator};
use crate::errors::{AppError, AppResult};
use crate::models::daily_record::DailyRecord;
use crate::models::day_summary::DaySummary;
use crate::models::inconsistency::Inconsistency;
use crate::models::punch::PunchEvent;

pub struct Core;

impl Core {
    /// Append a freshly captured punch to the day and re-run the detectors.
    ///
    /// New findings never block the recording: they are returned so the
    /// caller can warn, and stay on the record awaiting resolution. A locked
    /// day is the one hard refusal (corrections remain possible).
    pub fn record_punch(
        record: &mut DailyRecord,
        mut event: PunchEvent,
        cfg: &Config,
    ) -> AppResult<Vec<Inconsistency>> {
        if record.locked {
            return Err(AppError::DayLocked(record.date.to_string()));
        }

        event.integrity_tag = integrity::event_tag(&cfg.integrity_key, &event);
        record.events.push(event);

        Ok(Self::revalidate(record, cfg))
    }

    /// Re-run all detectors and fold new findings into the record.
    /// Idempotent: a second call on an unchanged record adds nothing.
    pub fn revalidate(record: &mut DailyRecord, cfg: &Config) -> Vec<Inconsistency> {
        let fresh = validator::run_all(record, cfg.duplicate_window_secs);
        validator::merge_detected(record, fresh)
    }

    /// Verify every event tag on the record. Returns the ids of untrusted
    /// events; never auto-corrects.
    pub fn untrusted_events(record: &DailyRecord, cfg: &Config) -> Vec<uuid::Uuid> {
        record
            .events
            .iter()
            .filter(|e| !integrity::verify_event(&cfg.integrity_key, e))
            .map(|e| e.id)
            .collect()
    }

    /// Re-validate, then compute the day's summary from the reconciled view.
    pub fn build_daily_summary(record: &mut DailyRecord, cfg: &Config) -> DaySummary {
        Self::revalidate(record, cfg);
        crate::core::summary::summarize(record, cfg.lunch_control, cfg.expected_work_minutes)
    }
}
