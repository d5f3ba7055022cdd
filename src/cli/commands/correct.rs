use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::correction;
use crate::db::audit::audit;
use crate::db::queries;
use crate::db::store::{RecordStore, SqliteStore};
use crate::errors::{AppError, AppResult};
use crate::models::correction::CorrectionDraft;
use crate::ui::messages::{error, success};
use uuid::Uuid;

/// Propose a timestamp correction against a recorded event.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Correct {
        event,
        to,
        justification,
        by,
        name,
        approver,
        approver_name,
        evidence,
    } = cmd
    {
        let event_id: Uuid = event
            .parse()
            .map_err(|_| AppError::UnknownEvent(event.to_string()))?;

        let store = SqliteStore::open(&cfg.database)?;
        let (date, original) = queries::find_event(store.conn(), event_id)?
            .ok_or_else(|| AppError::UnknownEvent(event.to_string()))?;

        let mut record = store.load_day(&date, &original.employee_id)?;

        let draft = CorrectionDraft {
            proposed_timestamp: to.clone(),
            justification: justification.clone(),
            requested_by_id: by.clone(),
            requested_by_name: name.clone(),
            approver_id: approver.clone(),
            approver_name: approver_name.clone(),
            evidence: evidence.clone(),
        };

        let has_pending = record.has_pending_correction_for(event_id);

        // All gate failures are reported together, never just the first.
        let proposed = match correction::propose(&draft, &original, has_pending, &cfg.integrity_key)
        {
            Ok(c) => c,
            Err(failures) => {
                for failure in &failures {
                    error(failure);
                }
                return Err(AppError::CorrectionRejected(format!(
                    "{} validation failure(s)",
                    failures.len()
                )));
            }
        };

        let correction_id = proposed.id;
        record.corrections.push(proposed);
        store.save_day(&record)?;

        audit(
            store.conn(),
            "correct-propose",
            &event_id.to_string(),
            &format!("{} -> {} by {}", correction_id, to, by),
        )?;

        success(format!(
            "Correction {} proposed for event {} (pending).",
            correction_id, event_id
        ));
    }

    Ok(())
}
