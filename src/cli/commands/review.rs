use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::correction;
use crate::core::logic::Core;
use crate::db::audit::audit;
use crate::db::store::{RecordStore, SqliteStore};
use crate::errors::{AppError, AppResult};
use crate::models::inconsistency::ResolutionKind;
use crate::ui::messages::success;
use uuid::Uuid;

/// Approve, reject or cancel a pending correction. Approval applies the
/// correction immediately: the successor event version is appended and the
/// day re-validated.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Review {
        correction: correction_id,
        approve,
        reject,
        cancel,
        by,
        name,
    } = cmd
    {
        let correction_id: Uuid = correction_id
            .parse()
            .map_err(|_| AppError::UnknownCorrection(correction_id.to_string()))?;

        let store = SqliteStore::open(&cfg.database)?;
        let (date, employee_id, _) = store
            .find_correction(correction_id)?
            .ok_or_else(|| AppError::UnknownCorrection(correction_id.to_string()))?;

        let mut record = store.load_day(&date, &employee_id)?;
        let c = record
            .corrections
            .iter_mut()
            .find(|c| c.id == correction_id)
            .ok_or_else(|| AppError::UnknownCorrection(correction_id.to_string()))?;

        let to_final = |e: correction::TransitionError| match e {
            correction::TransitionError::AlreadyFinal(s) => {
                AppError::CorrectionFinal(correction_id.to_string(), s.to_db_str().to_string())
            }
            other => AppError::CorrectionRejected(other.to_string()),
        };

        if *approve {
            let approver_name = name
                .as_deref()
                .ok_or_else(|| AppError::Other("--name is required with --approve".into()))?;
            correction::approve(c, by, approver_name).map_err(to_final)?;
            let applied = c.clone();

            // Apply on the live head of the version chain: an earlier
            // approved correction may already have superseded the original.
            let base = record
                .current_version_of(applied.original_event_id)
                .cloned()
                .ok_or_else(|| {
                    AppError::UnknownEvent(applied.original_event_id.to_string())
                })?;

            // Never build a successor on top of a record that fails its
            // integrity check; surface it instead.
            if !crate::core::integrity::verify_event(&cfg.integrity_key, &base) {
                return Err(AppError::IntegrityFailure(base.id.to_string()));
            }

            // Append the successor state; the superseded row stays for audit.
            let successor = correction::apply(&applied, &base, &cfg.integrity_key);
            let successor_id = successor.id;
            record.events.push(successor);

            // Findings about the corrected event are settled by the correction.
            for inc in record.inconsistencies.iter_mut() {
                if !inc.resolved && inc.involved_event_ids.contains(&base.id) {
                    inc.resolve(
                        ResolutionKind::CorrectionApplied,
                        by,
                        &format!("correction {}", correction_id),
                    );
                }
            }

            Core::revalidate(&mut record, cfg);
            store.save_day(&record)?;

            audit(
                store.conn(),
                "correct-approve",
                &correction_id.to_string(),
                &format!("applied as event {} v{}", successor_id, base.version + 1),
            )?;
            success(format!(
                "Correction approved and applied: event {} superseded by {}.",
                base.id, successor_id
            ));
            return Ok(());
        }

        if *reject {
            correction::reject(c).map_err(to_final)?;
            store.save_day(&record)?;
            audit(store.conn(), "correct-reject", &correction_id.to_string(), by)?;
            success(format!("Correction {} rejected.", correction_id));
            return Ok(());
        }

        if *cancel {
            correction::cancel(c, by).map_err(to_final)?;
            store.save_day(&record)?;
            audit(store.conn(), "correct-cancel", &correction_id.to_string(), by)?;
            success(format!("Correction {} cancelled.", correction_id));
            return Ok(());
        }

        return Err(AppError::Other(
            "specify one of --approve, --reject or --cancel".into(),
        ));
    }

    Ok(())
}
