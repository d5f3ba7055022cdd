use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::Core;
use crate::db::audit::audit;
use crate::db::store::{RecordStore, SqliteStore};
use crate::errors::{AppError, AppResult};
use crate::models::inconsistency::ResolutionKind;
use crate::ui::messages::{success, warning};
use crate::utils::formatting::paint_severity;
use uuid::Uuid;

/// Re-run the detectors for a day and list the findings, or resolve one.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Validate {
        employee,
        date,
        resolve,
        by,
        ignore,
        details,
    } = cmd
    {
        let date = crate::utils::date::resolve_date(date.as_ref())
            .ok_or_else(|| AppError::InvalidDate(date.clone().unwrap_or_default()))?;

        let store = SqliteStore::open(&cfg.database)?;
        let mut record = store.load_day(&date, employee)?;

        //
        // Resolution branch
        //
        if let Some(finding_id) = resolve {
            let finding_id: Uuid = finding_id
                .parse()
                .map_err(|_| AppError::UnknownInconsistency(finding_id.to_string()))?;
            let actor = by
                .clone()
                .ok_or_else(|| AppError::Other("--by is required with --resolve".into()))?;

            let inc = record
                .inconsistencies
                .iter_mut()
                .find(|i| i.id == finding_id)
                .ok_or_else(|| AppError::UnknownInconsistency(finding_id.to_string()))?;

            let kind = if *ignore {
                ResolutionKind::Ignored
            } else {
                ResolutionKind::JustificationAccepted
            };
            inc.resolve(kind, &actor, details.as_deref().unwrap_or(""));
            let description = inc.description.clone();

            store.save_day(&record)?;
            audit(
                store.conn(),
                "resolve",
                &finding_id.to_string(),
                &format!("{} by {}", kind.to_db_str(), actor),
            )?;
            success(format!("Finding resolved ({}): {}", kind.to_db_str(), description));
            return Ok(());
        }

        //
        // Detection branch
        //
        let fresh = Core::revalidate(&mut record, cfg);
        store.save_day(&record)?;

        for id in Core::untrusted_events(&record, cfg) {
            warning(format!("event {} failed integrity verification", id));
        }

        if record.inconsistencies.is_empty() {
            success(format!("{} — {}: no findings.", date, employee));
            return Ok(());
        }

        println!("{} — {}: {} new finding(s)", date, employee, fresh.len());
        for inc in &record.inconsistencies {
            let state = if inc.resolved { "resolved" } else { "open" };
            println!(
                "  {}  {} {} [{}] {}",
                inc.id,
                paint_severity(inc.severity),
                inc.kind.to_db_str(),
                state,
                inc.description
            );
        }
    }

    Ok(())
}
