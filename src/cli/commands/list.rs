use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::Core;
use crate::db::store::{RecordStore, SqliteStore};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use crate::utils::formatting::paint_severity;

/// Print a day's events, corrections and findings.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { employee, date } = cmd {
        let date = crate::utils::date::resolve_date(date.as_ref())
            .ok_or_else(|| AppError::InvalidDate(date.clone().unwrap_or_default()))?;

        let store = SqliteStore::open(&cfg.database)?;
        let record = store.load_day(&date, employee)?;

        let untrusted = Core::untrusted_events(&record, cfg);

        println!(
            "{} — {}{}",
            date,
            employee,
            if record.locked { " [locked]" } else { "" }
        );

        if record.events.is_empty() {
            println!("  (no events)");
        }

        // Current view first, superseded versions greyed out by marker.
        let current: Vec<_> = record.current_events().iter().map(|e| e.id).collect();
        let mut events: Vec<_> = record.events.iter().collect();
        events.sort_by(|a, b| {
            a.parsed_timestamp()
                .cmp(&b.parsed_timestamp())
                .then_with(|| a.id.cmp(&b.id))
        });

        for ev in events {
            let trust = if untrusted.contains(&ev.id) {
                "UNTRUSTED"
            } else {
                "ok"
            };
            let state = if current.contains(&ev.id) {
                ""
            } else {
                " (superseded)"
            };
            println!(
                "  {}  {:<12} v{} {:<9} {}{}",
                ev.time_str(),
                ev.kind.label(),
                ev.version,
                trust,
                ev.id,
                state
            );
        }

        if !untrusted.is_empty() {
            warning(format!(
                "{} event(s) failed integrity verification and are untrusted",
                untrusted.len()
            ));
        }

        for c in &record.corrections {
            println!(
                "  correction {} on {}: -> {} [{}] by {} ({})",
                c.id,
                c.original_event_id,
                c.proposed_timestamp,
                c.status.to_db_str(),
                c.requested_by_name,
                c.justification
            );
        }

        for inc in &record.inconsistencies {
            let state = if inc.resolved { "resolved" } else { "open" };
            println!(
                "  {} {} [{}] {}",
                paint_severity(inc.severity),
                inc.kind.to_db_str(),
                state,
                inc.description
            );
        }
    }

    Ok(())
}
