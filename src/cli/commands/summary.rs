use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::Core;
use crate::db::store::{RecordStore, SqliteStore};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use crate::utils::formatting::paint_delta;
use crate::utils::time::format_minutes;

/// Daily summary: worked/expected/overtime/shortfall for one employee+day.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary { employee, date } = cmd {
        let date = crate::utils::date::resolve_date(date.as_ref())
            .ok_or_else(|| AppError::InvalidDate(date.clone().unwrap_or_default()))?;

        let store = SqliteStore::open(&cfg.database)?;
        let mut record = store.load_day(&date, employee)?;

        let summary = Core::build_daily_summary(&mut record, cfg);
        // Revalidation may have added findings (e.g. a missing clock-out);
        // persist them with the day.
        store.save_day(&record)?;

        println!("{} — {}", date, employee);
        println!("  worked:    {}", format_minutes(summary.worked_minutes));
        println!("  expected:  {}", format_minutes(summary.expected_minutes));
        println!(
            "  balance:   {}",
            paint_delta(summary.worked_minutes - summary.expected_minutes)
        );

        let open: Vec<_> = record
            .inconsistencies
            .iter()
            .filter(|i| !i.resolved)
            .collect();
        if !open.is_empty() {
            warning(format!(
                "{} unresolved finding(s) on this day; affected events are not counted",
                open.len()
            ));
        }
    }

    Ok(())
}
