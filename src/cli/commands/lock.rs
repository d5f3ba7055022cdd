use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::audit::audit;
use crate::db::store::{RecordStore, SqliteStore};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

/// Lock or unlock a day. A locked day refuses direct punches; corrections
/// remain the only way to change it.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Lock {
        employee,
        date,
        unlock,
    } = cmd
    {
        let date = crate::utils::date::parse_date(date)
            .ok_or_else(|| AppError::InvalidDate(date.to_string()))?;

        let store = SqliteStore::open(&cfg.database)?;
        let mut record = store.load_day(&date, employee)?;
        record.locked = !*unlock;
        store.save_day(&record)?;

        let op = if *unlock { "unlock" } else { "lock" };
        audit(store.conn(), op, employee, &date.to_string())?;
        success(format!("Day {} for {} {}ed.", date, employee, op));
    }

    Ok(())
}
