use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::audit::load_audit_log;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;

/// Print rows from the audit log table, newest first.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print: _ } = cmd {
        let store = SqliteStore::open(&cfg.database)?;
        let rows = load_audit_log(store.conn())?;

        if rows.is_empty() {
            println!("(audit log is empty)");
            return Ok(());
        }

        for (date, operation, target, message) in rows {
            println!("{}  {:<18} {:<38} {}", date, operation, target, message);
        }
    }

    Ok(())
}
