use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::integrity;
use crate::db::audit::audit;
use crate::db::store::{RecordStore, SqliteStore};
use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use crate::ui::messages::success;

/// Add, deactivate or list roster entries.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Roster {
        add,
        name,
        pin,
        deactivate,
        list,
    } = cmd
    {
        let store = SqliteStore::open(&cfg.database)?;

        if let Some(id) = add {
            let display_name = name
                .clone()
                .ok_or_else(|| AppError::Other("--name is required with --add".into()))?;

            let mut emp = store
                .find_employee(id)?
                .unwrap_or_else(|| Employee::new(id, &display_name));
            emp.name = display_name;
            if let Some(pin) = pin {
                emp.pin_hash = Some(integrity::pin_hash(&cfg.integrity_key, pin));
            }
            emp.active = true;

            store.upsert_employee(&emp)?;
            audit(store.conn(), "roster-add", id, &emp.name)?;
            success(format!("Employee '{}' ({}) saved.", emp.name, emp.id));
            return Ok(());
        }

        if let Some(id) = deactivate {
            let mut emp = crate::db::store::require_employee(&store, id)?;
            emp.active = false;
            store.upsert_employee(&emp)?;
            audit(store.conn(), "roster-deactivate", id, &emp.name)?;
            success(format!("Employee '{}' deactivated.", emp.name));
            return Ok(());
        }

        if *list || (add.is_none() && deactivate.is_none()) {
            let roster = store.roster()?;
            if roster.is_empty() {
                println!("(empty roster)");
                return Ok(());
            }
            for emp in roster {
                let state = if emp.active { "active" } else { "inactive" };
                let pin = if emp.pin_hash.is_some() { "pin" } else { "-" };
                println!("{:<12} {:<24} {:<8} {}", emp.id, emp.name, state, pin);
            }
        }
    }

    Ok(())
}
