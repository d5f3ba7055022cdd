use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::integrity;
use crate::core::logic::Core;
use crate::db::audit::audit;
use crate::db::store::{RecordStore, SqliteStore, require_employee};
use crate::errors::{AppError, AppResult};
use crate::models::location::GeoPoint;
use crate::models::punch::{PunchEvent, PunchKind};
use crate::ui::messages::{success, warning};
use chrono::Local;

/// Register a punch for an employee and re-validate the day.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Punch {
        employee,
        kind,
        at,
        pin,
        device,
        location,
    } = cmd
    {
        //
        // 1. Parse punch kind
        //
        let kind = PunchKind::from_code(kind)
            .ok_or_else(|| AppError::InvalidPunchKind(kind.to_string()))?;

        //
        // 2. Resolve timestamp (explicit or device clock)
        //
        let timestamp = match at {
            Some(raw) => {
                crate::utils::time::parse_timestamp(raw)
                    .ok_or_else(|| AppError::InvalidTimestamp(raw.to_string()))?;
                raw.clone()
            }
            None => Local::now().to_rfc3339(),
        };
        let date = crate::utils::time::parse_timestamp(&timestamp)
            .ok_or_else(|| AppError::InvalidTimestamp(timestamp.clone()))?
            .date();

        //
        // 3. Parse location fix, if any
        //
        let location = match location {
            Some(code) => Some(GeoPoint::from_code(code).ok_or_else(|| {
                AppError::Other(format!(
                    "Invalid location '{}': expected lat,lon[,accuracy_m]",
                    code
                ))
            })?),
            None => None,
        };

        //
        // 4. Identify the employee (PIN when the roster entry carries one)
        //
        let store = SqliteStore::open(&cfg.database)?;
        let emp = require_employee(&store, employee)?;
        if !emp.active {
            return Err(AppError::UnknownEmployee(format!("{} (inactive)", employee)));
        }
        if let Some(stored_hash) = &emp.pin_hash {
            let given = pin
                .as_ref()
                .ok_or_else(|| AppError::WrongPin(employee.to_string()))?;
            if integrity::pin_hash(&cfg.integrity_key, given) != *stored_hash {
                return Err(AppError::WrongPin(employee.to_string()));
            }
        }

        //
        // 5. Build the event and run the punch pipeline
        //
        let mut event = PunchEvent::new(kind, timestamp, employee);
        event.device_id = device.clone();
        event.location = location;

        let event_id = event.id;
        let time_str = event.time_str();

        let mut record = store.load_day(&date, employee)?;
        let fresh = Core::record_punch(&mut record, event, cfg)?;
        store.save_day(&record)?;

        audit(
            store.conn(),
            "punch",
            employee,
            &format!("{} {} ({})", kind.label(), time_str, event_id),
        )?;

        success(format!(
            "Recorded {} at {} for {} ({}).",
            kind.label(),
            time_str,
            emp.name,
            date
        ));

        // Findings never block the punch; they are reported and kept on the
        // record until resolved.
        for finding in fresh {
            warning(format!(
                "{}: {}",
                finding.kind.to_db_str(),
                finding.description
            ));
        }
    }

    Ok(())
}
