//! Repository seam between the pure core and storage.
//!
//! The core is a function of the `DailyRecord` handed to it; everything that
//! touches disk lives behind these traits. `SqliteStore` keeps the normalized
//! tables authoritative and mirrors each saved day as a JSON document into a
//! key-value table, the same shape a remote document store would receive.
//! The mirror is best effort: a failed mirror write never corrupts or blocks
//! the primary save.

use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::daily_record::DailyRecord;
use crate::models::employee::Employee;
use chrono::NaiveDate;
use uuid::Uuid;

/// Key-document storage, the shape shared by the local cache and the remote
/// mirror collaborator.
pub trait KvStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
}

/// Persistence for per-day records and the roster.
pub trait RecordStore {
    fn load_day(&self, date: &NaiveDate, employee_id: &str) -> AppResult<DailyRecord>;
    fn save_day(&self, record: &DailyRecord) -> AppResult<()>;
    fn roster(&self) -> AppResult<Vec<Employee>>;
    fn find_employee(&self, id: &str) -> AppResult<Option<Employee>>;
    fn upsert_employee(&self, emp: &Employee) -> AppResult<()>;
}

pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        Ok(Self { pool })
    }

    pub fn conn(&self) -> &rusqlite::Connection {
        &self.pool.conn
    }

    pub fn find_correction(
        &self,
        id: Uuid,
    ) -> AppResult<Option<(NaiveDate, String, crate::models::correction::Correction)>> {
        queries::find_correction(self.conn(), id)
    }

    fn day_key(date: &NaiveDate, employee_id: &str) -> String {
        format!("day/{}/{}", employee_id, date)
    }

    /// Mirror the day document. Failures are swallowed on purpose: the
    /// normalized tables already hold the truth.
    fn mirror_day(&self, record: &DailyRecord) {
        if let Ok(doc) = serde_json::to_string(record) {
            let _ = self.set(&Self::day_key(&record.date, &record.employee_id), &doc);
        }
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut stmt = self.conn().prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query_map([key], |row| row.get::<_, String>(0))?;
        match rows.next() {
            Some(r) => Ok(Some(r?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.conn().execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }
}

impl RecordStore for SqliteStore {
    fn load_day(&self, date: &NaiveDate, employee_id: &str) -> AppResult<DailyRecord> {
        let conn = self.conn();

        let events = queries::load_events_by_day(conn, date, employee_id);

        // Primary tables unreadable: fall back to the mirrored document
        // before giving up. Never write during a fallback read.
        let events = match events {
            Ok(evs) => evs,
            Err(primary_err) => {
                if let Ok(Some(doc)) = self.get(&Self::day_key(date, employee_id))
                    && let Ok(record) = serde_json::from_str::<DailyRecord>(&doc)
                {
                    return Ok(record);
                }
                return Err(primary_err);
            }
        };

        let mut record = DailyRecord::new(*date, employee_id);
        record.events = events;
        record.corrections = queries::load_corrections_by_day(conn, date, employee_id)?;
        record.inconsistencies = queries::load_inconsistencies_by_day(conn, date, employee_id)?;
        record.locked = queries::load_day_flags(conn, date, employee_id)?.unwrap_or(false);
        Ok(record)
    }

    fn save_day(&self, record: &DailyRecord) -> AppResult<()> {
        let conn = self.conn();

        queries::upsert_day(conn, &record.date, &record.employee_id, record.locked)?;

        // Events are append-only: insert only the ones not stored yet.
        let stored = queries::load_events_by_day(conn, &record.date, &record.employee_id)?;
        for ev in &record.events {
            if !stored.iter().any(|s| s.id == ev.id) {
                queries::insert_event(conn, &record.date, ev)?;
            }
        }

        let stored = queries::load_corrections_by_day(conn, &record.date, &record.employee_id)?;
        for c in &record.corrections {
            if stored.iter().any(|s| s.id == c.id) {
                queries::update_correction_status(conn, c)?;
            } else {
                queries::insert_correction(conn, &record.date, &record.employee_id, c)?;
            }
        }

        queries::delete_inconsistencies_for_day(conn, &record.date, &record.employee_id)?;
        for inc in &record.inconsistencies {
            queries::upsert_inconsistency(conn, &record.date, &record.employee_id, inc)?;
        }

        self.mirror_day(record);
        Ok(())
    }

    fn roster(&self) -> AppResult<Vec<Employee>> {
        queries::load_roster(self.conn())
    }

    fn find_employee(&self, id: &str) -> AppResult<Option<Employee>> {
        queries::find_employee(self.conn(), id)
    }

    fn upsert_employee(&self, emp: &Employee) -> AppResult<()> {
        queries::upsert_employee(self.conn(), emp)
    }
}

/// Convenience used by the CLI: load the employee or fail with a domain error.
pub fn require_employee(store: &dyn RecordStore, id: &str) -> AppResult<Employee> {
    store
        .find_employee(id)?
        .ok_or_else(|| AppError::UnknownEmployee(id.to_string()))
}
