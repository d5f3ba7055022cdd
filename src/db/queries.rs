use crate::errors::{AppError, AppResult};
use crate::models::correction::{Correction, CorrectionStatus};
use crate::models::employee::Employee;
use crate::models::inconsistency::{Inconsistency, InconsistencyKind, Resolution, Severity};
use crate::models::location::GeoPoint;
use crate::models::punch::{PunchEvent, PunchKind};
use chrono::NaiveDate;
use rusqlite::{Connection, Result, Row, params};
use std::collections::BTreeMap;
use uuid::Uuid;

fn bad_column(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_uuid(s: &str) -> Result<Uuid> {
    s.parse::<Uuid>()
        .map_err(|_| bad_column(AppError::Other(format!("invalid uuid: {}", s))))
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

pub fn map_event_row(row: &Row) -> Result<PunchEvent> {
    let id: String = row.get("id")?;
    let kind_str: String = row.get("kind")?;
    let kind = PunchKind::from_db_str(&kind_str)
        .ok_or_else(|| bad_column(AppError::InvalidPunchKind(kind_str.clone())))?;

    let location: Option<String> = row.get("location")?;
    let location: Option<GeoPoint> = match location {
        Some(ref s) if !s.is_empty() => {
            Some(serde_json::from_str(s).map_err(|e| bad_column(AppError::Serde(e)))?)
        }
        _ => None,
    };

    let metadata: Option<String> = row.get("metadata")?;
    let metadata: Option<BTreeMap<String, String>> = match metadata {
        Some(ref s) if !s.is_empty() => {
            Some(serde_json::from_str(s).map_err(|e| bad_column(AppError::Serde(e)))?)
        }
        _ => None,
    };

    Ok(PunchEvent {
        id: parse_uuid(&id)?,
        kind,
        // Kept raw: a malformed stored timestamp is the validator's finding,
        // not a load failure.
        timestamp: row.get("timestamp")?,
        employee_id: row.get("employee_id")?,
        device_id: row.get("device_id")?,
        location,
        metadata,
        version: row.get("version")?,
        integrity_tag: row.get("integrity_tag")?,
    })
}

pub fn load_events_by_day(
    conn: &Connection,
    date: &NaiveDate,
    employee_id: &str,
) -> AppResult<Vec<PunchEvent>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM events
         WHERE date = ?1 AND employee_id = ?2
         ORDER BY timestamp ASC",
    )?;

    let rows = stmt.query_map(params![date.to_string(), employee_id], map_event_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_event(conn: &Connection, date: &NaiveDate, ev: &PunchEvent) -> AppResult<()> {
    let location = match &ev.location {
        Some(loc) => Some(serde_json::to_string(loc)?),
        None => None,
    };
    let metadata = match &ev.metadata {
        Some(meta) => Some(serde_json::to_string(meta)?),
        None => None,
    };

    conn.execute(
        "INSERT INTO events
            (id, date, employee_id, kind, timestamp, device_id, location,
             metadata, version, integrity_tag)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            ev.id.to_string(),
            date.to_string(),
            ev.employee_id,
            ev.kind.to_db_str(),
            ev.timestamp,
            ev.device_id,
            location,
            metadata,
            ev.version,
            ev.integrity_tag,
        ],
    )?;
    Ok(())
}

pub fn find_event(conn: &Connection, id: Uuid) -> AppResult<Option<(NaiveDate, PunchEvent)>> {
    let mut stmt = conn.prepare("SELECT * FROM events WHERE id = ?1")?;
    let mut rows = stmt.query_map([id.to_string()], |row| {
        let date: String = row.get("date")?;
        let ev = map_event_row(row)?;
        Ok((date, ev))
    })?;

    match rows.next() {
        Some(r) => {
            let (date_str, ev) = r?;
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .map_err(|_| AppError::InvalidDate(date_str))?;
            Ok(Some((date, ev)))
        }
        None => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Corrections
// ---------------------------------------------------------------------------

pub fn map_correction_row(row: &Row) -> Result<Correction> {
    let id: String = row.get("id")?;
    let original: String = row.get("original_event_id")?;
    let status_str: String = row.get("status")?;
    let status = CorrectionStatus::from_db_str(&status_str)
        .ok_or_else(|| bad_column(AppError::Other(format!("invalid status: {}", status_str))))?;

    let evidence: String = row.get("evidence")?;
    let evidence: Vec<String> =
        serde_json::from_str(&evidence).map_err(|e| bad_column(AppError::Serde(e)))?;

    Ok(Correction {
        id: parse_uuid(&id)?,
        original_event_id: parse_uuid(&original)?,
        proposed_timestamp: row.get("proposed_timestamp")?,
        justification: row.get("justification")?,
        requested_by_id: row.get("requested_by_id")?,
        requested_by_name: row.get("requested_by_name")?,
        requested_at: row.get("requested_at")?,
        approver_id: row.get("approver_id")?,
        approver_name: row.get("approver_name")?,
        status,
        integrity_tag: row.get("integrity_tag")?,
        evidence,
    })
}

pub fn load_corrections_by_day(
    conn: &Connection,
    date: &NaiveDate,
    employee_id: &str,
) -> AppResult<Vec<Correction>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM corrections
         WHERE date = ?1 AND employee_id = ?2
         ORDER BY requested_at ASC",
    )?;

    let rows = stmt.query_map(params![date.to_string(), employee_id], map_correction_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_correction(
    conn: &Connection,
    date: &NaiveDate,
    employee_id: &str,
    c: &Correction,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO corrections
            (id, date, employee_id, original_event_id, proposed_timestamp,
             justification, requested_by_id, requested_by_name, requested_at,
             approver_id, approver_name, status, integrity_tag, evidence)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            c.id.to_string(),
            date.to_string(),
            employee_id,
            c.original_event_id.to_string(),
            c.proposed_timestamp,
            c.justification,
            c.requested_by_id,
            c.requested_by_name,
            c.requested_at,
            c.approver_id,
            c.approver_name,
            c.status.to_db_str(),
            c.integrity_tag,
            serde_json::to_string(&c.evidence)?,
        ],
    )?;
    Ok(())
}

/// Status transitions only ever touch status + approver columns; every other
/// correction field is immutable once stored.
pub fn update_correction_status(conn: &Connection, c: &Correction) -> AppResult<()> {
    conn.execute(
        "UPDATE corrections
         SET status = ?1, approver_id = ?2, approver_name = ?3
         WHERE id = ?4",
        params![
            c.status.to_db_str(),
            c.approver_id,
            c.approver_name,
            c.id.to_string(),
        ],
    )?;
    Ok(())
}

pub fn find_correction(conn: &Connection, id: Uuid) -> AppResult<Option<(NaiveDate, String, Correction)>> {
    let mut stmt = conn.prepare("SELECT * FROM corrections WHERE id = ?1")?;
    let mut rows = stmt.query_map([id.to_string()], |row| {
        let date: String = row.get("date")?;
        let employee_id: String = row.get("employee_id")?;
        let c = map_correction_row(row)?;
        Ok((date, employee_id, c))
    })?;

    match rows.next() {
        Some(r) => {
            let (date_str, employee_id, c) = r?;
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .map_err(|_| AppError::InvalidDate(date_str))?;
            Ok(Some((date, employee_id, c)))
        }
        None => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Inconsistencies
// ---------------------------------------------------------------------------

pub fn map_inconsistency_row(row: &Row) -> Result<Inconsistency> {
    let id: String = row.get("id")?;
    let kind_str: String = row.get("kind")?;
    let kind = InconsistencyKind::from_db_str(&kind_str)
        .ok_or_else(|| bad_column(AppError::Other(format!("invalid kind: {}", kind_str))))?;

    let severity_str: String = row.get("severity")?;
    let severity = Severity::from_db_str(&severity_str).ok_or_else(|| {
        bad_column(AppError::Other(format!("invalid severity: {}", severity_str)))
    })?;

    let involved: String = row.get("involved_event_ids")?;
    let involved: Vec<Uuid> =
        serde_json::from_str(&involved).map_err(|e| bad_column(AppError::Serde(e)))?;

    let resolution: Option<String> = row.get("resolution")?;
    let resolution: Option<Resolution> = match resolution {
        Some(ref s) if !s.is_empty() => {
            Some(serde_json::from_str(s).map_err(|e| bad_column(AppError::Serde(e)))?)
        }
        _ => None,
    };

    Ok(Inconsistency {
        id: parse_uuid(&id)?,
        kind,
        description: row.get("description")?,
        involved_event_ids: involved,
        detected_at: row.get("detected_at")?,
        severity,
        resolved: row.get::<_, i32>("resolved")? == 1,
        resolution,
    })
}

pub fn load_inconsistencies_by_day(
    conn: &Connection,
    date: &NaiveDate,
    employee_id: &str,
) -> AppResult<Vec<Inconsistency>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM inconsistencies
         WHERE date = ?1 AND employee_id = ?2
         ORDER BY detected_at ASC",
    )?;

    let rows = stmt.query_map(
        params![date.to_string(), employee_id],
        map_inconsistency_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Findings are rewritten wholesale on every save: unresolved ones are
/// re-derived at validation time, so rows that disappeared from the record
/// must disappear from storage too.
pub fn delete_inconsistencies_for_day(
    conn: &Connection,
    date: &NaiveDate,
    employee_id: &str,
) -> AppResult<()> {
    conn.execute(
        "DELETE FROM inconsistencies WHERE date = ?1 AND employee_id = ?2",
        params![date.to_string(), employee_id],
    )?;
    Ok(())
}

pub fn upsert_inconsistency(
    conn: &Connection,
    date: &NaiveDate,
    employee_id: &str,
    inc: &Inconsistency,
) -> AppResult<()> {
    let resolution = match &inc.resolution {
        Some(res) => Some(serde_json::to_string(res)?),
        None => None,
    };

    conn.execute(
        "INSERT INTO inconsistencies
            (id, date, employee_id, kind, description, involved_event_ids,
             detected_at, severity, resolved, resolution)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
         ON CONFLICT(id) DO UPDATE SET
            resolved = excluded.resolved,
            resolution = excluded.resolution",
        params![
            inc.id.to_string(),
            date.to_string(),
            employee_id,
            inc.kind.to_db_str(),
            inc.description,
            serde_json::to_string(&inc.involved_event_ids)?,
            inc.detected_at,
            inc.severity.to_db_str(),
            if inc.resolved { 1 } else { 0 },
            resolution,
        ],
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Days
// ---------------------------------------------------------------------------

pub fn load_day_flags(
    conn: &Connection,
    date: &NaiveDate,
    employee_id: &str,
) -> AppResult<Option<bool>> {
    let mut stmt =
        conn.prepare("SELECT locked FROM days WHERE date = ?1 AND employee_id = ?2")?;
    let mut rows = stmt.query_map(params![date.to_string(), employee_id], |row| {
        row.get::<_, i32>(0)
    })?;
    match rows.next() {
        Some(r) => Ok(Some(r? == 1)),
        None => Ok(None),
    }
}

pub fn upsert_day(
    conn: &Connection,
    date: &NaiveDate,
    employee_id: &str,
    locked: bool,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO days (date, employee_id, locked)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(date, employee_id) DO UPDATE SET locked = excluded.locked",
        params![date.to_string(), employee_id, if locked { 1 } else { 0 }],
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

pub fn map_employee_row(row: &Row) -> Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        pin_hash: row.get("pin_hash")?,
        active: row.get::<_, i32>("active")? == 1,
    })
}

pub fn load_roster(conn: &Connection) -> AppResult<Vec<Employee>> {
    let mut stmt = conn.prepare("SELECT * FROM employees ORDER BY name ASC")?;
    let rows = stmt.query_map([], map_employee_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_employee(conn: &Connection, id: &str) -> AppResult<Option<Employee>> {
    let mut stmt = conn.prepare("SELECT * FROM employees WHERE id = ?1")?;
    let mut rows = stmt.query_map([id], map_employee_row)?;
    match rows.next() {
        Some(r) => Ok(Some(r?)),
        None => Ok(None),
    }
}

pub fn upsert_employee(conn: &Connection, emp: &Employee) -> AppResult<()> {
    conn.execute(
        "INSERT INTO employees (id, name, pin_hash, active)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            pin_hash = excluded.pin_hash,
            active = excluded.active",
        params![
            emp.id,
            emp.name,
            emp.pin_hash,
            if emp.active { 1 } else { 0 }
        ],
    )?;
    Ok(())
}
