//! Integrity tagger: a deterministic fingerprint over a record's immutable
//! fields, used to detect tampering or corruption.
//!
//! The tag is a keyed SHA-256 over a canonical field encoding. Same fields,
//! same tag; any field change changes the tag. Verification fails closed:
//! a missing field or malformed timestamp makes the record untrusted.

use crate::models::correction::Correction;
use crate::models::punch::PunchEvent;
use sha2::{Digest, Sha256};

/// Field separator chosen so that adjacent fields cannot be confused when
/// concatenated (0x1f never appears in the encoded values).
const SEP: u8 = 0x1f;

pub fn tag_fields(key: &str, parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    for p in parts {
        hasher.update([SEP]);
        hasher.update(p.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Tag over an event's immutable identity fields: id, kind, timestamp,
/// employee and version. Never includes the tag itself.
pub fn event_tag(key: &str, ev: &PunchEvent) -> String {
    let id = ev.id.to_string();
    let version = ev.version.to_string();
    tag_fields(
        key,
        &[
            &id,
            ev.kind.to_db_str(),
            &ev.timestamp,
            &ev.employee_id,
            &version,
        ],
    )
}

/// Tag over a correction's own immutable fields.
pub fn correction_tag(key: &str, c: &Correction) -> String {
    let id = c.id.to_string();
    let original = c.original_event_id.to_string();
    tag_fields(
        key,
        &[
            &id,
            &original,
            &c.proposed_timestamp,
            &c.requested_by_id,
            &c.requested_at,
        ],
    )
}

/// Recompute and compare. Any malformed input means untrusted.
pub fn verify_event(key: &str, ev: &PunchEvent) -> bool {
    if ev.integrity_tag.is_empty() || ev.employee_id.is_empty() {
        return false;
    }
    if ev.parsed_timestamp().is_none() {
        return false;
    }
    event_tag(key, ev) == ev.integrity_tag
}

pub fn verify_correction(key: &str, c: &Correction) -> bool {
    if c.integrity_tag.is_empty() || c.requested_by_id.is_empty() {
        return false;
    }
    if crate::utils::time::parse_timestamp(&c.proposed_timestamp).is_none() {
        return false;
    }
    correction_tag(key, c) == c.integrity_tag
}

/// Digest used for roster PINs; same construction, different concern.
pub fn pin_hash(key: &str, pin: &str) -> String {
    tag_fields(key, &["pin", pin])
}
