//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid timestamp format: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid punch kind: {0}")]
    InvalidPunchKind(String),

    // ---------------------------
    // Domain errors
    // ---------------------------
    #[error("Unknown employee: {0}")]
    UnknownEmployee(String),

    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    #[error("Unknown correction: {0}")]
    UnknownCorrection(String),

    #[error("Unknown inconsistency: {0}")]
    UnknownInconsistency(String),

    #[error("Day {0} is locked: direct punches are not allowed, propose a correction instead")]
    DayLocked(String),

    #[error("Integrity check failed for event {0}: record is untrusted")]
    IntegrityFailure(String),

    #[error("Correction rejected: {0}")]
    CorrectionRejected(String),

    #[error("Correction {0} is already in a terminal state ({1})")]
    CorrectionFinal(String, String),

    #[error("Wrong PIN for employee {0}")]
    WrongPin(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
