#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

use rponto::models::punch::{PunchEvent, PunchKind};

pub fn rpo() -> Command {
    cargo_bin_cmd!("rponto")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rponto.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize DB schema and register a default employee "e1"
pub fn init_db_with_roster(db_path: &str) {
    rpo()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    rpo()
        .args([
            "--db", db_path, "--test", "roster", "--add", "e1", "--name", "Ada Souza",
        ])
        .assert()
        .success();
}

/// Build an event with a plain naive timestamp, the shape library tests use.
pub fn ev(kind: PunchKind, ts: &str) -> PunchEvent {
    PunchEvent::new(kind, ts.to_string(), "e1")
}
