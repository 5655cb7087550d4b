#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rti() -> Command {
    cargo_bin_cmd!("rscorelog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rscorelog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rscorelog_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Run a command against `db_path` in test mode and return its stdout.
pub fn run_ok(db_path: &str, args: &[&str]) -> String {
    let out = rti()
        .args(["--db", db_path, "--test"])
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8_lossy(&out).to_string()
}

/// Extract the event id printed by `add` (`[id 1234]`).
pub fn added_id(stdout: &str) -> String {
    let start = stdout.find("[id ").expect("id in add output") + 4;
    let end = stdout[start..].find(']').expect("closing bracket") + start;
    stdout[start..end].to_string()
}

/// Initialize DB, create season "Alpha" (initial 1000) and record:
/// 10:00 win, 11:00 lose, 12:00 win, 13:00 win
pub fn init_db_with_data(db_path: &str) {
    // init DB (creates tables)
    rti()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    run_ok(db_path, &["season", "add", "Alpha", "--initial", "1000"]);

    for (flag, time) in [
        ("--win", "2025-03-01 10:00"),
        ("--lose", "2025-03-01 11:00"),
        ("--win", "2025-03-01 12:00"),
        ("--win", "2025-03-01 13:00"),
    ] {
        run_ok(db_path, &["add", flag, "--time", time]);
    }
}
