use predicates::str::contains;
use std::path::Path;

mod common;
use common::{init_db_with_data, rti, setup_test_db, temp_out};

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("it_init");

    rti()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(Path::new(&db_path).exists());

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    for table in ["seasons", "events", "settings", "log"] {
        let n: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(n, 1, "missing table {table}");
    }
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("it_db_info");
    init_db_with_data(&db_path);

    rti()
        .args(["--db", &db_path, "--test", "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Seasons:"))
        .stdout(contains("Score events:"))
        .stdout(contains("2025-03-01 10:00"))
        .stdout(contains("Integrity check passed"));
}

#[test]
fn test_log_records_mutations() {
    let db_path = setup_test_db("it_log");
    init_db_with_data(&db_path);

    rti()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("Internal log"))
        .stdout(contains("init"))
        .stdout(contains("season_add"))
        .stdout(contains("migration_applied"))
        .stdout(contains("score 1023 at 2025-03-01 13:00"));
}

#[test]
fn test_backup_plain_and_compressed() {
    let db_path = setup_test_db("it_backup");
    init_db_with_data(&db_path);

    let plain = temp_out("it_backup_plain", "sqlite");
    rti()
        .args(["--db", &db_path, "--test", "backup", "--file", &plain])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(Path::new(&plain).exists());

    let zipped = temp_out("it_backup_zip", "sqlite");
    let zip_path = Path::new(&zipped).with_extension("zip");
    std::fs::remove_file(&zip_path).ok();
    rti()
        .args(["--db", &db_path, "--test", "backup", "--file", &zipped, "--compress"])
        .assert()
        .success();
    assert!(zip_path.exists());
    assert!(!Path::new(&zipped).exists());
}

#[test]
fn test_config_print_in_test_mode() {
    let db_path = setup_test_db("it_config");

    rti()
        .args(["--db", &db_path, "--test", "config", "--print"])
        .assert()
        .success()
        .stdout(contains("timezone: Local"))
        .stdout(contains("default_view: streak"))
        .stdout(contains(db_path.as_str()));
}

#[test]
fn test_unknown_season_is_reported() {
    let db_path = setup_test_db("it_unknown_season");
    init_db_with_data(&db_path);

    rti()
        .args(["--db", &db_path, "--test", "list", "--season", "nope"])
        .assert()
        .failure()
        .stderr(contains("Error: Season not found: nope"));
}
