use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_data, rti, run_ok, setup_test_db, temp_out};

#[test]
fn test_full_csv_round_trip() {
    let db_path = setup_test_db("ei_roundtrip_src");
    init_db_with_data(&db_path);
    let out = temp_out("ei_roundtrip", "csv");

    rti()
        .args(["--db", &db_path, "--test", "export", "--file", &out])
        .assert()
        .success()
        .stdout(contains("export completed"));

    let text = fs::read_to_string(&out).unwrap();
    let (body, footer) = text.split_once("\n\n").unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines[0], "赛季ID,赛季名称,初始分数,记录ID,分数,时间");
    assert_eq!(lines.len(), 6);
    assert!(lines[1].ends_with(",1000,0000-00-00 00:00"));
    assert!(footer.starts_with("统计信息\n导出时间,"));
    assert!(footer.ends_with("总赛季数,1\n总记录数,4\n"));

    let target = setup_test_db("ei_roundtrip_dst");
    rti().args(["--db", &target, "--test", "init"]).assert().success();
    rti()
        .args(["--db", &target, "--test", "import", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Imported 1 season(s) and 4 event(s)"));

    // imported season became current, with the same streaks
    let listed = run_ok(&target, &["list"]);
    assert!(listed.contains("Alpha"));
    assert!(listed.contains("连胜2场"));

    // a second import adds nothing
    rti()
        .args(["--db", &target, "--test", "import", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Imported 0 season(s) and 0 event(s)"))
        .stdout(contains("5 row(s) already present"));
}

#[test]
fn test_season_and_view_exports() {
    let db_path = setup_test_db("ei_views");
    init_db_with_data(&db_path);

    let streak = temp_out("ei_views_streak", "csv");
    run_ok(&db_path, &["export", "--file", &streak, "--view", "streak"]);
    assert_eq!(
        fs::read_to_string(&streak).unwrap(),
        "时间,分数,连胜连败状态\n\
         2025-03-01 10:00,1010,\n\
         2025-03-01 11:00,1000,连败1场\n\
         2025-03-01 12:00,1010,\n\
         2025-03-01 13:00,1023,连胜2场\n"
    );

    let hourly = temp_out("ei_views_hourly", "csv");
    run_ok(&db_path, &["export", "--file", &hourly, "--view", "hourly"]);
    let text = fs::read_to_string(&hourly).unwrap();
    assert!(text.starts_with("时间段,总场数,胜利场数,失败场数,胜率,败率\n"));
    assert!(text.contains("周末 11:00-12:00,1,0,1,0%,100%"));

    let json = temp_out("ei_views_json", "json");
    run_ok(&db_path, &["export", "--file", &json, "--format", "json"]);
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(v["seasons"][0]["name"], "Alpha");
    assert_eq!(v["seasons"][0]["records"].as_array().unwrap().len(), 5);
}

#[test]
fn test_season_import_skips_existing_times() {
    let db_path = setup_test_db("ei_season_import");
    init_db_with_data(&db_path);

    let file = temp_out("ei_season_import", "csv");
    fs::write(
        &file,
        "时间,分数,连胜连败状态\n\
         2025-03-01 13:00,1023,连胜2场\n\
         \n\
         2025-03-02 10:00,1033,\n",
    )
    .unwrap();

    rti()
        .args(["--db", &db_path, "--test", "import", "--file", &file])
        .assert()
        .success()
        .stdout(contains("Imported 0 season(s) and 1 event(s)"))
        .stdout(contains("1 row(s) already present"));

    let listed = run_ok(&db_path, &["list"]);
    assert!(listed.contains("Records: 5"));
}

#[test]
fn test_malformed_import_changes_nothing() {
    let db_path = setup_test_db("ei_malformed");
    rti().args(["--db", &db_path, "--test", "init"]).assert().success();

    let file = temp_out("ei_malformed", "csv");
    fs::write(
        &file,
        "赛季ID,赛季名称,初始分数,记录ID,分数,时间\n\
         1,A,1000,initial_1,1000,0000-00-00 00:00\n\
         1,A,1000,x,abc,2025-03-01 10:00\n",
    )
    .unwrap();

    rti()
        .args(["--db", &db_path, "--test", "import", "--file", &file])
        .assert()
        .failure()
        .stderr(contains("line 3"));

    rti()
        .args(["--db", &db_path, "--test", "season", "list"])
        .assert()
        .success()
        .stdout(contains("No seasons yet"));
}

#[test]
fn test_export_refuses_overwrite_without_confirmation() {
    let db_path = setup_test_db("ei_overwrite");
    init_db_with_data(&db_path);
    let out = temp_out("ei_overwrite", "csv");
    fs::write(&out, "keep me").unwrap();

    rti()
        .args(["--db", &db_path, "--test", "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Export cancelled"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    run_ok(&db_path, &["export", "--file", &out, "--force"]);
    assert!(fs::read_to_string(&out).unwrap().starts_with("赛季ID"));
}
