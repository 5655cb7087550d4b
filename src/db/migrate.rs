use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the `seasons` table. Row order (rowid) is the creation order.
fn create_seasons_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS seasons (
            id            TEXT PRIMARY KEY,
            name          TEXT NOT NULL,
            initial_score INTEGER NOT NULL DEFAULT 0,
            create_time   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the `events` table. Ids are unique per season, not globally.
fn create_events_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            season_id  TEXT NOT NULL,
            id         TEXT NOT NULL,
            score      INTEGER NOT NULL CHECK(score BETWEEN 0 AND 10000),
            time       TEXT NOT NULL,
            timestamp  INTEGER NOT NULL,
            PRIMARY KEY (season_id, id)
        );

        CREATE INDEX IF NOT EXISTS idx_events_season_ts ON events(season_id, timestamp);
        "#,
    )?;
    Ok(())
}

/// Key/value settings (current season pointer).
fn create_settings_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

pub fn is_migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_migration_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Index used to reject a second event at the same time in a season.
fn migrate_add_time_index(conn: &Connection) -> Result<()> {
    let version = "20250310_0002_events_season_time_index";

    if is_migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_events_season_time ON events(season_id, time);",
    )?;

    mark_migration_applied(conn, version, "Added (season_id, time) index to events")?;

    success(format!(
        "Migration applied: {} → added time index to events table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invocata da db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Base schema
    let fresh = !table_exists(conn, "events")?;

    create_seasons_table(conn)?;
    create_events_table(conn)?;
    create_settings_table(conn)?;

    if fresh {
        success("Created seasons/events tables.");
    }

    // 3) Versioned migrations
    migrate_add_time_index(conn)?;

    Ok(())
}
