use crate::errors::{AppError, AppResult};
use crate::models::score_event::ScoreEvent;
use crate::models::season::Season;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const CURRENT_SEASON_KEY: &str = "current_season_id";

pub fn map_season(row: &Row) -> Result<Season> {
    Ok(Season {
        id: row.get("id")?,
        name: row.get("name")?,
        initial_score: row.get("initial_score")?,
        create_time: row.get("create_time")?,
    })
}

pub fn map_event(row: &Row) -> Result<ScoreEvent> {
    Ok(ScoreEvent {
        id: row.get("id")?,
        score: row.get("score")?,
        time: row.get("time")?,
        timestamp: row.get("timestamp")?,
    })
}

// ---------------------------
// Seasons
// ---------------------------

pub fn load_seasons(conn: &Connection) -> AppResult<Vec<Season>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, initial_score, create_time
         FROM seasons
         ORDER BY rowid ASC",
    )?;

    let rows = stmt.query_map([], map_season)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_season(conn: &Connection, id: &str) -> AppResult<Option<Season>> {
    let season = conn
        .query_row(
            "SELECT id, name, initial_score, create_time FROM seasons WHERE id = ?1",
            [id],
            map_season,
        )
        .optional()?;
    Ok(season)
}

pub fn insert_season(conn: &Connection, season: &Season) -> AppResult<()> {
    conn.execute(
        "INSERT INTO seasons (id, name, initial_score, create_time)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            season.id,
            season.name,
            season.initial_score,
            season.create_time
        ],
    )?;
    Ok(())
}

pub fn rename_season(conn: &Connection, id: &str, name: &str) -> AppResult<()> {
    let n = conn.execute("UPDATE seasons SET name = ?1 WHERE id = ?2", params![name, id])?;
    if n == 0 {
        return Err(AppError::SeasonNotFound(id.to_string()));
    }
    Ok(())
}

/// Delete a season together with all of its events.
pub fn delete_season(conn: &mut Connection, id: &str) -> AppResult<()> {
    let tx = conn.transaction()?;

    tx.execute("DELETE FROM events WHERE season_id = ?1", [id])?;
    let n = tx.execute("DELETE FROM seasons WHERE id = ?1", [id])?;

    if n == 0 {
        // tx dropped → rollback
        return Err(AppError::SeasonNotFound(id.to_string()));
    }

    tx.commit()?;
    Ok(())
}

// ---------------------------
// Current season pointer
// ---------------------------

pub fn load_current_season_id(conn: &Connection) -> AppResult<Option<String>> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key = ?1",
            [CURRENT_SEASON_KEY],
            |row| row.get(0),
        )
        .optional()?;

    // an empty value means "no current season"
    Ok(value.filter(|v| !v.is_empty()))
}

pub fn save_current_season_id(conn: &Connection, id: Option<&str>) -> AppResult<()> {
    conn.execute(
        "INSERT INTO settings (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![CURRENT_SEASON_KEY, id.unwrap_or("")],
    )?;
    Ok(())
}

// ---------------------------
// Events
// ---------------------------

/// All events of a season, initial event included, in storage order.
pub fn load_events(conn: &Connection, season_id: &str) -> AppResult<Vec<ScoreEvent>> {
    let mut stmt = conn.prepare(
        "SELECT id, score, time, timestamp
         FROM events
         WHERE season_id = ?1
         ORDER BY rowid ASC",
    )?;

    let rows = stmt.query_map([season_id], map_event)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_event(conn: &Connection, season_id: &str, ev: &ScoreEvent) -> AppResult<()> {
    conn.execute(
        "INSERT INTO events (season_id, id, score, time, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![season_id, ev.id, ev.score, ev.time, ev.timestamp],
    )?;
    Ok(())
}

pub fn update_event_score(
    conn: &Connection,
    season_id: &str,
    event_id: &str,
    score: i64,
) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE events SET score = ?1 WHERE season_id = ?2 AND id = ?3",
        params![score, season_id, event_id],
    )?;
    if n == 0 {
        return Err(AppError::EventNotFound(event_id.to_string()));
    }
    Ok(())
}

pub fn delete_event(conn: &Connection, season_id: &str, event_id: &str) -> AppResult<()> {
    let n = conn.execute(
        "DELETE FROM events WHERE season_id = ?1 AND id = ?2",
        params![season_id, event_id],
    )?;
    if n == 0 {
        return Err(AppError::EventNotFound(event_id.to_string()));
    }
    Ok(())
}

/// Insert a batch of seasons and events atomically.
pub fn insert_batch(
    conn: &mut Connection,
    seasons: &[Season],
    events: &[(String, ScoreEvent)],
) -> AppResult<()> {
    let tx = conn.transaction()?;

    for s in seasons {
        insert_season(&tx, s)?;
    }
    for (season_id, ev) in events {
        insert_event(&tx, season_id, ev)?;
    }

    tx.commit()?;
    Ok(())
}

pub fn count_rows(conn: &Connection, table: &str) -> AppResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    Ok(conn.query_row(&sql, [], |row| row.get(0))?)
}
