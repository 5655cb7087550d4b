use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = cfg.database.clone();

    println!("⚙️  Initializing rScorelog…");

    let pool = DbPool::open(&db_path)?;
    println!("✅ Database initialized at {}", &db_path);

    // log interno (non bloccante)
    log::ttlog_quiet(
        &pool.conn,
        "init",
        &db_path,
        &format!("Database initialized at {}", &db_path),
    );

    println!("🎉 rScorelog initialization completed!");
    Ok(())
}
