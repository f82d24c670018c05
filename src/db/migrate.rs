use crate::errors::AppResult;
use rusqlite::{Connection, OptionalExtension};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
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

fn table_exists(conn: &Connection, name: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the `jcr` table. Column names are fixed: existing registers
/// produced by other tools are opened as-is.
fn create_jcr_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS jcr (
            Job_UID        TEXT PRIMARY KEY NOT NULL,
            Job_Created_At TEXT NOT NULL,
            Job_Created_By TEXT NOT NULL,
            Job_Date       TEXT NOT NULL,
            Employee_Team  TEXT NOT NULL DEFAULT '',
            Employee_Name  TEXT NOT NULL DEFAULT '',
            Presence       TEXT NOT NULL DEFAULT 'Y' CHECK(Presence IN ('Y','N')),
            Project        TEXT NOT NULL DEFAULT '',
            PHASE_SPACE    TEXT NOT NULL DEFAULT '',
            Product        TEXT NOT NULL DEFAULT '',
            Part_number    TEXT NOT NULL DEFAULT '',
            Part_Name      TEXT NOT NULL DEFAULT '',
            Task           TEXT NOT NULL DEFAULT '',
            Task_Q         INTEGER NOT NULL DEFAULT 0 CHECK(Task_Q BETWEEN 0 AND 100),
            Start_Time     TEXT NOT NULL,
            Finish_Time    TEXT NOT NULL,
            Status         TEXT NOT NULL DEFAULT 'TBS' CHECK(Status IN ('TBS','WIP','DONE','HOLD')),
            Remarks        TEXT NOT NULL DEFAULT ''
        );
        "#,
    )?;
    Ok(())
}

/// Create the table holding serialized workflow sessions.
fn create_sessions_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id         TEXT PRIMARY KEY NOT NULL,
            state      TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    tracing::info!(version, "migration applied");
    Ok(())
}

/// Lookup indexes used by the update flow (team → date → members).
fn migrate_add_lookup_indexes(conn: &Connection) -> AppResult<()> {
    let version = "20240712_0001_jcr_lookup_indexes";
    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_jcr_team_date ON jcr(Employee_Team, Job_Date);
        CREATE INDEX IF NOT EXISTS idx_jcr_employee ON jcr(Employee_Name);
        "#,
    )?;

    mark_applied(conn, version, "Added team/date and employee indexes to jcr")
}

/// Registers imported from elsewhere may lack the primary key on Job_UID.
fn migrate_unique_uid(conn: &Connection) -> AppResult<()> {
    let version = "20240712_0002_jcr_unique_uid";
    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch("CREATE UNIQUE INDEX IF NOT EXISTS idx_jcr_uid ON jcr(Job_UID);")?;

    mark_applied(conn, version, "Enforced unique Job_UID on jcr")
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "jcr")? {
        create_jcr_table(conn)?;
        tracing::info!("created jcr table");
    }

    create_sessions_table(conn)?;

    migrate_add_lookup_indexes(conn)?;
    migrate_unique_uid(conn)?;

    Ok(())
}
