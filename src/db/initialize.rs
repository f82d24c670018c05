use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use crate::models::job_card::COLUMNS;
use rusqlite::Connection;

/// Bring the schema up to date, then make sure the `jcr` table carries
/// every register column. Registers created elsewhere are used as-is, so a
/// missing column is reported instead of added.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('jcr')")?;
    let present: Vec<String> = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<_, _>>()?;

    let missing: Vec<&str> = COLUMNS
        .iter()
        .copied()
        .filter(|c| !present.iter().any(|p| p.eq_ignore_ascii_case(c)))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::Migration(format!(
            "jcr table is missing columns: {}",
            missing.join(", ")
        )));
    }
    Ok(())
}
