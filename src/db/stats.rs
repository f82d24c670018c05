use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::date::{format_job_date, parse_job_date};
use rusqlite::Connection;
use std::fs;

/// Summary of the register file, as printed by `jcr db --info`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DbInfo {
    pub entries: i64,
    pub teams: i64,
    pub employees: i64,
    pub sessions: i64,
    pub first_date: Option<chrono::NaiveDate>,
    pub last_date: Option<chrono::NaiveDate>,
}

pub fn collect(conn: &Connection) -> AppResult<DbInfo> {
    let (entries, teams, employees): (i64, i64, i64) = conn.query_row(
        "SELECT COUNT(*), COUNT(DISTINCT Employee_Team), COUNT(DISTINCT Employee_Name) FROM jcr",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;
    let sessions: i64 = conn.query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?;

    // Job_Date is stored as DD/MM/YYYY, which does not sort as text.
    let mut stmt = conn.prepare("SELECT DISTINCT Job_Date FROM jcr")?;
    let dates: Vec<String> = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<_, _>>()?;
    let parsed: Vec<_> = dates.iter().filter_map(|d| parse_job_date(d)).collect();

    Ok(DbInfo {
        entries,
        teams,
        employees,
        sessions,
        first_date: parsed.iter().min().copied(),
        last_date: parsed.iter().max().copied(),
    })
}

pub fn print_db_info(conn: &Connection, db_path: &str) -> AppResult<()> {
    let info = collect(conn)?;
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);
    println!(
        "{}• Total entries:{} {}{}{}",
        CYAN, RESET, GREEN, info.entries, RESET
    );
    println!("{}• Teams:{} {}", CYAN, RESET, info.teams);
    println!("{}• Employees:{} {}", CYAN, RESET, info.employees);
    println!("{}• Workflow sessions:{} {}", CYAN, RESET, info.sessions);

    let show = |d: Option<chrono::NaiveDate>| {
        d.map(|d| format_job_date(&d))
            .unwrap_or_else(|| format!("{GREY}--{RESET}"))
    };
    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", show(info.first_date));
    println!("    to:   {}", show(info.last_date));

    if let (Some(f), Some(l)) = (info.first_date, info.last_date) {
        let days = (l - f).num_days().max(1);
        let avg = info.entries as f64 / days as f64;
        println!("{}• Average entries/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}
