use crate::db::store::{MatchPredicate, UpdateFields};
use crate::errors::{AppError, AppResult};
use crate::models::job_card::{CLOCK_FORMAT, JOB_DATE_FORMAT};
use crate::models::{JobCardRecord, Presence, Status};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::types::Type;
use rusqlite::{Connection, Result, Row, ToSql, Transaction, params, params_from_iter};

const SELECT_ALL: &str = "SELECT Job_UID, Job_Created_At, Job_Created_By, Job_Date, Employee_Team,
        Employee_Name, Presence, Project, PHASE_SPACE, Product, Part_number, Part_Name, Task,
        Task_Q, Start_Time, Finish_Time, Status, Remarks
     FROM jcr";

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, Type::Text, Box::new(err))
}

/// Text column that older registers may have left NULL.
fn text_or_empty(row: &Row, col: &str) -> Result<String> {
    Ok(row.get::<_, Option<String>>(col)?.unwrap_or_default())
}

pub fn map_row(row: &Row) -> Result<JobCardRecord> {
    let date_str: String = row.get("Job_Date")?;
    let job_date = NaiveDate::parse_from_str(date_str.trim(), JOB_DATE_FORMAT)
        .map_err(|_| conversion_error(3, AppError::InvalidDate(date_str.clone())))?;

    let start_str: String = row.get("Start_Time")?;
    let start_time = NaiveTime::parse_from_str(start_str.trim(), CLOCK_FORMAT)
        .map_err(|_| conversion_error(14, AppError::InvalidTime(start_str.clone())))?;

    let finish_str: String = row.get("Finish_Time")?;
    let finish_time = NaiveTime::parse_from_str(finish_str.trim(), CLOCK_FORMAT)
        .map_err(|_| conversion_error(15, AppError::InvalidTime(finish_str.clone())))?;

    let presence_str: String = row.get("Presence")?;
    let presence = Presence::from_db_str(&presence_str).ok_or_else(|| {
        conversion_error(
            6,
            AppError::Validation(format!("Invalid presence: {}", presence_str)),
        )
    })?;

    let status_str: String = row.get("Status")?;
    let status = Status::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(
            16,
            AppError::Validation(format!("Invalid status: {}", status_str)),
        )
    })?;

    let qty: i64 = row.get("Task_Q")?;
    let task_quantity = u8::try_from(qty)
        .ok()
        .filter(|q| *q <= 100)
        .ok_or_else(|| {
            conversion_error(13, AppError::Validation(format!("Task_Q out of range: {}", qty)))
        })?;

    Ok(JobCardRecord {
        uid: row.get("Job_UID")?,
        created_at: text_or_empty(row, "Job_Created_At")?,
        created_by: text_or_empty(row, "Job_Created_By")?,
        job_date,
        team: text_or_empty(row, "Employee_Team")?,
        employee_name: text_or_empty(row, "Employee_Name")?,
        presence,
        project: text_or_empty(row, "Project")?,
        phase_space: text_or_empty(row, "PHASE_SPACE")?,
        product: text_or_empty(row, "Product")?,
        part_number: text_or_empty(row, "Part_number")?,
        part_name: text_or_empty(row, "Part_Name")?,
        task: text_or_empty(row, "Task")?,
        task_quantity,
        start_time,
        finish_time,
        status,
        remarks: text_or_empty(row, "Remarks")?,
    })
}

/// Read the whole register in insertion order.
/// Rows whose dates, times or codes cannot be parsed are skipped.
pub fn load_all(conn: &Connection) -> AppResult<Vec<JobCardRecord>> {
    let mut stmt = conn.prepare(&format!("{SELECT_ALL} ORDER BY rowid ASC"))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        match r {
            Ok(record) => out.push(record),
            Err(
                e @ (rusqlite::Error::FromSqlConversionFailure(..)
                | rusqlite::Error::InvalidColumnType(..)),
            ) => {
                tracing::warn!(error = %e, "skipping unreadable jcr row");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(out)
}

pub fn insert_record(conn: &Connection, r: &JobCardRecord) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO jcr (Job_UID, Job_Created_At, Job_Created_By, Job_Date, Employee_Team,
            Employee_Name, Presence, Project, PHASE_SPACE, Product, Part_number, Part_Name, Task,
            Task_Q, Start_Time, Finish_Time, Status, Remarks)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
    )?;
    stmt.execute(params![
        r.uid,
        r.created_at,
        r.created_by,
        r.job_date_str(),
        r.team,
        r.employee_name,
        r.presence.to_db_str(),
        r.project,
        r.phase_space,
        r.product,
        r.part_number,
        r.part_name,
        r.task,
        r.task_quantity,
        r.start_time_str(),
        r.finish_time_str(),
        r.status.to_db_str(),
        r.remarks,
    ])?;
    Ok(())
}

/// Insert every record or none of them.
pub fn insert_many(conn: &mut Connection, records: &[JobCardRecord]) -> AppResult<usize> {
    if records.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for r in records {
        insert_record(&tx, r)?;
    }
    tx.commit()?;
    Ok(records.len())
}

fn apply_update(
    tx: &Transaction,
    where_sql: &str,
    fields: &UpdateFields,
    keys: &[String],
) -> AppResult<usize> {
    let sql = format!(
        "UPDATE jcr SET Finish_Time = ?, Status = ?, Remarks = ? WHERE {}",
        where_sql
    );

    let finish = fields.finish_time.format(CLOCK_FORMAT).to_string();
    let status = fields.status.to_db_str();
    let mut values: Vec<&dyn ToSql> = vec![&finish, &status, &fields.remarks];
    values.extend(keys.iter().map(|k| k as &dyn ToSql));

    Ok(tx.execute(&sql, params_from_iter(values))?)
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}

/// Apply `fields` to every row matched by `predicate` inside one
/// transaction. A `Snapshot` predicate must hit exactly its UIDs or the
/// statement is rolled back.
pub fn update_where(
    conn: &mut Connection,
    predicate: &MatchPredicate,
    fields: &UpdateFields,
) -> AppResult<usize> {
    let tx = conn.transaction()?;

    let rows = match predicate {
        MatchPredicate::Uid(uid) => {
            apply_update(&tx, "Job_UID = ?", fields, std::slice::from_ref(uid))?
        }
        MatchPredicate::Snapshot(uids) => {
            if uids.is_empty() {
                0
            } else {
                let rows = apply_update(
                    &tx,
                    &format!("Job_UID IN ({})", placeholders(uids.len())),
                    fields,
                    uids,
                )?;
                if rows != uids.len() {
                    // dropping `tx` rolls the statement back
                    return Err(AppError::StaleSelection(format!(
                        "expected to update {} entries but {} still exist",
                        uids.len(),
                        rows
                    )));
                }
                rows
            }
        }
        MatchPredicate::TeamDateMembers {
            team,
            date,
            members,
        } => {
            if members.is_empty() {
                0
            } else {
                let mut keys = vec![team.clone(), date.format(JOB_DATE_FORMAT).to_string()];
                keys.extend(members.iter().cloned());
                apply_update(
                    &tx,
                    &format!(
                        "Employee_Team = ? AND Job_Date = ? AND Employee_Name IN ({})",
                        placeholders(members.len())
                    ),
                    fields,
                    &keys,
                )?
            }
        }
    };

    tx.commit()?;
    Ok(rows)
}

/// Rows of the internal `log` table, oldest first.
pub fn load_log(conn: &Connection) -> AppResult<Vec<(i64, String, String, String, String)>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, IFNULL(target, ''), message FROM log ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
