//! Record store abstraction over the `jcr` table.
//!
//! Reads go through a cache of the full record set; every successful write
//! drops the cache before returning, so the next read sees the new rows.

use crate::db::initialize::init_db;
use crate::db::log::jcrlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::{JobCardRecord, Status};
use crate::utils::date::format_job_date;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;

/// Which rows an update touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchPredicate {
    /// A single entry; zero matches is not an error.
    Uid(String),
    /// Exactly these entries; any missing one aborts the update.
    Snapshot(Vec<String>),
    /// Every entry of `team` on `date` whose employee is in `members`.
    TeamDateMembers {
        team: String,
        date: NaiveDate,
        members: Vec<String>,
    },
}

impl MatchPredicate {
    pub fn matches(&self, r: &JobCardRecord) -> bool {
        match self {
            MatchPredicate::Uid(uid) => r.uid == *uid,
            MatchPredicate::Snapshot(uids) => uids.contains(&r.uid),
            MatchPredicate::TeamDateMembers {
                team,
                date,
                members,
            } => r.team == *team && r.job_date == *date && members.contains(&r.employee_name),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            MatchPredicate::Uid(uid) => format!("entry {uid}"),
            MatchPredicate::Snapshot(uids) => format!("{} selected entries", uids.len()),
            MatchPredicate::TeamDateMembers {
                team,
                date,
                members,
            } => format!(
                "team {team} on {} ({} members)",
                format_job_date(date),
                members.len()
            ),
        }
    }
}

/// The only columns the update flow may change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateFields {
    pub finish_time: NaiveTime,
    pub status: Status,
    pub remarks: String,
}

pub trait RecordStore {
    /// Full record set, served from cache when possible.
    fn read_all(&mut self) -> AppResult<&[JobCardRecord]>;

    /// Insert all records atomically; returns how many were written.
    fn insert_many(&mut self, records: &[JobCardRecord]) -> AppResult<usize>;

    /// Apply `fields` to the rows matched by `predicate`; returns rows affected.
    fn update_where(&mut self, predicate: &MatchPredicate, fields: &UpdateFields)
    -> AppResult<usize>;

    /// Drop cached reads.
    fn invalidate(&mut self);
}

pub struct SqliteStore {
    pool: DbPool,
    cache: Option<Vec<JobCardRecord>>,
}

impl SqliteStore {
    /// Open (and migrate) the database at `path`.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        Self::from_pool(pool)
    }

    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self { pool, cache: None })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }
}

impl RecordStore for SqliteStore {
    fn read_all(&mut self) -> AppResult<&[JobCardRecord]> {
        if self.cache.is_none() {
            let records = queries::load_all(&self.pool.conn)?;
            tracing::debug!(rows = records.len(), "loaded jcr register");
            self.cache = Some(records);
        }
        Ok(self.cache.as_deref().unwrap_or_default())
    }

    fn insert_many(&mut self, records: &[JobCardRecord]) -> AppResult<usize> {
        let written = self
            .pool
            .with_conn(|conn| queries::insert_many(conn, records))?;
        self.invalidate();

        if written > 0 {
            let uids: Vec<&str> = records.iter().map(|r| r.uid.as_str()).collect();
            jcrlog_quiet(
                &self.pool.conn,
                "create",
                &uids.join(","),
                &format!("Inserted {} entries", written),
            );
        }
        Ok(written)
    }

    fn update_where(
        &mut self,
        predicate: &MatchPredicate,
        fields: &UpdateFields,
    ) -> AppResult<usize> {
        let rows = self
            .pool
            .with_conn(|conn| queries::update_where(conn, predicate, fields))?;
        self.invalidate();

        jcrlog_quiet(
            &self.pool.conn,
            "update",
            &predicate.describe(),
            &format!(
                "Set Finish_Time={}, Status={} on {} entries",
                fields.finish_time.format("%H:%M"),
                fields.status,
                rows
            ),
        );
        Ok(rows)
    }

    fn invalidate(&mut self) {
        self.cache = None;
    }
}
