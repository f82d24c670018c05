use crate::db::store::RecordStore;
use crate::errors::AppResult;
use crate::models::{JobCardRecord, SelectionMode};
use crate::workflow::action::Action;
use crate::workflow::branch::Branch;
use crate::workflow::state::WorkflowSession;
use crate::workflow::transition::{PlanContext, Write, WorkflowPolicy, plan};
use chrono::{Local, NaiveDateTime};

/// Result of a write performed by a committing transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Committed {
    Inserted { uids: Vec<String> },
    Updated { mode: SelectionMode, rows: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub session: WorkflowSession,
    pub committed: Option<Committed>,
}

/// Drives sessions through the create/update flows against a record store.
///
/// `advance` never mutates the session it is given: on error the caller
/// keeps the previous state and may retry.
pub struct Engine<'s, S: RecordStore> {
    store: &'s mut S,
    policy: WorkflowPolicy,
    clock: fn() -> NaiveDateTime,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl<'s, S: RecordStore> Engine<'s, S> {
    pub fn new(store: &'s mut S, policy: WorkflowPolicy) -> Self {
        Self {
            store,
            policy,
            clock: local_now,
        }
    }

    /// Replace the commit-time clock (used to stamp `Job_Created_At`).
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn advance(&mut self, session: &WorkflowSession, action: Action) -> AppResult<Outcome> {
        let from = session.label();
        let action_name = action.name();

        let planned = {
            let records: &[JobCardRecord] = if action.needs_records() {
                self.store.read_all()?
            } else {
                &[]
            };
            let ctx = PlanContext {
                records,
                policy: &self.policy,
                now: (self.clock)(),
            };
            plan(session, action, &ctx).inspect_err(|e| {
                tracing::warn!(from = %from, action = action_name, error = %e, "transition rejected");
            })?
        };

        let committed = match planned.write {
            None => None,
            Some(write) => Some(self.execute(write).inspect_err(|e| {
                if e.is_store_failure() {
                    tracing::error!(from = %from, action = action_name, error = %e, "commit failed");
                } else {
                    tracing::warn!(from = %from, action = action_name, error = %e, "commit refused");
                }
            })?),
        };

        tracing::info!(
            from = %from,
            to = %planned.next.label(),
            action = action_name,
            "workflow transition"
        );

        Ok(Outcome {
            session: planned.next,
            committed,
        })
    }

    fn execute(&mut self, write: Write) -> AppResult<Committed> {
        match write {
            Write::Insert(records) => {
                let written = self.store.insert_many(&records)?;
                tracing::info!(rows = written, "job cards created");
                Ok(Committed::Inserted {
                    uids: records.into_iter().map(|r| r.uid).collect(),
                })
            }
            Write::Update {
                target,
                predicate,
                fields,
            } => {
                let rows = self.store.update_where(&predicate, &fields)?;
                if rows == 0 {
                    tracing::warn!(selection = %predicate.describe(), "update matched no entries");
                } else {
                    tracing::info!(rows, selection = %predicate.describe(), "job cards updated");
                }
                Ok(Committed::Updated {
                    mode: target.mode(),
                    rows,
                })
            }
        }
    }
}
