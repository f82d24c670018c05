//! Team vs Individual branching shared by both flows.
//!
//! Every payload that depends on the selection mode implements [`Branch`],
//! so the engine checks mode consistency in one place. The create side
//! expands a [`CreateTarget`] into records; the update side resolves an
//! [`EntryChoice`] into an [`UpdateTarget`] and from there into a
//! [`MatchPredicate`].

use crate::config::{EmptyTeamPolicy, UpdateResolution};
use crate::db::store::MatchPredicate;
use crate::errors::{AppError, AppResult};
use crate::models::{JobCardRecord, SelectionMode};
use crate::utils::date::format_job_date;
use crate::workflow::action::SharedFields;
use crate::workflow::candidates;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

pub trait Branch {
    fn mode(&self) -> SelectionMode;

    /// Ensure the payload belongs to the mode chosen in the Select step.
    fn expect_mode(&self, chosen: SelectionMode) -> AppResult<()> {
        if self.mode() == chosen {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "{} selection submitted while the session is in {} mode",
                self.mode(),
                chosen
            )))
        }
    }
}

/// Who a new entry is assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateTarget {
    Team { team: String, members: Vec<String> },
    Individual { team: String, employee: String },
}

/// Selection made in the update flow's ChooseEntry step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryChoice {
    Team {
        team: String,
        date: NaiveDate,
        members: Vec<String>,
    },
    Individual {
        uid: String,
    },
}

/// Validated update selection kept in the session until submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum UpdateTarget {
    Team {
        team: String,
        date: NaiveDate,
        members: Vec<String>,
        snapshot: Vec<String>,
    },
    Individual {
        uid: String,
    },
}

impl Branch for CreateTarget {
    fn mode(&self) -> SelectionMode {
        match self {
            CreateTarget::Team { .. } => SelectionMode::Team,
            CreateTarget::Individual { .. } => SelectionMode::Individual,
        }
    }
}

impl Branch for EntryChoice {
    fn mode(&self) -> SelectionMode {
        match self {
            EntryChoice::Team { .. } => SelectionMode::Team,
            EntryChoice::Individual { .. } => SelectionMode::Individual,
        }
    }
}

impl Branch for UpdateTarget {
    fn mode(&self) -> SelectionMode {
        match self {
            UpdateTarget::Team { .. } => SelectionMode::Team,
            UpdateTarget::Individual { .. } => SelectionMode::Individual,
        }
    }
}

fn check_members(members: &[String], policy: EmptyTeamPolicy) -> AppResult<()> {
    if members.is_empty() && policy == EmptyTeamPolicy::Reject {
        return Err(AppError::Validation(
            "select at least one team member".into(),
        ));
    }

    let mut seen = HashSet::new();
    for m in members {
        if m.trim().is_empty() {
            return Err(AppError::Validation("team member name is empty".into()));
        }
        if !seen.insert(m.as_str()) {
            return Err(AppError::Validation(format!(
                "team member '{m}' selected more than once"
            )));
        }
    }
    Ok(())
}

fn required(value: &str, what: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        Err(AppError::Validation(format!("{what} is required")))
    } else {
        Ok(())
    }
}

impl CreateTarget {
    pub fn team(&self) -> &str {
        match self {
            CreateTarget::Team { team, .. } | CreateTarget::Individual { team, .. } => team,
        }
    }

    /// Employees receiving one record each.
    pub fn assignees(&self) -> &[String] {
        match self {
            CreateTarget::Team { members, .. } => members,
            CreateTarget::Individual { employee, .. } => std::slice::from_ref(employee),
        }
    }

    pub fn validate(&self, policy: EmptyTeamPolicy) -> AppResult<()> {
        required(self.team(), "Employee_Team")?;
        match self {
            CreateTarget::Team { members, .. } => check_members(members, policy),
            CreateTarget::Individual { employee, .. } => required(employee, "Employee_Name"),
        }
    }

    /// One record per assignee, sharing every field but UID and name.
    pub fn expand(
        &self,
        fields: &SharedFields,
        created_at: &str,
        created_by: &str,
    ) -> Vec<JobCardRecord> {
        self.assignees()
            .iter()
            .map(|name| JobCardRecord {
                uid: Uuid::new_v4().to_string(),
                created_at: created_at.to_string(),
                created_by: created_by.to_string(),
                job_date: fields.job_date,
                team: self.team().to_string(),
                employee_name: name.clone(),
                presence: fields.presence,
                project: fields.project.clone(),
                phase_space: fields.phase_space.clone(),
                product: fields.product.clone(),
                part_number: fields.part_number.clone(),
                part_name: fields.part_name.clone(),
                task: fields.task.clone(),
                task_quantity: fields.task_quantity,
                start_time: fields.start_time,
                finish_time: fields.finish_time,
                status: fields.status,
                remarks: fields.remarks.clone(),
            })
            .collect()
    }
}

impl EntryChoice {
    /// Check the choice against the register and capture what it selects.
    pub fn resolve(
        &self,
        records: &[JobCardRecord],
        policy: EmptyTeamPolicy,
    ) -> AppResult<UpdateTarget> {
        match self {
            EntryChoice::Team {
                team,
                date,
                members,
            } => {
                if !candidates::teams(records).iter().any(|t| t == team) {
                    return Err(AppError::Validation(format!("unknown team '{team}'")));
                }
                if !candidates::dates_for_team(records, team).contains(date) {
                    return Err(AppError::Validation(format!(
                        "team '{team}' has no entries on {}",
                        format_job_date(date)
                    )));
                }
                check_members(members, policy)?;
                let available = candidates::members_for(records, team, date);
                if let Some(m) = members.iter().find(|m| !available.contains(m)) {
                    return Err(AppError::Validation(format!(
                        "'{m}' has no entry for team '{team}' on {}",
                        format_job_date(date)
                    )));
                }

                let predicate = MatchPredicate::TeamDateMembers {
                    team: team.clone(),
                    date: *date,
                    members: members.clone(),
                };
                let snapshot = records
                    .iter()
                    .filter(|r| predicate.matches(r))
                    .map(|r| r.uid.clone())
                    .collect();

                Ok(UpdateTarget::Team {
                    team: team.clone(),
                    date: *date,
                    members: members.clone(),
                    snapshot,
                })
            }
            EntryChoice::Individual { uid } => {
                if !records.iter().any(|r| r.uid == *uid) {
                    return Err(AppError::Validation(format!("no entry with UID '{uid}'")));
                }
                Ok(UpdateTarget::Individual { uid: uid.clone() })
            }
        }
    }
}

impl UpdateTarget {
    /// Rows the commit applies to under `resolution`.
    pub fn predicate(&self, resolution: UpdateResolution) -> MatchPredicate {
        match (self, resolution) {
            (UpdateTarget::Team { snapshot, .. }, UpdateResolution::Snapshot) => {
                MatchPredicate::Snapshot(snapshot.clone())
            }
            (
                UpdateTarget::Team {
                    team,
                    date,
                    members,
                    ..
                },
                UpdateResolution::Reresolve,
            ) => MatchPredicate::TeamDateMembers {
                team: team.clone(),
                date: *date,
                members: members.clone(),
            },
            // a vanished entry is a zero-row update, not a stale selection
            (UpdateTarget::Individual { uid }, _) => MatchPredicate::Uid(uid.clone()),
        }
    }
}
