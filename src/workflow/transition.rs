//! Pure transition function of the workflow state machine.
//!
//! `plan` never touches storage: it returns the next session together with
//! the write the engine must perform for the transition to take effect.

use crate::config::{Config, EmptyTeamPolicy, UpdateResolution};
use crate::db::store::{MatchPredicate, UpdateFields};
use crate::errors::{AppError, AppResult};
use crate::models::JobCardRecord;
use crate::models::job_card::CREATED_AT_FORMAT;
use crate::workflow::action::Action;
use crate::workflow::branch::{Branch, UpdateTarget};
use crate::workflow::state::{CreateStep, Flow, FlowState, UpdateStep, WorkflowSession};
use chrono::NaiveDateTime;
use std::collections::BTreeSet;

/// Knobs the transition function depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowPolicy {
    pub created_by: String,
    pub empty_team: EmptyTeamPolicy,
    pub resolution: UpdateResolution,
}

impl Default for WorkflowPolicy {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for WorkflowPolicy {
    fn from(cfg: &Config) -> Self {
        Self {
            created_by: cfg.created_by.clone(),
            empty_team: cfg.empty_team_policy,
            resolution: cfg.team_update_resolution,
        }
    }
}

pub struct PlanContext<'a> {
    pub records: &'a [JobCardRecord],
    pub policy: &'a WorkflowPolicy,
    pub now: NaiveDateTime,
}

/// Store operation a committing transition requires.
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    Insert(Vec<JobCardRecord>),
    Update {
        target: UpdateTarget,
        predicate: MatchPredicate,
        fields: UpdateFields,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub next: WorkflowSession,
    pub write: Option<Write>,
}

impl Plan {
    fn moves_to(state: FlowState) -> Self {
        Self {
            next: WorkflowSession::in_state(state),
            write: None,
        }
    }

    fn commits(state: FlowState, write: Write) -> Self {
        Self {
            next: WorkflowSession::in_state(state),
            write: Some(write),
        }
    }
}

fn invalid(session: &WorkflowSession, action: &Action) -> AppError {
    AppError::InvalidTransition {
        state: session.label(),
        action: action.name().to_string(),
    }
}

/// Warn when the rows matching a team selection changed since it was made.
fn report_drift(target: &UpdateTarget, records: &[JobCardRecord]) {
    let UpdateTarget::Team {
        team,
        date,
        members,
        snapshot,
    } = target
    else {
        return;
    };

    let now_matching: BTreeSet<&str> = records
        .iter()
        .filter(|r| r.team == *team && r.job_date == *date && members.contains(&r.employee_name))
        .map(|r| r.uid.as_str())
        .collect();
    let captured: BTreeSet<&str> = snapshot.iter().map(String::as_str).collect();

    if now_matching != captured {
        tracing::warn!(
            team = %team,
            captured = captured.len(),
            matching = now_matching.len(),
            "team selection changed since it was chosen; updating current matches"
        );
    }
}

pub fn plan(session: &WorkflowSession, action: Action, ctx: &PlanContext) -> AppResult<Plan> {
    match (&session.state, action) {
        (_, Action::Start(flow)) => Ok(Plan::moves_to(FlowState::enter(flow))),
        (_, Action::Cancel) => Ok(Plan::moves_to(FlowState::Idle)),

        // ---------------- create ----------------
        (
            FlowState::Create {
                step: CreateStep::Select,
            },
            Action::ConfirmMode(mode),
        ) => Ok(Plan::moves_to(FlowState::Create {
            step: CreateStep::FillInfo { mode },
        })),

        (
            FlowState::Create {
                step: CreateStep::FillInfo { mode },
            },
            Action::SubmitCreate(form),
        ) => {
            form.target.expect_mode(*mode)?;
            form.target.validate(ctx.policy.empty_team)?;
            form.fields.validate()?;

            let created_at = ctx.now.format(CREATED_AT_FORMAT).to_string();
            let records = form
                .target
                .expand(&form.fields, &created_at, &ctx.policy.created_by);

            Ok(Plan::commits(
                FlowState::enter(Flow::Create),
                Write::Insert(records),
            ))
        }

        (
            FlowState::Create {
                step: CreateStep::FillInfo { .. },
            },
            Action::Back,
        ) => Ok(Plan::moves_to(FlowState::Create {
            step: CreateStep::Select,
        })),

        // ---------------- update ----------------
        (
            FlowState::Update {
                step: UpdateStep::Select,
            },
            Action::ConfirmMode(mode),
        ) => Ok(Plan::moves_to(FlowState::Update {
            step: UpdateStep::ChooseEntry { mode },
        })),

        (
            FlowState::Update {
                step: UpdateStep::ChooseEntry { mode },
            },
            Action::ChooseEntry(choice),
        ) => {
            choice.expect_mode(*mode)?;
            let target = choice.resolve(ctx.records, ctx.policy.empty_team)?;
            Ok(Plan::moves_to(FlowState::Update {
                step: UpdateStep::UpdateForm { target },
            }))
        }

        (
            FlowState::Update {
                step: UpdateStep::ChooseEntry { .. },
            },
            Action::Back,
        ) => Ok(Plan::moves_to(FlowState::Update {
            step: UpdateStep::Select,
        })),

        (
            FlowState::Update {
                step: UpdateStep::UpdateForm { target },
            },
            Action::SubmitUpdate(fields),
        ) => {
            if ctx.policy.resolution == UpdateResolution::Reresolve {
                report_drift(target, ctx.records);
            }
            let predicate = target.predicate(ctx.policy.resolution);
            Ok(Plan::commits(
                FlowState::enter(Flow::Update),
                Write::Update {
                    target: target.clone(),
                    predicate,
                    fields,
                },
            ))
        }

        (
            FlowState::Update {
                step: UpdateStep::UpdateForm { target },
            },
            Action::Back,
        ) => Ok(Plan::moves_to(FlowState::Update {
            step: UpdateStep::ChooseEntry {
                mode: target.mode(),
            },
        })),

        (_, action) => Err(invalid(session, &action)),
    }
}
