use crate::models::SelectionMode;
use crate::utils::date::format_job_date;
use crate::workflow::branch::{Branch, UpdateTarget};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    Create,
    Update,
}

impl Flow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flow::Create => "create",
            Flow::Update => "update",
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat step name, for display and matching by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Select,
    FillInfo,
    ChooseEntry,
    UpdateForm,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::Select => "select",
            Step::FillInfo => "fill_info",
            Step::ChooseEntry => "choose_entry",
            Step::UpdateForm => "update_form",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum CreateStep {
    Select,
    FillInfo { mode: SelectionMode },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum UpdateStep {
    Select,
    ChooseEntry { mode: SelectionMode },
    UpdateForm { target: UpdateTarget },
}

/// Active flow together with its step; a step cannot outlive its flow.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "flow", rename_all = "snake_case")]
pub enum FlowState {
    #[default]
    Idle,
    Create { step: CreateStep },
    Update { step: UpdateStep },
}

impl FlowState {
    /// Initial state of `flow`.
    pub fn enter(flow: Flow) -> Self {
        match flow {
            Flow::Create => FlowState::Create {
                step: CreateStep::Select,
            },
            Flow::Update => FlowState::Update {
                step: UpdateStep::Select,
            },
        }
    }
}

/// Per-session workflow state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkflowSession {
    pub state: FlowState,
}

/// Transient data captured while a flow is in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Scratch {
    pub team: Option<String>,
    pub date: Option<NaiveDate>,
    pub members: Vec<String>,
    pub entry_id: Option<String>,
    /// Entries matching the team selection when it was made.
    pub snapshot: Vec<String>,
}

/// What the presentation layer needs to render the current step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateView {
    pub flow: Option<Flow>,
    pub step: Option<Step>,
    pub mode: Option<SelectionMode>,
    pub scratch: Scratch,
}

impl WorkflowSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_state(state: FlowState) -> Self {
        Self { state }
    }

    pub fn active_flow(&self) -> Option<Flow> {
        match self.state {
            FlowState::Idle => None,
            FlowState::Create { .. } => Some(Flow::Create),
            FlowState::Update { .. } => Some(Flow::Update),
        }
    }

    pub fn step(&self) -> Option<Step> {
        match &self.state {
            FlowState::Idle => None,
            FlowState::Create { step } => Some(match step {
                CreateStep::Select => Step::Select,
                CreateStep::FillInfo { .. } => Step::FillInfo,
            }),
            FlowState::Update { step } => Some(match step {
                UpdateStep::Select => Step::Select,
                UpdateStep::ChooseEntry { .. } => Step::ChooseEntry,
                UpdateStep::UpdateForm { .. } => Step::UpdateForm,
            }),
        }
    }

    pub fn selection_mode(&self) -> Option<SelectionMode> {
        match &self.state {
            FlowState::Create {
                step: CreateStep::FillInfo { mode },
            }
            | FlowState::Update {
                step: UpdateStep::ChooseEntry { mode },
            } => Some(*mode),
            FlowState::Update {
                step: UpdateStep::UpdateForm { target },
            } => Some(target.mode()),
            _ => None,
        }
    }

    pub fn scratch(&self) -> Scratch {
        match &self.state {
            FlowState::Update {
                step: UpdateStep::UpdateForm { target },
            } => match target {
                UpdateTarget::Team {
                    team,
                    date,
                    members,
                    snapshot,
                } => Scratch {
                    team: Some(team.clone()),
                    date: Some(*date),
                    members: members.clone(),
                    entry_id: None,
                    snapshot: snapshot.clone(),
                },
                UpdateTarget::Individual { uid } => Scratch {
                    entry_id: Some(uid.clone()),
                    ..Scratch::default()
                },
            },
            _ => Scratch::default(),
        }
    }

    pub fn current_state(&self) -> StateView {
        StateView {
            flow: self.active_flow(),
            step: self.step(),
            mode: self.selection_mode(),
            scratch: self.scratch(),
        }
    }

    /// Short label used in logs and error messages, e.g. `update/choose_entry`.
    pub fn label(&self) -> String {
        match (self.active_flow(), self.step()) {
            (Some(flow), Some(step)) => format!("{flow}/{step}"),
            _ => "idle".to_string(),
        }
    }
}

impl fmt::Display for StateView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(flow) = self.flow else {
            return writeln!(f, "No active flow.");
        };
        writeln!(f, "Flow:  {}", flow)?;
        if let Some(step) = self.step {
            writeln!(f, "Step:  {}", step)?;
        }
        if let Some(mode) = self.mode {
            writeln!(f, "Mode:  {}", mode)?;
        }
        if let Some(team) = &self.scratch.team {
            writeln!(f, "Team:  {}", team)?;
        }
        if let Some(date) = &self.scratch.date {
            writeln!(f, "Date:  {}", format_job_date(date))?;
        }
        if !self.scratch.members.is_empty() {
            writeln!(f, "Members: {}", self.scratch.members.join(", "))?;
        }
        if let Some(uid) = &self.scratch.entry_id {
            writeln!(f, "Entry: {}", uid)?;
        }
        Ok(())
    }
}
