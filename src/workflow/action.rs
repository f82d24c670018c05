use crate::db::store::UpdateFields;
use crate::errors::{AppError, AppResult};
use crate::models::{Presence, SelectionMode, Status};
use crate::workflow::branch::{CreateTarget, EntryChoice};
use crate::workflow::state::Flow;
use chrono::{NaiveDate, NaiveTime};

/// Values shared by every record of one create submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedFields {
    pub job_date: NaiveDate,
    pub presence: Presence,
    pub project: String,
    pub phase_space: String,
    pub product: String,
    pub part_number: String,
    pub part_name: String,
    pub task: String,
    pub task_quantity: u8,
    pub start_time: NaiveTime,
    pub finish_time: NaiveTime,
    pub status: Status,
    pub remarks: String,
}

impl SharedFields {
    pub fn validate(&self) -> AppResult<()> {
        if self.project.trim().is_empty() {
            return Err(AppError::Validation("Project is required".into()));
        }
        if self.task_quantity > 100 {
            return Err(AppError::Validation(format!(
                "Task_Q must be between 0 and 100, found {}",
                self.task_quantity
            )));
        }
        Ok(())
    }
}

/// Payload of the FillInfo submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateForm {
    pub target: CreateTarget,
    pub fields: SharedFields,
}

/// User actions accepted by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Enter a flow; always allowed and resets the flow to Select.
    Start(Flow),
    ConfirmMode(SelectionMode),
    SubmitCreate(CreateForm),
    ChooseEntry(EntryChoice),
    SubmitUpdate(UpdateFields),
    Back,
    /// Abandon the active flow.
    Cancel,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Start(_) => "start",
            Action::ConfirmMode(_) => "confirm_mode",
            Action::SubmitCreate(_) => "submit_create",
            Action::ChooseEntry(_) => "choose_entry",
            Action::SubmitUpdate(_) => "submit_update",
            Action::Back => "back",
            Action::Cancel => "cancel",
        }
    }

    /// Whether planning this action looks at the register.
    pub fn needs_records(&self) -> bool {
        matches!(self, Action::ChooseEntry(_) | Action::SubmitUpdate(_))
    }
}
