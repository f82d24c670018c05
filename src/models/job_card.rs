use super::{presence::Presence, status::Status};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// Storage format of `Job_Date`.
pub const JOB_DATE_FORMAT: &str = "%d/%m/%Y";
/// Storage format of `Start_Time` / `Finish_Time`.
pub const CLOCK_FORMAT: &str = "%H:%M";
/// Storage format of `Job_Created_At`.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the `jcr` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobCardRecord {
    pub uid: String,          // ⇔ Job_UID (TEXT PRIMARY KEY)
    pub created_at: String,   // ⇔ Job_Created_At ("YYYY-MM-DD HH:MM:SS")
    pub created_by: String,   // ⇔ Job_Created_By
    pub job_date: NaiveDate,  // ⇔ Job_Date ("DD/MM/YYYY")
    pub team: String,         // ⇔ Employee_Team
    pub employee_name: String,
    pub presence: Presence,   // ⇔ Presence ('Y' | 'N')
    pub project: String,
    pub phase_space: String,  // ⇔ PHASE_SPACE
    pub product: String,
    pub part_number: String,
    pub part_name: String,
    pub task: String,
    pub task_quantity: u8,    // ⇔ Task_Q (0..=100)
    pub start_time: NaiveTime,
    pub finish_time: NaiveTime,
    pub status: Status,       // ⇔ Status ('TBS','WIP','DONE','HOLD')
    pub remarks: String,
}

impl JobCardRecord {
    pub fn job_date_str(&self) -> String {
        self.job_date.format(JOB_DATE_FORMAT).to_string()
    }

    pub fn start_time_str(&self) -> String {
        self.start_time.format(CLOCK_FORMAT).to_string()
    }

    pub fn finish_time_str(&self) -> String {
        self.finish_time.format(CLOCK_FORMAT).to_string()
    }

    /// Column values in table order, as stored.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.uid.clone(),
            self.created_at.clone(),
            self.created_by.clone(),
            self.job_date_str(),
            self.team.clone(),
            self.employee_name.clone(),
            self.presence.to_db_str().to_string(),
            self.project.clone(),
            self.phase_space.clone(),
            self.product.clone(),
            self.part_number.clone(),
            self.part_name.clone(),
            self.task.clone(),
            self.task_quantity.to_string(),
            self.start_time_str(),
            self.finish_time_str(),
            self.status.to_db_str().to_string(),
            self.remarks.clone(),
        ]
    }

    /// Value of a column by its table name, matched case-insensitively.
    pub fn column_value(&self, column: &str) -> Option<String> {
        let idx = column_index(column)?;
        self.to_row().into_iter().nth(idx)
    }
}

/// Column set of the `jcr` table, in order.
pub const COLUMNS: [&str; 18] = [
    "Job_UID",
    "Job_Created_At",
    "Job_Created_By",
    "Job_Date",
    "Employee_Team",
    "Employee_Name",
    "Presence",
    "Project",
    "PHASE_SPACE",
    "Product",
    "Part_number",
    "Part_Name",
    "Task",
    "Task_Q",
    "Start_Time",
    "Finish_Time",
    "Status",
    "Remarks",
];

pub fn column_index(column: &str) -> Option<usize> {
    COLUMNS.iter().position(|c| c.eq_ignore_ascii_case(column.trim()))
}

/// Canonical spelling of a column name, if it exists.
pub fn canonical_column(column: &str) -> Option<&'static str> {
    column_index(column).map(|i| COLUMNS[i])
}
