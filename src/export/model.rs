use crate::models::JobCardRecord;
use serde::Serialize;

/// Flat export row; field names are the table's column names.
#[derive(Serialize, Clone, Debug)]
pub struct RecordExport {
    #[serde(rename = "Job_UID")]
    pub uid: String,
    #[serde(rename = "Job_Created_At")]
    pub created_at: String,
    #[serde(rename = "Job_Created_By")]
    pub created_by: String,
    #[serde(rename = "Job_Date")]
    pub job_date: String,
    #[serde(rename = "Employee_Team")]
    pub team: String,
    #[serde(rename = "Employee_Name")]
    pub employee_name: String,
    #[serde(rename = "Presence")]
    pub presence: String,
    #[serde(rename = "Project")]
    pub project: String,
    #[serde(rename = "PHASE_SPACE")]
    pub phase_space: String,
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Part_number")]
    pub part_number: String,
    #[serde(rename = "Part_Name")]
    pub part_name: String,
    #[serde(rename = "Task")]
    pub task: String,
    #[serde(rename = "Task_Q")]
    pub task_quantity: u8,
    #[serde(rename = "Start_Time")]
    pub start_time: String,
    #[serde(rename = "Finish_Time")]
    pub finish_time: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Remarks")]
    pub remarks: String,
}

impl From<&JobCardRecord> for RecordExport {
    fn from(r: &JobCardRecord) -> Self {
        Self {
            uid: r.uid.clone(),
            created_at: r.created_at.clone(),
            created_by: r.created_by.clone(),
            job_date: r.job_date_str(),
            team: r.team.clone(),
            employee_name: r.employee_name.clone(),
            presence: r.presence.to_db_str().to_string(),
            project: r.project.clone(),
            phase_space: r.phase_space.clone(),
            product: r.product.clone(),
            part_number: r.part_number.clone(),
            part_name: r.part_name.clone(),
            task: r.task.clone(),
            task_quantity: r.task_quantity,
            start_time: r.start_time_str(),
            finish_time: r.finish_time_str(),
            status: r.status.to_db_str().to_string(),
            remarks: r.remarks.clone(),
        }
    }
}
