use serde::{Deserialize, Serialize};
use std::fmt;

/// Progress of a job card, stored as its short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    ToBeStarted,    // TBS
    WorkInProgress, // WIP
    Done,           // DONE
    OnHold,         // HOLD
}

impl Status {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Status::ToBeStarted => "TBS",
            Status::WorkInProgress => "WIP",
            Status::Done => "DONE",
            Status::OnHold => "HOLD",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "TBS" => Some(Status::ToBeStarted),
            "WIP" => Some(Status::WorkInProgress),
            "DONE" => Some(Status::Done),
            "HOLD" => Some(Status::OnHold),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (lowercase or uppercase)
    pub fn from_code(code: &str) -> Option<Self> {
        Status::from_db_str(&code.trim().to_uppercase())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
