use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Presence {
    #[default]
    Present, // Y
    Absent, // N
}

impl Presence {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Presence::Present => "Y",
            Presence::Absent => "N",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Y" => Some(Presence::Present),
            "N" => Some(Presence::Absent),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Presence::from_db_str(&code.trim().to_uppercase())
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
