pub mod job_card;
pub mod presence;
pub mod selection;
pub mod status;

pub use job_card::JobCardRecord;
pub use presence::Presence;
pub use selection::SelectionMode;
pub use status::Status;
