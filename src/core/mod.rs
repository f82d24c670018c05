pub mod insights;
pub mod log;
pub mod view;
