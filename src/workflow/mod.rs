//! Session-scoped create/update workflow.
//!
//! ```text
//! create: Select ──ConfirmMode──▶ FillInfo ──SubmitCreate──▶ (insert) Select
//! update: Select ──ConfirmMode──▶ ChooseEntry ──ChooseEntry──▶ UpdateForm ──SubmitUpdate──▶ (update) Select
//! ```

pub mod action;
pub mod branch;
pub mod candidates;
pub mod context;
pub mod engine;
pub mod state;
pub mod transition;

pub use action::{Action, CreateForm, SharedFields};
pub use branch::{Branch, CreateTarget, EntryChoice, UpdateTarget};
pub use context::SessionContext;
pub use engine::{Committed, Engine, Outcome};
pub use state::{Flow, FlowState, StateView, Step, WorkflowSession};
pub use transition::{Plan, PlanContext, WorkflowPolicy, Write, plan};
