//! Sequencing of the content load: one retrying fetch racing a deadline,
//! resolved into render states.

mod deadline;
mod machine;

pub use deadline::{DeadlineGuard, DeadlineStatus};
pub use machine::{LoadReport, LoaderEvent, PresentationStateMachine, Snapshot, Transition};
