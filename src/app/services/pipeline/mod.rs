//! Pipeline orchestration for CAM output conversion
//!
//! Sequences archive location, extraction, and the independent BOM and CPL
//! branches, and reports progress through a collaborator event stream.
//!
//! ## Architecture
//!
//! - [`events`] - Structured events and the [`EventSink`] collaborator interface
//! - [`orchestrator`] - The [`Pipeline`] state machine
//! - [`report`] - Per-branch outcomes and the final [`RunReport`]

pub mod events;
pub mod orchestrator;
pub mod report;

#[cfg(test)]
mod tests;

pub use events::{Decision, EventLevel, EventLog, EventSink, PipelineEvent};
pub use orchestrator::{Pipeline, RunState};
pub use report::{BranchOutcome, RunReport};
