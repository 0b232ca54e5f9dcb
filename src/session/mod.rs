//! Session orchestration.
//!
//! Sequences mount, sensor initialization, the capture loop, the final
//! listing, and the guaranteed-release cleanup, accumulating everything
//! observed into a [`SessionSummary`].

mod orchestrator;
mod summary;

pub use orchestrator::SessionOrchestrator;
pub use summary::{FailureRecord, SessionSummary, Stage};
