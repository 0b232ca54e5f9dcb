//! Session outcome accumulator.

use crate::persist::PersistedFile;

/// Workflow stage a failure was observed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Mounting the removable volume.
    Mount,
    /// Initializing the image sensor.
    SensorInit,
    /// Capturing one frame.
    Capture,
    /// Writing one image file.
    Persist,
    /// Enumerating the storage root.
    Listing,
    /// Releasing hardware resources.
    Cleanup,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Mount => "mount",
            Self::SensorInit => "sensor-init",
            Self::Capture => "capture",
            Self::Persist => "persist",
            Self::Listing => "listing",
            Self::Cleanup => "cleanup",
        };
        f.write_str(name)
    }
}

/// One recorded failure: where it happened and what the component said.
#[derive(Debug, Clone)]
pub struct FailureRecord {
    /// Stage the failure was observed in.
    pub stage: Stage,
    /// Human-readable error message.
    pub message: String,
}

/// Outcome of one end-to-end session.
///
/// Accumulated only by the orchestrator while the session runs;
/// read-only afterwards.
#[derive(Debug, Default)]
pub struct SessionSummary {
    attempted_captures: u32,
    successful_saves: u32,
    saved_files: Vec<PersistedFile>,
    listed_files: Vec<PersistedFile>,
    failures: Vec<FailureRecord>,
    fatal: Option<Stage>,
}

impl SessionSummary {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_attempt(&mut self) {
        self.attempted_captures += 1;
    }

    pub(crate) fn record_save(&mut self, file: PersistedFile) {
        self.successful_saves += 1;
        self.saved_files.push(file);
    }

    pub(crate) fn record_failure(&mut self, stage: Stage, message: impl Into<String>) {
        self.failures.push(FailureRecord {
            stage,
            message: message.into(),
        });
    }

    pub(crate) fn record_fatal(&mut self, stage: Stage, message: impl Into<String>) {
        self.record_failure(stage, message);
        self.fatal = Some(stage);
    }

    pub(crate) fn record_listing(&mut self, files: Vec<PersistedFile>) {
        self.listed_files = files;
    }

    /// Number of capture iterations run.
    pub fn attempted_captures(&self) -> u32 {
        self.attempted_captures
    }

    /// Number of images written to storage.
    pub fn successful_saves(&self) -> u32 {
        self.successful_saves
    }

    /// Files written by this session, in capture order.
    pub fn saved_files(&self) -> &[PersistedFile] {
        &self.saved_files
    }

    /// Final storage listing, including files from prior sessions.
    pub fn listed_files(&self) -> &[PersistedFile] {
        &self.listed_files
    }

    /// Every failure observed, in the order it happened.
    pub fn failures(&self) -> &[FailureRecord] {
        &self.failures
    }

    /// The stage that aborted the session, if any.
    pub fn fatal_stage(&self) -> Option<Stage> {
        self.fatal
    }

    /// True if the session ran to completion without a fatal stage.
    pub fn completed(&self) -> bool {
        self.fatal.is_none()
    }
}
