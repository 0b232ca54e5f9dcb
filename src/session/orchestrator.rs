//! The acquire–operate–release workflow.

use super::summary::{SessionSummary, Stage};
use crate::config::{FileConfig, SessionConfig};
use crate::persist::{list_files, FileNamer, ImagePersister};
use crate::sensor::{CaptureSession, SensorDriver};
use crate::storage::{StorageDriver, StorageMounter};
use crate::timing::Delay;

/// Sequences one end-to-end capture session.
///
/// Owns both hardware handles for the duration of the run, through:
///
/// ```text
/// mount → initialize → capture×N → list → cleanup
/// ```
///
/// Fatal errors (mount exhaustion, sensor init) short-circuit the
/// remaining stages; recoverable per-iteration errors are recorded and
/// the loop continues. Cleanup is an unconditional final step on every
/// path, so no resource is held when [`run`](Self::run) returns.
pub struct SessionOrchestrator<'a> {
    mounter: StorageMounter<'a>,
    sensor: CaptureSession<'a>,
    config: SessionConfig,
    delay: &'a dyn Delay,
}

impl<'a> SessionOrchestrator<'a> {
    /// Creates an orchestrator over the given drivers and configuration.
    pub fn new(
        storage: &'a mut dyn StorageDriver,
        sensor: &'a mut dyn SensorDriver,
        config: &FileConfig,
        delay: &'a dyn Delay,
    ) -> Self {
        Self {
            mounter: StorageMounter::new(storage, config.storage),
            sensor: CaptureSession::new(sensor, config.sensor.clone()),
            config: config.session.clone(),
            delay,
        }
    }

    /// Runs the session to completion and returns its summary.
    ///
    /// Never leaves a hardware resource held on return, whether the run
    /// succeeded, partially failed, or failed at mount or init.
    pub fn run(mut self) -> SessionSummary {
        let mut summary = SessionSummary::new();
        self.execute(&mut summary);
        self.cleanup(&mut summary);
        summary
    }

    /// The fallible stages; returns early on a fatal error.
    fn execute(&mut self, summary: &mut SessionSummary) {
        tracing::info!(
            captures = self.config.capture_count,
            output = %self.config.output_dir.display(),
            "starting capture session"
        );

        if let Err(e) = self.mounter.mount(self.delay) {
            tracing::error!(error = %e, "giving up on storage mount");
            summary.record_fatal(Stage::Mount, e.to_string());
            return;
        }

        if let Err(e) = self.sensor.initialize() {
            tracing::error!(error = %e, "sensor initialization failed");
            summary.record_fatal(Stage::SensorInit, e.to_string());
            return;
        }

        let namer = FileNamer::new(chrono::Utc::now().naive_utc());
        let mut persister = ImagePersister::new(namer);

        for i in 0..self.config.capture_count {
            if i > 0 {
                self.delay.wait(self.config.inter_capture_delay());
            }
            tracing::info!(
                image = i + 1,
                total = self.config.capture_count,
                "capturing image"
            );
            summary.record_attempt();

            let image = match self.sensor.capture_one() {
                Ok(image) => image,
                Err(e) => {
                    tracing::warn!(image = i + 1, error = %e, "capture failed, skipping");
                    summary.record_failure(Stage::Capture, e.to_string());
                    continue;
                }
            };
            tracing::info!(bytes = image.len(), "image captured");

            match persister.persist(&image, &self.config.output_dir) {
                Ok(file) => {
                    tracing::info!(path = %file.path.display(), "image saved");
                    summary.record_save(file);
                }
                Err(e) => {
                    tracing::warn!(image = i + 1, error = %e, "save failed, skipping");
                    summary.record_failure(Stage::Persist, e.to_string());
                }
            }
        }

        match list_files(&self.config.output_dir) {
            Ok(files) => {
                tracing::info!(count = files.len(), "images on storage");
                for file in &files {
                    tracing::info!(
                        path = %file.path.display(),
                        bytes = file.size_bytes,
                        "listed"
                    );
                }
                summary.record_listing(files);
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to list storage contents");
                summary.record_failure(Stage::Listing, e.to_string());
            }
        }
    }

    /// Unconditional release of both handles.
    ///
    /// Failures here are recorded but never escalated; the session
    /// still completes.
    fn cleanup(&mut self, summary: &mut SessionSummary) {
        self.sensor.dispose();
        if let Err(e) = self.mounter.unmount() {
            tracing::warn!(error = %e, "unmount failed during cleanup");
            summary.record_failure(Stage::Cleanup, e.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::{CaptureOutcome, MockSensor};
    use crate::storage::MockStorage;
    use crate::timing::RecordingDelay;
    use std::time::Duration;

    fn test_config(dir: &std::path::Path, captures: u32) -> FileConfig {
        let mut config = FileConfig::default();
        config.session.capture_count = captures;
        config.session.output_dir = dir.to_path_buf();
        config
    }

    #[test]
    fn test_success_path_after_transient_mount_failures() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = MockStorage::new().with_mount_failures(2);
        let mut sensor = MockSensor::new();
        let delay = RecordingDelay::new();
        let config = test_config(dir.path(), 5);

        let summary =
            SessionOrchestrator::new(&mut storage, &mut sensor, &config, &delay).run();

        assert_eq!(summary.attempted_captures(), 5);
        assert_eq!(summary.successful_saves(), 5);
        assert_eq!(summary.listed_files().len(), 5);
        assert!(summary.failures().is_empty());
        assert!(summary.completed());

        // Hardware released exactly once each.
        assert_eq!(sensor.dispose_calls(), 1);
        assert_eq!(storage.unmount_calls(), 1);
        assert!(!storage.is_mounted());

        // Two backoffs before the retries, four inter-capture pauses.
        assert_eq!(delay.count(), 6);
        assert_eq!(delay.recorded()[0], Duration::from_millis(2000));
        assert_eq!(delay.recorded()[2], Duration::from_millis(1000));
    }

    #[test]
    fn test_mount_exhaustion_never_touches_sensor() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = MockStorage::new().with_mount_failures(3);
        let mut sensor = MockSensor::new();
        let delay = RecordingDelay::new();
        let config = test_config(dir.path(), 5);

        let summary =
            SessionOrchestrator::new(&mut storage, &mut sensor, &config, &delay).run();

        assert_eq!(summary.fatal_stage(), Some(Stage::Mount));
        assert_eq!(summary.attempted_captures(), 0);
        assert_eq!(summary.successful_saves(), 0);
        assert_eq!(summary.failures().len(), 1);

        // Never mounted, never initialized: cleanup is all no-ops.
        assert_eq!(storage.mount_calls(), 3);
        assert_eq!(sensor.init_calls(), 0);
        assert_eq!(sensor.dispose_calls(), 0);
        assert_eq!(storage.unmount_calls(), 0);
    }

    #[test]
    fn test_init_failure_releases_mounted_storage() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = MockStorage::new();
        let mut sensor = MockSensor::new().with_init_failure();
        let delay = RecordingDelay::new();
        let config = test_config(dir.path(), 5);

        let summary =
            SessionOrchestrator::new(&mut storage, &mut sensor, &config, &delay).run();

        assert_eq!(summary.fatal_stage(), Some(Stage::SensorInit));
        assert_eq!(summary.attempted_captures(), 0);
        assert_eq!(sensor.capture_calls(), 0);

        // Storage was mounted and must be released; the sensor never
        // initialized, so the driver dispose is skipped.
        assert_eq!(storage.unmount_calls(), 1);
        assert_eq!(sensor.dispose_calls(), 0);
    }

    #[test]
    fn test_capture_failures_skip_and_continue() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = MockStorage::new();
        let mut sensor = MockSensor::new().with_outcomes([
            CaptureOutcome::Jpeg(1000),
            CaptureOutcome::Empty,
            CaptureOutcome::Jpeg(1000),
            CaptureOutcome::Missing,
            CaptureOutcome::Jpeg(1000),
        ]);
        let delay = RecordingDelay::new();
        let config = test_config(dir.path(), 5);

        let summary =
            SessionOrchestrator::new(&mut storage, &mut sensor, &config, &delay).run();

        assert!(summary.completed());
        assert_eq!(summary.attempted_captures(), 5);
        assert_eq!(summary.successful_saves(), 3);
        assert_eq!(summary.listed_files().len(), 3);
        assert_eq!(summary.failures().len(), 2);
        assert!(summary
            .failures()
            .iter()
            .all(|f| f.stage == Stage::Capture));

        // Hardware still released exactly once each.
        assert_eq!(sensor.dispose_calls(), 1);
        assert_eq!(storage.unmount_calls(), 1);
    }

    #[test]
    fn test_persist_failure_is_recoverable() {
        let mut storage = MockStorage::new();
        let mut sensor = MockSensor::new();
        let delay = RecordingDelay::new();
        // Destination that cannot be written or listed.
        let config = test_config(std::path::Path::new("/nonexistent-volume/images"), 3);

        let summary =
            SessionOrchestrator::new(&mut storage, &mut sensor, &config, &delay).run();

        assert!(summary.completed());
        assert_eq!(summary.attempted_captures(), 3);
        assert_eq!(summary.successful_saves(), 0);
        // Three persist failures plus the failed final listing.
        assert_eq!(summary.failures().len(), 4);
        assert_eq!(summary.failures()[0].stage, Stage::Persist);
        assert_eq!(summary.failures()[3].stage, Stage::Listing);
        assert_eq!(sensor.dispose_calls(), 1);
        assert_eq!(storage.unmount_calls(), 1);
    }

    #[test]
    fn test_unmount_failure_recorded_not_escalated() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = MockStorage::new().with_unmount_failure();
        let mut sensor = MockSensor::new();
        let delay = RecordingDelay::new();
        let config = test_config(dir.path(), 1);

        let summary =
            SessionOrchestrator::new(&mut storage, &mut sensor, &config, &delay).run();

        assert!(summary.completed());
        assert_eq!(summary.successful_saves(), 1);
        assert_eq!(summary.failures().len(), 1);
        assert_eq!(summary.failures()[0].stage, Stage::Cleanup);
    }

    #[test]
    fn test_saved_filenames_pairwise_distinct() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = MockStorage::new();
        let mut sensor = MockSensor::new();
        let delay = RecordingDelay::new();
        let config = test_config(dir.path(), 20);

        let summary =
            SessionOrchestrator::new(&mut storage, &mut sensor, &config, &delay).run();

        assert_eq!(summary.successful_saves(), 20);
        let names: std::collections::HashSet<_> = summary
            .saved_files()
            .iter()
            .map(|f| f.path.clone())
            .collect();
        assert_eq!(names.len(), 20);
    }
}
