//! Sensor handle lifecycle and single-frame capture.

use super::config::SensorConfig;
use super::driver::SensorDriver;
use super::image::CapturedImage;
use thiserror::Error;

/// Lifecycle state of the sensor handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorState {
    /// Sensor not yet powered on.
    Uninitialized,
    /// Sensor configured and able to capture.
    Ready,
    /// Sensor released; the handle is finished.
    Disposed,
}

/// Fatal sensor initialization error.
///
/// Initialization failure typically indicates a wiring or
/// configuration problem, not transience, so there is no retry.
#[derive(Debug, Clone, Error)]
pub enum SensorInitError {
    /// The driver rejected the configuration.
    #[error("sensor initialization failed")]
    InitFailed,
    /// Initialize called on a handle that is past its lifetime.
    #[error("sensor handle already disposed")]
    AlreadyDisposed,
}

/// Per-iteration capture error, recoverable at the session level.
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    /// Capture requested before initialization or after disposal.
    #[error("sensor not ready for capture")]
    NotReady,
    /// The driver produced no buffer.
    #[error("sensor produced no frame")]
    NoFrame,
    /// The driver produced a zero-length buffer.
    #[error("sensor produced an empty frame")]
    EmptyFrame,
}

/// Owns the sensor handle for one session.
///
/// Exactly one instance exists per session; it holds the driver
/// exclusively and guarantees the driver's `dispose` runs at most once.
pub struct CaptureSession<'d> {
    driver: &'d mut dyn SensorDriver,
    config: SensorConfig,
    state: SensorState,
    sequence: u32,
}

impl<'d> CaptureSession<'d> {
    /// Creates a session over the given driver.
    pub fn new(driver: &'d mut dyn SensorDriver, config: SensorConfig) -> Self {
        Self {
            driver,
            config,
            state: SensorState::Uninitialized,
            sequence: 0,
        }
    }

    /// Returns the current handle state.
    pub fn state(&self) -> SensorState {
        self.state
    }

    /// Powers on and configures the sensor.
    pub fn initialize(&mut self) -> Result<(), SensorInitError> {
        match self.state {
            SensorState::Disposed => return Err(SensorInitError::AlreadyDisposed),
            SensorState::Ready => return Ok(()),
            SensorState::Uninitialized => {}
        }
        if self.driver.initialize(&self.config) {
            self.state = SensorState::Ready;
            tracing::info!(
                width = self.config.width,
                height = self.config.height,
                "sensor initialized"
            );
            Ok(())
        } else {
            Err(SensorInitError::InitFailed)
        }
    }

    /// Captures one frame.
    ///
    /// A missing or empty buffer is a recoverable error: the caller
    /// records it and continues with the next iteration.
    pub fn capture_one(&mut self) -> Result<CapturedImage, CaptureError> {
        if self.state != SensorState::Ready {
            return Err(CaptureError::NotReady);
        }
        let bytes = self.driver.capture_image().ok_or(CaptureError::NoFrame)?;
        if bytes.is_empty() {
            return Err(CaptureError::EmptyFrame);
        }
        let image = CapturedImage::new(bytes, self.sequence);
        self.sequence += 1;
        Ok(image)
    }

    /// Releases the sensor.
    ///
    /// Idempotent: the driver's `dispose` runs only on the transition
    /// out of [`SensorState::Ready`]; later calls are no-ops. A handle
    /// that was never initialized skips the driver call entirely.
    pub fn dispose(&mut self) {
        if self.state == SensorState::Ready {
            self.driver.dispose();
            tracing::info!("sensor disposed");
        }
        self.state = SensorState::Disposed;
    }
}
