//! Sensor driver abstraction and the scripted mock.

use super::config::SensorConfig;
use std::collections::VecDeque;

/// Trait for image sensor drivers.
///
/// Mirrors the collaborator surface of the hardware driver: a boolean
/// initialization, a capture that may return nothing, and a dispose.
pub trait SensorDriver {
    /// Powers on and configures the sensor. Returns false on failure.
    fn initialize(&mut self, config: &SensorConfig) -> bool;

    /// Requests one encoded frame. `None` means the driver produced no
    /// buffer at all; an empty buffer is also possible.
    fn capture_image(&mut self) -> Option<Vec<u8>>;

    /// Powers off the sensor and releases driver resources.
    fn dispose(&mut self);
}

/// Scripted outcome for one [`MockSensor`] capture call.
#[derive(Debug, Clone)]
pub enum CaptureOutcome {
    /// A well-formed JPEG buffer of the given total length (>= 4).
    Jpeg(usize),
    /// A buffer of the given length without the JPEG signature.
    Garbage(usize),
    /// A zero-length buffer.
    Empty,
    /// No buffer at all.
    Missing,
}

/// Mock sensor driver producing deterministic frames.
///
/// Each capture consumes the next scripted [`CaptureOutcome`]; once the
/// script runs out, every further capture yields a well-formed JPEG
/// buffer. Call counters are exposed for lifecycle assertions.
#[derive(Debug, Default)]
pub struct MockSensor {
    script: VecDeque<CaptureOutcome>,
    init_fails: bool,
    sequence: u32,
    init_calls: u32,
    capture_calls: u32,
    dispose_calls: u32,
}

/// Default byte length of generated mock frames.
const DEFAULT_FRAME_LEN: usize = 1000;

impl MockSensor {
    /// Creates a mock that initializes successfully and always
    /// produces good frames.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the first capture outcomes, in order.
    pub fn with_outcomes(mut self, outcomes: impl IntoIterator<Item = CaptureOutcome>) -> Self {
        self.script = outcomes.into_iter().collect();
        self
    }

    /// Makes `initialize` return false.
    pub fn with_init_failure(mut self) -> Self {
        self.init_fails = true;
        self
    }

    /// Number of initialize calls made against this driver.
    pub fn init_calls(&self) -> u32 {
        self.init_calls
    }

    /// Number of capture calls made against this driver.
    pub fn capture_calls(&self) -> u32 {
        self.capture_calls
    }

    /// Number of dispose calls made against this driver.
    pub fn dispose_calls(&self) -> u32 {
        self.dispose_calls
    }

    /// Builds a JPEG-framed buffer with sequence-derived filler.
    fn jpeg_frame(&self, len: usize) -> Vec<u8> {
        let len = len.max(4);
        let mut data = Vec::with_capacity(len);
        data.extend_from_slice(&[0xFF, 0xD8, 0xFF]);
        data.extend((3..len - 1).map(|i| ((i as u32 ^ self.sequence) % 251) as u8));
        data.push(0xD9);
        data
    }
}

impl SensorDriver for MockSensor {
    fn initialize(&mut self, config: &SensorConfig) -> bool {
        self.init_calls += 1;
        if self.init_fails {
            return false;
        }
        tracing::debug!(
            width = config.width,
            height = config.height,
            "mock sensor initialized"
        );
        true
    }

    fn capture_image(&mut self) -> Option<Vec<u8>> {
        self.capture_calls += 1;
        let outcome = self
            .script
            .pop_front()
            .unwrap_or(CaptureOutcome::Jpeg(DEFAULT_FRAME_LEN));
        let frame = match outcome {
            CaptureOutcome::Jpeg(len) => Some(self.jpeg_frame(len)),
            CaptureOutcome::Garbage(len) => {
                Some((0..len).map(|i| ((i as u32 + self.sequence) % 200) as u8).collect())
            }
            CaptureOutcome::Empty => Some(Vec::new()),
            CaptureOutcome::Missing => None,
        };
        self.sequence += 1;
        frame
    }

    fn dispose(&mut self) {
        self.dispose_calls += 1;
        tracing::debug!("mock sensor disposed");
    }
}
