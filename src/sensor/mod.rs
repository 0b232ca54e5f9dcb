//! Image sensor lifecycle and per-frame capture.
//!
//! This module owns the sensor handle: exactly one instance exists per
//! session, it must be initialized before any capture, and it must be
//! disposed exactly once on every exit path. The physical sensor driver
//! is an external collaborator behind the [`SensorDriver`] trait.

mod config;
mod driver;
mod image;
mod session;

pub use config::SensorConfig;
pub use driver::{CaptureOutcome, MockSensor, SensorDriver};
pub use image::CapturedImage;
pub use session::{CaptureError, CaptureSession, SensorInitError, SensorState};
