//! Still Capture Library
//!
//! A bounded still-image capture workflow for camera-equipped embedded
//! boards: mount a removable volume, initialize the image sensor,
//! capture a fixed series of stills, persist each as a uniquely named
//! JPEG file, list the results, and release both hardware handles on
//! every exit path.
//!
//! # Architecture
//!
//! The session is a straight-line acquire–operate–release workflow:
//!
//! ```text
//! storage (mount, retry/backoff)
//!     → sensor (initialize, capture×N)
//!         → persist (name, sniff, write)
//!             → session (orchestrate, summarize, cleanup)
//! ```
//!
//! # Design Principles
//!
//! - **Bounded retry**: a card still draining a prior session's I/O is
//!   transient; mounting retries with backoff instead of hanging.
//! - **Failure isolation**: one bad capture or write skips one image,
//!   never the session.
//! - **Guaranteed release**: sensor dispose and storage unmount run as
//!   an unconditional final step on every path, fatal or not.
//! - **Preserve over validate**: a buffer without the JPEG signature is
//!   logged and written anyway, for offline inspection.
//!
//! # Example
//!
//! ```no_run
//! use still_capture::{
//!     config::FileConfig,
//!     sensor::MockSensor,
//!     session::SessionOrchestrator,
//!     storage::MockStorage,
//!     timing::ThreadDelay,
//! };
//!
//! let config = FileConfig::default();
//! let mut storage = MockStorage::new();
//! let mut sensor = MockSensor::new();
//! let delay = ThreadDelay::new();
//!
//! let summary =
//!     SessionOrchestrator::new(&mut storage, &mut sensor, &config, &delay).run();
//!
//! println!(
//!     "{}/{} images saved",
//!     summary.successful_saves(),
//!     summary.attempted_captures()
//! );
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;
pub mod persist;
pub mod sensor;
pub mod session;
pub mod storage;
pub mod timing;

// Re-export commonly used types at crate root
pub use config::{ConfigError, FileConfig, SessionConfig};
pub use persist::{FileNamer, ImagePersister, PersistError, PersistedFile};
pub use sensor::{CaptureError, CaptureSession, CapturedImage, SensorConfig, SensorInitError};
pub use session::{FailureRecord, SessionOrchestrator, SessionSummary, Stage};
pub use storage::{MountError, MountPolicy, StorageMounter, UnmountError};
pub use timing::{Delay, ThreadDelay};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
