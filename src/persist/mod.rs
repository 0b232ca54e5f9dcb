//! Image persistence on the mounted volume.
//!
//! Turns a raw capture buffer into a uniquely named file and verifies a
//! minimal format signature. Naming is derived from the session start
//! time plus a monotonic counter, so files are collision-free within a
//! session and sort by creation order across sessions.

mod namer;
mod writer;

pub use namer::FileNamer;
pub use writer::{list_files, ImagePersister, PersistError, PersistedFile};
