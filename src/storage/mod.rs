//! Removable storage mounting with bounded retry.
//!
//! This module owns the mount/retry/backoff policy for the removable
//! volume. A storage device held busy by a just-ended prior process is
//! a transient, self-resolving condition; bounded retry with backoff
//! converts a likely-transient failure into eventual success without
//! hanging indefinitely.

mod driver;
mod mounter;

pub use driver::{MockStorage, StorageDriver, StorageDriverError};
pub use mounter::{MountError, MountPolicy, StorageMounter, StorageState, UnmountError};
