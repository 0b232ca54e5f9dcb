//! Mount policy and the retrying storage mounter.

use super::driver::{StorageDriver, StorageDriverError};
use crate::timing::Delay;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Retry policy for mounting the removable volume.
///
/// Immutable for the duration of a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MountPolicy {
    /// Maximum number of mount attempts (at least 1).
    pub max_retries: u32,
    /// Wait inserted before each retry, in milliseconds.
    pub backoff_ms: u64,
}

impl Default for MountPolicy {
    fn default() -> Self {
        // The original card firmware needs about 2s to drain pending I/O
        // after an abrupt session end.
        Self {
            max_retries: 3,
            backoff_ms: 2000,
        }
    }
}

impl MountPolicy {
    /// Returns the backoff interval as a duration.
    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    /// Validates the policy parameters.
    pub fn validate(&self) -> Result<(), crate::config::ConfigError> {
        if self.max_retries == 0 {
            return Err(crate::config::ConfigError::InvalidRetryCount);
        }
        Ok(())
    }
}

/// Mount lifecycle state of the storage handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageState {
    /// Volume not attached.
    Unmounted,
    /// Volume attached and writable.
    Mounted,
    /// A mount or unmount failed and the handle is unusable.
    Failed,
}

/// Fatal mount error: every attempt allowed by the policy failed.
#[derive(Debug, Clone, Error)]
pub enum MountError {
    /// All retries were consumed without a successful mount.
    #[error("storage mount failed after {attempts} attempts: {last_error}")]
    Exhausted {
        /// Number of attempts made.
        attempts: u32,
        /// Driver message from the final attempt.
        last_error: String,
    },
}

/// Non-fatal unmount error, reported but never escalated by callers.
#[derive(Debug, Clone, Error)]
pub enum UnmountError {
    /// The driver refused to detach the volume.
    #[error("storage unmount failed: {0}")]
    Failed(String),
}

/// Outcome of a single bounded mount attempt.
enum MountAttempt {
    Mounted,
    Retry(StorageDriverError),
    Exhausted(StorageDriverError),
}

/// Owns the mount/retry/backoff policy for the removable volume.
///
/// Holds the driver exclusively for the session; the handle state
/// transitions to [`StorageState::Mounted`] only on a successful mount
/// call and back to [`StorageState::Unmounted`] on unmount.
pub struct StorageMounter<'d> {
    driver: &'d mut dyn StorageDriver,
    policy: MountPolicy,
    state: StorageState,
}

impl<'d> StorageMounter<'d> {
    /// Creates a mounter over the given driver with the given policy.
    pub fn new(driver: &'d mut dyn StorageDriver, policy: MountPolicy) -> Self {
        Self {
            driver,
            policy,
            state: StorageState::Unmounted,
        }
    }

    /// Returns the current handle state.
    pub fn state(&self) -> StorageState {
        self.state
    }

    /// Returns true if the volume is mounted.
    pub fn is_mounted(&self) -> bool {
        self.state == StorageState::Mounted
    }

    /// Single bounded attempt: mount, retry, or give up.
    fn attempt(&mut self, n: u32) -> MountAttempt {
        match self.driver.mount() {
            Ok(()) => {
                self.state = StorageState::Mounted;
                MountAttempt::Mounted
            }
            Err(e) if n + 1 >= self.policy.max_retries => MountAttempt::Exhausted(e),
            Err(e) => MountAttempt::Retry(e),
        }
    }

    /// Mounts the volume, retrying per the policy.
    ///
    /// Waits the policy backoff before each retry (not the first
    /// attempt) to let a prior session's pending I/O drain. Individual
    /// attempt failures are logged, not propagated; only exhausting
    /// every attempt yields a [`MountError`].
    pub fn mount(&mut self, delay: &dyn Delay) -> Result<(), MountError> {
        let mut n = 0;
        loop {
            if n > 0 {
                tracing::debug!(
                    retry = n,
                    max = self.policy.max_retries - 1,
                    backoff_ms = self.policy.backoff_ms,
                    "waiting before mount retry"
                );
                delay.wait(self.policy.backoff());
            }
            match self.attempt(n) {
                MountAttempt::Mounted => {
                    tracing::info!(attempts = n + 1, "storage mounted");
                    return Ok(());
                }
                MountAttempt::Retry(e) => {
                    tracing::warn!(attempt = n + 1, error = %e, "mount attempt failed");
                    n += 1;
                }
                MountAttempt::Exhausted(e) => {
                    self.state = StorageState::Failed;
                    tracing::warn!(attempt = n + 1, error = %e, "mount attempt failed");
                    return Err(MountError::Exhausted {
                        attempts: n + 1,
                        last_error: e.to_string(),
                    });
                }
            }
        }
    }

    /// Unmounts the volume if it is mounted.
    ///
    /// A no-op returning success when the handle is not mounted, so
    /// cleanup can call it unconditionally.
    pub fn unmount(&mut self) -> Result<(), UnmountError> {
        if self.state != StorageState::Mounted {
            return Ok(());
        }
        match self.driver.unmount() {
            Ok(()) => {
                self.state = StorageState::Unmounted;
                tracing::info!("storage unmounted");
                Ok(())
            }
            Err(e) => {
                self.state = StorageState::Failed;
                Err(UnmountError::Failed(e.to_string()))
            }
        }
    }
}
