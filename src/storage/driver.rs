//! Storage driver abstraction.
//!
//! The physical card driver is an external collaborator. This trait is
//! the seam between the mount policy and the hardware, allowing a mock
//! driver to stand in during tests and demonstrations.

use thiserror::Error;

/// Error reported by the underlying storage driver.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct StorageDriverError(pub String);

/// Trait for removable storage drivers.
pub trait StorageDriver {
    /// Attaches the volume to the filesystem namespace.
    fn mount(&mut self) -> Result<(), StorageDriverError>;

    /// Detaches the volume.
    fn unmount(&mut self) -> Result<(), StorageDriverError>;

    /// Returns true if the volume is currently attached.
    fn is_mounted(&self) -> bool;
}

/// Mock storage driver with scripted mount failures.
///
/// Fails the first `fail_mounts` mount calls, then succeeds, which
/// models a card still draining a prior session's I/O. Call counters
/// are exposed for lifecycle assertions in tests.
#[derive(Debug, Default)]
pub struct MockStorage {
    fail_mounts: u32,
    fail_unmount: bool,
    mounted: bool,
    mount_calls: u32,
    unmount_calls: u32,
}

impl MockStorage {
    /// Creates a mock that mounts successfully on the first call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the first `count` mount calls before succeeding.
    pub fn with_mount_failures(mut self, count: u32) -> Self {
        self.fail_mounts = count;
        self
    }

    /// Makes every unmount call fail.
    pub fn with_unmount_failure(mut self) -> Self {
        self.fail_unmount = true;
        self
    }

    /// Number of mount calls made against this driver.
    pub fn mount_calls(&self) -> u32 {
        self.mount_calls
    }

    /// Number of unmount calls made against this driver.
    pub fn unmount_calls(&self) -> u32 {
        self.unmount_calls
    }
}

impl StorageDriver for MockStorage {
    fn mount(&mut self) -> Result<(), StorageDriverError> {
        self.mount_calls += 1;
        if self.fail_mounts > 0 {
            self.fail_mounts -= 1;
            return Err(StorageDriverError("card busy".to_owned()));
        }
        self.mounted = true;
        Ok(())
    }

    fn unmount(&mut self) -> Result<(), StorageDriverError> {
        self.unmount_calls += 1;
        if self.fail_unmount {
            return Err(StorageDriverError("pending writes".to_owned()));
        }
        self.mounted = false;
        Ok(())
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_mounts_immediately_by_default() {
        let mut storage = MockStorage::new();
        assert!(!storage.is_mounted());
        storage.mount().unwrap();
        assert!(storage.is_mounted());
        assert_eq!(storage.mount_calls(), 1);
    }

    #[test]
    fn test_mock_scripted_failures_then_success() {
        let mut storage = MockStorage::new().with_mount_failures(2);

        assert!(storage.mount().is_err());
        assert!(storage.mount().is_err());
        assert!(storage.mount().is_ok());
        assert!(storage.is_mounted());
        assert_eq!(storage.mount_calls(), 3);
    }

    #[test]
    fn test_mock_unmount_failure() {
        let mut storage = MockStorage::new().with_unmount_failure();
        storage.mount().unwrap();
        assert!(storage.unmount().is_err());
        assert_eq!(storage.unmount_calls(), 1);
    }
}
