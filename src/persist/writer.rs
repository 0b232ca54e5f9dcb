//! File writing and storage listing.

use super::namer::FileNamer;
use crate::sensor::CapturedImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while persisting or listing images.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Writing the image file failed (storage full, I/O fault).
    #[error("failed to write {path}: {source}")]
    WriteFailed {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Enumerating the storage root failed.
    #[error("failed to list {path}: {source}")]
    ListFailed {
        /// Directory that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A file successfully written to the storage root.
///
/// Immutable once listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedFile {
    /// Full path on the mounted volume.
    pub path: PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
}

/// Writes captured images to uniquely named files.
pub struct ImagePersister {
    namer: FileNamer,
}

impl ImagePersister {
    /// Creates a persister naming files from the given namer.
    pub fn new(namer: FileNamer) -> Self {
        Self { namer }
    }

    /// Writes one image into `destination_dir`.
    ///
    /// The buffer's leading bytes are sniffed for the JPEG
    /// start-of-image marker; a mismatch is logged as a warning but the
    /// write proceeds, preserving the data for offline inspection.
    pub fn persist(
        &mut self,
        image: &CapturedImage,
        destination_dir: &Path,
    ) -> Result<PersistedFile, PersistError> {
        if image.has_jpeg_signature() {
            tracing::debug!(sequence = image.sequence_index(), "valid JPEG signature");
        } else {
            tracing::warn!(
                sequence = image.sequence_index(),
                bytes = image.len(),
                "buffer lacks JPEG signature, writing anyway"
            );
        }

        let path = destination_dir.join(self.namer.next_name());
        std::fs::write(&path, image.bytes()).map_err(|source| PersistError::WriteFailed {
            path: path.clone(),
            source,
        })?;

        Ok(PersistedFile {
            path,
            size_bytes: image.len() as u64,
        })
    }
}

/// Enumerates the files at the storage root with their sizes.
///
/// Directories are skipped. Results are sorted by path so the listing
/// follows the creation-ordered filenames.
pub fn list_files(dir: &Path) -> Result<Vec<PersistedFile>, PersistError> {
    let entries = std::fs::read_dir(dir).map_err(|source| PersistError::ListFailed {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| PersistError::ListFailed {
            path: dir.to_path_buf(),
            source,
        })?;
        let metadata = entry.metadata().map_err(|source| PersistError::ListFailed {
            path: entry.path(),
            source,
        })?;
        if metadata.is_file() {
            files.push(PersistedFile {
                path: entry.path(),
                size_bytes: metadata.len(),
            });
        }
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn namer() -> FileNamer {
        let start = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap();
        FileNamer::new(start)
    }

    fn jpeg_image(seq: u32, len: usize) -> CapturedImage {
        let mut bytes = vec![0xFF, 0xD8, 0xFF];
        bytes.resize(len, 0xAB);
        CapturedImage::new(bytes, seq)
    }

    #[test]
    fn test_persist_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut persister = ImagePersister::new(namer());

        let file = persister.persist(&jpeg_image(0, 1000), dir.path()).unwrap();
        assert_eq!(file.size_bytes, 1000);
        assert!(file.path.ends_with("20240309_143005_000.jpg"));
        assert_eq!(std::fs::read(&file.path).unwrap().len(), 1000);
    }

    #[test]
    fn test_malformed_buffer_still_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut persister = ImagePersister::new(namer());

        let garbage = CapturedImage::new(vec![0x00; 64], 0);
        let file = persister.persist(&garbage, dir.path()).unwrap();
        assert_eq!(file.size_bytes, 64);
        assert!(file.path.exists());
    }

    #[test]
    fn test_write_failure_reported_not_panicking() {
        let mut persister = ImagePersister::new(namer());
        let missing = Path::new("/nonexistent-volume/images");

        let err = persister.persist(&jpeg_image(0, 16), missing).unwrap_err();
        assert!(matches!(err, PersistError::WriteFailed { .. }));
    }

    #[test]
    fn test_listing_sorted_with_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let mut persister = ImagePersister::new(namer());

        persister.persist(&jpeg_image(0, 10), dir.path()).unwrap();
        persister.persist(&jpeg_image(1, 20), dir.path()).unwrap();
        persister.persist(&jpeg_image(2, 30), dir.path()).unwrap();

        let files = list_files(dir.path()).unwrap();
        assert_eq!(files.len(), 3);
        assert_eq!(files[0].size_bytes, 10);
        assert_eq!(files[2].size_bytes, 30);
        assert!(files[0].path < files[1].path);
    }

    #[test]
    fn test_listing_missing_dir_fails() {
        let err = list_files(Path::new("/nonexistent-volume/images")).unwrap_err();
        assert!(matches!(err, PersistError::ListFailed { .. }));
    }
}
