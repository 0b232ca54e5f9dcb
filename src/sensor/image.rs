//! Captured image buffer with metadata.

use std::time::Instant;

/// JPEG start-of-image marker.
pub(crate) const JPEG_SOI: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// A single still image captured from the sensor.
///
/// Transient: exists only between capture and persist and is not
/// retained after the write.
#[derive(Clone)]
pub struct CapturedImage {
    /// Raw encoded image bytes as handed over by the driver.
    bytes: Vec<u8>,
    /// Zero-based index within the session's capture loop.
    sequence_index: u32,
    /// Capture timestamp.
    timestamp: Instant,
}

impl CapturedImage {
    /// Creates a new captured image.
    pub fn new(bytes: Vec<u8>, sequence_index: u32) -> Self {
        Self {
            bytes,
            sequence_index,
            timestamp: Instant::now(),
        }
    }

    /// Returns the raw image bytes.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the number of bytes in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the zero-based capture index within the session.
    #[inline]
    pub fn sequence_index(&self) -> u32 {
        self.sequence_index
    }

    /// Returns the capture timestamp.
    #[inline]
    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }

    /// Checks the leading bytes for the JPEG start-of-image marker
    /// without decoding the buffer.
    pub fn has_jpeg_signature(&self) -> bool {
        self.bytes.starts_with(&JPEG_SOI)
    }
}

impl std::fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturedImage")
            .field("sequence_index", &self.sequence_index)
            .field("bytes", &self.bytes.len())
            .field("jpeg_signature", &self.has_jpeg_signature())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpeg_signature_detected() {
        let image = CapturedImage::new(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00], 0);
        assert!(image.has_jpeg_signature());
    }

    #[test]
    fn test_non_jpeg_buffer_rejected() {
        let image = CapturedImage::new(vec![0x00, 0x01, 0x02, 0x03], 0);
        assert!(!image.has_jpeg_signature());
    }

    #[test]
    fn test_short_buffer_not_a_signature() {
        let image = CapturedImage::new(vec![0xFF, 0xD8], 0);
        assert!(!image.has_jpeg_signature());
    }
}
