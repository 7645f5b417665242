//! Error types for keypoint sequences.

use thiserror::Error;

/// Result type for keypoint sequence operations.
pub type PoseResult<T> = Result<T, PoseError>;

/// Errors that can occur when building a keypoint sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoseError {
    /// Array shape does not describe `(frames, keypoints, 3)`.
    #[error("shape mismatch: expected {expected}, got {actual:?}")]
    ShapeMismatch {
        /// Description of the accepted shape.
        expected: String,
        /// Actual shape.
        actual: Vec<usize>,
    },

    /// Flat buffer length does not match the requested dimensions.
    #[error("buffer size mismatch: expected {expected} values, got {actual}")]
    BufferSizeMismatch {
        /// Expected number of values.
        expected: usize,
        /// Actual number of values.
        actual: usize,
    },
}

impl PoseError {
    /// Creates a shape mismatch error.
    #[must_use]
    pub fn shape_mismatch(expected: impl Into<String>, actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.into(),
            actual: actual.to_vec(),
        }
    }

    /// Creates a buffer size mismatch error.
    #[must_use]
    pub const fn buffer_mismatch(expected: usize, actual: usize) -> Self {
        Self::BufferSizeMismatch { expected, actual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_shape_mismatch() {
        let err = PoseError::shape_mismatch("(frames, keypoints, 3)", &[4, 2, 2]);
        let msg = err.to_string();
        assert!(msg.contains("(frames, keypoints, 3)"));
        assert!(msg.contains("[4, 2, 2]"));
    }

    #[test]
    fn error_buffer_mismatch() {
        let err = PoseError::buffer_mismatch(12, 10);
        let msg = err.to_string();
        assert!(msg.contains("12"));
        assert!(msg.contains("10"));
    }
}
