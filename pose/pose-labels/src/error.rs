//! Error types for label handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for label operations.
pub type LabelResult<T> = Result<T, LabelError>;

/// Errors that can occur while defining, reading, or exporting labels.
#[derive(Debug, Error)]
pub enum LabelError {
    /// Label names file or labeled CSV does not exist.
    #[error("file not found: {}", .path.display())]
    NotFound {
        /// Missing path.
        path: PathBuf,
    },

    /// Label names file contains no names.
    #[error("label names file '{}' contains no label names", .path.display())]
    EmptyLabelFile {
        /// Path of the empty file.
        path: PathBuf,
    },

    /// Two labels share a name.
    #[error("duplicate label name '{name}'")]
    DuplicateLabel {
        /// Repeated name.
        name: String,
    },

    /// No named labels to export.
    #[error("no labels defined")]
    NoLabels,

    /// Name does not belong to the schema.
    #[error("unknown label '{name}'")]
    UnknownLabel {
        /// Requested name.
        name: String,
    },

    /// Frame index past the end of the sequence.
    #[error("frame {frame} is out of range for {frame_count} frame(s)")]
    FrameOutOfRange {
        /// Requested frame.
        frame: usize,
        /// Number of frames held.
        frame_count: usize,
    },

    /// Labeled CSV has no `frame` column.
    #[error("labeled CSV '{}' is missing the required 'frame' column", .path.display())]
    MissingFrameColumn {
        /// Path of the file.
        path: PathBuf,
    },

    /// Labels and keypoints disagree on the number of frames.
    #[error("labels cover {labels} frame(s) but keypoints have {keypoints}")]
    FrameCountMismatch {
        /// Frames in the label store.
        labels: usize,
        /// Frames in the keypoint sequence.
        keypoints: usize,
    },

    /// CSV reader or writer error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LabelError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates a duplicate label error.
    #[must_use]
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateLabel { name: name.into() }
    }

    /// Creates an unknown label error.
    #[must_use]
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownLabel { name: name.into() }
    }

    /// Maps an open failure to [`LabelError::NotFound`] when the file is
    /// missing and to [`LabelError::Io`] otherwise.
    pub(crate) fn from_open(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::not_found(path)
        } else {
            Self::Io(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            LabelError::duplicate("phase").to_string(),
            "duplicate label name 'phase'"
        );
        assert_eq!(
            LabelError::FrameCountMismatch {
                labels: 3,
                keypoints: 4
            }
            .to_string(),
            "labels cover 3 frame(s) but keypoints have 4"
        );
        assert!(
            LabelError::MissingFrameColumn {
                path: PathBuf::from("a_labels.csv")
            }
            .to_string()
            .contains("'frame'")
        );
    }

    #[test]
    fn open_error_mapping() {
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(
            LabelError::from_open("x.txt", missing),
            LabelError::NotFound { .. }
        ));

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no");
        assert!(matches!(
            LabelError::from_open("x.txt", denied),
            LabelError::Io(_)
        ));
    }
}
