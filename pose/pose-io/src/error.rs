//! Error types for keypoint loading.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for keypoint loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Classification of a failed load.
///
/// Callers that only need to branch on the kind of failure (for example to
/// pick a dialog title) match on this instead of the full [`LoadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadErrorKind {
    /// Extension is not `.npy` or `.csv`.
    UnsupportedFormat,
    /// Path does not exist.
    NotFound,
    /// Nothing to load, before or after header stripping.
    EmptyFile,
    /// File exists but is unreadable or structurally corrupt.
    ParseError,
    /// Non-numeric cell inside the keypoint region of a CSV.
    DirtyData,
    /// Data cannot be arranged as `(frames, keypoints, 3)`.
    IncompatibleShape,
}

impl fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UnsupportedFormat => "unsupported format",
            Self::NotFound => "not found",
            Self::EmptyFile => "empty file",
            Self::ParseError => "parse error",
            Self::DirtyData => "dirty data",
            Self::IncompatibleShape => "incompatible shape",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while loading a keypoint file.
///
/// Every variant carries the offending path. The `Display` text is meant to
/// be shown to an end user as-is.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Extension is not `.npy` or `.csv`.
    #[error("unsupported file format: '{}'. Please use .npy or .csv", .path.display())]
    UnsupportedFormat {
        /// Rejected path.
        path: PathBuf,
    },

    /// File does not exist.
    #[error("file not found: {}", .path.display())]
    NotFound {
        /// Missing path.
        path: PathBuf,
    },

    /// File holds no usable rows or columns.
    #[error("file '{}' is empty: {reason}", .path.display())]
    EmptyFile {
        /// Path of the empty file.
        path: PathBuf,
        /// Which stage found nothing left to load.
        reason: String,
    },

    /// File could not be read or decoded.
    #[error("failed to parse {}: {message}", .path.display())]
    Parse {
        /// Path of the unreadable file.
        path: PathBuf,
        /// Underlying reader or decoder message.
        message: String,
    },

    /// Numeric coercion failed inside the keypoint region.
    #[error(
        "CSV file '{}' contains non-numeric values within the keypoint data area \
         ({count} cell(s); first is {value:?} at line {line}, column {column}). \
         Cannot form clean numeric keypoints",
        .path.display()
    )]
    DirtyData {
        /// Path of the file.
        path: PathBuf,
        /// 1-based line number of the first offending cell.
        line: u64,
        /// 1-based column number of the first offending cell.
        column: usize,
        /// Raw text of the first offending cell.
        value: String,
        /// Number of offending cells.
        count: usize,
    },

    /// Data cannot be arranged as `(frames, keypoints, 3)`.
    #[error(
        "incompatible keypoint shape {} in {}: expected {expected}",
        format_shape(.shape),
        .path.display()
    )]
    IncompatibleShape {
        /// Path of the file.
        path: PathBuf,
        /// Shape that was found.
        shape: Vec<usize>,
        /// Shapes that would have been accepted.
        expected: String,
    },
}

impl LoadError {
    /// Creates an unsupported format error.
    #[must_use]
    pub fn unsupported(path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedFormat { path: path.into() }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates an empty file error.
    #[must_use]
    pub fn empty(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::EmptyFile {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an incompatible shape error.
    #[must_use]
    pub fn incompatible_shape(
        path: impl Into<PathBuf>,
        shape: &[usize],
        expected: impl Into<String>,
    ) -> Self {
        Self::IncompatibleShape {
            path: path.into(),
            shape: shape.to_vec(),
            expected: expected.into(),
        }
    }

    /// The classification of this failure.
    #[must_use]
    pub const fn kind(&self) -> LoadErrorKind {
        match self {
            Self::UnsupportedFormat { .. } => LoadErrorKind::UnsupportedFormat,
            Self::NotFound { .. } => LoadErrorKind::NotFound,
            Self::EmptyFile { .. } => LoadErrorKind::EmptyFile,
            Self::Parse { .. } => LoadErrorKind::ParseError,
            Self::DirtyData { .. } => LoadErrorKind::DirtyData,
            Self::IncompatibleShape { .. } => LoadErrorKind::IncompatibleShape,
        }
    }

    /// The path the failed load was given.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::UnsupportedFormat { path }
            | Self::NotFound { path }
            | Self::EmptyFile { path, .. }
            | Self::Parse { path, .. }
            | Self::DirtyData { path, .. }
            | Self::IncompatibleShape { path, .. } => path,
        }
    }
}

/// Format a shape the way numpy prints it: `(10,)`, `(4, 5)`.
pub(crate) fn format_shape(shape: &[usize]) -> String {
    match shape {
        [single] => format!("({single},)"),
        dims => {
            let parts: Vec<String> = dims.iter().map(ToString::to_string).collect();
            format!("({})", parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_formatting() {
        assert_eq!(format_shape(&[]), "()");
        assert_eq!(format_shape(&[10]), "(10,)");
        assert_eq!(format_shape(&[4, 5]), "(4, 5)");
        assert_eq!(format_shape(&[2, 17, 3]), "(2, 17, 3)");
    }

    #[test]
    fn unsupported_message() {
        let err = LoadError::unsupported("data/unsupported.txt");
        let msg = err.to_string();
        assert!(msg.contains("unsupported.txt"));
        assert!(msg.contains("Please use .npy or .csv"));
        assert_eq!(err.kind(), LoadErrorKind::UnsupportedFormat);
    }

    #[test]
    fn incompatible_shape_message() {
        let err = LoadError::incompatible_shape("a.npy", &[10], "(frames, points, 3)");
        let msg = err.to_string();
        assert!(msg.contains("(10,)"));
        assert!(msg.contains("(frames, points, 3)"));
        assert_eq!(err.path(), Path::new("a.npy"));
    }

    #[test]
    fn dirty_data_message() {
        let err = LoadError::DirtyData {
            path: PathBuf::from("malformed.csv"),
            line: 3,
            column: 4,
            value: "text_in_data".to_string(),
            count: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("malformed.csv"));
        assert!(msg.contains("non-numeric values"));
        assert!(msg.contains("\"text_in_data\""));
        assert!(msg.contains("line 3, column 4"));
        assert_eq!(err.kind(), LoadErrorKind::DirtyData);
    }

    #[test]
    fn kinds_and_paths() {
        let cases = [
            (LoadError::not_found("x.npy"), LoadErrorKind::NotFound, "x.npy"),
            (LoadError::empty("x.csv", "no rows"), LoadErrorKind::EmptyFile, "x.csv"),
            (LoadError::parse("y.npy", "bad magic"), LoadErrorKind::ParseError, "y.npy"),
            (LoadError::unsupported("data/x.txt"), LoadErrorKind::UnsupportedFormat, "data/x.txt"),
        ];
        for (err, kind, path) in cases {
            assert_eq!(err.kind(), kind);
            assert_eq!(err.path(), Path::new(path));
        }
    }

    #[test]
    fn kind_display() {
        assert_eq!(LoadErrorKind::DirtyData.to_string(), "dirty data");
        assert_eq!(LoadErrorKind::NotFound.to_string(), "not found");
    }
}
