//! Non-fatal notices produced while loading.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::format_shape;

/// An informational note about a structural inference the loader made.
///
/// Notices never change whether a load succeeded. They exist so callers can
/// tell the user when the file's layout was guessed rather than stated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LoadNotice {
    /// A 2D `.npy` array was reshaped into keypoint triples.
    NpyReshaped {
        /// Shape stored in the file.
        original: (usize, usize),
        /// Shape returned to the caller.
        inferred: (usize, usize, usize),
    },

    /// The first CSV column looked like frame numbers and was dropped.
    FrameIndexColumnDropped {
        /// Columns left after dropping it.
        remaining_columns: usize,
        /// Keypoints those columns describe.
        keypoints: usize,
    },
}

impl fmt::Display for LoadNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NpyReshaped { original, inferred } => write!(
                f,
                "reshaped 2D array {} to {} (frames, points, 3)",
                format_shape(&[original.0, original.1]),
                format_shape(&[inferred.0, inferred.1, inferred.2]),
            ),
            Self::FrameIndexColumnDropped {
                remaining_columns,
                keypoints,
            } => write!(
                f,
                "first column treated as frame index and dropped; \
                 {remaining_columns} columns remain ({keypoints} keypoints)"
            ),
        }
    }
}
