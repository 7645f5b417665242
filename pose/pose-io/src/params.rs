//! Loader configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters controlling CSV cleaning heuristics.
///
/// `.npy` loading has no tunable behavior; these only affect CSV input.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoadParams {
    /// Largest distance from the nearest integer at which a value still
    /// counts as a frame number.
    pub integral_tolerance: f64,

    /// Drop a leading integer column when the remaining columns divide
    /// into whole keypoints.
    pub detect_frame_index_column: bool,
}

impl Default for LoadParams {
    fn default() -> Self {
        Self {
            integral_tolerance: 1e-9,
            detect_frame_index_column: true,
        }
    }
}

impl LoadParams {
    /// Parameters that keep every numeric column as keypoint data.
    ///
    /// Use when the file is known to carry no frame-index column, for example
    /// integer-valued synthetic data whose first coordinate would otherwise
    /// look like a frame counter.
    #[must_use]
    pub fn keep_all_columns() -> Self {
        Self {
            detect_frame_index_column: false,
            ..Default::default()
        }
    }

    /// Set the integral tolerance.
    #[must_use]
    pub const fn with_integral_tolerance(mut self, tolerance: f64) -> Self {
        self.integral_tolerance = tolerance;
        self
    }

    /// Enable or disable frame-index column detection.
    #[must_use]
    pub const fn with_frame_index_detection(mut self, enabled: bool) -> Self {
        self.detect_frame_index_column = enabled;
        self
    }
}
