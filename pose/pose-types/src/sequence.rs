//! Keypoint sequence storage.

use nalgebra::Point3;
use ndarray::{Array3, ArrayView2, Axis};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::axis::Axis3;
use crate::error::{PoseError, PoseResult};

/// Number of coordinates stored per keypoint.
pub const COORDS_PER_KEYPOINT: usize = 3;

const EXPECTED_SHAPE: &str = "(frames, keypoints, 3)";

/// A sequence of 3D keypoint frames.
///
/// Stored as an `(frames, keypoints, 3)` array of `f64`. Each loader call
/// produces a fresh sequence; nothing is shared between sequences.
///
/// # Example
///
/// ```
/// use pose_types::{Array3, KeypointSequence};
///
/// let seq = KeypointSequence::new(Array3::zeros((10, 17, 3))).unwrap();
/// assert_eq!(seq.frame_count(), 10);
/// assert_eq!(seq.keypoint_count(), 17);
///
/// // Anything other than three coordinates per keypoint is rejected
/// assert!(KeypointSequence::new(Array3::zeros((10, 17, 2))).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Array3<f64>", into = "Array3<f64>")
)]
pub struct KeypointSequence {
    data: Array3<f64>,
}

impl KeypointSequence {
    /// Wrap an existing `(frames, keypoints, 3)` array.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::ShapeMismatch`] if the last axis is not 3 long.
    pub fn new(data: Array3<f64>) -> PoseResult<Self> {
        if data.dim().2 != COORDS_PER_KEYPOINT {
            return Err(PoseError::shape_mismatch(EXPECTED_SHAPE, data.shape()));
        }
        Ok(Self { data })
    }

    /// Build a sequence from row-major values.
    ///
    /// `values[(f * keypoints + k) * 3 + c]` becomes element `[f][k][c]`.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::BufferSizeMismatch`] if `values` does not hold
    /// exactly `frames * keypoints * 3` numbers.
    pub fn from_flat(frames: usize, keypoints: usize, values: Vec<f64>) -> PoseResult<Self> {
        let expected = frames * keypoints * COORDS_PER_KEYPOINT;
        let actual = values.len();
        if actual != expected {
            return Err(PoseError::buffer_mismatch(expected, actual));
        }
        let data = Array3::from_shape_vec((frames, keypoints, COORDS_PER_KEYPOINT), values)
            .map_err(|_| PoseError::buffer_mismatch(expected, actual))?;
        Ok(Self { data })
    }

    /// An empty `(0, 0, 3)` sequence.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            data: Array3::zeros((0, 0, COORDS_PER_KEYPOINT)),
        }
    }

    /// Number of frames.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.data.dim().0
    }

    /// Number of keypoints per frame.
    #[must_use]
    pub fn keypoint_count(&self) -> usize {
        self.data.dim().1
    }

    /// `(frames, keypoints, 3)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Returns true if the sequence holds no coordinates at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Position of one keypoint in one frame.
    #[must_use]
    pub fn point(&self, frame: usize, keypoint: usize) -> Option<Point3<f64>> {
        let x = *self.data.get((frame, keypoint, 0))?;
        let y = *self.data.get((frame, keypoint, 1))?;
        let z = *self.data.get((frame, keypoint, 2))?;
        Some(Point3::new(x, y, z))
    }

    /// All keypoints of one frame as a `(keypoints, 3)` view.
    #[must_use]
    pub fn frame(&self, frame: usize) -> Option<ArrayView2<'_, f64>> {
        (frame < self.frame_count()).then(|| self.data.index_axis(Axis(0), frame))
    }

    /// Iterate over frames in order.
    pub fn frames(&self) -> impl ExactSizeIterator<Item = ArrayView2<'_, f64>> {
        self.data.outer_iter()
    }

    /// Borrow the underlying array.
    #[must_use]
    pub const fn as_array(&self) -> &Array3<f64> {
        &self.data
    }

    /// Consume the sequence and return the underlying array.
    #[must_use]
    pub fn into_array(self) -> Array3<f64> {
        self.data
    }

    /// Negate one coordinate of every keypoint in place.
    ///
    /// Viewers whose vertical axis points the other way from the capture
    /// system flip Y this way before drawing.
    pub fn negate_axis(&mut self, axis: Axis3) {
        self.data
            .index_axis_mut(Axis(2), axis.index())
            .mapv_inplace(|v| -v);
    }

    /// Copy of the sequence with one coordinate negated.
    #[must_use]
    pub fn with_axis_negated(mut self, axis: Axis3) -> Self {
        self.negate_axis(axis);
        self
    }

    /// Axis-aligned bounds `(min, max)` over all finite keypoints.
    ///
    /// Returns `None` if no keypoint has three finite coordinates.
    #[must_use]
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let mut bounds: Option<(Point3<f64>, Point3<f64>)> = None;
        for frame in self.data.outer_iter() {
            for row in frame.outer_iter() {
                let p = Point3::new(row[0], row[1], row[2]);
                if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
                    continue;
                }
                bounds = Some(match bounds {
                    None => (p, p),
                    Some((min, max)) => (min.inf(&p), max.sup(&p)),
                });
            }
        }
        bounds
    }
}

impl Default for KeypointSequence {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Array3<f64>> for KeypointSequence {
    type Error = PoseError;

    fn try_from(data: Array3<f64>) -> PoseResult<Self> {
        Self::new(data)
    }
}

impl From<KeypointSequence> for Array3<f64> {
    fn from(seq: KeypointSequence) -> Self {
        seq.data
    }
}
