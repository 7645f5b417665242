//! Core keypoint types for pose annotation.
//!
//! This crate provides the canonical in-memory form of a 3D pose track:
//!
//! - [`KeypointSequence`] - `(frames, keypoints, 3)` array of coordinates
//! - [`Axis3`] - Names one of the three coordinate axes
//!
//! # Layout
//!
//! A sequence is row-major with the frame as the outermost axis. Element
//! `[f][k][c]` is coordinate `c` (0 = x, 1 = y, 2 = z) of keypoint `k` in
//! frame `f`. The last axis always has length 3.
//!
//! # Coordinate System
//!
//! The types are convention-agnostic. Loaders hand coordinates through
//! exactly as they were stored; display code that needs a different
//! handedness (for example a Y-down capture shown in a Y-up viewer) flips
//! axes itself with [`KeypointSequence::negate_axis`].
//!
//! # Example
//!
//! ```
//! use pose_types::KeypointSequence;
//!
//! // Two frames of a single keypoint
//! let seq = KeypointSequence::from_flat(2, 1, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//!
//! assert_eq!(seq.shape(), (2, 1, 3));
//! let p = seq.point(1, 0).unwrap();
//! assert_eq!((p.x, p.y, p.z), (4.0, 5.0, 6.0));
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod axis;
mod error;
mod sequence;

pub use axis::Axis3;
pub use error::{PoseError, PoseResult};
pub use sequence::{COORDS_PER_KEYPOINT, KeypointSequence};

// Re-export the array and point types used in the public API
pub use nalgebra::Point3;
pub use ndarray::{Array3, ArrayView2};
