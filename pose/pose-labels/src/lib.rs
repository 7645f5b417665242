//! Frame labels for keypoint sequences.
//!
//! A keypoint sequence is annotated with a fixed set of named labels. Each
//! frame carries one value per label, and the result is exported as a
//! single CSV table with the keypoints flattened alongside the labels.
//!
//! - [`parse_label_names`] / [`load_label_names`] - comma-separated label name files
//! - [`LabelSchema`] - ordered, de-duplicated label definitions
//! - [`IntervalTrack`] - values assigned to inclusive frame ranges
//! - [`FrameLabels`] - one value per label per frame
//! - [`read_frame_labels`] - re-open a previously exported table
//! - [`write_labeled_csv`] - export keypoints and labels together
//!
//! # Exported Layout
//!
//! ```text
//! climber_id,route_id,frame,kp0_x,kp0_y,kp0_z,...,<label 1>,<label 2>,...
//! climber_001,route_001,0,0.1,0.2,0.3,...,reach,0.0
//! ```
//!
//! Numbers are written in their shortest round-trip form and missing
//! coordinates as `NaN`.
//!
//! # Example
//!
//! ```
//! use pose_labels::{ExportOptions, FrameLabels, LabelSchema, LabelValue, write_labeled_csv_to};
//! use pose_types::KeypointSequence;
//!
//! let keypoints = KeypointSequence::from_flat(2, 1, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! let schema = LabelSchema::from_names(["phase"]).unwrap();
//! let mut labels = FrameLabels::new(schema, 2);
//! labels.set(1, "phase", LabelValue::text("reach")).unwrap();
//!
//! let mut out = Vec::new();
//! write_labeled_csv_to(&mut out, &keypoints, &labels, &ExportOptions::default()).unwrap();
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.ends_with("climber_001,route_001,1,3.0,4.0,5.0,reach\n"));
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod export;
mod frame_labels;
mod import;
mod interval;
mod names;
mod schema;

pub use error::{LabelError, LabelResult};
pub use export::{
    ExportOptions, ExportSummary, labels_path_for, write_labeled_csv, write_labeled_csv_to,
};
pub use frame_labels::FrameLabels;
pub use import::read_frame_labels;
pub use interval::{FrameInterval, IntervalTrack, IntervalValue};
pub use names::{load_label_names, parse_label_names};
pub use schema::{LabelDef, LabelKind, LabelSchema, LabelValue};
