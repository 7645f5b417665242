//! Labeled CSV export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use pose_types::{Axis3, KeypointSequence};
use tracing::info;

use crate::error::{LabelError, LabelResult};
use crate::frame_labels::FrameLabels;

/// Identifier columns written in front of every row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExportOptions {
    /// Value of the `climber_id` column.
    pub climber_id: String,
    /// Value of the `route_id` column.
    pub route_id: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            climber_id: "climber_001".to_string(),
            route_id: "route_001".to_string(),
        }
    }
}

impl ExportOptions {
    /// Sets the climber identifier.
    #[must_use]
    pub fn with_climber_id(mut self, id: impl Into<String>) -> Self {
        self.climber_id = id.into();
        self
    }

    /// Sets the route identifier.
    #[must_use]
    pub fn with_route_id(mut self, id: impl Into<String>) -> Self {
        self.route_id = id.into();
        self
    }
}

/// Size of an exported table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExportSummary {
    /// Data rows written, one per frame.
    pub rows: usize,
    /// Columns per row, including identifiers and labels.
    pub columns: usize,
}

/// Default export path for a keypoint file: `<stem>_labels.csv` in the
/// same directory.
#[must_use]
pub fn labels_path_for<P: AsRef<Path>>(keypoints_path: P) -> PathBuf {
    let path = keypoints_path.as_ref();
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    path.with_file_name(format!("{stem}_labels.csv"))
}

/// Writes keypoints and labels to a CSV file.
///
/// See [`write_labeled_csv_to`] for the layout.
///
/// # Errors
///
/// Returns the errors of [`write_labeled_csv_to`], plus [`LabelError::Io`]
/// if the file cannot be created.
pub fn write_labeled_csv<P: AsRef<Path>>(
    path: P,
    keypoints: &KeypointSequence,
    labels: &FrameLabels,
    options: &ExportOptions,
) -> LabelResult<ExportSummary> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let summary = write_labeled_csv_to(BufWriter::new(file), keypoints, labels, options)?;

    info!(
        path = %path.display(),
        rows = summary.rows,
        columns = summary.columns,
        "wrote labeled CSV"
    );
    Ok(summary)
}

/// Writes keypoints and labels as CSV to any writer.
///
/// The header is `climber_id, route_id, frame`, then `kp{i}_x, kp{i}_y,
/// kp{i}_z` for every keypoint, then the label names in schema order. Each
/// frame produces one row.
///
/// # Errors
///
/// Returns [`LabelError::NoLabels`] if the schema is empty,
/// [`LabelError::FrameCountMismatch`] if `labels` was built for a different
/// number of frames, and [`LabelError::Csv`] or [`LabelError::Io`] if
/// writing fails.
pub fn write_labeled_csv_to<W: Write>(
    writer: W,
    keypoints: &KeypointSequence,
    labels: &FrameLabels,
    options: &ExportOptions,
) -> LabelResult<ExportSummary> {
    let schema = labels.schema();
    if schema.is_empty() {
        return Err(LabelError::NoLabels);
    }
    if labels.frame_count() != keypoints.frame_count() {
        return Err(LabelError::FrameCountMismatch {
            labels: labels.frame_count(),
            keypoints: keypoints.frame_count(),
        });
    }

    let keypoint_count = keypoints.keypoint_count();
    let mut header = vec![
        "climber_id".to_string(),
        "route_id".to_string(),
        "frame".to_string(),
    ];
    for k in 0..keypoint_count {
        header.extend(Axis3::ALL.map(|axis| format!("kp{k}_{}", axis.name())));
    }
    header.extend(schema.names().map(str::to_string));
    let columns = header.len();

    let mut out = csv::Writer::from_writer(writer);
    out.write_record(&header)?;

    let mut record = Vec::with_capacity(columns);
    for (frame, coords) in keypoints.frames().enumerate() {
        record.clear();
        record.push(options.climber_id.clone());
        record.push(options.route_id.clone());
        record.push(frame.to_string());
        record.extend(coords.iter().map(|v| format!("{v:?}")));
        if let Some(row) = labels.row(frame) {
            record.extend(row.iter().map(ToString::to_string));
        }
        out.write_record(&record)?;
    }
    out.flush()?;

    Ok(ExportSummary {
        rows: keypoints.frame_count(),
        columns,
    })
}
