//! Re-opening previously exported label tables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{LabelError, LabelResult};
use crate::frame_labels::FrameLabels;
use crate::schema::{LabelSchema, LabelValue};

/// Cell texts read as "no value".
const MISSING_MARKERS: &[&str] = &[
    "", "NaN", "nan", "-NaN", "-nan", "NA", "N/A", "n/a", "#N/A", "NULL", "null", "None", "<NA>",
];

/// Reads labels for `schema` from a CSV table with a header row.
///
/// The table must have a `frame` column; every other column is matched to
/// schema labels by header name. Keypoint and identifier columns are
/// ignored, so a table written by [`write_labeled_csv`](crate::write_labeled_csv)
/// reads back directly.
///
/// Schema labels missing from the header keep their defaults, as do blank
/// or `NaN` cells. Rows whose frame is not a whole number in
/// `0..frame_count` are skipped.
///
/// # Errors
///
/// Returns [`LabelError::NotFound`] if the file does not exist,
/// [`LabelError::MissingFrameColumn`] if the header lacks `frame`, and
/// [`LabelError::Csv`] for malformed CSV.
pub fn read_frame_labels<P: AsRef<Path>>(
    path: P,
    schema: &LabelSchema,
    frame_count: usize,
) -> LabelResult<FrameLabels> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LabelError::from_open(path, e))?;
    let labels = read_frame_labels_from(file, path, schema, frame_count)?;

    info!(
        path = %path.display(),
        frames = labels.frame_count(),
        labels = schema.len(),
        "loaded existing labels"
    );
    Ok(labels)
}

fn read_frame_labels_from<R: Read>(
    reader: R,
    path: &Path,
    schema: &LabelSchema,
    frame_count: usize,
) -> LabelResult<FrameLabels> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    let position = |name: &str| headers.iter().position(|h| h == name);

    let frame_column = position("frame").ok_or_else(|| LabelError::MissingFrameColumn {
        path: path.to_path_buf(),
    })?;

    let columns: Vec<Option<usize>> = schema
        .defs()
        .iter()
        .map(|def| {
            let column = position(&def.name);
            if column.is_none() {
                warn!(label = %def.name, "label column missing from CSV, using defaults");
            }
            column
        })
        .collect();

    let mut labels = FrameLabels::new(schema.clone(), frame_count);
    let rows = labels.rows_mut();

    for record in reader.records() {
        let record = record?;
        let raw_frame = record.get(frame_column).unwrap_or("");
        let Some(frame) = parse_frame(raw_frame) else {
            warn!(value = raw_frame, "skipping row with an invalid frame number");
            continue;
        };
        let Some(row) = rows.get_mut(frame) else {
            debug!(frame, frame_count, "skipping row past the last frame");
            continue;
        };

        for ((slot, def), column) in row.iter_mut().zip(schema.defs()).zip(&columns) {
            let cell = column.and_then(|c| record.get(c)).unwrap_or("");
            *slot = if MISSING_MARKERS.contains(&cell) {
                LabelValue::default_for(def.kind)
            } else {
                LabelValue::parse(def.kind, cell)
            };
        }
    }

    Ok(labels)
}

/// Parses a frame number written either as an integer or as a whole float.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn parse_frame(text: &str) -> Option<usize> {
    if let Ok(frame) = text.parse::<usize>() {
        return Some(frame);
    }
    let value: f64 = text.parse().ok()?;
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0).then(|| value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LabelDef;

    fn schema() -> LabelSchema {
        LabelSchema::new([LabelDef::text("phase"), LabelDef::numeric("effort")]).unwrap()
    }

    fn read(text: &str, frame_count: usize) -> LabelResult<FrameLabels> {
        read_frame_labels_from(text.as_bytes(), Path::new("labels.csv"), &schema(), frame_count)
    }

    #[test]
    fn reads_matching_columns() {
        let labels = read(
            "climber_id,route_id,frame,kp0_x,kp0_y,kp0_z,phase,effort\n\
             c,r,0,0.0,0.0,0.0,reach,1.5\n\
             c,r,1,0.0,0.0,0.0,,NaN\n",
            2,
        )
        .unwrap();

        assert_eq!(labels.get(0, "phase"), Some(&LabelValue::text("reach")));
        assert_eq!(labels.get(0, "effort"), Some(&LabelValue::Numeric(1.5)));
        assert_eq!(labels.get(1, "phase"), Some(&LabelValue::text("")));
        assert_eq!(labels.get(1, "effort"), Some(&LabelValue::Numeric(0.0)));
    }

    #[test]
    fn missing_label_column_defaults() {
        let labels = read("frame,phase\n0,reach\n", 1).unwrap();
        assert_eq!(labels.get(0, "phase"), Some(&LabelValue::text("reach")));
        assert_eq!(labels.get(0, "effort"), Some(&LabelValue::Numeric(0.0)));
    }

    #[test]
    fn absent_frames_default() {
        let labels = read("frame,phase\n2,top\n", 4).unwrap();
        assert_eq!(labels.get(0, "phase"), Some(&LabelValue::text("")));
        assert_eq!(labels.get(2, "phase"), Some(&LabelValue::text("top")));
    }

    #[test]
    fn out_of_range_and_invalid_frames_skipped() {
        let labels = read("frame,phase\n5,late\n-1,neg\nx,bad\n1.0,float\n", 2).unwrap();
        assert_eq!(labels.frame_count(), 2);
        assert_eq!(labels.get(0, "phase"), Some(&LabelValue::text("")));
        assert_eq!(labels.get(1, "phase"), Some(&LabelValue::text("float")));
    }

    #[test]
    fn unparsable_numeric_defaults() {
        let labels = read("frame,effort\n0,hard\n", 1).unwrap();
        assert_eq!(labels.get(0, "effort"), Some(&LabelValue::Numeric(0.0)));
    }

    #[test]
    fn header_with_byte_order_mark() {
        let labels = read("\u{feff}frame,phase\n0,reach\n", 1).unwrap();
        assert_eq!(labels.get(0, "phase"), Some(&LabelValue::text("reach")));
    }

    #[test]
    fn missing_frame_column() {
        assert!(matches!(
            read("phase,effort\nreach,1\n", 1),
            Err(LabelError::MissingFrameColumn { .. })
        ));
    }

    #[test]
    fn frame_number_forms() {
        assert_eq!(parse_frame("7"), Some(7));
        assert_eq!(parse_frame("7.0"), Some(7));
        assert_eq!(parse_frame("7.5"), None);
        assert_eq!(parse_frame("-1"), None);
        assert_eq!(parse_frame("NaN"), None);
        assert_eq!(parse_frame(""), None);
    }
}
