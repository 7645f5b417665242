//! CSV keypoint files.
//!
//! CSV input arrives in several conventions: bare coordinate grids, grids
//! with a leading frame number, and grids under text header rows or next
//! to text metadata columns. No header row is assumed; instead the file is
//! cleaned in passes:
//!
//! ```text
//! 1. read all cells                 nothing at all       -> EmptyFile
//! 2. coerce cells to f64            failures are "missing"
//! 3. drop rows with no number       nothing left         -> EmptyFile
//! 4. drop columns with no number    nothing left         -> EmptyFile
//! 5. drop an integer first column when the rest is a multiple of 3
//! 6. any missing cell left          -> DirtyData
//! 7. columns not a multiple of 3    -> IncompatibleShape
//! 8. reshape (rows, cols) -> (rows, cols / 3, 3)
//! ```

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use pose_types::{COORDS_PER_KEYPOINT, KeypointSequence};
use tracing::debug;

use crate::error::{LoadError, LoadResult};
use crate::notice::LoadNotice;
use crate::params::LoadParams;
use crate::{LoadedKeypoints, announce, read_source};

/// Load keypoints from a `.csv` file.
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist ([`LoadError::NotFound`])
/// - The file is unreadable or a row has more fields than the first
///   ([`LoadError::Parse`])
/// - No numeric rows or columns remain after stripping text
///   ([`LoadError::EmptyFile`])
/// - A non-numeric cell sits inside the keypoint region
///   ([`LoadError::DirtyData`])
/// - The remaining columns are not a multiple of 3
///   ([`LoadError::IncompatibleShape`])
///
/// # Example
///
/// ```no_run
/// use pose_io::{load_csv, LoadParams};
///
/// let loaded = load_csv("walk.csv", &LoadParams::default()).unwrap();
/// println!("{:?}", loaded.keypoints.shape());
/// ```
pub fn load_csv<P: AsRef<Path>>(path: P, params: &LoadParams) -> LoadResult<LoadedKeypoints> {
    let path = path.as_ref();
    let bytes = read_source(path)?;
    parse_table(path, &bytes, params)
}

/// Raw cells of a CSV file, padded to a rectangle.
#[derive(Debug)]
struct RawTable {
    cells: Vec<Vec<String>>,
    /// 1-based file line of each row.
    lines: Vec<u64>,
    width: usize,
}

impl RawTable {
    fn read(path: &Path, bytes: &[u8]) -> LoadResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(bytes);

        let mut cells: Vec<Vec<String>> = Vec::new();
        let mut lines = Vec::new();
        let mut width = None;

        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| LoadError::parse(path, e.to_string()))?;
            if record.iter().all(str::is_empty) && record.len() <= 1 {
                continue;
            }

            let line = record.position().map_or(index as u64 + 1, csv::Position::line);
            let expected = *width.get_or_insert(record.len());
            if record.len() > expected {
                return Err(LoadError::parse(
                    path,
                    format!(
                        "expected {expected} fields on line {line}, found {}",
                        record.len()
                    ),
                ));
            }

            let mut row: Vec<String> = record.iter().map(str::to_owned).collect();
            row.resize(expected, String::new());
            cells.push(row);
            lines.push(line);
        }

        match width {
            Some(width) => Ok(Self {
                cells,
                lines,
                width,
            }),
            None => Err(LoadError::empty(path, "file contains no rows")),
        }
    }
}

/// Coerce one trimmed cell. Empty, textual, and non-finite cells are missing.
fn coerce_cell(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// True if every value is present and within `tolerance` of an integer.
///
/// This is the frame-number test applied to the first CSV column.
#[must_use]
pub(crate) fn is_integral_column<I>(values: I, tolerance: f64) -> bool
where
    I: IntoIterator<Item = Option<f64>>,
{
    values
        .into_iter()
        .all(|v| v.is_some_and(|x| (x - x.round()).abs() <= tolerance))
}

/// Outcome of the frame-index column check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameColumn {
    Dropped,
    Disabled,
    SingleColumn,
    NotIntegral,
    Remainder(usize),
}

impl FrameColumn {
    fn describe(self) -> String {
        match self {
            Self::Dropped => "a leading frame-index column was dropped".to_string(),
            Self::Disabled => "frame-index detection is disabled".to_string(),
            Self::SingleColumn => "only one numeric column".to_string(),
            Self::NotIntegral => {
                "the first column is not a frame index (not all integers)".to_string()
            }
            Self::Remainder(n) => {
                format!("dropping the first column as a frame index would leave {n} columns")
            }
        }
    }
}

fn parse_table(path: &Path, bytes: &[u8], params: &LoadParams) -> LoadResult<LoadedKeypoints> {
    let raw = RawTable::read(path, bytes)?;

    let values: Vec<Vec<Option<f64>>> = raw
        .cells
        .iter()
        .map(|row| row.iter().map(|cell| coerce_cell(cell)).collect())
        .collect();

    // Rows where nothing parsed are header or comment rows
    let rows: Vec<usize> = (0..values.len())
        .filter(|&r| values[r].iter().any(Option::is_some))
        .collect();
    if rows.len() < values.len() {
        debug!(
            path = %path.display(),
            dropped = values.len() - rows.len(),
            "Dropped non-numeric rows"
        );
    }
    if rows.is_empty() {
        return Err(LoadError::empty(
            path,
            "no data rows after removing header-like rows",
        ));
    }

    // Columns where nothing parsed are metadata columns
    let mut cols: Vec<usize> = (0..raw.width)
        .filter(|&c| rows.iter().any(|&r| values[r][c].is_some()))
        .collect();
    if cols.len() < raw.width {
        debug!(
            path = %path.display(),
            dropped = raw.width - cols.len(),
            "Dropped non-numeric columns"
        );
    }
    if cols.is_empty() {
        return Err(LoadError::empty(
            path,
            "no numeric columns after removing text columns",
        ));
    }

    let mut notices = Vec::new();
    let frame_column = check_frame_column(&values, &rows, &cols, params);
    if frame_column == FrameColumn::Dropped {
        cols.remove(0);
        notices.push(announce(
            path,
            LoadNotice::FrameIndexColumnDropped {
                remaining_columns: cols.len(),
                keypoints: cols.len() / COORDS_PER_KEYPOINT,
            },
        ));
    }

    // Anything still missing sits inside the keypoint region
    let mut dirty = rows
        .iter()
        .flat_map(|&r| cols.iter().map(move |&c| (r, c)))
        .filter(|&(r, c)| values[r][c].is_none());
    if let Some((r, c)) = dirty.next() {
        return Err(LoadError::DirtyData {
            path: path.to_path_buf(),
            line: raw.lines[r],
            column: c + 1,
            value: raw.cells[r][c].clone(),
            count: 1 + dirty.count(),
        });
    }

    if cols.len() % COORDS_PER_KEYPOINT != 0 {
        return Err(LoadError::incompatible_shape(
            path,
            &[rows.len(), cols.len()],
            format!(
                "a multiple of 3 numeric columns (frames, 3 * points); {}",
                frame_column.describe()
            ),
        ));
    }

    let flat: Vec<f64> = rows
        .iter()
        .flat_map(|&r| cols.iter().map(move |&c| (r, c)))
        .filter_map(|(r, c)| values[r][c])
        .collect();
    let keypoints =
        KeypointSequence::from_flat(rows.len(), cols.len() / COORDS_PER_KEYPOINT, flat)
            .map_err(|e| LoadError::parse(path, e.to_string()))?;

    Ok(LoadedKeypoints::new(keypoints, notices))
}

fn check_frame_column(
    values: &[Vec<Option<f64>>],
    rows: &[usize],
    cols: &[usize],
    params: &LoadParams,
) -> FrameColumn {
    if !params.detect_frame_index_column {
        return FrameColumn::Disabled;
    }
    if cols.len() <= 1 {
        return FrameColumn::SingleColumn;
    }
    let first = cols[0];
    if !is_integral_column(rows.iter().map(|&r| values[r][first]), params.integral_tolerance) {
        return FrameColumn::NotIntegral;
    }
    let remaining = cols.len() - 1;
    if remaining % COORDS_PER_KEYPOINT == 0 {
        FrameColumn::Dropped
    } else {
        FrameColumn::Remainder(remaining)
    }
}
