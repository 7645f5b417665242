//! `NumPy` `.npy` keypoint files.
//!
//! # Accepted Shapes
//!
//! ```text
//! (frames, points, 3)    returned unchanged
//! (frames, 3 * points)   reshaped row-major to (frames, points, 3)
//! ```
//!
//! Any other shape is [`LoadError::IncompatibleShape`]. Every numeric
//! dtype `NumPy` writes for plain arrays (`f8`, `f4`, 1-8 byte signed and
//! unsigned integers, either byte order, C or Fortran order) is widened to
//! `f64`.

use std::path::Path;

use ndarray::{ArrayD, Ix3};
use ndarray_npy::{ReadNpyError, ReadNpyExt};
use pose_types::{COORDS_PER_KEYPOINT, KeypointSequence};

use crate::error::{LoadError, LoadResult};
use crate::notice::LoadNotice;
use crate::{LoadedKeypoints, announce, read_source};

const ACCEPTED_SHAPES: &str = "(frames, points, 3) or (frames, 3 * points)";

/// Load keypoints from a `.npy` file.
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist ([`LoadError::NotFound`])
/// - The file has no bytes at all ([`LoadError::EmptyFile`])
/// - The file is not a readable numeric `.npy` array ([`LoadError::Parse`])
/// - The array shape is not one of the accepted shapes
///   ([`LoadError::IncompatibleShape`])
///
/// # Example
///
/// ```no_run
/// use pose_io::load_npy;
///
/// let loaded = load_npy("walk.npy").unwrap();
/// println!("{:?}", loaded.keypoints.shape());
/// ```
pub fn load_npy<P: AsRef<Path>>(path: P) -> LoadResult<LoadedKeypoints> {
    let path = path.as_ref();
    let bytes = read_source(path)?;
    if bytes.is_empty() {
        return Err(LoadError::empty(path, "file contains no bytes"));
    }
    let array = read_numeric(&bytes).map_err(|e| LoadError::parse(path, e.to_string()))?;
    normalize(path, array)
}

/// Turn a decoded array into a keypoint sequence.
fn normalize(path: &Path, array: ArrayD<f64>) -> LoadResult<LoadedKeypoints> {
    let shape = array.shape().to_vec();
    match shape.as_slice() {
        [_, _, COORDS_PER_KEYPOINT] => {
            let array = array
                .into_dimensionality::<Ix3>()
                .map_err(|e| LoadError::parse(path, e.to_string()))?;
            let keypoints = KeypointSequence::new(array)
                .map_err(|_| LoadError::incompatible_shape(path, &shape, ACCEPTED_SHAPES))?;
            Ok(LoadedKeypoints::new(keypoints, Vec::new()))
        }
        &[frames, columns] if columns > 0 && columns % COORDS_PER_KEYPOINT == 0 => {
            let points = columns / COORDS_PER_KEYPOINT;
            // Logical iteration order is row-major regardless of memory layout
            let values: Vec<f64> = array.iter().copied().collect();
            let keypoints = KeypointSequence::from_flat(frames, points, values)
                .map_err(|_| LoadError::incompatible_shape(path, &shape, ACCEPTED_SHAPES))?;
            let notice = announce(
                path,
                LoadNotice::NpyReshaped {
                    original: (frames, columns),
                    inferred: (frames, points, COORDS_PER_KEYPOINT),
                },
            );
            Ok(LoadedKeypoints::new(keypoints, vec![notice]))
        }
        _ => Err(LoadError::incompatible_shape(path, &shape, ACCEPTED_SHAPES)),
    }
}

/// Try a dtype; return on success or on any error other than a dtype mismatch.
macro_rules! try_dtype {
    ($bytes:expr, $ty:ty, $widen:expr) => {
        match ArrayD::<$ty>::read_npy($bytes) {
            Ok(array) => return Ok(array.mapv($widen)),
            Err(ReadNpyError::WrongDescriptor(_)) => {}
            Err(err) => return Err(err),
        }
    };
}

/// Decode an `.npy` buffer of any numeric dtype as `f64`.
#[allow(clippy::cast_precision_loss)]
// Precision: 64-bit integers above 2^53 are not meaningful coordinates
fn read_numeric(bytes: &[u8]) -> Result<ArrayD<f64>, ReadNpyError> {
    try_dtype!(bytes, f64, |v| v);
    try_dtype!(bytes, f32, f64::from);
    try_dtype!(bytes, i64, |v| v as f64);
    try_dtype!(bytes, i32, f64::from);
    try_dtype!(bytes, i16, f64::from);
    try_dtype!(bytes, i8, f64::from);
    try_dtype!(bytes, u64, |v| v as f64);
    try_dtype!(bytes, u32, f64::from);
    try_dtype!(bytes, u16, f64::from);
    try_dtype!(bytes, u8, f64::from);

    // No numeric dtype matched; report the descriptor error for f64
    ArrayD::<f64>::read_npy(bytes)
}
