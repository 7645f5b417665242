//! Keypoint file loading for pose annotation.
//!
//! This crate turns loosely structured keypoint files into a canonical
//! [`KeypointSequence`] of shape `(frames, keypoints, 3)`:
//!
//! - **NPY** (`NumPy` binary) - 3D arrays as-is, 2D arrays reshaped
//! - **CSV** - headerless or headed grids, with or without a frame column
//!
//! # Format Detection
//!
//! The format is chosen from the literal, case-sensitive path suffix
//! (`.npy` or `.csv`). Anything else, including directories and paths
//! without an extension, fails with [`LoadErrorKind::UnsupportedFormat`]
//! before the file is opened.
//!
//! # CSV Cleaning
//!
//! CSV files are read without assuming a header row. Rows and columns in
//! which no cell is numeric are stripped as headers or metadata, and a
//! leading integer column is dropped as a frame index when what remains
//! divides into keypoint triples. A non-numeric cell left inside the data
//! region fails the whole load with [`LoadErrorKind::DirtyData`].
//!
//! # Notices
//!
//! Structural guesses (2D `.npy` reshape, frame-column drop) succeed but
//! are reported as [`LoadNotice`]s on the result and as `tracing` events.
//!
//! # Example
//!
//! ```no_run
//! use pose_io::{load_keypoints, LoadErrorKind};
//!
//! match load_keypoints("capture.csv") {
//!     Ok(loaded) => {
//!         println!("{:?}", loaded.keypoints.shape());
//!         for notice in &loaded.notices {
//!             println!("note: {notice}");
//!         }
//!     }
//!     Err(err) if err.kind() == LoadErrorKind::DirtyData => eprintln!("fix the file: {err}"),
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod notice;
mod npy;
mod params;
mod tabular;

pub use error::{LoadError, LoadErrorKind, LoadResult};
pub use notice::LoadNotice;
pub use npy::load_npy;
pub use params::LoadParams;
pub use tabular::load_csv;

use std::io::ErrorKind;
use std::path::Path;

use pose_types::KeypointSequence;
use tracing::info;

/// Supported keypoint file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeypointFormat {
    /// `NumPy` `.npy` array.
    Npy,
    /// Comma-separated values.
    Csv,
}

impl KeypointFormat {
    /// Detect format from the path suffix.
    ///
    /// The check is case-sensitive: `capture.NPY` is not recognized.
    ///
    /// # Returns
    ///
    /// The detected format, or `None` if the suffix is not `.npy`/`.csv`.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let name = path.as_ref().to_str()?;
        if name.ends_with(".npy") {
            Some(Self::Npy)
        } else if name.ends_with(".csv") {
            Some(Self::Csv)
        } else {
            None
        }
    }

    /// Get the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Npy => "npy",
            Self::Csv => "csv",
        }
    }
}

/// A successfully loaded keypoint file.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedKeypoints {
    /// Normalized `(frames, keypoints, 3)` data.
    pub keypoints: KeypointSequence,
    /// Structural inferences made while loading.
    pub notices: Vec<LoadNotice>,
}

impl LoadedKeypoints {
    pub(crate) fn new(keypoints: KeypointSequence, notices: Vec<LoadNotice>) -> Self {
        Self { keypoints, notices }
    }

    /// Drop the notices and keep the data.
    #[must_use]
    pub fn into_keypoints(self) -> KeypointSequence {
        self.keypoints
    }
}

/// Load a keypoint file with default parameters.
///
/// # Errors
///
/// Returns an error if:
/// - The path does not end in `.npy` or `.csv`
/// - The file does not exist or cannot be read
/// - The content is empty, corrupt, or not numeric inside the data region
/// - The data cannot be arranged as `(frames, keypoints, 3)`
///
/// # Example
///
/// ```no_run
/// use pose_io::load_keypoints;
///
/// let keypoints = load_keypoints("walk.npy").unwrap().into_keypoints();
/// println!("{} frames", keypoints.frame_count());
/// ```
pub fn load_keypoints<P: AsRef<Path>>(path: P) -> LoadResult<LoadedKeypoints> {
    load_keypoints_with(path, &LoadParams::default())
}

/// Load a keypoint file, detecting format from the path suffix.
///
/// # Errors
///
/// See [`load_keypoints`].
pub fn load_keypoints_with<P: AsRef<Path>>(
    path: P,
    params: &LoadParams,
) -> LoadResult<LoadedKeypoints> {
    let path = path.as_ref();
    let format = KeypointFormat::from_path(path).ok_or_else(|| LoadError::unsupported(path))?;

    let loaded = match format {
        KeypointFormat::Npy => load_npy(path),
        KeypointFormat::Csv => load_csv(path, params),
    }?;

    let (frames, keypoints, _) = loaded.keypoints.shape();
    info!(
        path = %path.display(),
        format = format.extension(),
        frames,
        keypoints,
        notices = loaded.notices.len(),
        "Loaded keypoints"
    );
    Ok(loaded)
}

/// Read a whole file, separating "missing" from "present but unreadable".
pub(crate) fn read_source(path: &Path) -> LoadResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            LoadError::not_found(path)
        } else {
            LoadError::parse(path, e.to_string())
        }
    })
}

/// Record a notice on the log and return it.
pub(crate) fn announce(path: &Path, notice: LoadNotice) -> LoadNotice {
    info!(path = %path.display(), "{notice}");
    notice
}
