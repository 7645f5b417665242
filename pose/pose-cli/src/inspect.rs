//! `pose inspect`: load a keypoint file and report what was found.

use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use pose_io::{KeypointFormat, LoadParams, LoadedKeypoints, load_keypoints_with};
use serde::Serialize;

/// Outcome of loading one file.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InspectReport {
    /// The file loaded.
    Loaded {
        path: String,
        format: Option<&'static str>,
        frames: usize,
        keypoints: usize,
        finite: bool,
        /// `[min, max]` corners over all finite points.
        bounds: Option<[[f64; 3]; 2]>,
        notices: Vec<String>,
    },
    /// The file was rejected.
    Failed {
        path: String,
        kind: String,
        message: String,
    },
}

impl InspectReport {
    /// Loads `path` and summarizes the result.
    pub fn build(path: &Path, params: &LoadParams) -> Self {
        let display = path.display().to_string();
        match load_keypoints_with(path, params) {
            Ok(loaded) => Self::loaded(display, path, &loaded),
            Err(err) => Self::Failed {
                path: display,
                kind: err.kind().to_string(),
                message: err.to_string(),
            },
        }
    }

    fn loaded(display: String, path: &Path, loaded: &LoadedKeypoints) -> Self {
        let seq = &loaded.keypoints;
        Self::Loaded {
            path: display,
            format: KeypointFormat::from_path(path).map(|f| f.extension()),
            frames: seq.frame_count(),
            keypoints: seq.keypoint_count(),
            finite: seq.is_finite(),
            bounds: seq
                .bounds()
                .map(|(lo, hi)| [[lo.x, lo.y, lo.z], [hi.x, hi.y, hi.z]]),
            notices: loaded.notices.iter().map(ToString::to_string).collect(),
        }
    }

    /// Returns `true` if the file loaded.
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    fn print_pretty(&self) {
        match self {
            Self::Loaded {
                path,
                format,
                frames,
                keypoints,
                finite,
                bounds,
                notices,
            } => {
                println!("{} {}", "✓".green().bold(), path.bold());
                println!("  format:    {}", format.unwrap_or("?"));
                println!("  shape:     ({frames}, {keypoints}, 3)");
                if !finite {
                    println!("  {}", "contains non-finite coordinates".yellow());
                }
                if let Some([lo, hi]) = bounds {
                    println!("  bounds:    {lo:?} .. {hi:?}");
                }
                for notice in notices {
                    println!("  {} {notice}", "note:".cyan());
                }
            }
            Self::Failed {
                path,
                kind,
                message,
            } => {
                println!("{} {}", "✗".red().bold(), path.bold());
                println!("  {} {message}", format!("{kind}:").red());
            }
        }
    }
}

/// Runs the `inspect` command. Returns `false` if the file was rejected.
pub fn run(path: &Path, json: bool, detect_frame_index_column: bool) -> Result<bool> {
    let params = LoadParams::default().with_frame_index_detection(detect_frame_index_column);
    let report = InspectReport::build(path, &params);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print_pretty();
    }

    Ok(report.is_loaded())
}
