//! `pose export`: write keypoints and frame labels to a single CSV.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;
use pose_io::load_keypoints;
use pose_labels::{
    ExportOptions, FrameLabels, LabelDef, LabelKind, LabelSchema, labels_path_for,
    load_label_names, read_frame_labels, write_labeled_csv,
};
use tracing::warn;

/// Arguments of the `export` command.
#[derive(Debug, Clone)]
pub struct ExportArgs {
    pub keypoints: PathBuf,
    pub labels: PathBuf,
    pub existing: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub numeric: Vec<String>,
    pub climber_id: Option<String>,
    pub route_id: Option<String>,
}

impl ExportArgs {
    fn options(&self) -> ExportOptions {
        let mut options = ExportOptions::default();
        if let Some(id) = &self.climber_id {
            options = options.with_climber_id(id.clone());
        }
        if let Some(id) = &self.route_id {
            options = options.with_route_id(id.clone());
        }
        options
    }

    fn output_path(&self) -> PathBuf {
        self.out
            .clone()
            .unwrap_or_else(|| labels_path_for(&self.keypoints))
    }
}

/// Builds the schema from a names file, marking `numeric` labels.
fn build_schema(names: Vec<String>, numeric: &[String]) -> Result<LabelSchema> {
    for name in numeric {
        if !names.contains(name) {
            warn!(label = %name, "--numeric names a label that is not in the names file");
        }
    }
    let defs = names.into_iter().map(|name| {
        let kind = if numeric.contains(&name) {
            LabelKind::Numeric
        } else {
            LabelKind::Text
        };
        LabelDef::new(name, kind)
    });
    Ok(LabelSchema::new(defs)?)
}

/// Runs the `export` command.
pub fn run(args: &ExportArgs) -> Result<()> {
    let loaded = load_keypoints(&args.keypoints)
        .with_context(|| format!("failed to load keypoints from {}", args.keypoints.display()))?;
    let keypoints = loaded.into_keypoints();

    let names = load_label_names(&args.labels)?;
    let schema = build_schema(names, &args.numeric)?;
    let frame_count = keypoints.frame_count();

    let labels = match &args.existing {
        Some(path) => read_frame_labels(path, &schema, frame_count)
            .with_context(|| format!("failed to read existing labels from {}", path.display()))?,
        None => FrameLabels::new(schema, frame_count),
    };

    let out = args.output_path();
    if out == args.keypoints {
        bail!("refusing to overwrite the keypoint file {}", out.display());
    }
    let summary = write_labeled_csv(&out, &keypoints, &labels, &args.options())
        .with_context(|| format!("failed to write {}", out.display()))?;

    println!(
        "{} wrote {} ({} rows, {} columns)",
        "✓".green().bold(),
        out.display().bold(),
        summary.rows,
        summary.columns
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn args(dir: &Path) -> ExportArgs {
        ExportArgs {
            keypoints: dir.join("climb.csv"),
            labels: dir.join("names.txt"),
            existing: None,
            out: None,
            numeric: Vec::new(),
            climber_id: None,
            route_id: None,
        }
    }

    fn setup(dir: &Path) {
        std::fs::write(dir.join("climb.csv"), "0,0.5,1.5,2.5\n1,3.5,4.5,5.5\n").unwrap();
        std::fs::write(dir.join("names.txt"), "phase,effort").unwrap();
    }

    #[test]
    fn schema_kinds() {
        let schema = build_schema(
            vec!["phase".to_string(), "effort".to_string()],
            &["effort".to_string(), "unknown".to_string()],
        )
        .unwrap();
        assert_eq!(schema.get("phase").unwrap().kind, LabelKind::Text);
        assert_eq!(schema.get("effort").unwrap().kind, LabelKind::Numeric);
    }

    #[test]
    fn exports_defaults_next_to_keypoints() {
        let dir = tempfile::tempdir().unwrap();
        setup(dir.path());
        let mut args = args(dir.path());
        args.numeric = vec!["effort".to_string()];

        run(&args).unwrap();

        let text = std::fs::read_to_string(dir.path().join("climb_labels.csv")).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "climber_id,route_id,frame,kp0_x,kp0_y,kp0_z,phase,effort"
        );
        assert_eq!(lines[2], "climber_001,route_001,1,3.5,4.5,5.5,,0.0");
    }

    #[test]
    fn exports_existing_values_and_identifiers() {
        let dir = tempfile::tempdir().unwrap();
        setup(dir.path());
        let existing = dir.path().join("old.csv");
        std::fs::write(&existing, "frame,phase\n1,top\n").unwrap();

        let mut args = args(dir.path());
        args.existing = Some(existing);
        args.out = Some(dir.path().join("out.csv"));
        args.climber_id = Some("c2".to_string());
        args.route_id = Some("r5".to_string());

        run(&args).unwrap();

        let text = std::fs::read_to_string(dir.path().join("out.csv")).unwrap();
        assert!(text.contains("c2,r5,1,3.5,4.5,5.5,top,\n"));
    }

    #[test]
    fn refuses_to_overwrite_keypoints() {
        let dir = tempfile::tempdir().unwrap();
        setup(dir.path());
        let mut args = args(dir.path());
        args.out = Some(args.keypoints.clone());

        assert!(run(&args).is_err());
        assert!(
            std::fs::read_to_string(dir.path().join("climb.csv"))
                .unwrap()
                .starts_with("0,0.5")
        );
    }

    #[test]
    fn missing_names_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        setup(dir.path());
        let mut args = args(dir.path());
        args.labels = dir.path().join("absent.txt");

        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("file not found"));
    }
}
