//! Label names files.
//!
//! A names file is a single comma-separated list, for example
//! `phase, hold_type, difficulty`. Editors on Windows often prepend a
//! UTF-8 byte order mark, which is ignored.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{LabelError, LabelResult};

/// Splits a names file into label names.
///
/// Names are trimmed, empty entries are dropped, and a repeated name keeps
/// only its first position.
#[must_use]
pub fn parse_label_names(content: &str) -> Vec<String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for name in content.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if seen.insert(name) {
            names.push(name.to_string());
        } else {
            debug!(name, "skipping repeated label name");
        }
    }

    names
}

/// Reads and parses a label names file.
///
/// # Errors
///
/// Returns [`LabelError::NotFound`] if the file does not exist,
/// [`LabelError::EmptyLabelFile`] if it holds no names, and
/// [`LabelError::Io`] if it cannot be read as UTF-8 text.
pub fn load_label_names<P: AsRef<Path>>(path: P) -> LabelResult<Vec<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| LabelError::from_open(path, e))?;

    let names = parse_label_names(&content);
    if names.is_empty() {
        return Err(LabelError::EmptyLabelFile {
            path: path.to_path_buf(),
        });
    }

    info!(path = %path.display(), count = names.len(), "loaded label names");
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_drops_empty() {
        assert_eq!(
            parse_label_names(" phase ,, hold_type,\n difficulty \n"),
            vec!["phase", "hold_type", "difficulty"]
        );
    }

    #[test]
    fn first_duplicate_wins() {
        assert_eq!(parse_label_names("a,b,a,c,b"), vec!["a", "b", "c"]);
    }

    #[test]
    fn strips_byte_order_mark() {
        assert_eq!(parse_label_names("\u{feff}phase,grip"), vec!["phase", "grip"]);
    }

    #[test]
    fn blank_input_has_no_names() {
        assert!(parse_label_names("").is_empty());
        assert!(parse_label_names(" , ,\n").is_empty());
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.txt");
        std::fs::write(&path, "phase,grip\n").unwrap();
        assert_eq!(load_label_names(&path).unwrap(), vec!["phase", "grip"]);

        std::fs::write(&path, ",\n").unwrap();
        assert!(matches!(
            load_label_names(&path),
            Err(LabelError::EmptyLabelFile { .. })
        ));

        assert!(matches!(
            load_label_names(dir.path().join("absent.txt")),
            Err(LabelError::NotFound { .. })
        ));
    }
}
