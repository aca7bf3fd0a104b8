//! Input discovery for data directories

use crate::error::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Find CSV input files under a directory
///
/// Keeps regular files with a `.csv` extension, skips any file sharing
/// the exclude target's name (the merge output, typically), and returns
/// the survivors sorted by path so discovery order is deterministic.
pub fn discover_inputs<P: AsRef<Path>>(root: P, exclude: Option<&Path>) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    for entry in WalkDir::new(root.as_ref()).follow_links(true) {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type().is_file() && is_csv(path) && !is_excluded(path, exclude) {
            inputs.push(path.to_path_buf());
        }
    }

    inputs.sort();
    Ok(inputs)
}

/// Check whether a path has a `.csv` extension
fn is_csv(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "csv")
}

/// Check whether a path carries the excluded file name
fn is_excluded(path: &Path, exclude: Option<&Path>) -> bool {
    exclude.is_some_and(|e| path.file_name() == e.file_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_csv() {
        assert!(is_csv(Path::new("college1_data.csv")));
        assert!(is_csv(Path::new("data/college2_data.csv")));
        assert!(!is_csv(Path::new("notes.txt")));
        assert!(!is_csv(Path::new("csv")));
    }

    #[test]
    fn test_is_csv_extension_case_sensitive() {
        assert!(!is_csv(Path::new("college1_data.CSV")));
    }

    #[test]
    fn test_is_excluded_matches_file_name() {
        let exclude = Path::new("final.csv");
        assert!(is_excluded(Path::new("final.csv"), Some(exclude)));
        assert!(is_excluded(Path::new("data/final.csv"), Some(exclude)));
        assert!(!is_excluded(Path::new("college1_data.csv"), Some(exclude)));
    }

    #[test]
    fn test_is_excluded_without_target() {
        assert!(!is_excluded(Path::new("final.csv"), None));
    }
}
