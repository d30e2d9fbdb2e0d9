//! Input path expansion for the merge

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expand input arguments into the ordered list of CSV files to merge.
///
/// File paths pass through in argument order. A directory contributes the
/// CSV files beneath it, recursively, in sorted path order. Expanding to
/// zero files is an error.
pub fn expand_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut candidates = Vec::new();
            for entry in WalkDir::new(path).follow_links(true) {
                let entry = entry?;
                if entry.file_type().is_file() {
                    candidates.push(entry.path().to_path_buf());
                }
            }
            files.extend(csv_files_in_order(candidates));
        } else {
            files.push(path.clone());
        }
    }

    if files.is_empty() {
        return Err(Error::NoInputs);
    }

    Ok(files)
}

/// Keep the CSV files among the discovered paths, in sorted path order
fn csv_files_in_order(mut candidates: Vec<PathBuf>) -> Vec<PathBuf> {
    candidates.retain(|path| is_csv_file(path));
    candidates.sort();
    candidates
}

/// CSV files are recognized by their extension
fn is_csv_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_csv_file() {
        assert!(is_csv_file(Path::new("data/input.csv")));
        assert!(!is_csv_file(Path::new("data/input.tsv")));
        assert!(!is_csv_file(Path::new("data/csv")));
        assert!(!is_csv_file(Path::new("notes.csv.bak")));
    }

    #[test]
    fn test_extension_match_is_case_sensitive() {
        assert!(!is_csv_file(Path::new("REPORT.CSV")));
    }

    #[test]
    fn test_discovered_files_are_filtered_and_sorted() {
        let candidates = vec![
            PathBuf::from("data/b.csv"),
            PathBuf::from("data/notes.txt"),
            PathBuf::from("data/sub/c.csv"),
            PathBuf::from("data/a.csv"),
        ];

        assert_eq!(
            csv_files_in_order(candidates),
            vec![
                PathBuf::from("data/a.csv"),
                PathBuf::from("data/b.csv"),
                PathBuf::from("data/sub/c.csv"),
            ]
        );
    }

    #[test]
    fn test_plain_files_keep_argument_order() {
        let inputs = vec![PathBuf::from("b.csv"), PathBuf::from("a.csv")];
        let files = expand_inputs(&inputs).unwrap();

        // Argument order is source order; no sorting happens here
        assert_eq!(files, inputs);
    }

    #[test]
    fn test_directory_expansion_is_recursive_and_sorted() {
        let root = std::env::temp_dir().join(format!("csvmerge_scan_{}", std::process::id()));
        let sub = root.join("sub");
        std::fs::create_dir_all(&sub).unwrap();
        std::fs::write(root.join("b.csv"), "id\n1\n").unwrap();
        std::fs::write(root.join("a.csv"), "id\n2\n").unwrap();
        std::fs::write(root.join("notes.txt"), "not a source\n").unwrap();
        std::fs::write(sub.join("c.csv"), "id\n3\n").unwrap();

        let files = expand_inputs(&[root.clone()]);
        std::fs::remove_dir_all(&root).ok();

        assert_eq!(
            files.unwrap(),
            vec![root.join("a.csv"), root.join("b.csv"), sub.join("c.csv")]
        );
    }

    #[test]
    fn test_no_inputs_is_an_error() {
        assert!(matches!(expand_inputs(&[]), Err(Error::NoInputs)));
    }
}
