use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::links::has_spreadsheet_extension;

/// Spreadsheets already present in `directory`, sorted by file name.
/// A missing or unreadable directory yields an empty list.
pub fn find_spreadsheets(directory: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(err) => {
            if directory.exists() {
                warn!(directory = %directory.display(), "unable to list directory: {err}");
            }
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(has_spreadsheet_extension)
        })
        .collect();
    files.sort();
    files
}
