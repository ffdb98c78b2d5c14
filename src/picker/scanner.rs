use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::extensions::is_audio_path;

/// A file shown in the picker, flagged by whether it can be previewed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    pub path: PathBuf,
    pub previewable: bool,
}

/// Scanner for the files a picker shows
pub struct DirectoryScanner;

impl DirectoryScanner {
    /// List the files directly inside `directory`, sorted by path, flagged
    /// against `extensions`
    pub fn list<P, S>(directory: P, extensions: &[S]) -> Result<Vec<PickerEntry>, anyhow::Error>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let mut entries = Vec::new();

        for entry in WalkDir::new(directory)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.into_path();
            let previewable = is_audio_path(&path.to_string_lossy(), extensions);
            entries.push(PickerEntry { path, previewable });
        }

        Ok(entries)
    }

    /// Scan a directory recursively and return the paths matching `extensions`
    pub fn scan_audio<P, S>(directory: P, extensions: &[S]) -> Result<Vec<PathBuf>, anyhow::Error>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let mut audio_files = Vec::new();

        for entry in WalkDir::new(directory).follow_links(false).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();

            if !entry.file_type().is_file() {
                continue;
            }

            if is_audio_path(&path.to_string_lossy(), extensions) {
                audio_files.push(path.to_path_buf());
            }
        }

        Ok(audio_files)
    }
}
