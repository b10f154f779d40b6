//! Recursive discovery of importable audio files.

use std::path::{Path, PathBuf};

use log::debug;

/// File extensions the metadata loader knows how to read tags from.
pub const SUPPORTED_AUDIO_EXTENSIONS: [&str; 7] =
    ["mp3", "wav", "ogg", "flac", "aac", "m4a", "opus"];

pub fn is_supported_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_AUDIO_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

/// Walks `folder_path` recursively and returns every supported audio file,
/// sorted for a stable import order. Unreadable directories are skipped.
pub fn collect_audio_files_from_folder(folder_path: &Path) -> Vec<PathBuf> {
    let mut pending_directories = vec![folder_path.to_path_buf()];
    let mut files = Vec::new();

    while let Some(directory) = pending_directories.pop() {
        let entries = match std::fs::read_dir(&directory) {
            Ok(entries) => entries,
            Err(error) => {
                debug!("Failed to read directory {}: {}", directory.display(), error);
                continue;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    debug!(
                        "Failed to read a directory entry in {}: {}",
                        directory.display(),
                        error
                    );
                    continue;
                }
            };

            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(error) => {
                    debug!("Failed to inspect {}: {}", path.display(), error);
                    continue;
                }
            };

            if file_type.is_dir() {
                pending_directories.push(path);
            } else if file_type.is_file() && is_supported_audio_file(&path) {
                files.push(path);
            }
        }
    }

    files.sort_unstable();
    files
}
