//! File discovery for locating candidate images under a root directory.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{CaptionError, CaptionResult};

/// Locates image files by file-name suffix.
pub struct ImageLocator {
    /// Normalized suffixes: lowercase, with a leading dot
    extensions: Vec<String>,
}

impl ImageLocator {
    /// Create a locator for the given extension list.
    ///
    /// Entries are normalized to lowercase and get a leading dot if one is
    /// missing, so `"JPG"` and `".jpg"` are equivalent inputs.
    pub fn new(extensions: &[String]) -> Self {
        let extensions = extensions
            .iter()
            .map(|ext| {
                let ext = ext.trim().to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .collect();
        Self { extensions }
    }

    /// Recursively locate all accepted image files under `root`.
    ///
    /// Returns `RootNotFound` when `root` is not an existing directory.
    /// Results are sorted by path for deterministic ordering.
    pub fn locate(&self, root: &Path) -> CaptionResult<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(CaptionError::RootNotFound(root.to_path_buf()));
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let entry_path = entry.path();
            if entry_path.is_file() && self.is_accepted(entry_path) {
                files.push(entry_path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Check whether a file name ends with one of the accepted suffixes.
    ///
    /// The match is on the full file name, not `Path::extension`, so a
    /// multi-dot suffix list entry like `.tar.gz` would also work.
    fn is_accepted(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(|name| {
                let name_lower = name.to_lowercase();
                self.extensions.iter().any(|ext| name_lower.ends_with(ext))
            })
            .unwrap_or(false)
    }
}
