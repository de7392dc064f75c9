//! Flat directory listing of recognized image files.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Image extensions the pipeline recognizes, matched case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

pub fn is_image_extension(extension: &str) -> bool {
    IMAGE_EXTENSIONS
        .iter()
        .any(|candidate| extension.eq_ignore_ascii_case(candidate))
}

pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(is_image_extension)
        .unwrap_or(false)
}

/// Lists image files directly inside `dir` (no recursion), sorted by
/// filename so downstream output is stable across runs.
pub fn list_images(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_image_extension(path))
        .collect();
    files.sort_by(|left, right| left.file_name().cmp(&right.file_name()));
    files
}

/// Counts the direct entries of `root`, used to size progress bars.
pub fn count_entries(root: &Path) -> u64 {
    WalkDir::new(root).min_depth(1).max_depth(1).into_iter().count() as u64
}
