//! Filename conventions: resolution-tag extraction, display names, and
//! human-readable sizes.

use crate::scan::is_image_extension;
use once_cell::sync::Lazy;
use regex::Regex;

static RESOLUTION_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@([^@.]+)").expect("invalid resolution tag regex"));

/// Extracts the `@<tag>` resolution marker from a filename, e.g.
/// `"hero@2x.png"` -> `Some("2x")`. A marker with no usable suffix
/// (trailing `@`, `@` directly before the extension dot) yields `None`.
pub fn resolution_tag(file_name: &str) -> Option<String> {
    RESOLUTION_TAG
        .captures(file_name)
        .map(|captures| captures[1].to_string())
}

/// Splits a file stem on its first `@` marker into a base name and a
/// resolution-tag suffix. A malformed marker (empty suffix) treats the
/// whole stem as the base.
pub fn split_resolution_suffix(stem: &str) -> (&str, Option<&str>) {
    match stem.split_once('@') {
        Some((base, suffix)) if !suffix.is_empty() => (base, Some(suffix)),
        Some(_) => (stem, None),
        None => (stem, None),
    }
}

/// Cosmetic display name for a filename: recognized extension stripped,
/// separators replaced with spaces, each word capitalized. Deterministic
/// for a given input; carries no semantic meaning.
pub fn display_name(file_name: &str) -> String {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, extension)) if is_image_extension(extension) => stem,
        _ => file_name,
    };
    stem.split(['-', '_', '@', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Renders a byte count as `B` / `KB` / `MB` with base-1024 thresholds.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}
