//! Destination resolution and batch file relocation.
//!
//! Placement never overwrites: an occupied destination gets an increasing
//! `_<n>` counter spliced into the filename until a free slot is found.
//! Given the same initial directory contents and the same input order, the
//! resulting path assignment is always identical.

use crate::naming::split_resolution_suffix;
use crate::scan::list_images;
use crate::taxonomy::Taxonomy;
use indicatif::ProgressBar;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory under the organize root that receives category folders.
pub const ASSETS_DIR: &str = "assets";

/// Where the collision counter lands relative to an `@<tag>` resolution
/// marker in the stem.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CounterPlacement {
    /// `stone@1x.png` collides into `stone@1x_1.png`.
    #[default]
    AfterTag,
    /// `stone@1x.png` collides into `stone_1@1x.png`.
    BeforeTag,
}

#[derive(Debug)]
pub enum PlacementError {
    /// The source file no longer exists; the file is skipped.
    MissingSource(PathBuf),
    /// The destination directory cannot be created or written.
    DestinationUnwritable {
        source: std::io::Error,
        path: PathBuf,
    },
    MissingFileName(PathBuf),
}

impl Display for PlacementError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSource(path) => write!(f, "source file missing: {}", path.display()),
            Self::DestinationUnwritable { source, path } => {
                write!(f, "cannot write destination {}: {}", path.display(), source)
            }
            Self::MissingFileName(path) => write!(f, "file name not found for {}", path.display()),
        }
    }
}

impl Error for PlacementError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DestinationUnwritable { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Computes the first free destination path for `file_name` inside
/// `category_dir`.
///
/// The candidate `<category_dir>/<file_name>` is used as-is when free.
/// On collision the stem is split on its first `@` marker and candidates
/// are generated with an increasing counter (starting at 1, first free
/// slot wins), placed per `placement` when a marker is present or appended
/// to the whole stem otherwise.
pub fn resolve_destination(
    category_dir: &Path,
    file_name: &str,
    placement: CounterPlacement,
) -> PathBuf {
    let candidate = category_dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, extension) = match file_name.rsplit_once('.') {
        Some((stem, extension)) => (stem, Some(extension)),
        None => (file_name, None),
    };
    let (base, suffix) = split_resolution_suffix(stem);
    let mut index = 1u32;

    loop {
        let mut name = match suffix {
            Some(tag) => match placement {
                CounterPlacement::AfterTag => format!("{}@{}_{}", base, tag, index),
                CounterPlacement::BeforeTag => format!("{}_{}@{}", base, index, tag),
            },
            None => format!("{}_{}", stem, index),
        };
        if let Some(extension) = extension {
            name.push('.');
            name.push_str(extension);
        }
        let candidate = category_dir.join(name);
        if !candidate.exists() {
            return candidate;
        }
        index += 1;
    }
}

/// Moves `source` into `category_dir` under a unique name and returns the
/// destination path. The relocation is a single `fs::rename`; no retry, no
/// rollback.
pub fn place(
    source: &Path,
    category_dir: &Path,
    placement: CounterPlacement,
) -> Result<PathBuf, PlacementError> {
    if !source.exists() {
        return Err(PlacementError::MissingSource(source.to_path_buf()));
    }
    let file_name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| PlacementError::MissingFileName(source.to_path_buf()))?;

    fs::create_dir_all(category_dir).map_err(|error| PlacementError::DestinationUnwritable {
        source: error,
        path: category_dir.to_path_buf(),
    })?;

    let destination = resolve_destination(category_dir, &file_name, placement);
    fs::rename(source, &destination).map_err(|error| {
        if error.kind() == std::io::ErrorKind::NotFound && !source.exists() {
            PlacementError::MissingSource(source.to_path_buf())
        } else {
            PlacementError::DestinationUnwritable {
                source: error,
                path: destination.clone(),
            }
        }
    })?;

    Ok(destination)
}

/// One successfully relocated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedAsset {
    pub original_name: String,
    pub category: String,
    pub destination: PathBuf,
}

/// A placement that failed, with enough context to report to a human.
#[derive(Debug)]
pub struct PlacementFailure {
    pub file_name: String,
    pub category: String,
    pub error: PlacementError,
}

/// Outcome of one organize batch.
#[derive(Debug, Default)]
pub struct OrganizeReport {
    pub placed: Vec<PlacedAsset>,
    pub failures: Vec<PlacementFailure>,
}

impl OrganizeReport {
    /// Per-category placement counts, in first-placed order.
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for asset in &self.placed {
            match counts.iter_mut().find(|(name, _)| name == &asset.category) {
                Some((_, count)) => *count += 1,
                None => counts.push((asset.category.clone(), 1)),
            }
        }
        counts
    }
}

/// Classifies every image directly inside `root` and moves it into
/// `<root>/assets/<category>/`.
///
/// Files are processed in filename order. Each file's placement is
/// independent: a failure is recorded and the batch continues. Unmatched
/// files go to the taxonomy's fallback category. Must not run concurrently
/// with another batch or a catalog build on the same tree.
pub fn organize(
    root: &Path,
    taxonomy: &Taxonomy,
    placement: CounterPlacement,
    progress_bar: &ProgressBar,
) -> OrganizeReport {
    let mut report = OrganizeReport::default();

    for source in list_images(root) {
        progress_bar.inc(1);
        let file_name = match source.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };
        progress_bar.set_message(format!("Placing: {}", file_name));

        let category = taxonomy.classify(&file_name).to_string();
        let category_dir = root.join(ASSETS_DIR).join(&category);
        match place(&source, &category_dir, placement) {
            Ok(destination) => report.placed.push(PlacedAsset {
                original_name: file_name,
                category,
                destination,
            }),
            Err(error) => report.failures.push(PlacementFailure {
                file_name,
                category,
                error,
            }),
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::ProgressBar;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn free_candidate_is_used_as_is() {
        let dir = tempdir().unwrap();
        let destination =
            resolve_destination(dir.path(), "stone@1x.png", CounterPlacement::AfterTag);
        assert_eq!(destination, dir.path().join("stone@1x.png"));
    }

    #[test]
    fn collision_without_marker_appends_counter_to_stem() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("grunt.png"), b"x").unwrap();
        let destination = resolve_destination(dir.path(), "grunt.png", CounterPlacement::AfterTag);
        assert_eq!(destination, dir.path().join("grunt_1.png"));
    }

    #[test]
    fn collision_with_marker_places_counter_after_tag() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("stone@1x.png"), b"x").unwrap();
        let destination =
            resolve_destination(dir.path(), "stone@1x.png", CounterPlacement::AfterTag);
        assert_eq!(destination, dir.path().join("stone@1x_1.png"));
    }

    #[test]
    fn collision_with_marker_places_counter_before_tag() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("stone@1x.png"), b"x").unwrap();
        let destination =
            resolve_destination(dir.path(), "stone@1x.png", CounterPlacement::BeforeTag);
        assert_eq!(destination, dir.path().join("stone_1@1x.png"));
    }

    #[test]
    fn counter_increments_to_first_free_slot() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("stone@1x.png"), b"x").unwrap();
        fs::write(dir.path().join("stone@1x_1.png"), b"x").unwrap();
        fs::write(dir.path().join("stone@1x_2.png"), b"x").unwrap();
        let destination =
            resolve_destination(dir.path(), "stone@1x.png", CounterPlacement::AfterTag);
        assert_eq!(destination, dir.path().join("stone@1x_3.png"));
    }

    #[test]
    fn malformed_marker_falls_back_to_whole_stem() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("broken@.png"), b"x").unwrap();
        let destination =
            resolve_destination(dir.path(), "broken@.png", CounterPlacement::AfterTag);
        assert_eq!(destination, dir.path().join("broken@_1.png"));
    }

    #[test]
    fn place_moves_file_into_category_dir() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("power-stone.jpg");
        fs::write(&source, b"x").unwrap();
        let category_dir = dir.path().join("assets").join("stones");

        let destination = place(&source, &category_dir, CounterPlacement::AfterTag).unwrap();
        assert!(!source.exists());
        assert_eq!(destination, category_dir.join("power-stone.jpg"));
        assert!(destination.exists());
    }

    #[test]
    fn place_never_overwrites_on_repeated_collisions() {
        let dir = tempdir().unwrap();
        let category_dir = dir.path().join("assets").join("stones");
        let mut destinations = Vec::new();
        for index in 0..3 {
            let source = dir.path().join(format!("batch{}", index)).join("stone@1x.png");
            fs::create_dir_all(source.parent().unwrap()).unwrap();
            fs::write(&source, vec![index as u8]).unwrap();
            destinations.push(place(&source, &category_dir, CounterPlacement::AfterTag).unwrap());
        }

        let mut unique = destinations.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 3);
        assert_eq!(destinations[1], category_dir.join("stone@1x_1.png"));
        assert_eq!(destinations[2], category_dir.join("stone@1x_2.png"));
    }

    #[test]
    fn place_reports_missing_source() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone.png");
        let result = place(&missing, &dir.path().join("assets"), CounterPlacement::AfterTag);
        assert!(matches!(result, Err(PlacementError::MissingSource(_))));
    }

    #[test]
    fn organize_routes_files_per_taxonomy() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("thanos-hero@2x.png"), b"x").unwrap();
        fs::write(dir.path().join("power-stone.jpg"), b"x").unwrap();
        fs::write(dir.path().join("outriders-grunt.png"), b"x").unwrap();
        fs::write(dir.path().join("random-logo.png"), b"x").unwrap();

        let progress = ProgressBar::hidden();
        let report = organize(
            dir.path(),
            &Taxonomy::default(),
            CounterPlacement::AfterTag,
            &progress,
        );

        assert_eq!(report.placed.len(), 4);
        assert!(report.failures.is_empty());
        assert!(dir
            .path()
            .join("assets/characters/thanos-hero@2x.png")
            .exists());
        assert!(dir.path().join("assets/stones/power-stone.jpg").exists());
        assert!(dir
            .path()
            .join("assets/enemies/outriders-grunt.png")
            .exists());
        assert!(dir.path().join("assets/misc/random-logo.png").exists());
    }

    #[test]
    fn organize_rerun_is_a_no_op() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("power-stone.jpg"), b"x").unwrap();
        let progress = ProgressBar::hidden();
        let taxonomy = Taxonomy::default();

        let first = organize(dir.path(), &taxonomy, CounterPlacement::AfterTag, &progress);
        assert_eq!(first.placed.len(), 1);

        // Everything already lives under assets/, so nothing is left to move.
        let second = organize(dir.path(), &taxonomy, CounterPlacement::AfterTag, &progress);
        assert!(second.placed.is_empty());
        assert!(second.failures.is_empty());
    }

    #[test]
    fn category_counts_follow_placements() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("power-stone.jpg"), b"x").unwrap();
        fs::write(dir.path().join("soul-stone.jpg"), b"x").unwrap();
        fs::write(dir.path().join("thanos.png"), b"x").unwrap();

        let progress = ProgressBar::hidden();
        let report = organize(
            dir.path(),
            &Taxonomy::default(),
            CounterPlacement::AfterTag,
            &progress,
        );
        let counts = report.category_counts();
        assert!(counts.contains(&(String::from("stones"), 2)));
        assert!(counts.contains(&(String::from("characters"), 1)));
    }
}
