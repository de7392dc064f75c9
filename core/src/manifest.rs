//! Manifest building and serialisation.
//!
//! The manifest is always a full re-scan of the on-disk layout, never an
//! incremental update, so it cannot drift from the filesystem. Builders
//! are read-only projections and never touch the asset directories.

use crate::naming::resolution_tag;
use crate::placement::ASSETS_DIR;
use crate::scan::list_images;
use crate::taxonomy::Taxonomy;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// One stored image as seen by the catalog scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFile {
    pub original_name: String,
    pub stem: String,
    pub extension: String,
    pub resolution_tag: Option<String>,
    pub size_bytes: u64,
    pub category: String,
    /// Forward-slash path relative to the organize root.
    pub stored_path: String,
}

/// Aggregate view of the organized tree, categories in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub categories: Vec<(String, Vec<AssetFile>)>,
    pub generated_at: String,
}

impl Manifest {
    pub fn total(&self) -> usize {
        self.categories.iter().map(|(_, files)| files.len()).sum()
    }

    pub fn count(&self, category: &str) -> usize {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, files)| files.len())
            .unwrap_or(0)
    }
}

#[derive(Debug)]
pub enum ManifestError {
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
    Serialization(serde_json::Error),
}

impl Display for ManifestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { source, path } => write!(f, "io error for {}: {}", path.display(), source),
            Self::Serialization(error) => write!(f, "serialization error: {}", error),
        }
    }
}

impl Error for ManifestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialization(error) => Some(error),
        }
    }
}

/// Scans `<root>/assets/<category>/` for every declared category and
/// builds a fresh manifest. Categories whose directory does not exist are
/// silently omitted; files are listed in filename order.
pub fn build_manifest(root: &Path, taxonomy: &Taxonomy) -> Result<Manifest, ManifestError> {
    let mut categories = Vec::new();

    for rule in taxonomy.categories() {
        let dir = root.join(ASSETS_DIR).join(&rule.name);
        if !dir.is_dir() {
            continue;
        }

        let mut files = Vec::new();
        for path in list_images(&dir) {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let metadata = fs::metadata(&path).map_err(|source| ManifestError::Io {
                source,
                path: path.clone(),
            })?;
            let (stem, extension) = match file_name.rsplit_once('.') {
                Some((stem, extension)) => (stem.to_string(), extension.to_string()),
                None => (file_name.clone(), String::new()),
            };
            files.push(AssetFile {
                resolution_tag: resolution_tag(&file_name),
                stored_path: relative_stored_path(root, &path),
                size_bytes: metadata.len(),
                category: rule.name.clone(),
                original_name: file_name,
                stem,
                extension,
            });
        }
        categories.push((rule.name.clone(), files));
    }

    Ok(Manifest {
        categories,
        generated_at: OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| String::from("unknown")),
    })
}

fn relative_stored_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Serialize)]
struct FileRecord<'a> {
    name: &'a str,
    filename: &'a str,
    path: &'a str,
    size: u64,
    category: &'a str,
}

/// Writes the manifest as a JSON document with one top-level key per
/// category (declaration order) plus `last_updated`.
pub fn write_manifest(manifest: &Manifest, path: &Path) -> Result<(), ManifestError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ManifestError::Io {
            source,
            path: parent.to_path_buf(),
        })?;
    }

    let mut document = serde_json::Map::new();
    for (name, files) in &manifest.categories {
        let records: Vec<FileRecord> = files
            .iter()
            .map(|file| FileRecord {
                name: &file.stem,
                filename: &file.original_name,
                path: &file.stored_path,
                size: file.size_bytes,
                category: &file.category,
            })
            .collect();
        let value = serde_json::to_value(records).map_err(ManifestError::Serialization)?;
        document.insert(name.clone(), value);
    }
    document.insert(
        String::from("last_updated"),
        serde_json::Value::String(manifest.generated_at.clone()),
    );

    let file = File::create(path).map_err(|source| ManifestError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &document).map_err(ManifestError::Serialization)
}

pub fn default_manifest_path(root: &Path) -> PathBuf {
    root.join(ASSETS_DIR).join("manifest.json")
}
