//! Gallery view building and HTML rendering.
//!
//! The view is a pure projection of the manifest scan: no timestamp, so
//! two builds over an unchanged tree compare equal. Rendering goes through
//! maud, which escapes every interpolated string, so hostile filenames
//! cannot break the document.

use crate::manifest::{build_manifest, Manifest, ManifestError};
use crate::naming::{display_name, format_size};
use crate::taxonomy::Taxonomy;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub file_name: String,
    /// Relative path used as the image `src`.
    pub path: String,
    pub display_name: String,
    pub formatted_size: String,
    pub resolution_tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GallerySection {
    pub title: String,
    pub description: String,
    pub count: usize,
    pub items: Vec<GalleryItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    pub sections: Vec<GallerySection>,
    pub total_count: usize,
}

impl GalleryView {
    /// Projects a manifest into presentation form. Zero-count categories
    /// are excluded from the rendered list.
    pub fn from_manifest(manifest: &Manifest, taxonomy: &Taxonomy) -> Self {
        let mut sections = Vec::new();
        let mut total_count = 0;

        for (name, files) in &manifest.categories {
            if files.is_empty() {
                continue;
            }
            let (title, description) = match taxonomy.category(name) {
                Some(rule) => (rule.title.clone(), rule.description.clone()),
                None => (name.clone(), String::new()),
            };
            let items: Vec<GalleryItem> = files
                .iter()
                .map(|file| GalleryItem {
                    file_name: file.original_name.clone(),
                    path: file.stored_path.clone(),
                    display_name: display_name(&file.original_name),
                    formatted_size: format_size(file.size_bytes),
                    resolution_tag: file.resolution_tag.clone(),
                })
                .collect();
            total_count += items.len();
            sections.push(GallerySection {
                title,
                description,
                count: items.len(),
                items,
            });
        }

        Self {
            sections,
            total_count,
        }
    }
}

#[derive(Debug)]
pub enum GalleryError {
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
    Scan(ManifestError),
}

impl Display for GalleryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { source, path } => write!(f, "io error for {}: {}", path.display(), source),
            Self::Scan(error) => write!(f, "scan error: {}", error),
        }
    }
}

impl Error for GalleryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Scan(error) => Some(error),
        }
    }
}

/// Re-scans the organized tree and builds the presentation view.
pub fn build_gallery_view(root: &Path, taxonomy: &Taxonomy) -> Result<GalleryView, GalleryError> {
    let manifest = build_manifest(root, taxonomy).map_err(GalleryError::Scan)?;
    Ok(GalleryView::from_manifest(&manifest, taxonomy))
}

const STYLE: &str = "\
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: 'Segoe UI', Tahoma, sans-serif; background: #101018; color: #f0f0f0; line-height: 1.6; }
.container { max-width: 1400px; margin: 0 auto; padding: 30px; }
header { text-align: center; padding: 40px 0; margin-bottom: 40px; background: #18182a; border-radius: 16px; }
h1 { font-size: 2.8em; letter-spacing: 2px; text-transform: uppercase; }
.subtitle { color: #aaa; font-size: 1.2em; }
.stats-bar { background: #1c1c2e; border-radius: 12px; padding: 20px; margin: 30px 0; display: flex; justify-content: space-around; flex-wrap: wrap; gap: 20px; }
.stat-item { text-align: center; min-width: 120px; }
.stat-number { font-size: 2.2em; font-weight: bold; color: #ffd700; display: block; }
.stat-label { color: #bbb; font-size: 0.9em; text-transform: uppercase; }
.category { margin-bottom: 60px; background: #191928; border-radius: 16px; padding: 30px; }
.category-header { display: flex; align-items: center; margin-bottom: 20px; padding-bottom: 12px; border-bottom: 2px solid #333; }
.category-title { font-size: 2em; color: #ffd700; flex-grow: 1; }
.category-count { background: #f0131e; color: white; padding: 6px 16px; border-radius: 16px; font-weight: bold; }
.category-description { color: #ccc; margin-bottom: 24px; }
.gallery { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 22px; }
.gallery-item { background: #242438; border-radius: 12px; overflow: hidden; border: 1px solid #444; }
.gallery-img { width: 100%; height: 200px; object-fit: cover; }
.gallery-info { padding: 16px; }
.gallery-name { font-weight: bold; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }
.gallery-meta { display: flex; justify-content: space-between; align-items: center; margin-top: 8px; }
.gallery-size { color: #888; font-family: monospace; font-size: 0.9em; }
.resolution-badge { background: #0088cc; color: white; padding: 3px 10px; border-radius: 12px; font-size: 0.8em; font-weight: bold; }
footer { text-align: center; padding: 36px; color: #888; border-top: 1px solid #333; }
.update-time { color: #00b5e2; font-weight: bold; }
";

/// Renders the view as a self-contained HTML document. `generated_at` is
/// stamped into the footer.
pub fn render_gallery(view: &GalleryView, generated_at: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Asset Gallery" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                div class="container" {
                    header {
                        h1 { "Asset Gallery" }
                        p class="subtitle" {
                            (view.total_count) " images across " (view.sections.len()) " categories"
                        }
                    }
                    div class="stats-bar" {
                        div class="stat-item" {
                            span class="stat-number" { (view.total_count) }
                            span class="stat-label" { "Total Images" }
                        }
                        @for section in &view.sections {
                            div class="stat-item" {
                                span class="stat-number" { (section.count) }
                                span class="stat-label" { (section.title) }
                            }
                        }
                    }
                    @for section in &view.sections {
                        section class="category" {
                            div class="category-header" {
                                h2 class="category-title" { (section.title) }
                                div class="category-count" { (section.count) " images" }
                            }
                            p class="category-description" { (section.description) }
                            div class="gallery" {
                                @for item in &section.items {
                                    div class="gallery-item" {
                                        img src=(item.path) alt=(item.display_name) class="gallery-img";
                                        div class="gallery-info" {
                                            div class="gallery-name" title=(item.display_name) {
                                                (item.display_name)
                                            }
                                            div class="gallery-meta" {
                                                div class="gallery-size" { (item.formatted_size) }
                                                @if let Some(tag) = &item.resolution_tag {
                                                    div class="resolution-badge" { (tag) }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                    footer {
                        p {
                            "Generated automatically \u{2022} "
                            span class="update-time" { (generated_at) }
                        }
                    }
                }
            }
        }
    }
}

/// Renders and writes the gallery document, stamping the current time.
pub fn write_gallery(view: &GalleryView, path: &Path) -> Result<(), GalleryError> {
    let generated_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));
    let document = render_gallery(view, &generated_at);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| GalleryError::Io {
                source,
                path: parent.to_path_buf(),
            })?;
        }
    }
    fs::write(path, document.into_string()).map_err(|source| GalleryError::Io {
        source,
        path: path.to_path_buf(),
    })
}

pub fn default_gallery_path(root: &Path) -> PathBuf {
    root.join("gallery.html")
}
