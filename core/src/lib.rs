//! Core classification and catalog engine for Curio.
//!
//! This crate exposes the full organizing pipeline used by the CLI: a
//! keyword [`taxonomy`] that maps filenames to categories, a [`placement`]
//! resolver that moves files into category folders without ever
//! overwriting an existing file, and catalog builders ([`manifest`],
//! [`gallery`]) that project the resulting on-disk layout into a JSON
//! manifest and a self-contained HTML gallery. The public API focuses on
//! data-transfer objects (`Manifest`, `AssetFile`, `GalleryView`) that are
//! serialisable for downstream consumers.

pub mod gallery;
pub mod manifest;
pub mod naming;
pub mod placement;
pub mod progress;
pub mod scan;
pub mod taxonomy;

pub use gallery::{
    build_gallery_view, default_gallery_path, render_gallery, write_gallery, GalleryError,
    GalleryItem, GallerySection, GalleryView,
};
pub use manifest::{
    build_manifest, default_manifest_path, write_manifest, AssetFile, Manifest, ManifestError,
};
pub use naming::{display_name, format_size, resolution_tag, split_resolution_suffix};
pub use placement::{
    organize, place, resolve_destination, CounterPlacement, OrganizeReport, PlacedAsset,
    PlacementError, PlacementFailure, ASSETS_DIR,
};
pub use scan::{count_entries, has_image_extension, list_images, IMAGE_EXTENSIONS};
pub use taxonomy::{CategoryRule, Taxonomy};
