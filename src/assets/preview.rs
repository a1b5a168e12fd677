//! Preview export and size reporting for the Play Store asset directory.

use crate::assets::feature::{FEATURE_HEIGHT, FEATURE_WIDTH};
use crate::assets::AssetError;
use image::imageops::FilterType;
use std::fs;
use std::path::{Path, PathBuf};

/// Conventional location of the listing assets within the project.
pub const PLAYSTORE_DIR: &str = "assets/playstore";

/// Graphics that get a fixed-size preview export.
pub const PREVIEW_SOURCES: [&str; 5] = [
    "feature_graphic.png",
    "feature_graphic_left_brand.png",
    "feature_graphic_centered.png",
    "feature_graphic_minimal.png",
    "feature_graphic_choice.png",
];

/// Everything the size report covers, thumbnails included.
pub const SIZE_REPORT_FILES: [&str; 7] = [
    "feature_graphic.png",
    "feature_graphic_left_brand.png",
    "feature_graphic_left_brand_thumb.png",
    "feature_graphic_centered.png",
    "feature_graphic_centered_thumb.png",
    "feature_graphic_minimal.png",
    "feature_graphic_minimal_thumb.png",
];

/// One line of the size report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeEntry {
    pub name: String,
    /// None when the file is missing or unreadable.
    pub dimensions: Option<(u32, u32)>,
}

/// Read the dimensions of each named file under `dir`.
///
/// Missing or unreadable files become `None` entries; the report never
/// fails as a whole.
pub fn report_sizes(dir: &Path, names: &[&str]) -> Vec<SizeEntry> {
    names
        .iter()
        .map(|name| SizeEntry {
            name: (*name).to_string(),
            dimensions: image::image_dimensions(dir.join(name)).ok(),
        })
        .collect()
}

/// Result of a preview export pass.
#[derive(Debug, Clone, Default)]
pub struct PreviewOutcome {
    /// Preview files written.
    pub saved: Vec<PathBuf>,
    /// Sources that were absent and skipped.
    pub missing: Vec<PathBuf>,
}

/// Export `*_preview_1024x500.png` review copies of the known graphics in
/// `dir`, resizing any source that is not already 1024x500.
///
/// Missing sources are recorded and skipped so the rest of the batch still
/// completes.
pub fn export_previews(dir: &Path) -> Result<PreviewOutcome, AssetError> {
    fs::create_dir_all(dir).map_err(|source| AssetError::io(dir, source))?;

    let mut outcome = PreviewOutcome::default();

    for name in PREVIEW_SOURCES {
        let path = dir.join(name);
        if !path.exists() {
            outcome.missing.push(path);
            continue;
        }

        let img = image::open(&path).map_err(|source| AssetError::open(&path, source))?;
        let img = if img.width() == FEATURE_WIDTH && img.height() == FEATURE_HEIGHT {
            img
        } else {
            img.resize_exact(FEATURE_WIDTH, FEATURE_HEIGHT, FilterType::Lanczos3)
        };

        let out = dir.join(name.replace(
            ".png",
            &format!("_preview_{FEATURE_WIDTH}x{FEATURE_HEIGHT}.png"),
        ));
        img.save(&out)
            .map_err(|source| AssetError::save(&out, source))?;
        outcome.saved.push(out);
    }

    Ok(outcome)
}
