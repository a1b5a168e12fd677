//! Play Store asset generation.
//!
//! Deterministic rendering of the 1024x500 feature graphic and its layout
//! variants, aspect-preserving resizing, preview export, and a size report
//! over the asset directory. Stateless, single-pass transformations; batch
//! operations report missing inputs and continue rather than aborting.

pub mod canvas;
pub mod feature;
pub mod font;
pub mod preview;
pub mod resize;

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to read image {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write image {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AssetError {
    pub(crate) fn open(path: &Path, source: image::ImageError) -> Self {
        AssetError::Open {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn save(path: &Path, source: image::ImageError) -> Self {
        AssetError::Save {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        AssetError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub use feature::{generate_alternates, generate_feature_graphic, FEATURE_HEIGHT, FEATURE_WIDTH};
pub use font::BitmapFont;
pub use preview::{export_previews, report_sizes, PreviewOutcome, SizeEntry};
pub use resize::{fit_dimensions, resize_file, resize_into};
