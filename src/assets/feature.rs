//! The Play Store feature graphic and its layout variants.
//!
//! All layout parameters are fixed constants taken from the approved draft
//! composition: a dark canvas with a subtle vertical fade, the headline at
//! left, a stylized scale beam at right, and optionally the app icon set
//! into a circular coin beside the beam.

use crate::assets::canvas::{fill_circle, fill_rect, new_canvas, vertical_fade};
use crate::assets::font::BitmapFont;
use crate::assets::AssetError;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};

/// Required feature graphic dimensions for a Play Store listing.
pub const FEATURE_WIDTH: u32 = 1024;
pub const FEATURE_HEIGHT: u32 = 500;

/// Half-size thumbnails for quick review.
pub const THUMB_WIDTH: u32 = 512;
pub const THUMB_HEIGHT: u32 = 250;

const BACKGROUND: Rgba<u8> = Rgba([37, 37, 37, 255]);
const HEADLINE_COLOR: Rgba<u8> = Rgba([245, 245, 245, 255]);
const BRAND_DIM: Rgba<u8> = Rgba([180, 180, 180, 255]);
const BRAND_BRIGHT: Rgba<u8> = Rgba([220, 220, 220, 255]);
const BAR_COLOR: Rgba<u8> = Rgba([60, 130, 255, 255]);
const COIN_FILL: Rgba<u8> = Rgba([50, 110, 230, 255]);

const BRAND: &str = "Rebalance";
const HEADLINE: &str = "Grow, stay\nbalanced.";

const W: i32 = FEATURE_WIDTH as i32;
const H: i32 = FEATURE_HEIGHT as i32;

/// Generate the primary feature graphic, optionally compositing the app icon
/// as a coin beside the scale beam.
///
/// A missing or unreadable icon is reported and skipped; the graphic is
/// still produced without the coin.
pub fn generate_feature_graphic(
    icon_path: Option<&Path>,
    output: &Path,
) -> Result<(), AssetError> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| AssetError::io(parent, source))?;
        }
    }

    let mut img = new_canvas(FEATURE_WIDTH, FEATURE_HEIGHT, BACKGROUND);
    vertical_fade(&mut img, 0.06);

    let headline = BitmapFont::fitting(HEADLINE, FEATURE_WIDTH - 160, 110);
    headline.draw_multiline(&mut img, HEADLINE, 80, 40, HEADLINE_COLOR);

    // Scale beam, nudged right of center
    let pivot_x = W / 2 + 90;
    let pivot_y = H / 2 + 40;
    let bar_length = 360;
    draw_beam(&mut img, pivot_x, pivot_y, bar_length / 2, 6, 22, 72);

    if let Some(icon_path) = icon_path {
        match image::open(icon_path) {
            Ok(icon) => {
                let coin = coin_from_icon(&icon.into_rgba8());
                let coin_x = pivot_x + bar_length / 2 + 30;
                let coin_y = pivot_y - coin.height() as i32 / 2 - 10;
                imageops::overlay(&mut img, &coin, coin_x as i64, coin_y as i64);
            }
            Err(e) => {
                eprintln!("Warning: couldn't load icon at {}: {}", icon_path.display(), e);
            }
        }
    }

    img.save(output)
        .map_err(|source| AssetError::save(output, source))?;

    Ok(())
}

/// The app icon set inside a filled circular coin with an inner margin.
fn coin_from_icon(icon: &RgbaImage) -> RgbaImage {
    let diameter: u32 = 220;
    let margin: u32 = 18;

    let mut coin = RgbaImage::from_pixel(diameter, diameter, Rgba([0, 0, 0, 0]));
    let center = diameter as i32 / 2;
    fill_circle(&mut coin, center, center, diameter / 2, COIN_FILL);

    let inner = diameter - margin * 2;
    let icon_small = imageops::resize(icon, inner, inner, FilterType::Lanczos3);
    imageops::overlay(&mut coin, &icon_small, margin as i64, margin as i64);

    coin
}

/// Horizontal bar plus pivot post, the stylized scale silhouette.
fn draw_beam(
    img: &mut RgbaImage,
    pivot_x: i32,
    pivot_y: i32,
    half_length: i32,
    half_height: i32,
    post_half_width: i32,
    post_depth: i32,
) {
    fill_rect(
        img,
        pivot_x - half_length,
        pivot_y - half_height,
        pivot_x + half_length,
        pivot_y + half_height,
        BAR_COLOR,
    );
    fill_rect(
        img,
        pivot_x - post_half_width,
        pivot_y - half_height - 2,
        pivot_x + post_half_width,
        pivot_y + post_depth,
        BAR_COLOR,
    );
}

/// Generate the four alternate layouts, each with a half-size thumbnail.
///
/// Returns the paths written, full graphic followed by its thumbnail for
/// each variant.
pub fn generate_alternates(out_dir: &Path) -> Result<Vec<PathBuf>, AssetError> {
    fs::create_dir_all(out_dir).map_err(|source| AssetError::io(out_dir, source))?;

    let variants: [(&str, fn() -> RgbaImage); 4] = [
        ("feature_graphic_left_brand.png", variant_left_brand),
        ("feature_graphic_centered.png", variant_centered),
        ("feature_graphic_minimal.png", variant_minimal),
        ("feature_graphic_choice.png", variant_choice),
    ];

    let mut written = Vec::with_capacity(variants.len() * 2);

    for (name, build) in variants {
        let img = build();

        let full_path = out_dir.join(name);
        img.save(&full_path)
            .map_err(|source| AssetError::save(&full_path, source))?;
        written.push(full_path);

        let thumb = imageops::resize(&img, THUMB_WIDTH, THUMB_HEIGHT, FilterType::Lanczos3);
        let thumb_path = out_dir.join(name.replace(".png", "_thumb.png"));
        thumb
            .save(&thumb_path)
            .map_err(|source| AssetError::save(&thumb_path, source))?;
        written.push(thumb_path);
    }

    Ok(written)
}

/// Small brand top-left, two-line headline, beam at right.
fn variant_left_brand() -> RgbaImage {
    let mut img = new_canvas(FEATURE_WIDTH, FEATURE_HEIGHT, BACKGROUND);

    BitmapFont::with_height(28).draw(&mut img, BRAND, 80, 28, BRAND_DIM);

    let headline = BitmapFont::fitting(HEADLINE, FEATURE_WIDTH - 160, 84);
    headline.draw_multiline(&mut img, HEADLINE, 80, 80, HEADLINE_COLOR);

    draw_beam(&mut img, W / 2 + 90, H / 2 + 40, 180, 6, 20, 70);
    img
}

/// Headline centered on one line, brand centered below, beam lower.
fn variant_centered() -> RgbaImage {
    let mut img = new_canvas(FEATURE_WIDTH, FEATURE_HEIGHT, BACKGROUND);

    let text = "Grow, stay balanced.";
    let headline = BitmapFont::fitting(text, FEATURE_WIDTH - 120, 78);
    let text_w = headline.measure(text);
    headline.draw(&mut img, text, (FEATURE_WIDTH - text_w) / 2, 110, HEADLINE_COLOR);

    let brand_font = BitmapFont::with_height(30);
    let brand_w = brand_font.measure(BRAND);
    let brand_y = 110 + headline.glyph_height() + 20;
    brand_font.draw(&mut img, BRAND, (FEATURE_WIDTH - brand_w) / 2, brand_y, BRAND_DIM);

    draw_beam(&mut img, W / 2, H / 2 + 60, 200, 6, 20, 70);
    img
}

/// Brand prominent, single shorter headline, smaller beam.
fn variant_minimal() -> RgbaImage {
    let mut img = new_canvas(FEATURE_WIDTH, FEATURE_HEIGHT, BACKGROUND);

    BitmapFont::with_height(44).draw(&mut img, BRAND, 80, 60, BRAND_BRIGHT);

    let headline = BitmapFont::fitting("Stay balanced.", FEATURE_WIDTH - 160, 64);
    headline.draw(&mut img, "Stay balanced.", 80, 120, HEADLINE_COLOR);

    draw_beam(&mut img, W / 2 + 140, H / 2 + 40, 150, 5, 18, 60);
    img
}

/// Brand top-left with the full two-line slogan slightly larger.
fn variant_choice() -> RgbaImage {
    let mut img = new_canvas(FEATURE_WIDTH, FEATURE_HEIGHT, BACKGROUND);

    BitmapFont::with_height(40).draw(&mut img, BRAND, 80, 40, BRAND_BRIGHT);

    let text = "Grow, Stay\nBalanced.";
    let headline = BitmapFont::fitting(text, FEATURE_WIDTH - 160, 88);
    headline.draw_multiline(&mut img, text, 80, 100, HEADLINE_COLOR);

    draw_beam(&mut img, W / 2 + 120, H / 2 + 30, 200, 6, 20, 72);
    img
}
