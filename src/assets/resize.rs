//! Aspect-preserving resize into a padded canvas.

use crate::assets::AssetError;
use image::imageops::FilterType;
use image::{imageops, Rgba, RgbaImage};
use std::path::Path;

/// Largest dimensions with the source aspect ratio that fit inside the box.
///
/// Never upscales: a source already inside the box keeps its dimensions.
pub fn fit_dimensions(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (sw, sh) = source;
    let (bw, bh) = bounds;

    if sw == 0 || sh == 0 || bw == 0 || bh == 0 {
        return (0, 0);
    }
    if sw <= bw && sh <= bh {
        return (sw, sh);
    }

    // Pick the tighter constraint, using u64 to avoid overflow
    let width_limited = (bw, ((bw as u64 * sh as u64) / sw as u64) as u32);
    let height_limited = (((bh as u64 * sw as u64) / sh as u64) as u32, bh);

    let (w, h) = if width_limited.1 <= bh {
        width_limited
    } else {
        height_limited
    };

    (w.max(1), h.max(1))
}

/// Scale an image to fit inside `width` x `height` and center it on a
/// transparent canvas of exactly those dimensions.
pub fn resize_into(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (fw, fh) = fit_dimensions(img.dimensions(), (width, height));

    let fitted = if (fw, fh) == img.dimensions() {
        img.clone()
    } else {
        imageops::resize(img, fw, fh, FilterType::Lanczos3)
    };

    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 0]));
    let x = (width - fitted.width()) / 2;
    let y = (height - fitted.height()) / 2;
    imageops::overlay(&mut canvas, &fitted, x as i64, y as i64);
    canvas
}

/// Read `input`, fit-and-center it into the requested dimensions, and write
/// the result to `output` as PNG.
pub fn resize_file(
    input: &Path,
    output: &Path,
    width: u32,
    height: u32,
) -> Result<(), AssetError> {
    let img = image::open(input)
        .map_err(|source| AssetError::open(input, source))?
        .into_rgba8();

    let result = resize_into(&img, width, height);
    result
        .save(output)
        .map_err(|source| AssetError::save(output, source))?;

    Ok(())
}
