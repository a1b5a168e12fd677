//! Canvas drawing primitives for the marketing graphics.

use image::{Rgba, RgbaImage};

/// Opaque canvas filled with a single background color.
pub fn new_canvas(width: u32, height: u32, background: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width, height, background)
}

/// Darken rows progressively toward the bottom of the image.
///
/// `strength` is the fraction by which the bottom row is darkened; rows in
/// between are interpolated linearly. Alpha is untouched.
pub fn vertical_fade(img: &mut RgbaImage, strength: f32) {
    let height = img.height();
    if height == 0 {
        return;
    }

    for y in 0..height {
        let factor = 1.0 - strength * (y as f32 / height as f32);
        for x in 0..img.width() {
            let Rgba([r, g, b, a]) = *img.get_pixel(x, y);
            img.put_pixel(
                x,
                y,
                Rgba([
                    (r as f32 * factor) as u8,
                    (g as f32 * factor) as u8,
                    (b as f32 * factor) as u8,
                    a,
                ]),
            );
        }
    }
}

/// Fill the axis-aligned rectangle with corners (x0, y0) and (x1, y1),
/// inclusive, clipped to the image.
pub fn fill_rect(img: &mut RgbaImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba<u8>) {
    let (w, h) = img.dimensions();
    let x_start = x0.max(0) as u32;
    let y_start = y0.max(0) as u32;
    let x_end = (x1.min(w as i32 - 1)).max(-1);
    let y_end = (y1.min(h as i32 - 1)).max(-1);

    if x_end < 0 || y_end < 0 {
        return;
    }

    for y in y_start..=y_end as u32 {
        for x in x_start..=x_end as u32 {
            img.put_pixel(x, y, color);
        }
    }
}

/// Fill the disc of the given radius centered at (cx, cy), clipped to the
/// image.
pub fn fill_circle(img: &mut RgbaImage, cx: i32, cy: i32, radius: u32, color: Rgba<u8>) {
    let (w, h) = img.dimensions();
    let r = radius as i64;
    let r_sq = r * r;

    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy > r_sq {
                continue;
            }
            let x = cx as i64 + dx;
            let y = cy as i64 + dy;
            if x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Rgba<u8> = Rgba([100, 100, 100, 255]);

    #[test]
    fn test_new_canvas_dimensions_and_fill() {
        let img = new_canvas(8, 4, BG);
        assert_eq!(img.dimensions(), (8, 4));
        assert!(img.pixels().all(|p| *p == BG));
    }

    #[test]
    fn test_vertical_fade_darkens_bottom() {
        let mut img = new_canvas(2, 100, BG);
        vertical_fade(&mut img, 0.5);

        let top = img.get_pixel(0, 0).0;
        let bottom = img.get_pixel(0, 99).0;
        assert_eq!(top[0], 100);
        assert!(bottom[0] < top[0]);
        // Alpha unchanged
        assert_eq!(bottom[3], 255);
    }

    #[test]
    fn test_fill_rect_inclusive_corners() {
        let mut img = new_canvas(10, 10, BG);
        let red = Rgba([255, 0, 0, 255]);
        fill_rect(&mut img, 2, 3, 4, 5, red);

        assert_eq!(*img.get_pixel(2, 3), red);
        assert_eq!(*img.get_pixel(4, 5), red);
        assert_eq!(*img.get_pixel(1, 3), BG);
        assert_eq!(*img.get_pixel(5, 5), BG);
    }

    #[test]
    fn test_fill_rect_clips_negative_and_overflow() {
        let mut img = new_canvas(4, 4, BG);
        let red = Rgba([255, 0, 0, 255]);
        fill_rect(&mut img, -5, -5, 100, 100, red);
        assert!(img.pixels().all(|p| *p == red));
    }

    #[test]
    fn test_fill_circle_contains_center_excludes_corner() {
        let mut img = new_canvas(21, 21, BG);
        let blue = Rgba([0, 0, 255, 255]);
        fill_circle(&mut img, 10, 10, 8, blue);

        assert_eq!(*img.get_pixel(10, 10), blue);
        assert_eq!(*img.get_pixel(10, 2), blue);
        assert_eq!(*img.get_pixel(0, 0), BG);
    }
}
