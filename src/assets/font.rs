//! Built-in bitmap text rendering.
//!
//! Marketing headlines are short and fixed, so a scaled 5x7 pixel face is
//! enough; it keeps rendering fully deterministic and self-contained, with no
//! font files to locate at runtime. Glyphs are uppercase-only; input is
//! uppercased before lookup.

use image::{Rgba, RgbaImage};

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
/// Glyph cell width including one column of spacing.
const GLYPH_ADVANCE: u32 = 6;

/// A 5x7 bitmap face scaled up by an integer pixel factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFont {
    scale: u32,
}

impl BitmapFont {
    /// Face whose glyphs render `scale` pixels per font pixel.
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
        }
    }

    /// Face sized so glyphs are roughly `px` pixels tall.
    pub fn with_height(px: u32) -> Self {
        Self::new((px / GLYPH_HEIGHT).max(1))
    }

    /// Largest face no taller than `px` whose widest line of `text` still
    /// fits within `max_width`.
    pub fn fitting(text: &str, max_width: u32, px: u32) -> Self {
        let target = Self::with_height(px);
        let widest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0) as u32;
        if widest == 0 {
            return target;
        }
        let width_scale = (max_width / (widest * GLYPH_ADVANCE)).max(1);
        Self::new(target.scale.min(width_scale))
    }

    /// Rendered glyph height in pixels.
    pub fn glyph_height(&self) -> u32 {
        GLYPH_HEIGHT * self.scale
    }

    /// Vertical advance between lines of text.
    pub fn line_height(&self) -> u32 {
        (GLYPH_HEIGHT + 2) * self.scale
    }

    /// Width in pixels of a single line of text.
    pub fn measure(&self, text: &str) -> u32 {
        let chars = text.chars().count() as u32;
        if chars == 0 {
            0
        } else {
            chars * GLYPH_ADVANCE * self.scale - self.scale
        }
    }

    /// Draw one line of text with its top-left corner at (x, y).
    ///
    /// Pixels falling outside the image are clipped, not an error.
    pub fn draw(&self, img: &mut RgbaImage, text: &str, x: u32, y: u32, color: Rgba<u8>) {
        let (img_w, img_h) = img.dimensions();
        let mut cursor_x = x;

        for c in text.chars() {
            let pattern = glyph_pattern(c);
            for (row, &bits) in pattern.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if (bits >> (GLYPH_WIDTH - 1 - col)) & 1 == 0 {
                        continue;
                    }
                    // Scale each font pixel to a scale x scale block
                    let base_x = cursor_x + col * self.scale;
                    let base_y = y + row as u32 * self.scale;
                    for dy in 0..self.scale {
                        for dx in 0..self.scale {
                            let px = base_x + dx;
                            let py = base_y + dy;
                            if px < img_w && py < img_h {
                                img.put_pixel(px, py, color);
                            }
                        }
                    }
                }
            }
            cursor_x += GLYPH_ADVANCE * self.scale;
        }
    }

    /// Draw newline-separated text, one line per [`Self::line_height`].
    pub fn draw_multiline(&self, img: &mut RgbaImage, text: &str, x: u32, y: u32, color: Rgba<u8>) {
        for (i, line) in text.lines().enumerate() {
            self.draw(img, line, x, y + i as u32 * self.line_height(), color);
        }
    }
}

/// 5-wide bitmask rows for a character, top to bottom.
fn glyph_pattern(c: char) -> [u8; 7] {
    match c.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01110, 0b10001, 0b10000, 0b01110, 0b00001, 0b10001, 0b01110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111],
        '3' => [0b01110, 0b10001, 0b00001, 0b00110, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b01110, 0b10000, 0b11110, 0b10001, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00001, 0b01110],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00110, 0b00100],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00110, 0b00110],
        ':' => [0b00000, 0b00110, 0b00110, 0b00000, 0b00110, 0b00110, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b01110, 0b00000, 0b00000, 0b00000],
        '\'' => [0b00100, 0b00100, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        ' ' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        // Box for unknown
        _ => [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_scales_with_text_and_size() {
        let font = BitmapFont::new(1);
        assert_eq!(font.measure(""), 0);
        assert_eq!(font.measure("A"), 5);
        assert_eq!(font.measure("AB"), 11);

        let big = BitmapFont::new(3);
        assert_eq!(big.measure("A"), 15);
    }

    #[test]
    fn test_with_height_rounds_down_but_never_zero() {
        assert_eq!(BitmapFont::with_height(7), BitmapFont::new(1));
        assert_eq!(BitmapFont::with_height(96), BitmapFont::new(13));
        assert_eq!(BitmapFont::with_height(3), BitmapFont::new(1));
    }

    #[test]
    fn test_fitting_caps_scale_to_width() {
        // 20-char line at scale 13 would be 1547px wide; fitting caps it
        let text = "GROW, STAY BALANCED.";
        let font = BitmapFont::fitting(text, 904, 96);
        assert!(font.measure(text) <= 904);

        // A short line keeps the height-derived scale
        assert_eq!(BitmapFont::fitting("HI", 1024, 96), BitmapFont::new(13));
    }

    #[test]
    fn test_draw_sets_pixels_inside_bounds() {
        let mut img = RgbaImage::from_pixel(20, 10, Rgba([0, 0, 0, 255]));
        let white = Rgba([255, 255, 255, 255]);
        BitmapFont::new(1).draw(&mut img, "I", 0, 0, white);

        // Top row of 'I' is 01110: columns 1..=3 set
        assert_eq!(*img.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
        assert_eq!(*img.get_pixel(1, 0), white);
        assert_eq!(*img.get_pixel(2, 0), white);
        assert_eq!(*img.get_pixel(3, 0), white);
        assert_eq!(*img.get_pixel(4, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_draw_clips_at_image_edge() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        // Must not panic even though the glyph extends past the edge
        BitmapFont::new(2).draw(&mut img, "W", 1, 1, Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_multiline_advances_by_line_height() {
        let font = BitmapFont::new(1);
        let mut img = RgbaImage::from_pixel(20, 30, Rgba([0, 0, 0, 255]));
        let white = Rgba([255, 255, 255, 255]);
        font.draw_multiline(&mut img, "T\nT", 0, 0, white);

        // Top bar of the second 'T' starts one line_height down
        assert_eq!(*img.get_pixel(0, font.line_height()), white);
    }
}
