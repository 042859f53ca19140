//! The FPS readout, rasterized with the 8x8 bitmap font from the
//! `font8x8` crate.

use crate::frame_clock::FpsSample;
use crate::image::Image;

/// Width of the overlay image in pixels.
pub const OVERLAY_WIDTH: u32 = 150;
/// Height of the overlay image in pixels.
pub const OVERLAY_HEIGHT: u32 = 50;
/// The color of the readout.
pub const OVERLAY_COLOR: [u8; 4] = [0x00, 0xFF, 0x00, 0xFF];

const GLYPH_SIZE: u32 = 8;
const TEXT_SCALE: u32 = 2;
const LINE_HEIGHT: u32 = 20;
const MARGIN: u32 = 2;

/// Renders `FPS: <n>` and `AVG: <n>` on two lines onto a
/// transparent `OVERLAY_WIDTH`x`OVERLAY_HEIGHT` image.
pub fn render_fps_overlay(sample: FpsSample) -> Image {
    let mut image = Image::blank(OVERLAY_WIDTH, OVERLAY_HEIGHT);
    let lines = [
        format!("FPS: {}", sample.instantaneous),
        format!("AVG: {}", sample.average),
    ];
    for (i, line) in lines.iter().enumerate() {
        let y = MARGIN + i as u32 * LINE_HEIGHT;
        draw_text(&mut image, line, MARGIN, y, TEXT_SCALE, OVERLAY_COLOR);
    }
    image
}

/// Draws `text` with its top-left corner at (x, y), each font pixel
/// `scale`x`scale` pixels big. Only the lit pixels are written, and
/// anything past the image's edges is clipped. Characters without a
/// glyph leave an empty cell.
pub fn draw_text(image: &mut Image, text: &str, x: u32, y: u32, scale: u32, color: [u8; 4]) {
    let advance = GLYPH_SIZE * scale;
    for (i, c) in text.chars().enumerate() {
        let glyph_x = x + i as u32 * advance;
        if glyph_x >= image.width {
            break;
        }
        if let Some(bitmap) = get_bitmap(c) {
            draw_glyph(image, &bitmap, glyph_x, y, scale, color);
        }
    }
}

fn draw_glyph(image: &mut Image, bitmap: &[u8; 8], x: u32, y: u32, scale: u32, color: [u8; 4]) {
    for (row, bits) in bitmap.iter().enumerate() {
        for column in 0..GLYPH_SIZE {
            // font8x8 stores the leftmost pixel in the lowest bit.
            if bits & (1 << column) == 0 {
                continue;
            }
            let px = x + column * scale;
            let py = y + row as u32 * scale;
            for dy in 0..scale {
                for dx in 0..scale {
                    image.set_pixel(px + dx, py + dy, color);
                }
            }
        }
    }
}

fn get_bitmap(c: char) -> Option<[u8; 8]> {
    let u = c as usize;
    match u {
        0x20..=0x7E => Some(font8x8::legacy::BASIC_LEGACY[u]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_pixels(image: &Image) -> Vec<(u32, u32)> {
        let mut lit = Vec::new();
        for y in 0..image.height {
            for x in 0..image.width {
                if image.pixel(x, y) != Some([0, 0, 0, 0]) {
                    lit.push((x, y));
                }
            }
        }
        lit
    }

    #[test]
    fn overlay_has_the_expected_size() {
        let image = render_fps_overlay(FpsSample::default());
        assert_eq!((image.width, image.height), (150, 50));
        assert_eq!(image.pixels.len(), 150 * 50 * 4);
    }

    #[test]
    fn overlay_is_green_text_on_transparent() {
        let image = render_fps_overlay(FpsSample {
            instantaneous: 60,
            average: 59,
        });
        let lit = lit_pixels(&image);
        assert!(!lit.is_empty());
        for &(x, y) in &lit {
            assert_eq!(image.pixel(x, y), Some(OVERLAY_COLOR));
        }
        // Both lines have something on them.
        assert!(lit.iter().any(|&(_, y)| y < MARGIN + LINE_HEIGHT));
        assert!(lit.iter().any(|&(_, y)| y >= MARGIN + LINE_HEIGHT));
        // Nothing above or to the left of the margin.
        assert!(lit.iter().all(|&(x, y)| x >= MARGIN && y >= MARGIN));
    }

    #[test]
    fn different_samples_render_differently() {
        let a = render_fps_overlay(FpsSample { instantaneous: 1, average: 1 });
        let b = render_fps_overlay(FpsSample { instantaneous: 8, average: 1 });
        assert_ne!(a, b);
    }

    #[test]
    fn spaces_and_unknown_chars_draw_nothing() {
        let mut image = Image::blank(64, 16);
        draw_text(&mut image, " \u{1F600}\t", 0, 0, 1, OVERLAY_COLOR);
        assert!(lit_pixels(&image).is_empty());
    }

    #[test]
    fn text_is_clipped_at_the_edges() {
        let mut image = Image::blank(10, 10);
        draw_text(&mut image, "WWWWWWWW", 4, 4, 2, OVERLAY_COLOR);
        let lit = lit_pixels(&image);
        assert!(!lit.is_empty());
        assert!(lit.iter().all(|&(x, y)| x < 10 && y < 10));
    }

    #[test]
    fn scale_multiplies_glyph_pixels() {
        let mut small = Image::blank(8, 8);
        draw_text(&mut small, "#", 0, 0, 1, OVERLAY_COLOR);
        let mut big = Image::blank(16, 16);
        draw_text(&mut big, "#", 0, 0, 2, OVERLAY_COLOR);
        assert_eq!(lit_pixels(&big).len(), lit_pixels(&small).len() * 4);
    }
}
