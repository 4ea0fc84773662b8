//! Raster drawing for preview images: box outlines and text labels.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::ir::CocoBBox;

/// Outline thickness in pixels, growing inward from the box edge.
pub const OUTLINE_WIDTH: i32 = 2;

/// Glyph cell size of the built-in label font.
pub const GLYPH_SIZE: i32 = 8;

/// Outline `bbox` on `img`.
///
/// Corners are truncated to integers and both are inclusive, so a box
/// `[x, y, w, h]` covers columns `x..=x+w`. Parts outside the image are
/// clipped.
pub fn draw_box(img: &mut RgbImage, bbox: &CocoBBox, color: Rgb<u8>) {
    let (ax, ay, bx, by) = bbox.truncated_corners();
    let (x0, x1) = clamp_span(ax.min(bx), ax.max(bx), img.width());
    let (y0, y1) = clamp_span(ay.min(by), ay.max(by), img.height());

    for ring in 0..OUTLINE_WIDTH {
        let (rx0, ry0) = (x0 + ring, y0 + ring);
        let (rx1, ry1) = (x1 - ring, y1 - ring);
        if rx1 < rx0 || ry1 < ry0 {
            break;
        }
        let rect = Rect::at(rx0, ry0).of_size((rx1 - rx0 + 1) as u32, (ry1 - ry0 + 1) as u32);
        draw_hollow_rect_mut(img, rect, color);
    }
}

/// Pull an inclusive span to within `OUTLINE_WIDTH` pixels of `0..len`.
///
/// An edge beyond the image stays beyond it after clamping, together with
/// its inner ring, so the visible pixels are unchanged.
fn clamp_span(lo: i32, hi: i32, len: u32) -> (i32, i32) {
    let min = -OUTLINE_WIDTH;
    let max = i32::try_from(len).unwrap_or(i32::MAX - OUTLINE_WIDTH) - 1 + OUTLINE_WIDTH;
    (lo.clamp(min, max), hi.clamp(min, max))
}

/// Draw `text` with its top-left corner at `(x, y)` using an 8x8 bitmap
/// font. Characters without a glyph advance the cursor but draw nothing.
pub fn draw_label(img: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>) {
    let (width, height) = (i64::from(img.width()), i64::from(img.height()));
    let glyph_size = i64::from(GLYPH_SIZE);
    let (x, y) = (i64::from(x), i64::from(y));
    if y >= height || y + glyph_size <= 0 {
        return;
    }

    for (idx, ch) in text.chars().enumerate() {
        let origin_x = x + idx as i64 * glyph_size;
        if origin_x >= width {
            break;
        }
        if origin_x + glyph_size <= 0 {
            continue;
        }
        let Some(glyph) = BASIC_FONTS.get(ch) else {
            continue;
        };

        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                // bit 0 is the leftmost pixel
                if bits & (1u8 << col) != 0 {
                    put_clipped(img, origin_x + i64::from(col), y + row as i64, color);
                }
            }
        }
    }
}

fn put_clipped(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if x < img.width() && y < img.height() {
        img.put_pixel(x, y, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    #[test]
    fn box_outline_is_two_pixels_inside_inclusive_corners() {
        let mut img = RgbImage::new(20, 20);
        draw_box(&mut img, &CocoBBox::new(2.0, 3.0, 10.0, 8.0), RED);

        // outer ring
        assert_eq!(*img.get_pixel(2, 3), RED);
        assert_eq!(*img.get_pixel(12, 11), RED);
        // inner ring
        assert_eq!(*img.get_pixel(3, 4), RED);
        assert_eq!(*img.get_pixel(11, 10), RED);
        // interior and outside stay untouched
        assert_eq!(*img.get_pixel(6, 7), BLACK);
        assert_eq!(*img.get_pixel(13, 11), BLACK);
        assert_eq!(*img.get_pixel(1, 3), BLACK);
    }

    #[test]
    fn box_partially_outside_image_is_clipped() {
        let mut img = RgbImage::new(10, 10);
        draw_box(&mut img, &CocoBBox::new(-5.0, -5.0, 30.0, 30.0), RED);
        draw_box(&mut img, &CocoBBox::new(5.0, 5.0, 0.0, 0.0), RED);
        assert_eq!(*img.get_pixel(5, 5), RED);
    }

    #[test]
    fn label_draws_glyph_pixels_in_colour() {
        let mut img = RgbImage::new(40, 10);
        draw_label(&mut img, 0, 0, "cat", RED);

        let lit = img.pixels().filter(|px| **px == RED).count();
        assert!(lit > 0);
        assert!(img.pixels().all(|px| *px == RED || *px == BLACK));
    }

    #[test]
    fn extreme_coordinates_are_clamped() {
        let mut img = RgbImage::new(10, 10);
        let huge = f64::from(i32::MAX);
        // every edge lies far outside the image
        draw_box(&mut img, &CocoBBox::new(-1e9, -1e9, 3e9, 3e9), RED);
        assert!(img.pixels().all(|px| *px == BLACK));

        draw_box(&mut img, &CocoBBox::new(3.0, 3.0, huge, huge), RED);
        assert_eq!(*img.get_pixel(3, 3), RED);
        assert_eq!(*img.get_pixel(4, 9), RED);
        assert_eq!(*img.get_pixel(9, 9), BLACK);

        draw_label(&mut img, i32::MAX - 4, i32::MAX - 4, "diningtable", RED);
        draw_label(&mut img, i32::MIN, 0, "diningtable", RED);
    }

    #[test]
    fn clamped_span_keeps_edges_outside_the_image() {
        assert_eq!(clamp_span(-100, 100, 10), (-2, 11));
        assert_eq!(clamp_span(2, 5, 10), (2, 5));
        assert_eq!(clamp_span(i32::MIN, i32::MAX, 10), (-2, 11));
    }

    #[test]
    fn label_near_edge_does_not_panic() {
        let mut img = RgbImage::new(4, 4);
        draw_label(&mut img, 2, 2, "diningtable", RED);
        draw_label(&mut img, -20, -3, "dog", RED);
    }
}
