//! Pixel buffer to terminal cells.
//!
//! Each cell shows two vertically stacked sub-pixels with the upper half
//! block glyph: the foreground paints the top one and the background the
//! bottom one. With typical 1:2 cells the sub-pixels come out square.
//!
//! The logical screen is far larger than any terminal, so every sub-pixel
//! covers a `scale`x`scale` block of source pixels and takes the brightest
//! of them. Averaging would wash 1-4 px missiles and flames out to black.

use crate::core::PixelBuffer;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::Color;

pub const HALF_BLOCK: char = '▀';

/// Cell rectangle inside a framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Area {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Where and how large the image lands inside an [`Area`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fit {
    /// Source pixels per sub-pixel along each axis.
    pub scale: i32,
    pub x: u16,
    pub y: u16,
    /// Size in cells.
    pub cols: u16,
    pub rows: u16,
}

/// Largest image that fits `area` with square sub-pixels, centered.
/// `None` when the area is empty.
pub fn fit(src_width: i32, src_height: i32, area: Area) -> Option<Fit> {
    if area.width == 0 || area.height == 0 || src_width <= 0 || src_height <= 0 {
        return None;
    }
    let sub_cols = area.width as i32;
    let sub_rows = area.height as i32 * 2;
    let scale = div_ceil(src_width, sub_cols)
        .max(div_ceil(src_height, sub_rows))
        .max(1);

    let cols = div_ceil(src_width, scale) as u16;
    let rows = div_ceil(div_ceil(src_height, scale), 2) as u16;
    Some(Fit {
        scale,
        x: area.x + (area.width - cols) / 2,
        y: area.y + (area.height - rows) / 2,
        cols,
        rows,
    })
}

fn div_ceil(a: i32, b: i32) -> i32 {
    (a + b - 1) / b
}

/// Brightest pixel of the `scale`-sized block at sub-pixel `(sx, sy)`.
pub fn block_max(pb: &PixelBuffer, sx: i32, sy: i32, scale: i32) -> Color {
    let x0 = sx * scale;
    let y0 = sy * scale;
    if x0 >= pb.width() || y0 >= pb.height() {
        return Color::BLACK;
    }
    let x1 = (x0 + scale).min(pb.width());
    let y1 = (y0 + scale).min(pb.height());

    let mut best = Color::BLACK;
    let mut best_brightness = 0;
    for y in y0..y1 {
        for &raw in &pb.row(y)[x0 as usize..x1 as usize] {
            let c = Color(raw);
            let b = c.brightness();
            if b > best_brightness {
                best = c;
                best_brightness = b;
            }
        }
    }
    best
}

/// Draw `pb` into `area` of `fb`. Returns the placement used.
pub fn present(pb: &PixelBuffer, fb: &mut FrameBuffer, area: Area) -> Option<Fit> {
    let fit = fit(pb.width(), pb.height(), area)?;
    for row in 0..fit.rows {
        for col in 0..fit.cols {
            let sx = col as i32;
            let top = block_max(pb, sx, row as i32 * 2, fit.scale);
            let bottom = block_max(pb, sx, row as i32 * 2 + 1, fit.scale);
            let style = CellStyle::new(Rgb::from(top), Rgb::from(bottom));
            fb.put_char(fit.x + col, fit.y + row, HALF_BLOCK, style);
        }
    }
    Some(fit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_preserves_aspect_and_centers() {
        // 800x600 into 100x40 cells: 100 sub-columns, 80 sub-rows.
        let f = fit(800, 600, Area::new(0, 1, 100, 40)).unwrap();
        assert_eq!(f.scale, 8);
        assert_eq!((f.cols, f.rows), (100, 38));
        assert_eq!((f.x, f.y), (0, 2));

        // Height-bound: 800x600 into 200x20 cells, 40 sub-rows.
        let f = fit(800, 600, Area::new(0, 0, 200, 20)).unwrap();
        assert_eq!(f.scale, 15);
        assert_eq!((f.cols, f.rows), (54, 20));
        assert_eq!(f.x, 73);
    }

    #[test]
    fn fit_rejects_empty_area() {
        assert_eq!(fit(800, 600, Area::new(0, 0, 0, 10)), None);
    }

    #[test]
    fn block_max_keeps_a_single_bright_pixel() {
        let mut pb = PixelBuffer::new(16, 16);
        pb.set(5, 6, Color::RED);
        assert_eq!(block_max(&pb, 0, 0, 8), Color::RED);
        assert_eq!(block_max(&pb, 1, 0, 8), Color::BLACK);
        pb.set(7, 7, Color::WHITE);
        assert_eq!(block_max(&pb, 0, 0, 8), Color::WHITE);
        assert_eq!(block_max(&pb, 4, 4, 8), Color::BLACK);
    }

    #[test]
    fn present_uses_half_blocks_top_and_bottom() {
        let mut pb = PixelBuffer::new(4, 4);
        pb.fill_rect(0, 0, 4, 2, Color::GREEN);
        let mut fb = FrameBuffer::new(4, 2);
        let f = present(&pb, &mut fb, Area::new(0, 0, 4, 2)).unwrap();
        assert_eq!(f.scale, 1);
        let top = fb.get(f.x, f.y).unwrap();
        assert_eq!(top.ch, HALF_BLOCK);
        assert_eq!(top.style.fg, Rgb::new(0, 255, 0));
        assert_eq!(top.style.bg, Rgb::new(0, 255, 0));
        let below = fb.get(f.x, f.y + 1).unwrap();
        assert_eq!(below.style.fg, Rgb::BLACK);
    }
}
