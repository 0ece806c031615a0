//! The software rendering surface.
//!
//! A `PixelBuffer` is a row-major array of packed `0xRRGGBBAA` pixels. Games
//! rasterize into it once per tick and the front-end presents it. Every write
//! is clipped, so sprites may hang off any edge of the screen.

use crate::sprites::Sprite;
use crate::types::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: i32,
    height: i32,
    /// Pixels per row. Equal to `width` for buffers created here.
    pitch: usize,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let pitch = width as usize;
        Self {
            width,
            height,
            pitch,
            pixels: vec![Color::BLACK.0; pitch * height as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn pitch(&self) -> usize {
        self.pitch
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// One row of pixels. Panics if `y` is out of range.
    pub fn row(&self, y: i32) -> &[u32] {
        let start = y as usize * self.pitch;
        &self.pixels[start..start + self.width as usize]
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.pitch + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.idx(x, y).map(|i| Color(self.pixels[i]))
    }

    #[inline(always)]
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = color.0;
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.0);
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(self.width);
        let y1 = y.saturating_add(h).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for yy in y0..y1 {
            let start = yy as usize * self.pitch;
            self.pixels[start + x0 as usize..start + x1 as usize].fill(color.0);
        }
    }

    /// Fill column `x` from `y0` (inclusive) to `y1` (exclusive).
    pub fn fill_column(&mut self, x: i32, y0: i32, y1: i32, color: Color) {
        if x < 0 || x >= self.width {
            return;
        }
        for y in y0.max(0)..y1.min(self.height) {
            self.pixels[y as usize * self.pitch + x as usize] = color.0;
        }
    }

    /// One pixel wide rectangle outline.
    pub fn stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        self.fill_rect(x, y, w, 1, color);
        self.fill_rect(x, y + h - 1, w, 1, color);
        self.fill_rect(x, y, 1, h, color);
        self.fill_rect(x + w - 1, y, 1, h, color);
    }

    /// Draw the set bits of `sprite` with its top-left corner at `(x, y)`.
    pub fn draw_sprite(&mut self, x: i32, y: i32, sprite: &Sprite, color: Color) {
        for (row, bits) in sprite.rows.iter().enumerate() {
            for col in 0..sprite.width as i32 {
                if bits & (0x80 >> col) != 0 {
                    self.set(x + col, y + row as i32, color);
                }
            }
        }
    }

    /// Like [`draw_sprite`](Self::draw_sprite), but every set bit becomes a
    /// `scale`x`scale` block and `(x, y)` is in scaled units.
    pub fn draw_sprite_scaled(&mut self, x: i32, y: i32, sprite: &Sprite, scale: i32, color: Color) {
        for (row, bits) in sprite.rows.iter().enumerate() {
            for col in 0..sprite.width as i32 {
                if bits & (0x80 >> col) != 0 {
                    self.fill_rect(
                        (x + col) * scale,
                        (y + row as i32) * scale,
                        scale,
                        scale,
                        color,
                    );
                }
            }
        }
    }

    /// Copy another buffer of the same size over this one.
    ///
    /// Returns false (and copies nothing) on a size mismatch.
    pub fn copy_from(&mut self, other: &PixelBuffer) -> bool {
        if self.width != other.width || self.height != other.height {
            return false;
        }
        for y in 0..self.height {
            let dst = y as usize * self.pitch;
            let w = self.width as usize;
            self.pixels[dst..dst + w].copy_from_slice(other.row(y));
        }
        true
    }

    /// Number of pixels that differ from `background`.
    pub fn count_not(&self, background: Color) -> usize {
        (0..self.height)
            .map(|y| self.row(y).iter().filter(|&&p| p != background.0).count())
            .sum()
    }
}
