//! Score digits and fuel gauges drawn straight into the pixel buffer.

use crate::fixed::Fx;
use crate::pixels::PixelBuffer;
use crate::sprites::DIGITS;
use crate::types::Color;

/// Horizontal distance between digit origins.
pub const DIGIT_ADVANCE: i32 = 6;

/// Draw `n` in decimal with its first digit at `(x, y)`.
pub fn draw_number(pb: &mut PixelBuffer, x: i32, y: i32, n: u32, color: Color) {
    let mut digits = [0u8; 10];
    let mut len = 0;
    let mut v = n;
    loop {
        digits[len] = (v % 10) as u8;
        len += 1;
        v /= 10;
        if v == 0 {
            break;
        }
    }
    for (i, d) in digits[..len].iter().rev().enumerate() {
        pb.draw_sprite(x + i as i32 * DIGIT_ADVANCE, y, &DIGITS[*d as usize], color);
    }
}

/// Vertical fuel bar with a one pixel white frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuelGauge {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub fill: Color,
}

impl FuelGauge {
    pub const fn new(x: i32, y: i32, fill: Color) -> Self {
        Self {
            x,
            y,
            width: 20,
            height: 100,
            fill,
        }
    }

    /// Bar height in pixels for `fuel` on a 0..=100 scale.
    pub fn bar_height(&self, fuel: Fx) -> i32 {
        let full = Fx::from_int(100);
        fuel.clamp(Fx::ZERO, full)
            .scale(self.height, 100)
            .trunc()
    }

    pub fn draw(&self, pb: &mut PixelBuffer, fuel: Fx) {
        let (x, y, w, h) = (self.x, self.y, self.width, self.height);

        pb.fill_rect(x - 1, y, w + 2, h, Color::BLACK);

        pb.fill_rect(x - 1, y, w + 2, 1, Color::WHITE);
        pb.fill_rect(x - 1, y + h, w + 2, 1, Color::WHITE);
        pb.fill_rect(x - 1, y, 1, h, Color::WHITE);
        pb.fill_rect(x + w, y, 1, h, Color::WHITE);

        let bar = self.bar_height(fuel);
        pb.fill_rect(x, y + h - bar, w, bar, self.fill);
    }
}
