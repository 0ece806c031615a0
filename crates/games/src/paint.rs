//! Pixel painting demo.
//!
//! Move a 4x4 brush with the arrows and hold Fire to paint. `c` cycles the
//! palette and `x` wipes the canvas. There is no way to lose.

use tracing::debug;

use crate::core::{PixelBuffer, SoundQueue};
use crate::types::{Button, Color, Controls, Status, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::Game;

pub const BRUSH: i32 = 4;
pub const BRUSH_STEP: i32 = 4;
pub const BLINK_TICKS: u64 = 16;

pub const PALETTE: [Color; 8] = [
    Color::WHITE,
    Color::RED,
    Color::ORANGE,
    Color::YELLOW,
    Color::GREEN,
    Color::CYAN,
    Color::BLUE,
    Color::MAGENTA,
];

const SWATCH: i32 = 12;
const SWATCH_GAP: i32 = 4;

#[derive(Debug, Clone)]
pub struct Paint {
    canvas: PixelBuffer,
    x: i32,
    y: i32,
    color: usize,
    stamps: u32,
    frame: u64,
}

impl Paint {
    pub fn new() -> Self {
        Self {
            canvas: PixelBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            x: SCREEN_WIDTH / 2 - BRUSH / 2,
            y: SCREEN_HEIGHT / 2 - BRUSH / 2,
            color: 0,
            stamps: 0,
            frame: 0,
        }
    }

    pub fn cursor(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn color(&self) -> Color {
        PALETTE[self.color]
    }

    pub fn canvas(&self) -> &PixelBuffer {
        &self.canvas
    }

    fn cursor_visible(&self) -> bool {
        (self.frame / BLINK_TICKS) % 2 == 0
    }

    fn draw_palette(&self, pb: &mut PixelBuffer) {
        for (i, &c) in PALETTE.iter().enumerate() {
            let x = 10 + i as i32 * (SWATCH + SWATCH_GAP);
            pb.fill_rect(x, 10, SWATCH, SWATCH, c);
            if i == self.color {
                pb.stroke_rect(x - 2, 8, SWATCH + 4, SWATCH + 4, Color::WHITE);
            }
        }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Paint {
    fn title(&self) -> &'static str {
        "PAINT"
    }

    fn help(&self) -> &'static str {
        "arrows move  SPACE paint  c color  x clear  q quit"
    }

    fn tick(&mut self, controls: Controls, _sfx: &mut SoundQueue) -> Status {
        self.frame += 1;

        let mut dx = 0;
        let mut dy = 0;
        if controls.is_held(Button::Left) {
            dx -= BRUSH_STEP;
        }
        if controls.is_held(Button::Right) {
            dx += BRUSH_STEP;
        }
        if controls.is_held(Button::Up) {
            dy -= BRUSH_STEP;
        }
        if controls.is_held(Button::Down) {
            dy += BRUSH_STEP;
        }
        self.x = (self.x + dx).clamp(0, SCREEN_WIDTH - BRUSH);
        self.y = (self.y + dy).clamp(0, SCREEN_HEIGHT - BRUSH);

        if controls.was_pressed(Button::Cycle) {
            self.color = (self.color + 1) % PALETTE.len();
            debug!(color = self.color, "palette cycled");
        }
        if controls.was_pressed(Button::Clear) {
            self.canvas.clear(Color::BLACK);
            debug!("canvas cleared");
        }
        if controls.is_held(Button::Fire) {
            self.canvas.fill_rect(self.x, self.y, BRUSH, BRUSH, PALETTE[self.color]);
            self.stamps = self.stamps.saturating_add(1);
        }

        Status::Running
    }

    fn render(&self, pb: &mut PixelBuffer) {
        if !pb.copy_from(&self.canvas) {
            pb.clear(Color::BLACK);
        }
        if self.cursor_visible() {
            pb.stroke_rect(self.x - 1, self.y - 1, BRUSH + 2, BRUSH + 2, Color::GRAY);
        }
        self.draw_palette(pb);
    }

    /// Number of brush stamps.
    fn score(&self) -> u32 {
        self.stamps
    }

    fn frames(&self) -> u64 {
        self.frame
    }

    fn status(&self) -> Status {
        Status::Running
    }
}
