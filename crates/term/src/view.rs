//! ArcadeView: status line, presented game frame and outcome banner.
//!
//! This module is pure (no I/O). It can be unit-tested, and it does not
//! allocate once the framebuffer has its size.

use crate::core::PixelBuffer;
use crate::fb::{decimal_width, CellStyle, FrameBuffer, Rgb};
use crate::present::{present, Area};
use crate::types::Status;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// What the status line and banner show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud<'a> {
    pub title: &'a str,
    pub help: &'a str,
    pub score: u32,
    pub status: Status,
}

const STATUS_ROWS: u16 = 1;

#[derive(Debug, Clone, Copy)]
pub struct ArcadeView {
    status_style: CellStyle,
    title_style: CellStyle,
    banner_style: CellStyle,
    backdrop: CellStyle,
}

impl Default for ArcadeView {
    fn default() -> Self {
        Self {
            status_style: CellStyle::new(Rgb::new(170, 170, 180), Rgb::new(30, 30, 40)),
            title_style: CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(30, 30, 40)).bold(),
            banner_style: CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(140, 20, 20)).bold(),
            backdrop: CellStyle::new(Rgb::new(60, 60, 60), Rgb::new(10, 10, 14)),
        }
    }
}

impl ArcadeView {
    /// Render a frame into an existing framebuffer, resizing it to the
    /// viewport first.
    pub fn render_into(&self, hud: &Hud<'_>, pb: &PixelBuffer, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(self.backdrop.into_cell(' '));

        self.draw_status(hud, fb);

        let area = Area::new(
            0,
            STATUS_ROWS,
            viewport.width,
            viewport.height.saturating_sub(STATUS_ROWS),
        );
        present(pb, fb, area);

        if let Status::Over(outcome) = hud.status {
            self.draw_banner(outcome.message(), hud.score, area, fb);
        }
    }

    fn draw_status(&self, hud: &Hud<'_>, fb: &mut FrameBuffer) {
        fb.fill_rect(0, 0, fb.width(), STATUS_ROWS, ' ', self.status_style);
        let x = fb.put_str(1, 0, hud.title, self.title_style);
        let x = fb.put_str(x, 0, "  SCORE ", self.status_style);
        let x = fb.put_u32(x, 0, hud.score, self.status_style);

        let help_len = hud.help.chars().count() as u16;
        let help_x = fb.width().saturating_sub(help_len + 1).max(x + 2);
        fb.put_str(help_x, 0, hud.help, self.status_style);
    }

    fn draw_banner(&self, message: &str, score: u32, area: Area, fb: &mut FrameBuffer) {
        // "  {message}  Score: {score}  "
        let len = message.chars().count() as u16 + decimal_width(score) + 13;
        let x = area.x + area.width.saturating_sub(len) / 2;
        let y = area.y + area.height / 2;
        fb.fill_rect(x, y.saturating_sub(1), len, 3, ' ', self.banner_style);
        let cx = fb.put_str(x + 2, y, message, self.banner_style);
        let cx = fb.put_str(cx, y, "  Score: ", self.banner_style);
        fb.put_u32(cx, y, score, self.banner_style);
    }
}
