//! Axis-aligned collision helpers.

/// Axis-aligned rectangle in integer pixels. Edges are half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Walk a point from `(x, from_y)` to `(x, to_y)` one pixel at a time and
/// return the first y that lands inside `rect`.
///
/// Both endpoints are sampled. Fast projectiles use this so they cannot skip
/// over a target that is thinner than their per-tick travel.
pub fn sweep_point_y(x: i32, from_y: i32, to_y: i32, rect: &Rect) -> Option<i32> {
    if x < rect.x || x >= rect.right() {
        return None;
    }
    let step = if to_y >= from_y { 1 } else { -1 };
    let mut y = from_y;
    loop {
        if rect.contains(x, y) {
            return Some(y);
        }
        if y == to_y {
            return None;
        }
        y += step;
    }
}
