//! Procedural terrain: the lander's ground line, the cave tunnel loop, the
//! runner's pits and the cave's fuel pods.
//!
//! All generators draw from a [`SimpleRng`] so a seed always produces the same
//! world.

use crate::collision::Rect;
use crate::rng::SimpleRng;

// ---------------------------------------------------------------------------
// Lander
// ---------------------------------------------------------------------------

/// First column of the lander's landing pad.
pub const PAD_LEFT: i32 = 300;
/// Last column of the landing pad (inclusive).
pub const PAD_RIGHT: i32 = 340;
/// Ground level above the bottom edge of the screen.
pub const GROUND_MARGIN: i32 = 50;
/// Maximum height of the random bumps outside the pad.
pub const GROUND_JAG: u32 = 30;

/// One ground height per screen column. Smaller y is higher ground.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanderTerrain {
    heights: Vec<i32>,
}

impl LanderTerrain {
    pub fn generate(rng: &mut SimpleRng, width: i32, screen_height: i32) -> Self {
        let base = screen_height - GROUND_MARGIN;
        let heights = (0..width.max(1))
            .map(|x| {
                if (PAD_LEFT..=PAD_RIGHT).contains(&x) {
                    base
                } else {
                    base - rng.next_range(GROUND_JAG) as i32
                }
            })
            .collect();
        Self { heights }
    }

    pub fn width(&self) -> i32 {
        self.heights.len() as i32
    }

    /// Ground height at column `x`, clamping the column into range.
    pub fn height_at(&self, x: i32) -> i32 {
        let i = x.clamp(0, self.width() - 1) as usize;
        self.heights[i]
    }

    /// True when the span `left..=right` sits entirely on the pad.
    pub fn is_on_pad(&self, left: i32, right: i32) -> bool {
        left >= PAD_LEFT && right <= PAD_RIGHT
    }

    pub fn heights(&self) -> &[i32] {
        &self.heights
    }
}

// ---------------------------------------------------------------------------
// Cave
// ---------------------------------------------------------------------------

/// Length of the cave loop in columns (ten screens).
pub const CAVE_WIDTH: i32 = 8000;
/// Per-column random walk of both walls.
pub const CAVE_WALK: i32 = 10;
/// Columns per segment; each segment opens with a chamber of fixed gap.
pub const CAVE_SEGMENT: i32 = 200;
/// Width of the chamber at the start of each segment.
pub const CAVE_CHAMBER: i32 = 40;
/// Narrowest allowed tunnel.
pub const CAVE_MIN_GAP: i32 = 150;
/// Walls keep at least this far from the screen edges and the center line.
pub const CAVE_WALL_MARGIN: i32 = 50;
/// Columns blended back toward the start so the loop closes smoothly.
pub const CAVE_SEAM_BLEND: i32 = 50;

/// Top and bottom walls of a looping tunnel.
///
/// Column `x` is open between `top_at(x)` (exclusive of the rock above) and
/// `bottom_at(x)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaveTerrain {
    top: Vec<i32>,
    bottom: Vec<i32>,
}

impl CaveTerrain {
    pub fn generate(rng: &mut SimpleRng, width: i32, screen_height: i32) -> Self {
        let width = width.max(CAVE_SEAM_BLEND + 1);
        let h = screen_height;
        let start_top = h / 3;
        let start_bottom = h - h / 3;

        let top_range = (CAVE_WALL_MARGIN, h / 2 - CAVE_WALL_MARGIN);
        let bottom_range = (h / 2 + CAVE_WALL_MARGIN, h - CAVE_WALL_MARGIN);

        let mut top = Vec::with_capacity(width as usize);
        let mut bottom = Vec::with_capacity(width as usize);
        let mut last_top = start_top;
        let mut last_bottom = start_bottom;
        let mut chamber_gap = CAVE_MIN_GAP;

        for x in 0..width {
            last_top += rng.next_signed(CAVE_WALK);
            last_bottom += rng.next_signed(CAVE_WALK);

            if x % CAVE_SEGMENT == 0 {
                chamber_gap = if rng.coin_flip() {
                    150 + rng.next_range(51) as i32
                } else {
                    300 + rng.next_range(101) as i32
                };
            }
            if x % CAVE_SEGMENT < CAVE_CHAMBER {
                last_bottom = last_top + chamber_gap;
            }

            last_top = last_top.clamp(top_range.0, top_range.1);
            last_bottom = last_bottom.clamp(bottom_range.0, bottom_range.1);
            if last_bottom - last_top < CAVE_MIN_GAP {
                last_bottom = last_top + CAVE_MIN_GAP;
            }

            top.push(last_top);
            bottom.push(last_bottom);
        }

        let last = (width - 1) as usize;
        top[last] = start_top;
        bottom[last] = start_bottom;

        let seam = width - CAVE_SEAM_BLEND;
        for x in seam..width {
            let k = x - seam;
            let i = x as usize;
            top[i] = (top[i] * (CAVE_SEAM_BLEND - k) + start_top * k) / CAVE_SEAM_BLEND;
            bottom[i] = (bottom[i] * (CAVE_SEAM_BLEND - k) + start_bottom * k) / CAVE_SEAM_BLEND;
        }

        Self { top, bottom }
    }

    /// Build a cave from explicit walls. `None` when the walls are empty or
    /// differ in length.
    pub fn from_walls(top: Vec<i32>, bottom: Vec<i32>) -> Option<Self> {
        if top.is_empty() || top.len() != bottom.len() {
            return None;
        }
        Some(Self { top, bottom })
    }

    pub fn width(&self) -> i32 {
        self.top.len() as i32
    }

    #[inline(always)]
    fn wrap(&self, x: i32) -> usize {
        x.rem_euclid(self.width()) as usize
    }

    pub fn top_at(&self, x: i32) -> i32 {
        self.top[self.wrap(x)]
    }

    pub fn bottom_at(&self, x: i32) -> i32 {
        self.bottom[self.wrap(x)]
    }

    /// True when a body spanning `y..y + h` at column `x` touches rock.
    pub fn hits(&self, x: i32, y: i32, h: i32) -> bool {
        y < self.top_at(x) || y + h > self.bottom_at(x)
    }
}

// ---------------------------------------------------------------------------
// Pits
// ---------------------------------------------------------------------------

pub const MAX_PITS: usize = 10;
/// World x of the first pit.
pub const PIT_FIRST_X: i32 = 800;
pub const PIT_SPACING: i32 = 400;
pub const PIT_SPACING_JITTER: u32 = 200;
pub const PIT_MIN_WIDTH: i32 = 50;
pub const PIT_WIDTH_JITTER: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pit {
    /// Left edge in world units.
    pub x: i32,
    pub width: i32,
}

/// Pits along the runner's ground, in scaled world units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PitField {
    pits: Vec<Pit>,
}

impl PitField {
    pub fn generate(rng: &mut SimpleRng) -> Self {
        let pits = (0..MAX_PITS as i32)
            .map(|i| {
                let spacing = PIT_SPACING + rng.next_range(PIT_SPACING_JITTER) as i32;
                Pit {
                    x: PIT_FIRST_X + i * spacing,
                    width: PIT_MIN_WIDTH + rng.next_range(PIT_WIDTH_JITTER) as i32,
                }
            })
            .collect();
        Self { pits }
    }

    pub fn from_pits(pits: Vec<Pit>) -> Self {
        Self { pits }
    }

    pub fn pits(&self) -> &[Pit] {
        &self.pits
    }

    /// True when the screen span `x..x + w` is over a pit once the world is
    /// scrolled by `offset`.
    pub fn covers(&self, x: i32, w: i32, offset: i32) -> bool {
        self.pits.iter().any(|p| {
            let px = p.x - offset;
            x + w > px && x < px + p.width
        })
    }

    /// Move pits that are more than `behind` units left of the view to after
    /// the farthest pit. Returns how many were moved.
    pub fn recycle(&mut self, rng: &mut SimpleRng, offset: i32, behind: i32) -> usize {
        let mut moved = 0;
        for i in 0..self.pits.len() {
            let p = self.pits[i];
            if p.x + p.width >= offset - behind {
                continue;
            }
            let farthest = self.pits.iter().map(|p| p.x).max().unwrap_or(offset);
            let spacing = PIT_SPACING + rng.next_range(PIT_SPACING_JITTER) as i32;
            self.pits[i] = Pit {
                x: farthest + spacing,
                width: PIT_MIN_WIDTH + rng.next_range(PIT_WIDTH_JITTER) as i32,
            };
            moved += 1;
        }
        moved
    }
}

// ---------------------------------------------------------------------------
// Fuel pods
// ---------------------------------------------------------------------------

pub const POD_COUNT: usize = 12;
pub const POD_SIZE: i32 = 4;
/// Fuel a pod restores, on the 0..=100 gauge scale.
pub const POD_FUEL: i32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuelPod {
    /// Cave column of the pod's left edge.
    pub x: i32,
    pub y: i32,
    pub armed: bool,
}

impl FuelPod {
    /// Screen-space box when the cave is scrolled by `scroll`, taking the
    /// shortest way around the loop.
    pub fn screen_rect(&self, scroll: i32, cave_width: i32) -> Rect {
        let mut sx = (self.x - scroll).rem_euclid(cave_width);
        if sx > cave_width / 2 {
            sx -= cave_width;
        }
        Rect::new(sx, self.y, POD_SIZE, POD_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuelPods {
    pods: Vec<FuelPod>,
}

impl FuelPods {
    /// Scatter `count` pods along the cave, centered in the tunnel.
    pub fn generate(rng: &mut SimpleRng, cave: &CaveTerrain, count: usize) -> Self {
        let pods = (0..count)
            .map(|_| {
                let x = rng.next_range(cave.width() as u32) as i32;
                let mid = (cave.top_at(x) + cave.bottom_at(x)) / 2;
                FuelPod {
                    x,
                    y: mid - POD_SIZE / 2,
                    armed: true,
                }
            })
            .collect();
        Self { pods }
    }

    pub fn from_pods(pods: Vec<FuelPod>) -> Self {
        Self { pods }
    }

    pub fn pods(&self) -> &[FuelPod] {
        &self.pods
    }

    pub fn armed_count(&self) -> usize {
        self.pods.iter().filter(|p| p.armed).count()
    }

    /// Disarm the first armed pod overlapping `body` and report it.
    pub fn collect(&mut self, body: &Rect, scroll: i32, cave_width: i32) -> bool {
        for pod in self.pods.iter_mut().filter(|p| p.armed) {
            if pod.screen_rect(scroll, cave_width).overlaps(body) {
                pod.armed = false;
                return true;
            }
        }
        false
    }

    pub fn rearm_all(&mut self) {
        for pod in &mut self.pods {
            pod.armed = true;
        }
    }
}
