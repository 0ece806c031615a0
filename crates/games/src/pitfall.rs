//! Side-scrolling pit runner.
//!
//! The world is simulated at quarter resolution (200x150) and drawn with
//! every logical pixel as a 4x4 block. The runner stays at a fixed screen
//! column while the ground scrolls under them.

use tracing::{debug, info};

use crate::core::hud::draw_number;
use crate::core::sprites::{RUNNER, RUNNER_JUMP, RUNNER_STAND, RUNNER_WALK_1, RUNNER_WALK_2};
use crate::core::terrain::{Pit, PitField};
use crate::core::{Fx, PixelBuffer, SimpleRng, SoundQueue};
use crate::types::{
    Button, Channel, Color, Controls, Outcome, Sound, Status, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use crate::Game;

pub const SCALE: i32 = 4;
pub const WORLD_WIDTH: i32 = SCREEN_WIDTH / SCALE;
pub const WORLD_HEIGHT: i32 = SCREEN_HEIGHT / SCALE;
pub const GROUND_HEIGHT: i32 = 100;
pub const GROUND_Y: i32 = WORLD_HEIGHT - GROUND_HEIGHT;
pub const PLAYER_SIZE: i32 = 8;
pub const PLAYER_X: i32 = SCREEN_WIDTH / (2 * SCALE) - PLAYER_SIZE / 2;

pub const ACCEL: Fx = Fx::from_ratio(1, 5);
pub const MAX_SPEED: Fx = Fx::from_int(3);
pub const FRICTION: Fx = Fx::from_ratio(4, 5);
pub const GRAVITY: Fx = Fx::from_ratio(3, 10);
pub const JUMP_VELOCITY: Fx = Fx::from_int(-6);
/// Ticks between walk cycle frames.
pub const WALK_FRAME_TICKS: u64 = 10;

const EVENT_CHANNEL: Channel = Channel(2);

#[derive(Debug, Clone)]
pub struct Pitfall {
    rng: SimpleRng,
    pits: PitField,
    y: Fx,
    vx: Fx,
    vy: Fx,
    /// Set by a jump, cleared by landing on ground. Walking off a pit edge
    /// leaves it alone, so one jump is still available while falling.
    jumping: bool,
    sprite: usize,
    world_offset: i32,
    best_offset: i32,
    status: Status,
    frame: u64,
}

impl Pitfall {
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let pits = PitField::generate(&mut rng);
        Self::from_parts(rng, pits)
    }

    pub fn with_pits(seed: u32, pits: Vec<Pit>) -> Self {
        Self::from_parts(SimpleRng::new(seed), PitField::from_pits(pits))
    }

    fn from_parts(rng: SimpleRng, pits: PitField) -> Self {
        Self {
            rng,
            pits,
            y: Fx::from_int(GROUND_Y - PLAYER_SIZE),
            vx: Fx::ZERO,
            vy: Fx::ZERO,
            jumping: false,
            sprite: RUNNER_STAND,
            world_offset: 0,
            best_offset: 0,
            status: Status::Running,
            frame: 0,
        }
    }

    pub fn pits(&self) -> &[Pit] {
        self.pits.pits()
    }

    pub fn world_offset(&self) -> i32 {
        self.world_offset
    }

    pub fn y(&self) -> Fx {
        self.y
    }

    pub fn velocity(&self) -> (Fx, Fx) {
        (self.vx, self.vy)
    }

    pub fn jumping(&self) -> bool {
        self.jumping
    }

    /// Index into [`RUNNER`] of the frame being shown.
    pub fn sprite(&self) -> usize {
        self.sprite
    }

    fn run(&mut self, controls: Controls) {
        if controls.is_held(Button::Left) {
            self.vx = (self.vx - ACCEL).max(-MAX_SPEED);
        } else if controls.is_held(Button::Right) {
            self.vx = (self.vx + ACCEL).min(MAX_SPEED);
        } else {
            self.vx = self.vx.mul(FRICTION);
        }

        if controls.is_held(Button::Fire) && !self.jumping {
            self.vy = JUMP_VELOCITY;
            self.jumping = true;
        }
    }

    fn fall(&mut self, sfx: &mut SoundQueue) {
        self.vy += GRAVITY;
        self.y += self.vy;
        self.world_offset += self.vx.trunc();
        self.best_offset = self.best_offset.max(self.world_offset);

        if self.pits.covers(PLAYER_X, PLAYER_SIZE, self.world_offset) {
            if self.y > Fx::from_int(WORLD_HEIGHT) {
                self.status = Status::Over(Outcome::FellInPit);
                sfx.play(EVENT_CHANNEL, Sound::Crash);
                info!(distance = self.best_offset, "runner fell into a pit");
            }
        } else if self.y + Fx::from_int(PLAYER_SIZE) > Fx::from_int(GROUND_Y) {
            self.y = Fx::from_int(GROUND_Y - PLAYER_SIZE);
            self.vy = Fx::ZERO;
            self.jumping = false;
        }

        let moved = self.pits.recycle(&mut self.rng, self.world_offset, WORLD_WIDTH);
        if moved > 0 {
            debug!(moved, offset = self.world_offset, "pits recycled");
        }
    }

    fn animate(&mut self) {
        if self.jumping {
            self.sprite = RUNNER_JUMP;
        } else if self.vx == Fx::ZERO {
            self.sprite = RUNNER_STAND;
        } else if self.frame % WALK_FRAME_TICKS == 0 {
            self.sprite = if self.sprite == RUNNER_WALK_1 {
                RUNNER_WALK_2
            } else {
                RUNNER_WALK_1
            };
        }
    }
}

impl Game for Pitfall {
    fn title(&self) -> &'static str {
        "PITFALL"
    }

    fn help(&self) -> &'static str {
        "←/→ run  SPACE jump  q quit"
    }

    fn tick(&mut self, controls: Controls, sfx: &mut SoundQueue) -> Status {
        if self.status.is_over() {
            return self.status;
        }
        self.frame += 1;
        self.run(controls);
        self.fall(sfx);
        self.animate();
        self.status
    }

    fn render(&self, pb: &mut PixelBuffer) {
        pb.clear(Color::BLACK);

        for col in 0..WORLD_WIDTH {
            if !self.pits.covers(col, 1, self.world_offset) {
                pb.fill_rect(
                    col * SCALE,
                    GROUND_Y * SCALE,
                    SCALE,
                    GROUND_HEIGHT * SCALE,
                    Color::GREEN,
                );
            }
        }

        pb.draw_sprite_scaled(
            PLAYER_X,
            self.y.trunc(),
            &RUNNER[self.sprite],
            SCALE,
            Color::WHITE,
        );
        draw_number(pb, 10, 10, self.world_offset.max(0) as u32, Color::WHITE);
    }

    /// Farthest distance reached.
    fn score(&self) -> u32 {
        self.best_offset.max(0) as u32
    }

    fn frames(&self) -> u64 {
        self.frame
    }

    fn status(&self) -> Status {
        self.status
    }
}
