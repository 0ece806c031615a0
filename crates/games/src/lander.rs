//! Lunar lander.
//!
//! Steer with Left/Right, burn with Fire. Touch down on the flat pad slower
//! than 1 px/tick to land; anything else is a crash.

use tracing::info;

use crate::core::hud::{draw_number, FuelGauge};
use crate::core::sprites::{FLAME, LANDER};
use crate::core::terrain::LanderTerrain;
use crate::core::{Fx, LoopVoice, PixelBuffer, SimpleRng, SoundQueue};
use crate::types::{
    Button, Channel, Color, Controls, Outcome, Sound, Status, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use crate::Game;

pub const GRAVITY: Fx = Fx::from_ratio(1, 10);
pub const THRUST: Fx = Fx::from_ratio(1, 5);
pub const MAX_LANDING_SPEED: Fx = Fx::ONE;
pub const FUEL_MAX: Fx = Fx::from_int(100);
pub const FUEL_BURN: Fx = Fx::from_ratio(4, 5);
pub const LANDING_BONUS: u32 = 50;

const SHIP_SIZE: i32 = 8;
const START_Y: i32 = 50;
const THRUSTER_CHANNEL: Channel = Channel(1);
const EVENT_CHANNEL: Channel = Channel(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Flying,
    Landed,
    Crashed,
}

#[derive(Debug, Clone)]
pub struct Lander {
    terrain: LanderTerrain,
    x: Fx,
    y: Fx,
    vx: Fx,
    vy: Fx,
    fuel: Fx,
    score: u32,
    phase: Phase,
    burning: bool,
    thruster: LoopVoice,
    frame: u64,
}

impl Lander {
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let terrain = LanderTerrain::generate(&mut rng, SCREEN_WIDTH, SCREEN_HEIGHT);
        Self::with_terrain(terrain)
    }

    pub fn with_terrain(terrain: LanderTerrain) -> Self {
        Self {
            terrain,
            x: Fx::from_int(SCREEN_WIDTH / 2),
            y: Fx::from_int(START_Y),
            vx: Fx::ZERO,
            vy: Fx::ZERO,
            fuel: FUEL_MAX,
            score: 0,
            phase: Phase::Flying,
            burning: false,
            thruster: LoopVoice::new(THRUSTER_CHANNEL, Sound::Thruster),
            frame: 0,
        }
    }

    pub fn terrain(&self) -> &LanderTerrain {
        &self.terrain
    }

    pub fn position(&self) -> (Fx, Fx) {
        (self.x, self.y)
    }

    pub fn velocity(&self) -> (Fx, Fx) {
        (self.vx, self.vy)
    }

    pub fn fuel(&self) -> Fx {
        self.fuel
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Place the lander, e.g. to set up a touchdown in tests.
    pub fn set_state(&mut self, x: Fx, y: Fx, vx: Fx, vy: Fx) {
        self.x = x;
        self.y = y;
        self.vx = vx;
        self.vy = vy;
    }

    pub fn set_fuel(&mut self, fuel: Fx) {
        self.fuel = fuel.clamp(Fx::ZERO, FUEL_MAX);
    }

    fn apply_controls(&mut self, controls: Controls, sfx: &mut SoundQueue) {
        let mut thrusting = false;
        self.burning = false;

        if controls.is_held(Button::Left) {
            self.vx -= THRUST;
            thrusting = true;
        }
        if controls.is_held(Button::Right) {
            self.vx += THRUST;
            thrusting = true;
        }
        if controls.is_held(Button::Fire) && self.fuel.is_positive() {
            self.vy -= THRUST;
            self.fuel = (self.fuel - FUEL_BURN).max(Fx::ZERO);
            thrusting = true;
            self.burning = true;
        }

        self.thruster.update(thrusting, self.fuel.is_positive(), sfx);
    }

    fn integrate(&mut self) {
        self.vy += GRAVITY;
        self.x += self.vx;
        self.y += self.vy;
        self.x = self.x.clamp(Fx::ZERO, Fx::from_int(SCREEN_WIDTH - SHIP_SIZE));
    }

    fn check_touchdown(&mut self, sfx: &mut SoundQueue) {
        let bottom = self.y.trunc() + SHIP_SIZE;
        let left = self.x.trunc();
        let right = left + SHIP_SIZE;
        let ground_left = self.terrain.height_at(left);
        if bottom < ground_left && bottom < self.terrain.height_at(right) {
            return;
        }

        self.y = Fx::from_int(ground_left - SHIP_SIZE);
        self.burning = false;
        self.thruster.silence(sfx);

        if self.vy > MAX_LANDING_SPEED || !self.terrain.is_on_pad(left, right) {
            self.phase = Phase::Crashed;
            sfx.play(EVENT_CHANNEL, Sound::Crash);
            info!(x = left, vy = self.vy.raw(), score = self.score, "lander crashed");
        } else {
            self.phase = Phase::Landed;
            self.score += LANDING_BONUS;
            sfx.play(EVENT_CHANNEL, Sound::Land);
            info!(x = left, vy = self.vy.raw(), score = self.score, "lander landed");
        }
    }

    fn ship_color(&self) -> Color {
        match self.phase {
            Phase::Flying => Color::YELLOW,
            Phase::Landed => Color::GREEN,
            Phase::Crashed => Color::RED,
        }
    }
}

impl Game for Lander {
    fn title(&self) -> &'static str {
        "LUNAR LANDER"
    }

    fn help(&self) -> &'static str {
        "←/→ steer  SPACE thrust  q quit"
    }

    fn tick(&mut self, controls: Controls, sfx: &mut SoundQueue) -> Status {
        if self.phase != Phase::Flying {
            return self.status();
        }
        self.apply_controls(controls, sfx);
        self.integrate();
        self.check_touchdown(sfx);
        self.frame += 1;
        self.status()
    }

    fn render(&self, pb: &mut PixelBuffer) {
        pb.clear(Color::BLACK);

        for (x, &h) in self.terrain.heights().iter().enumerate() {
            pb.fill_column(x as i32, h, pb.height(), Color::GRAY);
        }

        let (sx, sy) = (self.x.trunc(), self.y.trunc());
        pb.draw_sprite(sx, sy, &LANDER, self.ship_color());
        if self.burning && self.frame % 8 < 4 {
            pb.draw_sprite(sx + 2, sy + SHIP_SIZE, &FLAME, Color::ORANGE);
        }

        draw_number(pb, 10, 10, self.score, Color::WHITE);
        FuelGauge::new(10, 50, Color::GREEN).draw(pb, self.fuel);
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn frames(&self) -> u64 {
        self.frame
    }

    fn status(&self) -> Status {
        match self.phase {
            Phase::Flying => Status::Running,
            Phase::Landed => Status::Over(Outcome::Landed),
            Phase::Crashed => Status::Over(Outcome::Crashed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::terrain::{PAD_LEFT, PAD_RIGHT};

    #[test]
    fn free_fall_accelerates_by_gravity() {
        let mut game = Lander::new(1);
        let mut sfx = SoundQueue::new();
        game.tick(Controls::NONE, &mut sfx);
        game.tick(Controls::NONE, &mut sfx);
        let (_, vy) = game.velocity();
        assert_eq!(vy, GRAVITY + GRAVITY);
        assert!(sfx.is_empty());
    }

    #[test]
    fn burning_consumes_fuel_and_starts_thruster() {
        let mut game = Lander::new(1);
        let mut sfx = SoundQueue::new();
        game.tick(Controls::NONE.with_held(Button::Fire), &mut sfx);
        assert_eq!(game.fuel(), FUEL_MAX - FUEL_BURN);
        assert_eq!(game.velocity().1, GRAVITY - THRUST);
        assert_eq!(sfx.len(), 1);
    }

    #[test]
    fn side_thrust_is_free() {
        let mut game = Lander::new(1);
        let mut sfx = SoundQueue::new();
        game.tick(Controls::NONE.with_held(Button::Left), &mut sfx);
        assert_eq!(game.velocity().0, -THRUST);
        assert_eq!(game.fuel(), FUEL_MAX);

        game.tick(Controls::NONE.with_held(Button::Right), &mut sfx);
        game.tick(Controls::NONE.with_held(Button::Right), &mut sfx);
        assert_eq!(game.velocity().0, THRUST);
        assert_eq!(game.fuel(), FUEL_MAX);
    }

    #[test]
    fn fuel_never_goes_negative() {
        let mut game = Lander::new(1);
        game.set_fuel(Fx::from_ratio(1, 2));
        let mut sfx = SoundQueue::new();
        game.tick(Controls::NONE.with_held(Button::Fire), &mut sfx);
        assert_eq!(game.fuel(), Fx::ZERO);
        let vy = game.velocity().1;
        game.tick(Controls::NONE.with_held(Button::Fire), &mut sfx);
        assert_eq!(game.velocity().1, vy + GRAVITY);
    }

    #[test]
    fn slow_touchdown_on_pad_lands() {
        let mut game = Lander::new(1);
        let ground = game.terrain().height_at(PAD_LEFT);
        game.set_state(
            Fx::from_int(PAD_LEFT + 10),
            Fx::from_int(ground - 8),
            Fx::ZERO,
            Fx::from_ratio(1, 2),
        );
        let mut sfx = SoundQueue::new();
        let status = game.tick(Controls::NONE, &mut sfx);
        assert_eq!(status, Status::Over(Outcome::Landed));
        assert_eq!(game.score(), LANDING_BONUS);
        assert_eq!(game.position().1, Fx::from_int(ground - 8));
    }

    #[test]
    fn fast_touchdown_crashes() {
        let mut game = Lander::new(1);
        let ground = game.terrain().height_at(PAD_LEFT);
        game.set_state(
            Fx::from_int(PAD_LEFT + 10),
            Fx::from_int(ground - 10),
            Fx::ZERO,
            Fx::from_int(2),
        );
        let mut sfx = SoundQueue::new();
        assert_eq!(
            game.tick(Controls::NONE, &mut sfx),
            Status::Over(Outcome::Crashed)
        );
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn straddling_the_pad_edge_crashes() {
        let mut game = Lander::new(1);
        let ground = game.terrain().height_at(PAD_RIGHT);
        game.set_state(
            Fx::from_int(PAD_RIGHT - 4),
            Fx::from_int(ground - 8),
            Fx::ZERO,
            Fx::ZERO,
        );
        let mut sfx = SoundQueue::new();
        assert_eq!(
            game.tick(Controls::NONE, &mut sfx),
            Status::Over(Outcome::Crashed)
        );
    }

    #[test]
    fn ticks_after_the_end_change_nothing() {
        let mut game = Lander::new(1);
        let ground = game.terrain().height_at(PAD_LEFT);
        game.set_state(
            Fx::from_int(PAD_LEFT),
            Fx::from_int(ground - 8),
            Fx::ZERO,
            Fx::ZERO,
        );
        let mut sfx = SoundQueue::new();
        let status = game.tick(Controls::NONE, &mut sfx);
        let pos = game.position();
        assert_eq!(game.tick(Controls::NONE.with_held(Button::Fire), &mut sfx), status);
        assert_eq!(game.position(), pos);
    }

    #[test]
    fn horizontal_position_is_clamped() {
        let mut game = Lander::new(1);
        game.set_state(Fx::from_int(1), Fx::from_int(50), Fx::from_int(-5), Fx::ZERO);
        let mut sfx = SoundQueue::new();
        game.tick(Controls::NONE, &mut sfx);
        assert_eq!(game.position().0, Fx::ZERO);
    }
}
