//! Space invaders.
//!
//! A row of five invaders sweeps the screen, dropping a line at every edge.
//! The cannon slides with a sticky velocity set by the last Left/Right press
//! and fires on Fire presses. Missiles travel 50 px a tick and are tested at
//! every pixel along the way.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::core::collision::{sweep_point_y, Rect};
use crate::core::hud::draw_number;
use crate::core::sprites::{CANNON, INVADER, MISSILE};
use crate::core::{PixelBuffer, SoundQueue};
use crate::types::{
    Button, Channel, Color, Controls, Outcome, Sound, Status, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use crate::Game;

pub const MISSILE_POOL: usize = 100;
pub const MISSILE_SPEED: i32 = 50;
pub const CANNON_SPEED: i32 = 5;
pub const INVADER_COUNT: usize = 5;
pub const INVADER_SPEED: i32 = 2;
pub const INVADER_DROP: i32 = 8;
pub const ALIEN_FIRE_MS: u32 = 2000;
pub const KILL_SCORE: u32 = 10;

const SIZE: i32 = 8;
const EVENT_CHANNEL: Channel = Channel(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Friendly,
    Hostile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Missile {
    pub x: i32,
    pub y: i32,
    pub side: Side,
}

impl Missile {
    fn step(&self) -> i32 {
        match self.side {
            Side::Friendly => -MISSILE_SPEED,
            Side::Hostile => MISSILE_SPEED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invader {
    pub x: i32,
    pub y: i32,
    pub vx: i32,
    pub alive: bool,
}

impl Invader {
    fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            vx: INVADER_SPEED,
            alive: true,
        }
    }

    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, SIZE, SIZE)
    }

    fn advance(&mut self) {
        self.x += self.vx;
        if self.x + SIZE > SCREEN_WIDTH {
            self.x = SCREEN_WIDTH - SIZE;
            self.vx = -INVADER_SPEED;
            self.y += INVADER_DROP;
        } else if self.x < 0 {
            self.x = 0;
            self.vx = INVADER_SPEED;
            self.y += INVADER_DROP;
        }
    }
}

#[derive(Debug, Clone)]
pub struct Invaders {
    cannon_x: i32,
    cannon_y: i32,
    cannon_vx: i32,
    cannon_alive: bool,
    invaders: ArrayVec<Invader, INVADER_COUNT>,
    missiles: ArrayVec<Missile, MISSILE_POOL>,
    tick_ms: u32,
    since_alien_shot_ms: u32,
    score: u32,
    status: Status,
    frame: u64,
}

impl Invaders {
    pub fn new(tick_ms: u32) -> Self {
        Self::with_invaders(&[(100, 50), (200, 50), (300, 50), (400, 50), (500, 50)], tick_ms)
    }

    /// Custom formation; extra entries beyond five are ignored.
    pub fn with_invaders(positions: &[(i32, i32)], tick_ms: u32) -> Self {
        let invaders = positions
            .iter()
            .take(INVADER_COUNT)
            .map(|&(x, y)| Invader::new(x, y))
            .collect();
        Self {
            cannon_x: SCREEN_WIDTH / 2 - SIZE / 2,
            cannon_y: SCREEN_HEIGHT - 16,
            cannon_vx: 0,
            cannon_alive: true,
            invaders,
            missiles: ArrayVec::new(),
            tick_ms,
            since_alien_shot_ms: 0,
            score: 0,
            status: Status::Running,
            frame: 0,
        }
    }

    pub fn cannon(&self) -> (i32, i32) {
        (self.cannon_x, self.cannon_y)
    }

    pub fn cannon_alive(&self) -> bool {
        self.cannon_alive
    }

    pub fn set_cannon_x(&mut self, x: i32) {
        self.cannon_x = x.clamp(0, SCREEN_WIDTH - SIZE);
    }

    pub fn invaders(&self) -> &[Invader] {
        &self.invaders
    }

    pub fn missiles(&self) -> &[Missile] {
        &self.missiles
    }

    pub fn alive_count(&self) -> usize {
        self.invaders.iter().filter(|i| i.alive).count()
    }

    fn spawn(&mut self, missile: Missile) {
        if self.missiles.try_push(missile).is_err() {
            debug!("missile pool full");
        }
    }

    fn update_cannon(&mut self, controls: Controls) {
        if !self.cannon_alive {
            return;
        }
        if controls.was_pressed(Button::Left) {
            self.cannon_vx = -CANNON_SPEED;
        }
        if controls.was_pressed(Button::Right) {
            self.cannon_vx = CANNON_SPEED;
        }
        if controls.was_pressed(Button::Fire) {
            self.spawn(Missile {
                x: self.cannon_x + 2,
                y: self.cannon_y - 4,
                side: Side::Friendly,
            });
        }
        self.cannon_x = (self.cannon_x + self.cannon_vx).clamp(0, SCREEN_WIDTH - SIZE);
    }

    fn update_invaders(&mut self, sfx: &mut SoundQueue) {
        for inv in self.invaders.iter_mut().filter(|i| i.alive) {
            inv.advance();
            if inv.y >= SCREEN_HEIGHT - SIZE && self.cannon_alive {
                self.cannon_alive = false;
                sfx.play(EVENT_CHANNEL, Sound::Crash);
                info!(y = inv.y, "invaders reached the ground");
            }
        }
    }

    fn alien_fire(&mut self) {
        self.since_alien_shot_ms += self.tick_ms;
        if self.since_alien_shot_ms < ALIEN_FIRE_MS {
            return;
        }
        self.since_alien_shot_ms = 0;
        if let Some(shooter) = self.invaders.iter().find(|i| i.alive).copied() {
            self.spawn(Missile {
                x: shooter.x + 2,
                y: shooter.y + SIZE,
                side: Side::Hostile,
            });
        }
    }

    fn update_missiles(&mut self, sfx: &mut SoundQueue) {
        let mut missiles = std::mem::take(&mut self.missiles);
        missiles.retain(|m| {
            let to_y = m.y + m.step();
            let hit = match m.side {
                Side::Friendly => self.hit_invader(m.x, m.y, to_y),
                Side::Hostile => self.hit_cannon(m.x, m.y, to_y, sfx),
            };
            m.y = to_y;
            !hit && (0..SCREEN_HEIGHT).contains(&to_y)
        });
        self.missiles = missiles;
    }

    fn hit_cannon(&mut self, x: i32, from_y: i32, to_y: i32, sfx: &mut SoundQueue) -> bool {
        let cannon = Rect::new(self.cannon_x, self.cannon_y, SIZE, SIZE);
        if !self.cannon_alive || sweep_point_y(x, from_y, to_y, &cannon).is_none() {
            return false;
        }
        self.cannon_alive = false;
        sfx.play(EVENT_CHANNEL, Sound::Crash);
        info!(x = self.cannon_x, "cannon destroyed");
        true
    }

    /// Kill the invader a friendly missile meets first along its path.
    fn hit_invader(&mut self, x: i32, from_y: i32, to_y: i32) -> bool {
        let first = self
            .invaders
            .iter()
            .enumerate()
            .filter(|(_, inv)| inv.alive)
            .filter_map(|(idx, inv)| {
                sweep_point_y(x, from_y, to_y, &inv.rect()).map(|y| ((from_y - y).abs(), idx))
            })
            .min();
        let Some((_, idx)) = first else {
            return false;
        };
        self.invaders[idx].alive = false;
        self.score += KILL_SCORE;
        debug!(invader = idx, score = self.score, "invader destroyed");
        true
    }

    fn settle(&mut self) {
        self.status = if self.alive_count() == 0 {
            info!(score = self.score, "all invaders destroyed");
            Status::Over(Outcome::Won)
        } else if !self.cannon_alive {
            Status::Over(Outcome::Lost)
        } else {
            Status::Running
        };
    }
}

impl Game for Invaders {
    fn title(&self) -> &'static str {
        "SPACE INVADERS"
    }

    fn help(&self) -> &'static str {
        "←/→ move  SPACE fire  q quit"
    }

    fn tick(&mut self, controls: Controls, sfx: &mut SoundQueue) -> Status {
        if self.status.is_over() {
            return self.status;
        }
        self.update_cannon(controls);
        self.update_invaders(sfx);
        self.alien_fire();
        self.update_missiles(sfx);
        self.settle();
        self.frame += 1;
        self.status
    }

    fn render(&self, pb: &mut PixelBuffer) {
        pb.clear(Color::BLACK);
        for inv in self.invaders.iter().filter(|i| i.alive) {
            pb.draw_sprite(inv.x, inv.y, &INVADER, Color::GREEN);
        }
        for m in &self.missiles {
            let color = match m.side {
                Side::Friendly => Color::YELLOW,
                Side::Hostile => Color::RED,
            };
            pb.draw_sprite(m.x, m.y, &MISSILE, color);
        }
        if self.cannon_alive {
            pb.draw_sprite(self.cannon_x, self.cannon_y, &CANNON, Color::BLUE);
        }
        draw_number(pb, 10, 10, self.score, Color::WHITE);
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn frames(&self) -> u64 {
        self.frame
    }

    fn status(&self) -> Status {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SoundCue, TICK_MS};

    fn fire() -> Controls {
        Controls::NONE.with_pressed(Button::Fire)
    }

    #[test]
    fn cannon_velocity_is_sticky() {
        let mut game = Invaders::new(TICK_MS);
        let mut sfx = SoundQueue::new();
        let (x0, _) = game.cannon();
        game.tick(Controls::NONE.with_pressed(Button::Left), &mut sfx);
        game.tick(Controls::NONE, &mut sfx);
        assert_eq!(game.cannon().0, x0 - 2 * CANNON_SPEED);
        game.tick(Controls::NONE.with_pressed(Button::Right), &mut sfx);
        assert_eq!(game.cannon().0, x0 - CANNON_SPEED);
    }

    #[test]
    fn invader_reaching_the_ground_loses() {
        let mut sfx = SoundQueue::new();
        let mut game = Invaders::with_invaders(&[(100, SCREEN_HEIGHT - SIZE - 1)], TICK_MS);
        assert_eq!(game.tick(Controls::NONE, &mut sfx), Status::Running);
        assert!(game.cannon_alive());

        // Bouncing off the right edge drops it into the cannon row.
        let edge = SCREEN_WIDTH - SIZE;
        let mut game = Invaders::with_invaders(&[(edge, SCREEN_HEIGHT - SIZE - 1)], TICK_MS);
        assert_eq!(
            game.tick(Controls::NONE, &mut sfx),
            Status::Over(Outcome::Lost)
        );
        assert!(!game.cannon_alive());
        assert!(sfx.as_slice().contains(&SoundCue::Play {
            channel: EVENT_CHANNEL,
            sound: Sound::Crash,
            looped: false,
        }));
    }

    #[test]
    fn holding_fire_shoots_once() {
        let mut game = Invaders::new(TICK_MS);
        let mut sfx = SoundQueue::new();
        game.tick(fire(), &mut sfx);
        game.tick(Controls::NONE.with_held(Button::Fire), &mut sfx);
        let friendly = game
            .missiles()
            .iter()
            .filter(|m| m.side == Side::Friendly)
            .count();
        assert_eq!(friendly, 1);
    }

    #[test]
    fn invaders_bounce_and_drop_at_edges() {
        let mut game = Invaders::with_invaders(&[(SCREEN_WIDTH - 9, 50)], TICK_MS);
        let mut sfx = SoundQueue::new();
        game.tick(Controls::NONE, &mut sfx);
        let inv = game.invaders()[0];
        assert_eq!(inv.x, SCREEN_WIDTH - 8);
        assert_eq!(inv.y, 58);
        assert_eq!(inv.vx, -INVADER_SPEED);
    }

    #[test]
    fn fast_missile_cannot_skip_an_invader() {
        // The invader sits between two 50 px samples of the missile.
        let mut game = Invaders::with_invaders(&[(402, 540), (100, 50)], TICK_MS);
        game.set_cannon_x(400);
        let mut sfx = SoundQueue::new();
        // Missile spawns at x=402, y=580 and moves to y=530 in one tick; the
        // invader moves to x=404 first, so x=402 is outside it.
        game.tick(fire(), &mut sfx);
        assert_eq!(game.alive_count(), 2);

        let mut game = Invaders::with_invaders(&[(400, 540), (100, 50)], TICK_MS);
        game.set_cannon_x(400);
        game.tick(fire(), &mut sfx);
        assert_eq!(game.alive_count(), 1);
        assert_eq!(game.score(), KILL_SCORE);
        assert!(game.missiles().iter().all(|m| m.side != Side::Friendly));
    }

    #[test]
    fn killing_the_last_invader_wins() {
        let mut game = Invaders::with_invaders(&[(400, 540)], TICK_MS);
        game.set_cannon_x(400);
        let mut sfx = SoundQueue::new();
        assert_eq!(game.tick(fire(), &mut sfx), Status::Over(Outcome::Won));
        assert_eq!(game.tick(fire(), &mut sfx), Status::Over(Outcome::Won));
        assert_eq!(game.frames(), 1);
    }

    #[test]
    fn aliens_fire_every_two_seconds() {
        let mut game = Invaders::new(TICK_MS);
        let mut sfx = SoundQueue::new();
        let ticks = ALIEN_FIRE_MS / TICK_MS;
        for _ in 0..ticks - 1 {
            game.tick(Controls::NONE, &mut sfx);
        }
        assert!(game.missiles().is_empty());
        game.tick(Controls::NONE, &mut sfx);
        assert_eq!(game.missiles().len(), 1);
        assert_eq!(game.missiles()[0].side, Side::Hostile);
    }

    #[test]
    fn hostile_missile_kills_cannon() {
        let mut game = Invaders::with_invaders(&[(300, 500)], 1000);
        game.set_cannon_x(300);
        let mut sfx = SoundQueue::new();
        let mut status = Status::Running;
        for _ in 0..4 {
            status = game.tick(Controls::NONE, &mut sfx);
        }
        assert_eq!(status, Status::Over(Outcome::Lost));
        assert!(!game.cannon_alive());
        assert!(sfx
            .as_slice()
            .iter()
            .any(|c| matches!(c, crate::types::SoundCue::Play { sound: Sound::Crash, .. })));
    }

    #[test]
    fn missiles_leaving_the_screen_are_retired() {
        let mut game = Invaders::with_invaders(&[(10, 50)], TICK_MS);
        let mut sfx = SoundQueue::new();
        game.tick(fire(), &mut sfx);
        for _ in 0..12 {
            game.tick(Controls::NONE, &mut sfx);
        }
        assert!(game.missiles().iter().all(|m| m.side != Side::Friendly));
    }
}
