//! Two-player cave flyer.
//!
//! A looping tunnel scrolls left at a constant speed. Each player steers a
//! ship against gravity and dies on touching rock. Fuel pods scattered in
//! the tunnel top the tanks up; they all come back each time the loop wraps.

use tracing::{debug, info};

use crate::core::hud::{draw_number, FuelGauge};
use crate::core::sprites::{FLAME, LANDER};
use crate::core::terrain::{CaveTerrain, FuelPods, CAVE_WIDTH, POD_COUNT, POD_FUEL, POD_SIZE};
use crate::core::{Fx, LoopVoice, PixelBuffer, Rect, SimpleRng, SoundQueue};
use crate::types::{
    Button, Channel, Color, Controls, Outcome, Sound, Status, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use crate::Game;

pub const SCROLL_PX_PER_SEC: i32 = 25;
pub const GRAVITY: Fx = Fx::from_ratio(1, 10);
pub const THRUST: Fx = Fx::from_ratio(1, 5);
pub const FUEL_MAX: Fx = Fx::from_int(100);
pub const FUEL_BURN: Fx = Fx::from_ratio(1, 50);
/// Lateral speed limit in px/s.
pub const MAX_DRIFT: Fx = Fx::from_int(100);

const SHIP_SIZE: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ShipKeys {
    left: Button,
    right: Button,
    up: Button,
}

#[derive(Debug, Clone)]
pub struct Ship {
    keys: ShipKeys,
    color: Color,
    gauge: FuelGauge,
    crash_channel: Channel,
    thruster: LoopVoice,
    x: Fx,
    y: Fx,
    vx: Fx,
    vy: Fx,
    fuel: Fx,
    alive: bool,
    burning: bool,
}

impl Ship {
    fn player_one() -> Self {
        Self::new(
            ShipKeys {
                left: Button::AltLeft,
                right: Button::AltRight,
                up: Button::AltUp,
            },
            Color::YELLOW,
            FuelGauge::new(10, 50, Color::GREEN),
            (Channel(1), Channel(2)),
            SCREEN_WIDTH / 4,
        )
    }

    fn player_two() -> Self {
        Self::new(
            ShipKeys {
                left: Button::Left,
                right: Button::Right,
                up: Button::Up,
            },
            Color::CYAN,
            FuelGauge::new(SCREEN_WIDTH - 30, 50, Color::BLUE),
            (Channel(3), Channel(4)),
            SCREEN_WIDTH * 3 / 4,
        )
    }

    fn new(
        keys: ShipKeys,
        color: Color,
        gauge: FuelGauge,
        (thruster_channel, crash_channel): (Channel, Channel),
        x: i32,
    ) -> Self {
        Self {
            keys,
            color,
            gauge,
            crash_channel,
            thruster: LoopVoice::new(thruster_channel, Sound::Thruster),
            x: Fx::from_int(x),
            y: Fx::from_int(SCREEN_HEIGHT / 2),
            vx: Fx::ZERO,
            vy: Fx::ZERO,
            fuel: FUEL_MAX,
            alive: true,
            burning: false,
        }
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

    pub fn alive(&self) -> bool {
        self.alive
    }

    fn body(&self) -> Rect {
        Rect::new(self.x.trunc(), self.y.trunc(), SHIP_SIZE, SHIP_SIZE)
    }

    fn steer(&mut self, controls: Controls, sfx: &mut SoundQueue) {
        let mut thrusting = false;
        self.burning = false;

        if controls.is_held(self.keys.left) {
            self.vx = (self.vx - THRUST).max(-MAX_DRIFT);
            thrusting = true;
        }
        if controls.is_held(self.keys.right) {
            self.vx = (self.vx + THRUST).min(MAX_DRIFT);
            thrusting = true;
        }
        if controls.is_held(self.keys.up) && self.fuel.is_positive() {
            self.vy -= THRUST;
            self.fuel = (self.fuel - FUEL_BURN).max(Fx::ZERO);
            thrusting = true;
            self.burning = true;
        }

        self.thruster.update(thrusting, self.fuel.is_positive(), sfx);
    }

    fn integrate(&mut self, dt: Fx) {
        self.vy += GRAVITY;
        self.x += self.vx.mul(dt);
        self.y += self.vy.mul(dt);
        self.x = self.x.clamp(Fx::ZERO, Fx::from_int(SCREEN_WIDTH - SHIP_SIZE));
    }

    fn crash(&mut self, sfx: &mut SoundQueue) {
        self.alive = false;
        self.burning = false;
        self.thruster.silence(sfx);
        sfx.play(self.crash_channel, Sound::Crash);
    }

    fn refuel(&mut self) {
        self.fuel = (self.fuel + Fx::from_int(POD_FUEL)).min(FUEL_MAX);
    }
}

#[derive(Debug, Clone)]
pub struct Cave {
    cave: CaveTerrain,
    pods: FuelPods,
    ships: [Ship; 2],
    scroll: Fx,
    scroll_step: Fx,
    dt: Fx,
    laps: u32,
    status: Status,
    frame: u64,
}

impl Cave {
    pub fn new(seed: u32, tick_ms: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let cave = CaveTerrain::generate(&mut rng, CAVE_WIDTH, SCREEN_HEIGHT);
        let pods = FuelPods::generate(&mut rng, &cave, POD_COUNT);
        Self::with_cave(cave, pods, tick_ms)
    }

    pub fn with_cave(cave: CaveTerrain, pods: FuelPods, tick_ms: u32) -> Self {
        let tick_ms = tick_ms as i32;
        Self {
            cave,
            pods,
            ships: [Ship::player_one(), Ship::player_two()],
            scroll: Fx::ZERO,
            scroll_step: Fx::from_ratio(SCROLL_PX_PER_SEC * tick_ms, 1000),
            dt: Fx::from_ratio(tick_ms, 1000),
            laps: 0,
            status: Status::Running,
            frame: 0,
        }
    }

    /// Player 0 flies with A/D/W, player 1 with the arrow keys.
    pub fn ship(&self, player: usize) -> Option<&Ship> {
        self.ships.get(player)
    }

    pub fn set_fuel(&mut self, player: usize, fuel: Fx) {
        if let Some(ship) = self.ships.get_mut(player) {
            ship.fuel = fuel.clamp(Fx::ZERO, FUEL_MAX);
        }
    }

    pub fn scroll(&self) -> i32 {
        self.scroll.trunc()
    }

    pub fn pods(&self) -> &FuelPods {
        &self.pods
    }

    fn advance_scroll(&mut self) {
        self.scroll += self.scroll_step;
        let width = Fx::from_int(self.cave.width());
        if self.scroll >= width {
            self.scroll -= width;
            self.laps += 1;
            self.pods.rearm_all();
            debug!(laps = self.laps, "cave loop wrapped");
        }
    }

    fn update_ship(&mut self, idx: usize, controls: Controls, sfx: &mut SoundQueue) {
        let scroll = self.scroll.trunc();
        let ship = &mut self.ships[idx];
        if !ship.alive {
            return;
        }
        ship.steer(controls, sfx);
        ship.integrate(self.dt);

        let body = ship.body();
        if self.cave.hits(body.x + scroll, body.y, SHIP_SIZE) {
            ship.crash(sfx);
            info!(player = idx + 1, x = body.x, y = body.y, "ship crashed");
            return;
        }
        if self.pods.collect(&body, scroll, self.cave.width()) {
            ship.refuel();
            debug!(player = idx + 1, fuel = ship.fuel.trunc(), "fuel pod collected");
        }
    }
}

impl Game for Cave {
    fn title(&self) -> &'static str {
        "CAVE FLYER"
    }

    fn help(&self) -> &'static str {
        "P1 A/D/W  P2 ←/→/↑  q quit"
    }

    fn tick(&mut self, controls: Controls, sfx: &mut SoundQueue) -> Status {
        if self.status.is_over() {
            return self.status;
        }
        self.advance_scroll();
        for idx in 0..self.ships.len() {
            self.update_ship(idx, controls, sfx);
        }
        if self.ships.iter().all(|s| !s.alive) {
            self.status = Status::Over(Outcome::AllCrashed);
            info!(distance = self.score(), "both players crashed");
        }
        self.frame += 1;
        self.status
    }

    fn render(&self, pb: &mut PixelBuffer) {
        pb.clear(Color::BLACK);

        let scroll = self.scroll.trunc();
        for sx in 0..pb.width() {
            let col = sx + scroll;
            pb.fill_column(sx, 0, self.cave.top_at(col), Color::GRAY);
            pb.fill_column(sx, self.cave.bottom_at(col), pb.height(), Color::GRAY);
        }

        for pod in self.pods.pods().iter().filter(|p| p.armed) {
            let r = pod.screen_rect(scroll, self.cave.width());
            pb.fill_rect(r.x, r.y, POD_SIZE, POD_SIZE, Color::MAGENTA);
        }

        for ship in self.ships.iter().filter(|s| s.alive) {
            let (x, y) = (ship.x.trunc(), ship.y.trunc());
            pb.draw_sprite(x, y, &LANDER, ship.color);
            if ship.burning && self.frame % 8 < 4 {
                pb.draw_sprite(x + 2, y + SHIP_SIZE, &FLAME, Color::ORANGE);
            }
            ship.gauge.draw(pb, ship.fuel);
        }

        draw_number(pb, SCREEN_WIDTH / 2 - 12, 10, self.score(), Color::WHITE);
    }

    /// Distance scrolled in whole pixels.
    fn score(&self) -> u32 {
        let lap = self.cave.width().max(0) as u32;
        self.laps
            .saturating_mul(lap)
            .saturating_add(self.scroll.trunc().max(0) as u32)
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
    use crate::core::terrain::FuelPod;
    use crate::types::{SoundCue, TICK_MS};

    fn open_cave(width: usize) -> CaveTerrain {
        CaveTerrain::from_walls(vec![0; width], vec![SCREEN_HEIGHT; width]).unwrap()
    }

    fn no_pods() -> FuelPods {
        FuelPods::from_pods(Vec::new())
    }

    #[test]
    fn gravity_pulls_both_ships_down() {
        let mut game = Cave::with_cave(open_cave(1000), no_pods(), 1000);
        let mut sfx = SoundQueue::new();
        for _ in 0..3 {
            game.tick(Controls::NONE, &mut sfx);
        }
        for player in 0..2 {
            let ship = game.ship(player).unwrap();
            assert_eq!(ship.velocity().1, GRAVITY + GRAVITY + GRAVITY);
            assert!(ship.position().1 > Fx::from_int(SCREEN_HEIGHT / 2));
        }
    }

    #[test]
    fn each_player_has_their_own_keys() {
        let mut game = Cave::with_cave(open_cave(1000), no_pods(), TICK_MS);
        let mut sfx = SoundQueue::new();
        game.tick(Controls::NONE.with_held(Button::AltLeft), &mut sfx);
        assert_eq!(game.ship(0).unwrap().velocity().0, -THRUST);
        assert_eq!(game.ship(1).unwrap().velocity().0, Fx::ZERO);

        game.tick(Controls::NONE.with_held(Button::Up), &mut sfx);
        assert_eq!(game.ship(0).unwrap().fuel(), FUEL_MAX);
        assert_eq!(game.ship(1).unwrap().fuel(), FUEL_MAX - FUEL_BURN);
        assert!(sfx.as_slice().contains(&SoundCue::Play {
            channel: Channel(3),
            sound: Sound::Thruster,
            looped: true,
        }));
    }

    #[test]
    fn ships_stay_on_screen() {
        let mut game = Cave::with_cave(open_cave(1000), no_pods(), 1000);
        let mut sfx = SoundQueue::new();
        let apart = Controls::NONE
            .with_held(Button::AltLeft)
            .with_held(Button::Right);
        for _ in 0..50 {
            assert_eq!(game.tick(apart, &mut sfx), Status::Running);
        }
        assert_eq!(game.ship(0).unwrap().position().0, Fx::ZERO);
        assert_eq!(
            game.ship(1).unwrap().position().0,
            Fx::from_int(SCREEN_WIDTH - SHIP_SIZE)
        );
    }

    #[test]
    fn lateral_thrust_is_capped() {
        let mut ship = Ship::player_two();
        let mut sfx = SoundQueue::new();
        for _ in 0..1000 {
            ship.steer(Controls::NONE.with_held(Button::Left), &mut sfx);
        }
        assert_eq!(ship.velocity().0, -MAX_DRIFT);
        for _ in 0..2000 {
            ship.steer(Controls::NONE.with_held(Button::Right), &mut sfx);
        }
        assert_eq!(ship.velocity().0, MAX_DRIFT);
        assert_eq!(ship.fuel(), FUEL_MAX);
    }

    #[test]
    fn only_living_players_show_a_gauge() {
        // Low floor under player one only.
        let width = 1000;
        let half = (SCREEN_WIDTH / 2) as usize;
        let mut bottom = vec![SCREEN_HEIGHT; width];
        bottom[..half].fill(SCREEN_HEIGHT / 2);
        let walls = CaveTerrain::from_walls(vec![0; width], bottom).unwrap();
        let mut game = Cave::with_cave(walls, no_pods(), TICK_MS);
        let mut pb = PixelBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let p1_bar = (15, 140);
        let p2_bar = (SCREEN_WIDTH - 25, 140);

        game.render(&mut pb);
        assert_eq!(pb.get(p1_bar.0, p1_bar.1), Some(Color::GREEN));
        assert_eq!(pb.get(p2_bar.0, p2_bar.1), Some(Color::BLUE));

        let mut sfx = SoundQueue::new();
        assert_eq!(game.tick(Controls::NONE, &mut sfx), Status::Running);
        assert!(!game.ship(0).unwrap().alive());
        assert!(game.ship(1).unwrap().alive());

        game.render(&mut pb);
        assert_eq!(pb.get(p1_bar.0, p1_bar.1), Some(Color::BLACK));
        assert_eq!(pb.get(9, 50), Some(Color::BLACK));
        assert_eq!(pb.get(p2_bar.0, p2_bar.1), Some(Color::BLUE));
    }

    #[test]
    fn touching_rock_kills_and_both_dead_ends_the_game() {
        let walls = CaveTerrain::from_walls(vec![0; 1000], vec![310; 1000]).unwrap();
        let mut game = Cave::with_cave(walls, no_pods(), 1000);
        let mut sfx = SoundQueue::new();
        let mut status = Status::Running;
        for _ in 0..10 {
            status = game.tick(Controls::NONE, &mut sfx);
        }
        assert_eq!(status, Status::Over(Outcome::AllCrashed));
        assert!(!game.ship(0).unwrap().alive());
        assert!(!game.ship(1).unwrap().alive());
        for channel in [Channel(2), Channel(4)] {
            assert!(sfx.as_slice().contains(&SoundCue::Play {
                channel,
                sound: Sound::Crash,
                looped: false,
            }));
        }
        let frames = game.frames();
        game.tick(Controls::NONE, &mut sfx);
        assert_eq!(game.frames(), frames);
    }

    #[test]
    fn pods_refuel_up_to_the_cap() {
        let pods = FuelPods::from_pods(vec![
            FuelPod {
                x: SCREEN_WIDTH / 4,
                y: SCREEN_HEIGHT / 2,
                armed: true,
            },
            FuelPod {
                x: SCREEN_WIDTH * 3 / 4,
                y: SCREEN_HEIGHT / 2,
                armed: true,
            },
        ]);
        let mut game = Cave::with_cave(open_cave(CAVE_WIDTH as usize), pods, TICK_MS);
        game.set_fuel(0, Fx::from_int(50));
        game.set_fuel(1, Fx::from_int(90));
        let mut sfx = SoundQueue::new();
        game.tick(Controls::NONE, &mut sfx);
        assert_eq!(game.ship(0).unwrap().fuel(), Fx::from_int(75));
        assert_eq!(game.ship(1).unwrap().fuel(), FUEL_MAX);
        assert_eq!(game.pods().armed_count(), 0);
    }

    #[test]
    fn wrapping_the_loop_rearms_pods_and_keeps_counting() {
        let pods = FuelPods::from_pods(vec![FuelPod {
            x: SCREEN_WIDTH / 4 + 25,
            y: SCREEN_HEIGHT / 2,
            armed: true,
        }]);
        let mut game = Cave::with_cave(open_cave(400), pods, 1000);
        let mut sfx = SoundQueue::new();
        game.tick(Controls::NONE, &mut sfx);
        assert_eq!(game.scroll(), 25);
        assert_eq!(game.pods().armed_count(), 0);
        for _ in 0..15 {
            game.tick(Controls::NONE, &mut sfx);
        }
        assert_eq!(game.scroll(), 0);
        assert_eq!(game.pods().armed_count(), 1);
        assert_eq!(game.score(), 400);
    }
}
