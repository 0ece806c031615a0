//! 1-bit sprite bitmaps.
//!
//! Each row is a byte read MSB first, so bit 7 is the leftmost column. Sprites
//! narrower than 8 columns only use the high bits.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub width: u8,
    pub rows: &'static [u8],
}

impl Sprite {
    pub const fn new(width: u8, rows: &'static [u8]) -> Self {
        Self { width, rows }
    }

    pub fn height(&self) -> i32 {
        self.rows.len() as i32
    }
}

/// Lander and cave flyer ship.
pub const LANDER: Sprite = Sprite::new(
    8,
    &[
        0b00011000, 0b00111100, 0b01111110, 0b11111111, 0b11011011, 0b10011001, 0b01000010,
        0b00100100,
    ],
);

/// Exhaust plume drawn under a ship while it burns fuel.
pub const FLAME: Sprite = Sprite::new(4, &[0b01100000, 0b11110000, 0b01100000, 0b00100000]);

pub const INVADER: Sprite = Sprite::new(
    8,
    &[
        0b00100100, 0b00011000, 0b01111110, 0b11111111, 0b11011011, 0b11011011, 0b01100110,
        0b00000000,
    ],
);

/// Player cannon in the invaders game.
pub const CANNON: Sprite = Sprite::new(
    8,
    &[
        0b00001000, 0b00011000, 0b00111100, 0b01111110, 0b11111111, 0b11111111, 0b01111110,
        0b00111100,
    ],
);

pub const MISSILE: Sprite = Sprite::new(4, &[0b01100000, 0b11110000, 0b11110000, 0b01100000]);

/// Runner animation frames.
pub const RUNNER_STAND: usize = 0;
pub const RUNNER_WALK_1: usize = 1;
pub const RUNNER_WALK_2: usize = 2;
pub const RUNNER_JUMP: usize = 3;

pub const RUNNER: [Sprite; 4] = [
    Sprite::new(
        8,
        &[
            0b00110000, 0b00110000, 0b01111000, 0b00110000, 0b00110000, 0b01000100, 0b01000100,
            0b00111000,
        ],
    ),
    Sprite::new(
        8,
        &[
            0b00110000, 0b00110000, 0b01111000, 0b00110000, 0b00110000, 0b01000100, 0b00101000,
            0b00010000,
        ],
    ),
    Sprite::new(
        8,
        &[
            0b00110000, 0b00110000, 0b01111000, 0b00110000, 0b00110000, 0b00010100, 0b00101000,
            0b01000000,
        ],
    ),
    Sprite::new(
        8,
        &[
            0b00110000, 0b00110000, 0b01111000, 0b00110000, 0b01000100, 0b00101000, 0b00010000,
            0b00101000,
        ],
    ),
];

/// 5x5 digit font, 0 through 9.
pub const DIGITS: [Sprite; 10] = [
    Sprite::new(5, &[0b11110000, 0b10010000, 0b10010000, 0b10010000, 0b11110000]),
    Sprite::new(5, &[0b00100000, 0b01100000, 0b00100000, 0b00100000, 0b01110000]),
    Sprite::new(5, &[0b11110000, 0b00010000, 0b11110000, 0b10000000, 0b11110000]),
    Sprite::new(5, &[0b11110000, 0b00010000, 0b11110000, 0b00010000, 0b11110000]),
    Sprite::new(5, &[0b10010000, 0b10010000, 0b11110000, 0b00010000, 0b00010000]),
    Sprite::new(5, &[0b11110000, 0b10000000, 0b11110000, 0b00010000, 0b11110000]),
    Sprite::new(5, &[0b11110000, 0b10000000, 0b11110000, 0b10010000, 0b11110000]),
    Sprite::new(5, &[0b11110000, 0b00010000, 0b00100000, 0b01000000, 0b10000000]),
    Sprite::new(5, &[0b11110000, 0b10010000, 0b11110000, 0b10010000, 0b11110000]),
    Sprite::new(5, &[0b11110000, 0b10010000, 0b11110000, 0b00010000, 0b11110000]),
];
