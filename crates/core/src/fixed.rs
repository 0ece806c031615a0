//! Q16.16 fixed-point numbers for the game physics.
//!
//! Positions, velocities and fuel are all `Fx` so every game is bit-exact
//! for a given seed and input sequence. The integer range (±32767) comfortably
//! covers the 8000 column cave loop.

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

const FRAC_BITS: u32 = 16;
const ONE_RAW: i32 = 1 << FRAC_BITS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fx(i32);

impl Fx {
    pub const ZERO: Fx = Fx(0);
    pub const ONE: Fx = Fx(ONE_RAW);

    pub const fn from_raw(raw: i32) -> Self {
        Fx(raw)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    pub const fn from_int(v: i32) -> Self {
        Fx(v << FRAC_BITS)
    }

    /// `num / den` as a fixed-point value, rounded toward zero.
    pub const fn from_ratio(num: i32, den: i32) -> Self {
        Fx((((num as i64) << FRAC_BITS) / den as i64) as i32)
    }

    /// Integer part rounded toward zero, like a C `(int)` cast.
    pub const fn trunc(self) -> i32 {
        self.0 / ONE_RAW
    }

    /// Integer part rounded toward negative infinity.
    pub const fn floor(self) -> i32 {
        self.0 >> FRAC_BITS
    }

    /// Product rounded toward zero, so repeated damping reaches exactly zero
    /// from either side.
    pub const fn mul(self, rhs: Fx) -> Fx {
        Fx(((self.0 as i64 * rhs.0 as i64) / ONE_RAW as i64) as i32)
    }

    /// `self * num / den` without going through a fixed-point ratio.
    pub const fn scale(self, num: i32, den: i32) -> Fx {
        Fx(((self.0 as i64 * num as i64) / den as i64) as i32)
    }

    pub fn clamp(self, lo: Fx, hi: Fx) -> Fx {
        Ord::clamp(self, lo, hi)
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl Add for Fx {
    type Output = Fx;

    fn add(self, rhs: Fx) -> Fx {
        Fx(self.0 + rhs.0)
    }
}

impl Sub for Fx {
    type Output = Fx;

    fn sub(self, rhs: Fx) -> Fx {
        Fx(self.0 - rhs.0)
    }
}

impl Neg for Fx {
    type Output = Fx;

    fn neg(self) -> Fx {
        Fx(-self.0)
    }
}

impl AddAssign for Fx {
    fn add_assign(&mut self, rhs: Fx) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Fx {
    fn sub_assign(&mut self, rhs: Fx) {
        self.0 -= rhs.0;
    }
}
