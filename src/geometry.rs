//! Field constants and the small math helpers every entity leans on.
//!
//! Randomness is always injected so callers decide whether a run is
//! reproducible (tests pass a seeded `StdRng`).

use rand::Rng;

/// Logical play-field width, in field units.
pub const FIELD_WIDTH: f32 = 600.0;
/// Logical play-field height, in field units.
pub const FIELD_HEIGHT: f32 = 700.0;

/// Axis-aligned rectangle with its origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// True when the rectangle shares no rows with `[0, FIELD_HEIGHT)`.
    pub fn outside_field_vertically(&self) -> bool {
        self.bottom() <= 0.0 || self.y >= FIELD_HEIGHT
    }
}

/// Strict AABB intersection; rectangles that only touch along an edge do not
/// overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Clamp `v` into `[lo, hi]`. Unlike `f32::clamp` this never panics: an
/// inverted range yields `lo`.
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    lo.max(hi.min(v))
}

/// Uniform integer in `[min, max]`, inclusive at both ends.
pub fn random_int(rng: &mut impl Rng, min: i64, max: i64) -> i64 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Uniform float in `[min, max)`.
pub fn random_range(rng: &mut impl Rng, min: f64, max: f64) -> f64 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}
