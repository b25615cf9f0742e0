//! 2D vector helpers on top of [`glam::Vec2`].
//!
//! `Vec2` already provides add, subtract, scale and length. The helpers here
//! add the guarded operations the field definitions rely on.

pub use glam::Vec2;

/// Vectors shorter than this normalize to zero instead of blowing up.
pub const NORMALIZE_EPSILON: f32 = 1e-4;

/// Returns the unit vector in the direction of `v`, or `Vec2::ZERO` when
/// `v` is shorter than [`NORMALIZE_EPSILON`].
pub fn safe_normalize(v: Vec2) -> Vec2 {
    let len = v.length();
    if len > NORMALIZE_EPSILON {
        v / len
    } else {
        Vec2::ZERO
    }
}

/// Euclidean distance between `a` and `b` plus a softening term, so the
/// result is never zero and is safe to divide by.
pub fn softened_distance(a: Vec2, b: Vec2, softening: f32) -> f32 {
    a.distance(b) + softening
}
