//! Particle colors and the speed gradient.
//!
//! Particles are colored by the magnitude of the velocity they were advected
//! with. The mapping works on squared speed so the per-particle hot path never
//! takes a square root.

use crate::error::FlowError;
use crate::vector::Vec2;
use serde::{Deserialize, Serialize};

/// Squared speed at which the gradient saturates (speed 2.0).
pub const SPEED_SQ_SATURATION: f32 = 4.0;

/// Alpha applied to every particle color.
pub const PARTICLE_ALPHA: f32 = 0.3;

/// Linear RGBA color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Parses `"#rrggbb"` or `"rrggbb"` (case insensitive) as an opaque color.
    pub fn from_hex(hex: &str) -> Result<Self, FlowError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(FlowError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>, label: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|e| FlowError::InvalidColor(format!("invalid {label} component: {e}")))
        };
        Ok(Self::new(
            channel(0..2, "red")?,
            channel(2..4, "green")?,
            channel(4..6, "blue")?,
            1.0,
        ))
    }

    /// Quantizes to four bytes, clamping each channel first.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// Maps a velocity to the two-segment speed gradient.
///
/// Normalized speed `s = min(|v|² / 4, 1)`. The lower half runs from blue
/// `(0, 0.5, 1)` to cyan `(0, 1, 1)`, the upper half from cyan to a warm
/// `(1, 0.7, 0)`. Alpha is always [`PARTICLE_ALPHA`].
pub fn speed_color(velocity: Vec2) -> Rgba {
    let speed = (velocity.length_squared() / SPEED_SQ_SATURATION).min(1.0);
    if speed < 0.5 {
        let t = speed * 2.0;
        Rgba::new(0.0, 0.5 + t * 0.5, 1.0, PARTICLE_ALPHA)
    } else {
        let t = (speed - 0.5) * 2.0;
        Rgba::new(t, 1.0 - t * 0.3, 1.0 - t, PARTICLE_ALPHA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn stationary_particle_is_blue() {
        let c = speed_color(Vec2::ZERO);
        assert_eq!(c, Rgba::new(0.0, 0.5, 1.0, PARTICLE_ALPHA));
    }

    #[test]
    fn midpoint_speed_is_cyan() {
        // |v|^2 = 2 -> normalized 0.5, start of the upper segment.
        let c = speed_color(Vec2::new(1.0, 1.0));
        assert!(approx(c.r, 0.0) && approx(c.g, 1.0) && approx(c.b, 1.0), "{c:?}");
    }

    #[test]
    fn saturated_speed_is_warm() {
        let c = speed_color(Vec2::new(10.0, 0.0));
        assert!(approx(c.r, 1.0) && approx(c.g, 0.7) && approx(c.b, 0.0), "{c:?}");
    }

    #[test]
    fn gradient_is_continuous_at_segment_boundary() {
        let below = speed_color(Vec2::new((2.0f32 - 1e-4).sqrt(), 0.0));
        let above = speed_color(Vec2::new(2.0f32.sqrt(), 0.0));
        assert!((below.g - above.g).abs() < 1e-3);
        assert!((below.r - above.r).abs() < 1e-3);
    }

    #[test]
    fn alpha_is_constant() {
        for v in [Vec2::ZERO, Vec2::ONE, Vec2::splat(50.0)] {
            assert_eq!(speed_color(v).a, PARTICLE_ALPHA);
        }
    }

    #[test]
    fn from_hex_parses_with_and_without_hash() {
        let a = Rgba::from_hex("#ff8000").unwrap();
        let b = Rgba::from_hex("FF8000").unwrap();
        assert_eq!(a, b);
        assert!(approx(a.r, 1.0) && approx(a.g, 128.0 / 255.0) && approx(a.b, 0.0));
        assert_eq!(a.a, 1.0);
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert!(matches!(Rgba::from_hex("#fff"), Err(FlowError::InvalidColor(_))));
        assert!(matches!(Rgba::from_hex("zzzzzz"), Err(FlowError::InvalidColor(_))));
        assert!(matches!(Rgba::from_hex("ééé"), Err(FlowError::InvalidColor(_))));
    }

    #[test]
    fn to_rgba8_clamps() {
        assert_eq!(Rgba::new(2.0, -1.0, 0.5, 1.0).to_rgba8(), [255, 0, 128, 255]);
    }
}
