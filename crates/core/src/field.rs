//! Analytic vector fields and the index-based registry that selects them.
//!
//! Every field is a pure function `(point, scale) -> velocity`: no hidden
//! state and no dependency on time, so multi-stage integrators can sample the
//! same point twice and get bit-identical velocities. `scale` multiplies the
//! output magnitude uniformly and is always applied last.
//!
//! The field set is closed: [`FieldKind`] names each one and dispatches with
//! a `match`. The registry is an explicit index → kind table built once at
//! startup and handed to the components that need it. Adding a field means
//! writing one function and one [`FieldKind`] variant.

use crate::error::FlowError;
use crate::vector::{softened_distance, Vec2};
use std::f32::consts::{PI, TAU};

/// Index used when a requested field index does not exist.
pub const DEFAULT_FIELD_INDEX: usize = 0;

/// The built-in analytic fields, in selection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Lorenz,
    WavyHyperbolic,
    CircularWaves,
    Hopf,
    RadialWaveVortex,
    KarmanVortexStreet,
    DoubleGyre,
    GalaxySpiral,
    VanDerPol,
}

impl FieldKind {
    pub const ALL: [FieldKind; 9] = [
        Self::Lorenz,
        Self::WavyHyperbolic,
        Self::CircularWaves,
        Self::Hopf,
        Self::RadialWaveVortex,
        Self::KarmanVortexStreet,
        Self::DoubleGyre,
        Self::GalaxySpiral,
        Self::VanDerPol,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Lorenz => "Lorenz Field",
            Self::WavyHyperbolic => "Wavy Hyperbolic",
            Self::CircularWaves => "Circular Waves",
            Self::Hopf => "Hopf Field",
            Self::RadialWaveVortex => "Radial Wave Vortex",
            Self::KarmanVortexStreet => "Kármán Vortex Street",
            Self::DoubleGyre => "Double Gyre",
            Self::GalaxySpiral => "Galaxy Spiral",
            Self::VanDerPol => "Van der Pol Oscillator",
        }
    }

    /// Velocity at `point`, scaled by `scale`.
    #[inline]
    pub fn evaluate(self, point: Vec2, scale: f32) -> Vec2 {
        match self {
            Self::Lorenz => lorenz(point, scale),
            Self::WavyHyperbolic => wavy_hyperbolic(point, scale),
            Self::CircularWaves => circular_waves(point, scale),
            Self::Hopf => hopf(point, scale),
            Self::RadialWaveVortex => radial_wave_vortex(point, scale),
            Self::KarmanVortexStreet => karman_vortex_street(point, scale),
            Self::DoubleGyre => double_gyre(point, scale),
            Self::GalaxySpiral => galaxy_spiral(point, scale),
            Self::VanDerPol => van_der_pol(point, scale),
        }
    }
}

/// Index → field lookup with deterministic fallback.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    fields: Vec<FieldKind>,
}

impl FieldRegistry {
    /// Every [`FieldKind`], in declaration order.
    pub fn builtin() -> Self {
        Self {
            fields: FieldKind::ALL.to_vec(),
        }
    }

    /// Registry over a custom selection or ordering. Returns
    /// `FlowError::EmptyRegistry` if `fields` is empty, since fallback needs
    /// an index 0.
    pub fn with_fields(fields: Vec<FieldKind>) -> Result<Self, FlowError> {
        if fields.is_empty() {
            return Err(FlowError::EmptyRegistry);
        }
        Ok(Self { fields })
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false for a constructed registry.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether `index` names a registered field.
    pub fn contains(&self, index: usize) -> bool {
        index < self.fields.len()
    }

    /// The index actually evaluated for a requested `index`.
    pub fn resolve(&self, index: usize) -> usize {
        if self.contains(index) {
            index
        } else {
            DEFAULT_FIELD_INDEX
        }
    }

    /// Display name of the field at `index`, or `"Unknown"`.
    pub fn name(&self, index: usize) -> &'static str {
        self.fields.get(index).map_or("Unknown", |f| f.name())
    }

    /// Iterates `(index, name)` over every registered field.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'static str)> + '_ {
        self.fields.iter().enumerate().map(|(i, f)| (i, f.name()))
    }

    /// The field evaluated for `index`, after fallback.
    #[inline]
    pub fn kind(&self, index: usize) -> FieldKind {
        self.fields[self.resolve(index)]
    }

    /// Velocity of field `index` at `point`, scaled by `scale`.
    ///
    /// Unknown indices evaluate field 0 instead of failing.
    #[inline]
    pub fn evaluate(&self, point: Vec2, index: usize, scale: f32) -> Vec2 {
        self.kind(index).evaluate(point, scale)
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Field definitions
// ---------------------------------------------------------------------------

/// Planar slice of the Lorenz system (σ = 10, ρ = 28), slowed by 0.05.
pub fn lorenz(p: Vec2, scale: f32) -> Vec2 {
    const SIGMA: f32 = 10.0;
    const RHO: f32 = 28.0;
    const DAMPING: f32 = 0.05;
    let v = Vec2::new(
        SIGMA * (p.y - p.x),
        p.x * (RHO - p.x * p.x - p.y * p.y) - p.y,
    );
    v * DAMPING * scale
}

pub fn wavy_hyperbolic(p: Vec2, scale: f32) -> Vec2 {
    Vec2::new((5.0 * p.y + p.x).sin(), (5.0 * p.x - p.y).cos()) * scale
}

pub fn circular_waves(p: Vec2, scale: f32) -> Vec2 {
    Vec2::new(
        (p.y * 3.0).sin() * (p.x * 2.0).cos(),
        (p.x * 3.0).cos() * (p.y * 2.0).sin(),
    ) * scale
}

/// Hopf normal form with a stable limit cycle on the unit circle.
pub fn hopf(p: Vec2, scale: f32) -> Vec2 {
    let mu = 1.0 - p.length_squared();
    Vec2::new(mu * p.x - p.y, p.x + mu * p.y) * scale
}

pub fn radial_wave_vortex(p: Vec2, scale: f32) -> Vec2 {
    let r = p.length();
    Vec2::new(-p.y + (r * 2.0).sin() * 0.3, p.x + (r * 2.0).cos() * 0.3) * scale
}

/// Two counter-rotating vortices whose centres oscillate along x, carried
/// downstream by a uniform drift.
pub fn karman_vortex_street(p: Vec2, scale: f32) -> Vec2 {
    const FREQUENCY: f32 = 2.0;
    const AMPLITUDE: f32 = 0.5;
    const SOFTENING: f32 = 0.1;
    const DRIFT: f32 = 0.5;

    let c1 = Vec2::new(0.0, (p.x * FREQUENCY).sin() * AMPLITUDE);
    let c2 = Vec2::new(0.0, (p.x * FREQUENCY + PI).sin() * AMPLITUDE);
    let d1 = softened_distance(p, c1, SOFTENING);
    let d2 = softened_distance(p, c2, SOFTENING);

    let v1 = Vec2::new(-(p.y - c1.y), p.x) / d1;
    let v2 = Vec2::new(p.y - c2.y, -p.x) / d2;
    (v1 + v2 + Vec2::new(DRIFT, 0.0)) * scale
}

/// Double gyre with a spatially (not temporally) modulated boundary, plus a
/// weak background wave so the separatrix does not stall particles.
pub fn double_gyre(p: Vec2, scale: f32) -> Vec2 {
    const A: f32 = 0.1;
    const EPSILON: f32 = 0.25;
    const OMEGA: f32 = TAU / 10.0;

    let phase = (OMEGA * (p.x + p.y * 0.5)).sin();
    let a = EPSILON * phase;
    let b = 1.0 - 2.0 * EPSILON * phase;
    let f = a * p.x * p.x + b * p.x;
    let df_dx = 2.0 * a * p.x + b;

    let gyre = Vec2::new(
        -PI * A * (PI * f).sin() * (PI * p.y).cos(),
        PI * A * (PI * f).cos() * (PI * p.y).sin() * df_dx,
    );
    let background = Vec2::new((p.y * 3.0).sin(), (p.x * 3.0).cos()) * 0.1;
    (gyre + background) * scale
}

/// Inward radial drift with a tangential speed that peaks near the core.
pub fn galaxy_spiral(p: Vec2, scale: f32) -> Vec2 {
    let r = p.length();
    let theta = p.y.atan2(p.x);
    let (sin, cos) = theta.sin_cos();
    let v_r = -0.2 * r;
    let v_theta = 0.5 / (r + 0.1);
    Vec2::new(v_r * cos - v_theta * sin, v_r * sin + v_theta * cos) * scale
}

/// Van der Pol oscillator with μ = 2.
pub fn van_der_pol(p: Vec2, scale: f32) -> Vec2 {
    const MU: f32 = 2.0;
    Vec2::new(p.y, MU * (1.0 - p.x * p.x) * p.y - p.x) * scale
}
