//! Particle count, placement and recycling.
//!
//! [`PopulationManager`] owns the pool and the generator every spawn draws
//! from. It decides how many particles the current view should hold, lays
//! them out (jittered grid or uniform), and decides per frame which particles
//! are recycled.

use crate::pool::{Particle, ParticlePool};
use crate::view::ViewCache;
use flowfield_core::{FlowError, Vec2, Xorshift64};

/// Particles per unit of world area, relative to the configured base count.
/// At zoom 1 the view covers area 4, so the target equals the base count.
pub const DENSITY_PER_UNIT_AREA: f32 = 0.25;
/// Floor on the zoom-adapted particle count.
pub const MIN_PARTICLES: usize = 1000;
/// Ceiling on the zoom-adapted particle count.
pub const MAX_PARTICLES: usize = 200_000;
/// The pool is resized only when the target differs from the active count by
/// more than this fraction of it.
pub const RESIZE_HYSTERESIS: f32 = 0.2;
/// Unjittered inset of a grid particle inside its cell, as a fraction of the
/// cell size.
pub const GRID_INSET: f32 = 0.1;
/// Span of the random jitter inside a grid cell.
pub const GRID_JITTER: f32 = 0.8;

/// Why a particle was recycled this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespawnReason {
    OutOfView,
    Expired,
    Forced,
}

/// Per-frame respawn rules.
///
/// Built once per frame. The forced-respawn budget is spent as particles are
/// visited, so at most `budget` particles are force-recycled per frame no
/// matter how high the probability is set.
#[derive(Debug, Clone)]
pub struct RespawnRules {
    view: ViewCache,
    lifetime_limit: f32,
    forced_probability: f32,
    forced_remaining: usize,
}

impl RespawnRules {
    pub fn new(
        view: ViewCache,
        lifetime_limit: f32,
        forced_probability: f32,
        forced_fraction: f32,
        active_count: usize,
    ) -> Self {
        Self {
            view,
            lifetime_limit,
            forced_probability,
            forced_remaining: forced_budget(active_count, forced_fraction),
        }
    }

    /// Forced respawns still allowed this frame.
    pub fn forced_remaining(&self) -> usize {
        self.forced_remaining
    }

    /// Whether `particle` must be recycled, and why.
    ///
    /// Out-of-view takes precedence over expiry; the forced roll only
    /// happens for particles that would otherwise survive.
    #[inline]
    pub fn check(&mut self, particle: &Particle, rng: &mut Xorshift64) -> Option<RespawnReason> {
        if is_outside_view(particle, &self.view) {
            return Some(RespawnReason::OutOfView);
        }
        if particle.lifetime > self.lifetime_limit {
            return Some(RespawnReason::Expired);
        }
        if self.forced_remaining > 0 && rng.chance(self.forced_probability) {
            self.forced_remaining -= 1;
            return Some(RespawnReason::Forced);
        }
        None
    }
}

/// Whether `particle` has left the margined view. See [`ViewCache::is_outside`].
#[inline]
pub fn is_outside_view(particle: &Particle, view: &ViewCache) -> bool {
    view.is_outside(particle.position)
}

/// Maximum forced respawns per frame for `count` particles.
///
/// Zero only when `fraction` is zero; any positive fraction allows at least
/// one.
pub fn forced_budget(count: usize, fraction: f32) -> usize {
    (count as f32 * fraction.max(0.0)).ceil() as usize
}

/// Target particle count for a view of `view_area`, keeping density constant
/// relative to `base_count` at zoom 1.
pub fn compute_target_count(view_area: f32, base_count: usize) -> usize {
    let target = base_count as f32 * DENSITY_PER_UNIT_AREA * view_area;
    (target.max(0.0) as usize).clamp(MIN_PARTICLES, MAX_PARTICLES)
}

/// Whether moving from `current` to `target` is worth a resize.
pub fn needs_resize(current: usize, target: usize) -> bool {
    current.abs_diff(target) as f32 > current as f32 * RESIZE_HYSTERESIS
}

/// Recycles one particle to a uniformly random point in the view with a fresh
/// lifetime and no trail.
#[inline]
pub fn respawn_uniform(particle: &mut Particle, view: &ViewCache, rng: &mut Xorshift64) {
    particle.spawn_at(view.random_point(rng), 0.0);
}

/// Lays `particles` out on a jittered `g × g` grid over the view, where
/// `g = ⌊√n⌋`. The `n - g²` left over go to uniform random points.
///
/// Every lifetime is drawn from `[0, lifetime_scale)` so the population does
/// not expire in lockstep.
pub fn redistribute_grid(
    particles: &mut [Particle],
    view: &ViewCache,
    lifetime_scale: f32,
    rng: &mut Xorshift64,
) {
    let grid = (particles.len() as f64).sqrt() as usize;
    let (gridded, rest) = particles.split_at_mut(grid * grid);
    if grid > 0 {
        let cell_w = view.width / grid as f32;
        let cell_h = view.height / grid as f32;
        for (i, p) in gridded.iter_mut().enumerate() {
            let gx = (i / grid) as f32;
            let gy = (i % grid) as f32;
            let x = view.left + gx * cell_w + cell_w * (GRID_INSET + GRID_JITTER * rng.next_f32());
            let y =
                view.bottom + gy * cell_h + cell_h * (GRID_INSET + GRID_JITTER * rng.next_f32());
            p.spawn_at(Vec2::new(x, y), rng.next_f32() * lifetime_scale);
        }
    }
    for p in rest {
        p.spawn_at(view.random_point(rng), rng.next_f32() * lifetime_scale);
    }
}

/// Places every particle at a uniformly random point in the view, with
/// lifetimes drawn from `[0, lifetime_scale)`.
pub fn redistribute_uniform(
    particles: &mut [Particle],
    view: &ViewCache,
    lifetime_scale: f32,
    rng: &mut Xorshift64,
) {
    for p in particles {
        p.spawn_at(view.random_point(rng), rng.next_f32() * lifetime_scale);
    }
}

/// Owns the particle pool and the spawn generator.
#[derive(Debug, Clone)]
pub struct PopulationManager {
    pool: ParticlePool,
    rng: Xorshift64,
}

impl PopulationManager {
    /// `initial_count` active particles spawned uniformly over `view` with
    /// lifetime 0.
    pub fn new(initial_count: usize, seed: u64, view: &ViewCache) -> Result<Self, FlowError> {
        let mut pop = Self {
            pool: ParticlePool::with_capacity(initial_count)?,
            rng: Xorshift64::new(seed),
        };
        pop.spawn_range(0, initial_count, view);
        Ok(pop)
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn particles(&self) -> &[Particle] {
        self.pool.active()
    }

    /// Active particles and the generator, borrowed together for the frame
    /// loop.
    pub fn split_mut(&mut self) -> (&mut [Particle], &mut Xorshift64) {
        (self.pool.active_mut(), &mut self.rng)
    }

    /// See [`ParticlePool::resize`].
    pub fn resize(&mut self, new_count: usize) -> Result<(), FlowError> {
        self.pool.resize(new_count)
    }

    /// Resizes the pool toward the density target for `view`.
    ///
    /// Returns `Ok(true)` if the active count changed. Small differences
    /// (within [`RESIZE_HYSTERESIS`]) are ignored. Slots added by growth are
    /// spawned uniformly over `view` with lifetime 0.
    pub fn adapt_to_view(&mut self, view: &ViewCache, base_count: usize) -> Result<bool, FlowError> {
        let current = self.pool.count();
        let target = compute_target_count(view.area(), base_count);
        if !needs_resize(current, target) {
            return Ok(false);
        }
        self.pool.resize(target)?;
        self.spawn_range(current, target, view);
        log::debug!("particle count {current} -> {target} for view area {:.4}", view.area());
        Ok(true)
    }

    /// Respawns active slots `[start, end)`; an empty range does nothing.
    fn spawn_range(&mut self, start: usize, end: usize, view: &ViewCache) {
        let active = self.pool.active_mut();
        let end = end.min(active.len());
        if let Some(slots) = active.get_mut(start..end) {
            for p in slots {
                respawn_uniform(p, view, &mut self.rng);
            }
        }
    }

    pub fn redistribute_grid(&mut self, view: &ViewCache, lifetime_scale: f32) {
        redistribute_grid(self.pool.active_mut(), view, lifetime_scale, &mut self.rng);
    }

    pub fn redistribute_uniform(&mut self, view: &ViewCache, lifetime_scale: f32) {
        redistribute_uniform(self.pool.active_mut(), view, lifetime_scale, &mut self.rng);
    }
}
