//! The per-frame particle update.

use crate::integrator;
use crate::pool::Particle;
use crate::population::{respawn_uniform, PopulationManager, RespawnReason, RespawnRules};
use crate::view::ViewCache;
use flowfield_core::color::speed_color;
use flowfield_core::{Camera, FieldRegistry, FlowConfig, FlowError};

/// Initial lifetimes after a grid layout are drawn from
/// `[0, particle_lifetime * GRID_LIFETIME_FRACTION)`.
pub const GRID_LIFETIME_FRACTION: f32 = 0.3;
/// Same for a uniform layout.
pub const UNIFORM_LIFETIME_FRACTION: f32 = 0.5;

/// What happened during one [`ParticleSystem::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Particles integrated this frame (0 while paused).
    pub advanced: usize,
    pub out_of_view: usize,
    pub expired: usize,
    pub forced: usize,
}

impl FrameStats {
    pub fn respawned(&self) -> usize {
        self.out_of_view + self.expired + self.forced
    }

    fn record(&mut self, reason: RespawnReason) {
        match reason {
            RespawnReason::OutOfView => self.out_of_view += 1,
            RespawnReason::Expired => self.expired += 1,
            RespawnReason::Forced => self.forced += 1,
        }
    }
}

/// Particles advected through the registry's fields.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    population: PopulationManager,
    registry: FieldRegistry,
}

impl ParticleSystem {
    /// Validates `config` and spawns `config.particle_count` particles
    /// uniformly over the camera's view, all with lifetime 0.
    pub fn new(
        config: &FlowConfig,
        registry: FieldRegistry,
        camera: &Camera,
    ) -> Result<Self, FlowError> {
        config.validate()?;
        let view = ViewCache::from_camera(camera);
        Ok(Self {
            population: PopulationManager::new(config.particle_count, config.seed, &view)?,
            registry,
        })
    }

    pub fn particles(&self) -> &[Particle] {
        self.population.particles()
    }

    pub fn population(&self) -> &PopulationManager {
        &self.population
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Simulated time advanced per frame: the base step scaled by speed and
    /// real frame time, divided by zoom so on-screen motion stays steady.
    pub fn effective_step(camera: &Camera, config: &FlowConfig, dt: f32) -> f32 {
        dt * config.simulation_speed * config.integration_step / camera.zoom
    }

    /// Advances every active particle by one frame.
    ///
    /// Each particle records its previous position, is colored by the field
    /// velocity at its pre-step position, is integrated, ages, and is
    /// recycled if it left the view, expired, or lost the forced-respawn
    /// roll. Does nothing while `config.paused` is set.
    pub fn update(&mut self, camera: &Camera, config: &FlowConfig, dt: f32) -> FrameStats {
        let mut stats = FrameStats::default();
        if config.paused {
            return stats;
        }

        let view = ViewCache::from_camera(camera);
        let step = Self::effective_step(camera, config, dt);
        let field = self.registry.kind(config.field_index);
        let scale = config.field_scale;
        let method = config.integration_method;
        let velocity = |p| field.evaluate(p, scale);

        let mut rules = RespawnRules::new(
            view,
            config.particle_lifetime,
            config.forced_respawn_probability,
            config.forced_respawn_fraction,
            self.population.pool().count(),
        );
        let (particles, rng) = self.population.split_mut();

        for p in particles.iter_mut() {
            p.previous_position = p.position;
            let k1 = velocity(p.position);
            p.color = speed_color(k1);
            p.position = integrator::advance_from(method, p.position, k1, step, velocity);
            p.lifetime += step;

            if let Some(reason) = rules.check(p, rng) {
                respawn_uniform(p, &view, rng);
                stats.record(reason);
            }
        }
        stats.advanced = particles.len();

        log::trace!(
            "frame: {} advanced, {} respawned (view {}, expired {}, forced {})",
            stats.advanced,
            stats.respawned(),
            stats.out_of_view,
            stats.expired,
            stats.forced
        );
        stats
    }

    /// Resizes the pool toward constant density for the current view.
    ///
    /// Returns `Ok(true)` if the count changed. On allocation failure the
    /// pool keeps its previous size and the error is returned.
    pub fn adjust_count_for_zoom(
        &mut self,
        camera: &Camera,
        config: &FlowConfig,
    ) -> Result<bool, FlowError> {
        let view = ViewCache::from_camera(camera);
        self.population
            .adapt_to_view(&view, config.particle_count)
            .inspect_err(|e| log::error!("keeping {} particles: {e}", self.population.pool().count()))
    }

    /// Jittered-grid layout over the current view.
    pub fn redistribute_grid(&mut self, camera: &Camera, config: &FlowConfig) {
        let view = ViewCache::from_camera(camera);
        self.population
            .redistribute_grid(&view, config.particle_lifetime * GRID_LIFETIME_FRACTION);
    }

    /// Uniform random layout over the current view.
    pub fn redistribute_uniform(&mut self, camera: &Camera, config: &FlowConfig) {
        let view = ViewCache::from_camera(camera);
        self.population
            .redistribute_uniform(&view, config.particle_lifetime * UNIFORM_LIFETIME_FRACTION);
    }
}
