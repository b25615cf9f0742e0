#![deny(unsafe_code)]
//! Particle advection for flowfield.
//!
//! A [`ParticleSystem`] moves a pool of tracers through the active field of a
//! [`FieldRegistry`](flowfield_core::FieldRegistry), one fixed-step
//! integration per frame, and keeps the population spread over the camera's
//! view by recycling particles that leave it, grow old, or lose a small
//! per-frame lottery. [`Visualizer`] wraps a system, camera and config behind
//! the [`Command`] set a front end drives.

pub mod integrator;
pub mod pool;
pub mod population;
pub mod session;
pub mod system;
pub mod view;

pub use pool::{Particle, ParticlePool};
pub use population::PopulationManager;
pub use session::{Command, Distribution, Visualizer};
pub use system::{FrameStats, ParticleSystem};
pub use view::ViewCache;
