//! Fixed-step integrators for `dx/dt = v(x)`.
//!
//! The integrators are stateless: every call takes the position, the step
//! and a velocity sampler, and returns the new position. There is no error
//! estimation or step rejection; "adaptive" stepping in this engine only
//! means the frame-level step is scaled by zoom before it gets here.

use flowfield_core::{IntegrationMethod, Vec2};

/// Advances `position` by one step of `dt`, sampling `velocity` as many times
/// as `method` requires.
#[inline]
pub fn advance<F>(method: IntegrationMethod, position: Vec2, dt: f32, velocity: F) -> Vec2
where
    F: Fn(Vec2) -> Vec2,
{
    let k1 = velocity(position);
    advance_from(method, position, k1, dt, velocity)
}

/// Like [`advance`], but with the first stage `k1 = velocity(position)`
/// already sampled by the caller. The frame loop samples it anyway to color
/// the particle, so this saves one field evaluation per particle per frame.
#[inline]
pub fn advance_from<F>(
    method: IntegrationMethod,
    position: Vec2,
    k1: Vec2,
    dt: f32,
    velocity: F,
) -> Vec2
where
    F: Fn(Vec2) -> Vec2,
{
    match method {
        IntegrationMethod::Euler => position + k1 * dt,
        IntegrationMethod::Rk2 => {
            let k2 = velocity(position + k1 * (dt * 0.5));
            position + k2 * dt
        }
        IntegrationMethod::Rk4 => {
            let half = dt * 0.5;
            let k2 = velocity(position + k1 * half);
            let k3 = velocity(position + k2 * half);
            let k4 = velocity(position + k3 * dt);
            position + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
        }
    }
}
