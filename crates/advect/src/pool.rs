//! Contiguous particle storage with a separate active count.
//!
//! The pool owns `capacity` slots but only the first `count` are simulated
//! and drawn. Growing past capacity reallocates once to
//! `max(new_count, ceil(capacity * 1.5))`; shrinking only lowers `count`, so
//! zooming back and forth does not thrash the allocator.

use flowfield_core::{FlowError, Rgba, Vec2};

/// Capacity multiplier applied when the pool has to grow.
pub const GROWTH_FACTOR: f64 = 1.5;

/// One advected tracer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Particle {
    pub position: Vec2,
    /// Position before the most recent step; the trail segment starts here.
    pub previous_position: Vec2,
    pub color: Rgba,
    /// Simulated time since the last (re)spawn.
    pub lifetime: f32,
}

impl Particle {
    /// Places the particle at `position` with no trail and the given age.
    #[inline]
    pub fn spawn_at(&mut self, position: Vec2, lifetime: f32) {
        self.position = position;
        self.previous_position = position;
        self.lifetime = lifetime;
    }
}

/// Fixed-capacity particle storage.
#[derive(Debug, Clone, Default)]
pub struct ParticlePool {
    slots: Vec<Particle>,
    count: usize,
}

impl ParticlePool {
    /// Allocates `capacity` slots, all active.
    ///
    /// Returns `FlowError::AllocationFailed` if the allocation cannot be made.
    pub fn with_capacity(capacity: usize) -> Result<Self, FlowError> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| FlowError::AllocationFailed {
                requested: capacity,
            })?;
        slots.resize(capacity, Particle::default());
        Ok(Self {
            slots,
            count: capacity,
        })
    }

    /// Number of active particles.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The active particles.
    pub fn active(&self) -> &[Particle] {
        &self.slots[..self.count]
    }

    pub fn active_mut(&mut self) -> &mut [Particle] {
        &mut self.slots[..self.count]
    }

    /// Sets the active count, growing storage if needed.
    ///
    /// A request of 0 is ignored. On allocation failure the pool is left
    /// exactly as it was and `FlowError::AllocationFailed` is returned.
    pub fn resize(&mut self, new_count: usize) -> Result<(), FlowError> {
        if new_count == 0 {
            return Ok(());
        }
        let capacity = self.capacity();
        if new_count > capacity {
            let grown = (capacity as f64 * GROWTH_FACTOR).ceil() as usize;
            let new_capacity = new_count.max(grown);
            self.slots
                .try_reserve_exact(new_capacity - capacity)
                .map_err(|_| FlowError::AllocationFailed {
                    requested: new_capacity,
                })?;
            self.slots.resize(new_capacity, Particle::default());
        }
        self.count = new_count;
        Ok(())
    }
}
