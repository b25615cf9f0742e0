//! Particle state as drawable line segments.
//!
//! Each particle becomes one segment from its previous to its current
//! position. The tail end is drawn at half the particle's alpha so motion
//! reads as a streak that brightens toward the head.

use flowfield_advect::Particle;
use flowfield_core::{Rgba, Vec2};

/// Alpha multiplier at the tail (previous position) of a segment.
pub const TAIL_ALPHA_FACTOR: f32 = 0.5;

/// Interleaved `x, y, r, g, b, a` per vertex.
pub const FLOATS_PER_VERTEX: usize = 6;

/// One particle's motion over the last frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSegment {
    pub start: Vec2,
    pub end: Vec2,
    pub start_color: Rgba,
    pub end_color: Rgba,
}

impl TrailSegment {
    pub fn from_particle(particle: &Particle) -> Self {
        Self {
            start: particle.previous_position,
            end: particle.position,
            start_color: particle
                .color
                .with_alpha(particle.color.a * TAIL_ALPHA_FACTOR),
            end_color: particle.color,
        }
    }

    /// A freshly spawned particle has no motion yet.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Color at parameter `t` in [0, 1] from start to end.
    pub fn color_at(&self, t: f32) -> Rgba {
        let (a, b) = (self.start_color, self.end_color);
        Rgba::new(
            a.r + (b.r - a.r) * t,
            a.g + (b.g - a.g) * t,
            a.b + (b.b - a.b) * t,
            a.a + (b.a - a.a) * t,
        )
    }
}

/// Segments for every particle, in pool order.
pub fn segments(particles: &[Particle]) -> impl Iterator<Item = TrailSegment> + '_ {
    particles.iter().map(TrailSegment::from_particle)
}

/// Replaces `out` with a line-list vertex buffer: two vertices per particle,
/// tail first, [`FLOATS_PER_VERTEX`] floats each.
///
/// `out` keeps its allocation between frames.
pub fn write_vertices(particles: &[Particle], out: &mut Vec<f32>) {
    out.clear();
    out.reserve(particles.len() * 2 * FLOATS_PER_VERTEX);
    for seg in segments(particles) {
        for (pos, c) in [(seg.start, seg.start_color), (seg.end, seg.end_color)] {
            out.extend_from_slice(&[pos.x, pos.y, c.r, c.g, c.b, c.a]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowfield_core::color::{speed_color, PARTICLE_ALPHA};

    fn moving_particle() -> Particle {
        Particle {
            position: Vec2::new(0.5, 0.25),
            previous_position: Vec2::new(0.4, 0.2),
            color: speed_color(Vec2::new(1.0, 0.0)),
            lifetime: 1.0,
        }
    }

    #[test]
    fn segment_runs_from_previous_to_current() {
        let p = moving_particle();
        let seg = TrailSegment::from_particle(&p);
        assert_eq!(seg.start, p.previous_position);
        assert_eq!(seg.end, p.position);
        assert!(!seg.is_degenerate());
    }

    #[test]
    fn tail_has_half_alpha() {
        let seg = TrailSegment::from_particle(&moving_particle());
        assert_eq!(seg.end_color.a, PARTICLE_ALPHA);
        assert_eq!(seg.start_color.a, PARTICLE_ALPHA * 0.5);
        assert_eq!(seg.start_color.r, seg.end_color.r);
        assert_eq!(seg.start_color.g, seg.end_color.g);
    }

    #[test]
    fn color_at_interpolates_alpha() {
        let seg = TrailSegment::from_particle(&moving_particle());
        assert_eq!(seg.color_at(0.0), seg.start_color);
        assert_eq!(seg.color_at(1.0), seg.end_color);
        assert!((seg.color_at(0.5).a - PARTICLE_ALPHA * 0.75).abs() < 1e-6);
    }

    #[test]
    fn spawned_particle_is_degenerate() {
        let mut p = moving_particle();
        p.spawn_at(Vec2::new(0.1, 0.1), 0.0);
        assert!(TrailSegment::from_particle(&p).is_degenerate());
    }

    #[test]
    fn write_vertices_layout() {
        let particles = vec![moving_particle(); 3];
        let mut buf = vec![99.0; 5];
        write_vertices(&particles, &mut buf);
        assert_eq!(buf.len(), 3 * 2 * FLOATS_PER_VERTEX);
        // Tail vertex of the first particle.
        assert_eq!(&buf[0..2], &[0.4, 0.2]);
        assert_eq!(buf[5], PARTICLE_ALPHA * 0.5);
        // Head vertex.
        assert_eq!(&buf[6..8], &[0.5, 0.25]);
        assert_eq!(buf[11], PARTICLE_ALPHA);
    }
}
