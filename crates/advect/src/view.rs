//! Per-frame snapshot of the visible rectangle.

use flowfield_core::{Camera, ViewBounds, Vec2, Xorshift64};

/// Fraction of the view size added on every side before a particle counts as
/// having left the view.
pub const VIEW_MARGIN_FRACTION: f32 = 0.15;

/// View bounds plus the derived sizes and margins the population logic
/// needs. Computed once per frame, never per particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewCache {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub margin_x: f32,
    pub margin_y: f32,
}

impl ViewCache {
    pub fn from_bounds(bounds: ViewBounds) -> Self {
        let width = bounds.width();
        let height = bounds.height();
        Self {
            left: bounds.left,
            right: bounds.right,
            bottom: bounds.bottom,
            top: bounds.top,
            width,
            height,
            margin_x: width * VIEW_MARGIN_FRACTION,
            margin_y: height * VIEW_MARGIN_FRACTION,
        }
    }

    pub fn from_camera(camera: &Camera) -> Self {
        Self::from_bounds(camera.view_bounds())
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// True once `p` is strictly beyond the margined view on any side.
    ///
    /// A point exactly on the margin is still inside. Non-finite points are
    /// always outside, so a diverging particle is recycled instead of lost.
    #[inline]
    pub fn is_outside(&self, p: Vec2) -> bool {
        let inside = p.x >= self.left - self.margin_x
            && p.x <= self.right + self.margin_x
            && p.y >= self.bottom - self.margin_y
            && p.y <= self.top + self.margin_y;
        !inside
    }

    /// Uniformly random point in the (unmargined) view.
    #[inline]
    pub fn random_point(&self, rng: &mut Xorshift64) -> Vec2 {
        Vec2::new(
            rng.next_range(self.left, self.right),
            rng.next_range(self.bottom, self.top),
        )
    }

    /// Inclusive containment in the unmargined view.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.bottom && p.y <= self.top
    }
}
