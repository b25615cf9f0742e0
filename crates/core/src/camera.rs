//! World-space camera: a center point and a zoom factor.
//!
//! The visible region is the square `center ± 1/zoom` on both axes. Input
//! handling lives outside this crate; the camera only exposes the operations
//! that input is translated into.

use crate::vector::Vec2;

/// Axis-aligned world-space rectangle visible through the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl ViewBounds {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.bottom && p.y <= self.top
    }
}

/// Pan/zoom camera over the normalized world plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    /// 1.0 shows [-1, 1]²; larger values zoom in.
    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Fractional zoom change per zoom step.
    pub zoom_speed: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
            zoom_speed: 0.1,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Visible half-extent on each axis.
    pub fn half_extent(&self) -> f32 {
        1.0 / self.zoom
    }

    /// The visible world rectangle.
    pub fn view_bounds(&self) -> ViewBounds {
        let half = self.half_extent();
        ViewBounds {
            left: self.x - half,
            right: self.x + half,
            bottom: self.y - half,
            top: self.y + half,
        }
    }

    /// Multiplies zoom by `1 + zoom_speed`, clamped to `max_zoom`.
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * (1.0 + self.zoom_speed)).min(self.max_zoom);
    }

    /// Multiplies zoom by `1 - zoom_speed`, clamped to `min_zoom`.
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom * (1.0 - self.zoom_speed)).max(self.min_zoom);
    }

    /// Moves the center by `(dx, dy) / zoom`, so a pan covers the same
    /// fraction of the screen at every zoom level.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.x += dx / self.zoom;
        self.y += dy / self.zoom;
    }

    /// Back to the origin at zoom 1. Zoom limits and speed are kept.
    pub fn reset(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
        self.zoom = 1.0;
    }

    /// Converts a pixel coordinate (origin top-left, y down) to world space.
    pub fn screen_to_world(&self, screen_x: f32, screen_y: f32, width: u32, height: u32) -> Vec2 {
        let nx = (screen_x / width as f32) * 2.0 - 1.0;
        let ny = 1.0 - (screen_y / height as f32) * 2.0;
        self.center() + Vec2::new(nx, ny) / self.zoom
    }
}
