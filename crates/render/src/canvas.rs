//! Software trail canvas.
//!
//! A CPU stand-in for a persistent framebuffer: every frame the previous
//! image fades a little toward the background and the new segments are
//! added on top with additive blending, so trails build up and decay over
//! roughly a dozen frames. Channels accumulate in f32 and are only clamped
//! on export.

use crate::trails::{segments, TrailSegment};
use flowfield_advect::Particle;
use flowfield_core::{FlowError, Rgba, Vec2, ViewBounds};

/// Opacity of the background wash applied by [`TrailCanvas::fade`].
/// Each fade keeps `1 - FADE_ALPHA` of the trail.
pub const FADE_ALPHA: f32 = 0.08;

/// Upper bound on samples per segment, in multiples of the canvas
/// perimeter. Longer segments are drawn with coarser sampling.
const MAX_SAMPLES_PER_PERIMETER: usize = 2;

/// Accumulating RGB image of particle trails.
#[derive(Debug, Clone)]
pub struct TrailCanvas {
    width: u32,
    height: u32,
    background: Rgba,
    pixels: Vec<[f32; 3]>,
}

impl TrailCanvas {
    /// Canvas filled with `background`.
    ///
    /// Returns `FlowError::InvalidDimensions` if either side is zero, or
    /// `FlowError::AllocationFailed` if the buffer cannot be allocated.
    pub fn new(width: u32, height: u32, background: Rgba) -> Result<Self, FlowError> {
        if width == 0 || height == 0 {
            return Err(FlowError::InvalidDimensions);
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(FlowError::InvalidDimensions)?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| FlowError::AllocationFailed { requested: len })?;
        pixels.resize(len, [background.r, background.g, background.b]);
        Ok(Self {
            width,
            height,
            background,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    /// Accumulated color at `(x, y)` (origin top-left), unclamped, alpha 1.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b] = self.pixels[y as usize * self.width as usize + x as usize];
        Some(Rgba::new(r, g, b, 1.0))
    }

    /// Resets every pixel to the background.
    pub fn clear(&mut self) {
        let bg = [self.background.r, self.background.g, self.background.b];
        self.pixels.fill(bg);
    }

    /// Blends the background over the whole canvas at [`FADE_ALPHA`].
    pub fn fade(&mut self) {
        let bg = [self.background.r, self.background.g, self.background.b];
        let keep = 1.0 - FADE_ALPHA;
        for px in &mut self.pixels {
            for (c, b) in px.iter_mut().zip(bg) {
                *c = b + (*c - b) * keep;
            }
        }
    }

    /// Maps a world point to continuous pixel coordinates (y down).
    pub fn world_to_pixel(&self, p: Vec2, view: &ViewBounds) -> Vec2 {
        Vec2::new(
            (p.x - view.left) / view.width() * self.width as f32,
            (view.top - p.y) / view.height() * self.height as f32,
        )
    }

    /// Adds one segment with additive blending: each covered pixel gains
    /// `rgb * alpha`, with color and alpha interpolated along the segment.
    ///
    /// The end pixel is left out, so consecutive frames of one particle do
    /// not double up where their segments meet. Degenerate segments draw
    /// nothing.
    pub fn draw_segment(&mut self, segment: &TrailSegment, view: &ViewBounds) {
        if segment.is_degenerate() {
            return;
        }
        let a = self.world_to_pixel(segment.start, view);
        let b = self.world_to_pixel(segment.end, view);
        if !(a.is_finite() && b.is_finite()) {
            return;
        }
        let delta = b - a;
        let limit = MAX_SAMPLES_PER_PERIMETER * 2 * (self.width as usize + self.height as usize);
        let steps = (delta.x.abs().max(delta.y.abs()).ceil() as usize).clamp(1, limit);
        for i in 0..steps {
            let t = i as f32 / steps as f32;
            let at = a + delta * t;
            let c = segment.color_at(t);
            self.add(at, c);
        }
    }

    /// Draws every particle's trail segment.
    pub fn draw_particles(&mut self, particles: &[Particle], view: &ViewBounds) {
        for seg in segments(particles) {
            self.draw_segment(&seg, view);
        }
    }

    /// One display frame: clears if `clear` is set, otherwise fades, then
    /// draws `particles`.
    pub fn present(&mut self, particles: &[Particle], view: &ViewBounds, clear: bool) {
        if clear {
            self.clear();
        } else {
            self.fade();
        }
        self.draw_particles(particles, view);
    }

    /// The canvas as RGBA8, row-major from the top-left, alpha 255.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&[r, g, b]| Rgba::new(r, g, b, 1.0).to_rgba8())
            .collect()
    }

    #[inline]
    fn add(&mut self, at: Vec2, c: Rgba) {
        if at.x < 0.0 || at.y < 0.0 {
            return;
        }
        let (x, y) = (at.x as usize, at.y as usize);
        let (w, h) = (self.width as usize, self.height as usize);
        if x >= w || y >= h {
            return;
        }
        let px = &mut self.pixels[y * w + x];
        px[0] += c.r * c.a;
        px[1] += c.g * c.a;
        px[2] += c.b * c.a;
    }
}
