//! PNG export of a [`TrailCanvas`].
//!
//! Feature-gated behind `png` (default on) so embedders that only need the
//! canvas do not pull in the `image` crate.

use crate::canvas::TrailCanvas;
use flowfield_core::FlowError;
use std::path::Path;

/// Writes the canvas as an 8-bit RGBA PNG.
///
/// Returns `FlowError::Io` on encode or write failure.
pub fn write_png(canvas: &TrailCanvas, path: &Path) -> Result<(), FlowError> {
    let img = image::RgbaImage::from_raw(canvas.width(), canvas.height(), canvas.to_rgba8())
        .ok_or_else(|| FlowError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FlowError::Io(e.to_string()))?;
    log::info!(
        "wrote {}x{} snapshot to {}",
        canvas.width(),
        canvas.height(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowfield_advect::{Command, Visualizer};
    use flowfield_core::{FlowConfig, Rgba};

    #[test]
    fn write_png_round_trip() {
        let bg = Rgba::from_hex("#1a1a1a").unwrap();
        let canvas = TrailCanvas::new(24, 16, bg).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.png");

        write_png(&canvas, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 24);
        assert_eq!(img.height(), 16);
        assert_eq!(img.get_pixel(0, 0).0, [26, 26, 26, 255]);
    }

    #[test]
    fn rendered_session_leaves_trails() {
        let config = FlowConfig {
            particle_count: 1500,
            ..FlowConfig::default()
        };
        let mut vis = Visualizer::new(config).unwrap();
        let mut canvas = TrailCanvas::new(64, 64, Rgba::BLACK).unwrap();
        vis.apply(Command::SelectField(6)).unwrap();
        for _ in 0..30 {
            vis.frame(1.0 / 30.0);
            let clear = vis.take_clear_request();
            canvas.present(vis.particles(), &vis.camera().view_bounds(), clear);
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gyre.png");
        write_png(&canvas, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        let lit = img.pixels().filter(|p| p.0[..3].iter().any(|&c| c > 0)).count();
        assert!(lit > 64, "only {lit} lit pixels");
    }

    #[test]
    fn write_png_to_missing_directory_is_io_error() {
        let canvas = TrailCanvas::new(4, 4, Rgba::BLACK).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.png");
        assert!(matches!(write_png(&canvas, &path), Err(FlowError::Io(_))));
    }
}
