//! An interactive session: camera, parameters and particles behind a small
//! command vocabulary.
//!
//! Front ends translate their own input (keys, scripts, RPC) into
//! [`Command`]s and call [`Visualizer::apply`], then [`Visualizer::frame`]
//! once per rendered frame.

use crate::pool::Particle;
use crate::system::{FrameStats, ParticleSystem};
use flowfield_core::{Camera, FieldRegistry, FlowConfig, FlowError};
use serde_json::{json, Value};

/// World units (at zoom 1) moved by one pan step.
pub const PAN_STEP: f32 = 0.1;

/// Particle layout for [`Command::Redistribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distribution {
    Grid,
    Uniform,
}

/// Everything a front end can ask of a running session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Switch the active field. Unknown indices evaluate field 0.
    SelectField(usize),
    ZoomIn,
    ZoomOut,
    /// Pan by `(dx, dy)` screen-relative units; see [`Camera::pan`].
    Pan { dx: f32, dy: f32 },
    ResetCamera,
    Redistribute(Distribution),
    TogglePause,
}

impl Command {
    pub fn pan_up() -> Self {
        Self::Pan { dx: 0.0, dy: PAN_STEP }
    }

    pub fn pan_down() -> Self {
        Self::Pan { dx: 0.0, dy: -PAN_STEP }
    }

    pub fn pan_left() -> Self {
        Self::Pan { dx: -PAN_STEP, dy: 0.0 }
    }

    pub fn pan_right() -> Self {
        Self::Pan { dx: PAN_STEP, dy: 0.0 }
    }

    /// Parses the short script form used by the CLI: `field:N`, `zoom-in`,
    /// `zoom-out`, `up`, `down`, `left`, `right`, `reset`, `grid`,
    /// `uniform`, `pause`. Case insensitive.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim().to_ascii_lowercase();
        if let Some(index) = text.strip_prefix("field:") {
            return index.parse().ok().map(Self::SelectField);
        }
        let cmd = match text.as_str() {
            "zoom-in" | "+" => Self::ZoomIn,
            "zoom-out" | "-" => Self::ZoomOut,
            "up" => Self::pan_up(),
            "down" => Self::pan_down(),
            "left" => Self::pan_left(),
            "right" => Self::pan_right(),
            "reset" => Self::ResetCamera,
            "grid" => Self::Redistribute(Distribution::Grid),
            "uniform" => Self::Redistribute(Distribution::Uniform),
            "pause" => Self::TogglePause,
            _ => return None,
        };
        Some(cmd)
    }
}

/// Camera, parameters and particle system for one running visualization.
#[derive(Debug, Clone)]
pub struct Visualizer {
    camera: Camera,
    config: FlowConfig,
    system: ParticleSystem,
    clear_requested: bool,
}

impl Visualizer {
    /// Session over the built-in fields, with particles laid out on a grid
    /// over the default view.
    pub fn new(config: FlowConfig) -> Result<Self, FlowError> {
        Self::with_registry(config, FieldRegistry::builtin())
    }

    pub fn with_registry(config: FlowConfig, registry: FieldRegistry) -> Result<Self, FlowError> {
        let camera = Camera::new();
        let mut system = ParticleSystem::new(&config, registry, &camera)?;
        system.redistribute_grid(&camera, &config);
        log::info!(
            "{} particles on '{}' ({})",
            system.particles().len(),
            system.registry().name(system.registry().resolve(config.field_index)),
            config.integration_method
        );
        Ok(Self {
            camera,
            config,
            system,
            clear_requested: false,
        })
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    pub fn particles(&self) -> &[Particle] {
        self.system.particles()
    }

    /// Name of the field actually being evaluated.
    pub fn field_name(&self) -> &'static str {
        let registry = self.system.registry();
        registry.name(registry.resolve(self.config.field_index))
    }

    /// Returns whether the trail canvas should be wiped, and resets the flag.
    pub fn take_clear_request(&mut self) -> bool {
        std::mem::take(&mut self.clear_requested)
    }

    /// Applies one command.
    ///
    /// Only a zoom change with density adaptation can fail, and only on
    /// allocation failure. The zoom and the redistribution still happen; the
    /// pool just keeps its previous size.
    pub fn apply(&mut self, command: Command) -> Result<(), FlowError> {
        match command {
            Command::SelectField(index) => {
                let registry = self.system.registry();
                if !registry.contains(index) {
                    log::warn!(
                        "field {index} does not exist, evaluating '{}' instead",
                        registry.name(registry.resolve(index))
                    );
                }
                self.config.field_index = index;
                self.system.redistribute_uniform(&self.camera, &self.config);
                self.clear_requested = true;
                log::info!("field {index}: {}", self.field_name());
            }
            Command::ZoomIn | Command::ZoomOut => {
                let old_zoom = self.camera.zoom;
                if command == Command::ZoomIn {
                    self.camera.zoom_in();
                } else {
                    self.camera.zoom_out();
                }
                if self.camera.zoom != old_zoom {
                    return self.on_zoom_changed();
                }
            }
            Command::Pan { dx, dy } => self.camera.pan(dx, dy),
            Command::ResetCamera => {
                self.camera.reset();
                log::info!("camera reset");
            }
            Command::Redistribute(Distribution::Grid) => {
                self.system.redistribute_grid(&self.camera, &self.config);
            }
            Command::Redistribute(Distribution::Uniform) => {
                self.system.redistribute_uniform(&self.camera, &self.config);
            }
            Command::TogglePause => {
                self.config.paused = !self.config.paused;
                log::info!("{}", if self.config.paused { "paused" } else { "resumed" });
            }
        }
        Ok(())
    }

    fn on_zoom_changed(&mut self) -> Result<(), FlowError> {
        let adapted = if self.config.adapt_density_on_zoom {
            self.system.adjust_count_for_zoom(&self.camera, &self.config)
        } else {
            Ok(false)
        };
        self.system.redistribute_uniform(&self.camera, &self.config);
        log::info!(
            "zoom {:.2}, {} particles",
            self.camera.zoom,
            self.system.particles().len()
        );
        adapted.map(|_| ())
    }

    /// Runs one frame of `dt` real seconds.
    pub fn frame(&mut self, dt: f32) -> FrameStats {
        self.system.update(&self.camera, &self.config, dt)
    }

    /// Session state as a JSON object: the parameters plus camera, active
    /// field and particle count.
    pub fn params(&self) -> Value {
        json!({
            "config": self.config.to_json(),
            "camera": {
                "x": self.camera.x,
                "y": self.camera.y,
                "zoom": self.camera.zoom,
            },
            "field": self.field_name(),
            "particles": self.particles().len(),
        })
    }
}
