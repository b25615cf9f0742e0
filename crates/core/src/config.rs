//! Simulation parameters consumed by the advection engine.
//!
//! [`FlowConfig`] is a plain serde struct: it can be deserialized strictly
//! from a config file, built leniently from a JSON object with
//! [`FlowConfig::from_json`] (bad keys fall back to defaults), and described
//! with [`FlowConfig::param_schema`] for front ends.

use crate::error::FlowError;
use crate::params::{param_bool, param_f32, param_str, param_u64, param_usize};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

const DEFAULT_FIELD_INDEX: usize = 1;
const DEFAULT_FIELD_SCALE: f32 = 1.0;
const DEFAULT_INTEGRATION_STEP: f32 = 0.01;
const DEFAULT_SIMULATION_SPEED: f32 = 1.0;
const DEFAULT_PARTICLE_LIFETIME: f32 = 10.0;
const DEFAULT_PARTICLE_COUNT: usize = 5000;
const DEFAULT_FORCED_RESPAWN_PROBABILITY: f32 = 0.002;
const DEFAULT_FORCED_RESPAWN_FRACTION: f32 = 0.005;
const DEFAULT_SEED: u64 = 42;

/// Fixed-step ODE scheme used to advance particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationMethod {
    /// Forward Euler, one field sample per step.
    Euler,
    /// Midpoint Runge-Kutta, two samples per step.
    Rk2,
    /// Classic fourth-order Runge-Kutta, four samples per step.
    #[default]
    Rk4,
}

impl IntegrationMethod {
    pub const ALL: [IntegrationMethod; 3] = [Self::Euler, Self::Rk2, Self::Rk4];

    pub fn name(self) -> &'static str {
        match self {
            Self::Euler => "euler",
            Self::Rk2 => "rk2",
            Self::Rk4 => "rk4",
        }
    }

    /// Case-insensitive lookup by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }

    /// Field evaluations per step.
    pub fn stages(self) -> usize {
        match self {
            Self::Euler => 1,
            Self::Rk2 => 2,
            Self::Rk4 => 4,
        }
    }
}

impl fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters for one advection session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Active field in the registry. Unknown indices evaluate field 0.
    pub field_index: usize,
    /// Uniform multiplier on field output.
    pub field_scale: f32,
    pub integration_method: IntegrationMethod,
    /// Base step, divided by zoom every frame.
    pub integration_step: f32,
    pub simulation_speed: f32,
    pub paused: bool,
    /// Seconds of simulated time before a particle respawns.
    pub particle_lifetime: f32,
    /// Reference particle count at zoom 1.
    pub particle_count: usize,
    /// Resize the pool to keep density constant when the zoom changes.
    pub adapt_density_on_zoom: bool,
    /// Per-particle, per-frame chance of a forced respawn.
    pub forced_respawn_probability: f32,
    /// Cap on forced respawns per frame, as a fraction of the active count.
    pub forced_respawn_fraction: f32,
    /// Seed for spawn positions, jitter and forced respawns.
    pub seed: u64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            field_index: DEFAULT_FIELD_INDEX,
            field_scale: DEFAULT_FIELD_SCALE,
            integration_method: IntegrationMethod::default(),
            integration_step: DEFAULT_INTEGRATION_STEP,
            simulation_speed: DEFAULT_SIMULATION_SPEED,
            paused: false,
            particle_lifetime: DEFAULT_PARTICLE_LIFETIME,
            particle_count: DEFAULT_PARTICLE_COUNT,
            adapt_density_on_zoom: true,
            forced_respawn_probability: DEFAULT_FORCED_RESPAWN_PROBABILITY,
            forced_respawn_fraction: DEFAULT_FORCED_RESPAWN_FRACTION,
            seed: DEFAULT_SEED,
        }
    }
}

impl FlowConfig {
    /// Builds a config from a JSON object, taking defaults for missing or
    /// mistyped keys. An unrecognized `integration_method` name also falls
    /// back to the default.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            field_index: param_usize(params, "field_index", d.field_index),
            field_scale: param_f32(params, "field_scale", d.field_scale),
            integration_method: param_str(params, "integration_method")
                .and_then(IntegrationMethod::from_name)
                .unwrap_or(d.integration_method),
            integration_step: param_f32(params, "integration_step", d.integration_step),
            simulation_speed: param_f32(params, "simulation_speed", d.simulation_speed),
            paused: param_bool(params, "paused", d.paused),
            particle_lifetime: param_f32(params, "particle_lifetime", d.particle_lifetime),
            particle_count: param_usize(params, "particle_count", d.particle_count),
            adapt_density_on_zoom: param_bool(
                params,
                "adapt_density_on_zoom",
                d.adapt_density_on_zoom,
            ),
            forced_respawn_probability: param_f32(
                params,
                "forced_respawn_probability",
                d.forced_respawn_probability,
            ),
            forced_respawn_fraction: param_f32(
                params,
                "forced_respawn_fraction",
                d.forced_respawn_fraction,
            ),
            seed: param_u64(params, "seed", d.seed),
        }
    }

    /// Current values as a JSON object.
    pub fn to_json(&self) -> Value {
        json!({
            "field_index": self.field_index,
            "field_scale": self.field_scale,
            "integration_method": self.integration_method.name(),
            "integration_step": self.integration_step,
            "simulation_speed": self.simulation_speed,
            "paused": self.paused,
            "particle_lifetime": self.particle_lifetime,
            "particle_count": self.particle_count,
            "adapt_density_on_zoom": self.adapt_density_on_zoom,
            "forced_respawn_probability": self.forced_respawn_probability,
            "forced_respawn_fraction": self.forced_respawn_fraction,
            "seed": self.seed,
        })
    }

    /// Describes every parameter: type, default, range and description.
    pub fn param_schema() -> Value {
        json!({
            "field_index": {
                "type": "integer",
                "default": DEFAULT_FIELD_INDEX,
                "min": 0,
                "description": "Active vector field; unknown indices use field 0"
            },
            "field_scale": {
                "type": "number",
                "default": DEFAULT_FIELD_SCALE,
                "description": "Uniform multiplier on field velocity"
            },
            "integration_method": {
                "type": "string",
                "default": IntegrationMethod::default().name(),
                "enum": IntegrationMethod::ALL.map(IntegrationMethod::name),
                "description": "Fixed-step integration scheme"
            },
            "integration_step": {
                "type": "number",
                "default": DEFAULT_INTEGRATION_STEP,
                "min": 0.0,
                "description": "Base step; divided by zoom each frame"
            },
            "simulation_speed": {
                "type": "number",
                "default": DEFAULT_SIMULATION_SPEED,
                "min": 0.0,
                "description": "Multiplier on real frame time"
            },
            "paused": {
                "type": "boolean",
                "default": false,
                "description": "Freeze positions, colors and lifetimes"
            },
            "particle_lifetime": {
                "type": "number",
                "default": DEFAULT_PARTICLE_LIFETIME,
                "min": 0.0,
                "description": "Simulated seconds before a particle respawns"
            },
            "particle_count": {
                "type": "integer",
                "default": DEFAULT_PARTICLE_COUNT,
                "min": 1,
                "description": "Reference particle count at zoom 1"
            },
            "adapt_density_on_zoom": {
                "type": "boolean",
                "default": true,
                "description": "Resize the pool on zoom to keep density constant"
            },
            "forced_respawn_probability": {
                "type": "number",
                "default": DEFAULT_FORCED_RESPAWN_PROBABILITY,
                "min": 0.0,
                "max": 1.0,
                "description": "Per-particle, per-frame forced respawn chance"
            },
            "forced_respawn_fraction": {
                "type": "number",
                "default": DEFAULT_FORCED_RESPAWN_FRACTION,
                "min": 0.0,
                "max": 1.0,
                "description": "Per-frame cap on forced respawns, as a fraction of the pool"
            },
            "seed": {
                "type": "integer",
                "default": DEFAULT_SEED,
                "description": "PRNG seed"
            }
        })
    }

    /// Rejects values the engine cannot run with.
    pub fn validate(&self) -> Result<(), FlowError> {
        if !self.field_scale.is_finite() {
            return Err(FlowError::invalid_config("field_scale", "must be finite"));
        }
        if !(self.integration_step.is_finite() && self.integration_step > 0.0) {
            return Err(FlowError::invalid_config(
                "integration_step",
                "must be finite and positive",
            ));
        }
        if !(self.simulation_speed.is_finite() && self.simulation_speed >= 0.0) {
            return Err(FlowError::invalid_config(
                "simulation_speed",
                "must be finite and non-negative",
            ));
        }
        if !(self.particle_lifetime.is_finite() && self.particle_lifetime > 0.0) {
            return Err(FlowError::invalid_config(
                "particle_lifetime",
                "must be finite and positive",
            ));
        }
        if self.particle_count == 0 {
            return Err(FlowError::invalid_config("particle_count", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.forced_respawn_probability) {
            return Err(FlowError::invalid_config(
                "forced_respawn_probability",
                "must be in [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.forced_respawn_fraction) {
            return Err(FlowError::invalid_config(
                "forced_respawn_fraction",
                "must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(FlowConfig::default().validate().is_ok());
    }

    #[test]
    fn from_empty_json_equals_default() {
        assert_eq!(FlowConfig::from_json(&json!({})), FlowConfig::default());
    }

    #[test]
    fn from_json_reads_custom_values() {
        let cfg = FlowConfig::from_json(&json!({
            "field_index": 7,
            "field_scale": 0.5,
            "integration_method": "Euler",
            "integration_step": 0.02,
            "paused": true,
            "particle_count": 12000,
            "seed": 9,
        }));
        assert_eq!(cfg.field_index, 7);
        assert_eq!(cfg.field_scale, 0.5);
        assert_eq!(cfg.integration_method, IntegrationMethod::Euler);
        assert_eq!(cfg.integration_step, 0.02);
        assert!(cfg.paused);
        assert_eq!(cfg.particle_count, 12000);
        assert_eq!(cfg.seed, 9);
        assert_eq!(cfg.particle_lifetime, DEFAULT_PARTICLE_LIFETIME);
    }

    #[test]
    fn from_json_unknown_method_falls_back() {
        let cfg = FlowConfig::from_json(&json!({"integration_method": "verlet"}));
        assert_eq!(cfg.integration_method, IntegrationMethod::Rk4);
    }

    #[test]
    fn to_json_round_trips_through_from_json() {
        let mut cfg = FlowConfig::default();
        cfg.field_index = 3;
        cfg.integration_method = IntegrationMethod::Rk2;
        cfg.adapt_density_on_zoom = false;
        assert_eq!(FlowConfig::from_json(&cfg.to_json()), cfg);
    }

    #[test]
    fn serde_uses_lowercase_method_names_and_defaults() {
        let cfg: FlowConfig =
            serde_json::from_str(r#"{"integration_method": "rk2", "field_scale": 2.0}"#).unwrap();
        assert_eq!(cfg.integration_method, IntegrationMethod::Rk2);
        assert_eq!(cfg.field_scale, 2.0);
        assert_eq!(cfg.particle_count, DEFAULT_PARTICLE_COUNT);
        let text = serde_json::to_string(&cfg).unwrap();
        assert!(text.contains("\"rk2\""), "{text}");
    }

    #[test]
    fn schema_covers_every_json_key() {
        let schema = FlowConfig::param_schema();
        let values = FlowConfig::default().to_json();
        for key in values.as_object().unwrap().keys() {
            let entry = schema.get(key);
            assert!(entry.is_some(), "schema missing parameter: {key}");
            let entry = entry.unwrap();
            assert!(entry.get("type").is_some(), "{key} missing 'type'");
            assert!(entry.get("default").is_some(), "{key} missing 'default'");
            assert!(entry.get("description").is_some(), "{key} missing 'description'");
        }
    }

    #[test]
    fn validate_rejects_bad_values() {
        let cases: Vec<(&str, FlowConfig)> = vec![
            ("integration_step", FlowConfig { integration_step: 0.0, ..FlowConfig::default() }),
            ("integration_step", FlowConfig { integration_step: f32::NAN, ..FlowConfig::default() }),
            ("simulation_speed", FlowConfig { simulation_speed: -1.0, ..FlowConfig::default() }),
            ("particle_lifetime", FlowConfig { particle_lifetime: 0.0, ..FlowConfig::default() }),
            ("particle_count", FlowConfig { particle_count: 0, ..FlowConfig::default() }),
            ("field_scale", FlowConfig { field_scale: f32::INFINITY, ..FlowConfig::default() }),
            (
                "forced_respawn_probability",
                FlowConfig { forced_respawn_probability: 1.5, ..FlowConfig::default() },
            ),
            (
                "forced_respawn_fraction",
                FlowConfig { forced_respawn_fraction: -0.1, ..FlowConfig::default() },
            ),
        ];
        for (key, cfg) in cases {
            match cfg.validate() {
                Err(FlowError::InvalidConfig { name, .. }) => assert_eq!(name, key),
                other => panic!("expected InvalidConfig for {key}, got {other:?}"),
            }
        }
    }

    #[test]
    fn method_names_round_trip() {
        for m in IntegrationMethod::ALL {
            assert_eq!(IntegrationMethod::from_name(m.name()), Some(m));
            assert_eq!(m.to_string(), m.name());
        }
        assert_eq!(IntegrationMethod::from_name("RK4"), Some(IntegrationMethod::Rk4));
        assert_eq!(IntegrationMethod::from_name("midpoint"), None);
    }

    #[test]
    fn stages_match_scheme() {
        assert_eq!(IntegrationMethod::Euler.stages(), 1);
        assert_eq!(IntegrationMethod::Rk2.stages(), 2);
        assert_eq!(IntegrationMethod::Rk4.stages(), 4);
    }
}
