//! Resolving a [`FlowConfig`] from the command line.
//!
//! Layers, lowest priority first: built-in defaults, a JSON config file
//! (`--config`, strict), a JSON object of overrides (`--params`, lenient),
//! then the dedicated flags.

use crate::error::CliError;
use flowfield_core::{FlowConfig, IntegrationMethod};
use serde_json::Value;
use std::path::Path;

/// Dedicated flags that override individual config values.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub field: Option<usize>,
    pub method: Option<String>,
    pub seed: Option<u64>,
    pub particles: Option<usize>,
}

/// Reads a config file. Missing keys take their defaults; a mistyped value
/// or an unknown method name is an error.
pub fn load_config_file(path: &Path) -> Result<FlowConfig, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid config file {}: {e}", path.display())))
}

/// Applies every layer and validates the result.
pub fn resolve_config(
    config_path: Option<&Path>,
    params: &str,
    overrides: &Overrides,
) -> Result<FlowConfig, CliError> {
    let base = match config_path {
        Some(path) => load_config_file(path)?,
        None => FlowConfig::default(),
    };

    let params: Value = serde_json::from_str(params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    let Value::Object(params) = params else {
        return Err(CliError::Input("--params must be a JSON object".into()));
    };
    let mut merged = base.to_json();
    if let Value::Object(map) = &mut merged {
        map.extend(params);
    }
    let mut config = FlowConfig::from_json(&merged);

    if let Some(field) = overrides.field {
        config.field_index = field;
    }
    if let Some(name) = &overrides.method {
        config.integration_method = IntegrationMethod::from_name(name).ok_or_else(|| {
            CliError::Input(format!(
                "unknown integration method '{name}' (expected one of: {})",
                IntegrationMethod::ALL.map(IntegrationMethod::name).join(", ")
            ))
        })?;
    }
    if let Some(seed) = overrides.seed {
        config.seed = seed;
    }
    if let Some(particles) = overrides.particles {
        config.particle_count = particles;
    }

    config.validate()?;
    Ok(config)
}
