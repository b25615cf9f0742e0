//! Error types for the flowfield core.

use thiserror::Error;

/// Errors produced by simulation operations.
///
/// Most conditions in the advection engine are resolved locally (invalid field
/// indices fall back to field 0, degenerate vectors normalize to zero), so
/// this enum only covers what a caller has to react to.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Growing the particle pool failed; the pool keeps its previous size.
    #[error("failed to allocate particle pool for {requested} particles")]
    AllocationFailed { requested: usize },

    /// A configuration value was out of its valid range.
    #[error("invalid config value for '{name}': {reason}")]
    InvalidConfig { name: String, reason: String },

    /// A field registry was built without any field definitions.
    #[error("field registry must contain at least one field")]
    EmptyRegistry,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Width or height was zero when creating a raster target.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// An I/O failure (snapshot write, config read).
    #[error("I/O error: {0}")]
    Io(String),
}

impl FlowError {
    /// Shorthand for an [`FlowError::InvalidConfig`] error.
    pub fn invalid_config(name: &str, reason: impl Into<String>) -> Self {
        FlowError::InvalidConfig {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
