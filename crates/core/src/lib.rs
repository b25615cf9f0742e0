#![deny(unsafe_code)]
//! Core types for the flowfield particle advection engine.
//!
//! Provides the analytic vector fields and their [`FieldRegistry`], the
//! pan/zoom [`Camera`] and its [`ViewBounds`], the [`FlowConfig`] simulation
//! parameters, the speed-to-color gradient, the `Xorshift64` PRNG and the
//! shared [`FlowError`] type.

pub mod camera;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod params;
pub mod prng;
pub mod vector;

pub use camera::{Camera, ViewBounds};
pub use color::Rgba;
pub use config::{FlowConfig, IntegrationMethod};
pub use error::FlowError;
pub use field::{FieldKind, FieldRegistry};
pub use prng::Xorshift64;
pub use vector::Vec2;
