#![deny(unsafe_code)]
//! Turning particle state into pictures.
//!
//! [`trails`] converts particles into tail-to-head line segments (and a
//! GPU-style vertex buffer). [`canvas`] is a software persistent framebuffer
//! that fades and accumulates those segments. With the default `png` feature,
//! [`snapshot`] writes a canvas to disk.

pub mod canvas;
pub mod trails;

#[cfg(feature = "png")]
pub mod snapshot;

pub use canvas::TrailCanvas;
pub use trails::TrailSegment;
