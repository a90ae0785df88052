#![forbid(unsafe_code)]

//! Draw-state emission for factorviz.
//!
//! Turns a placed and fitted circle tree into a deterministic sequence of
//! circle descriptors, delivered through the [`CircleSink`] capability
//! interface. The geometry side never touches rendering types; embeddings
//! decide how a hue fraction or a debug alpha becomes pixels.

pub mod color;
pub mod emit;
pub mod sink;

pub use color::Rgba;
pub use emit::{Viewport, emit_layout};
pub use sink::{CircleSink, CollectSink, DebugCommand, DrawCommand};
