#![forbid(unsafe_code)]

//! Tick-driven engine for factorviz.
//!
//! Wraps the core layout pipeline (factorize, build, place, fit, emit)
//! behind a small imperative surface: set a factor, toggle debug output,
//! report resizes, and tick an external timer to drive transitions. The
//! embedding reads back interpolated circle visuals each frame and stays
//! in charge of actual rendering.

pub mod config;
pub mod engine;
pub mod transition;

pub use config::EngineConfig;
pub use engine::Engine;
pub use fviz_core::factor::FactorError;
pub use fviz_draw::{Rgba, Viewport};
pub use transition::{CircleVisual, DrawCircle, Transition};
