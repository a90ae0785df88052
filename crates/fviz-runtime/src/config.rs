#![forbid(unsafe_code)]

//! Engine configuration.

use std::time::Duration;

/// Configuration for the factorviz engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Interpolation steps for one transition. Zero renders the final
    /// state immediately.
    pub anim_iterations: u32,
    /// Cadence the embedding's animation timer should call `tick` at.
    pub anim_tick_interval: Duration,
    /// HSV saturation of leaf-point fills.
    pub hsv_saturation: f64,
    /// HSV value of leaf-point fills.
    pub hsv_value: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            anim_iterations: 100,
            anim_tick_interval: Duration::from_millis(10),
            hsv_saturation: 0.6,
            hsv_value: 0.6,
        }
    }
}

impl EngineConfig {
    /// Override the interpolation step count.
    #[must_use]
    pub fn with_anim_iterations(mut self, iterations: u32) -> Self {
        self.anim_iterations = iterations;
        self
    }

    /// Override the suggested tick cadence.
    #[must_use]
    pub fn with_anim_tick_interval(mut self, interval: Duration) -> Self {
        self.anim_tick_interval = interval;
        self
    }

    /// Override the saturation and value of the fill palette.
    #[must_use]
    pub fn with_palette(mut self, saturation: f64, value: f64) -> Self {
        self.hsv_saturation = saturation;
        self.hsv_value = value;
        self
    }
}

// ---------------------------------------------------------------------------
