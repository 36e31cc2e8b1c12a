//! Easing curves for time-driven card effects.
//!
//! Used by the selection pulse; the curve is part of the input options so a
//! host can pick the feel it wants from TOML.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing curve mapping normalized progress `t ∈ [0, 1]` to `[0, 1]`.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Straight line, no easing.
    #[default]
    Linear,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Hermite smoothstep (`3t² - 2t³`), slow at both ends.
    SmoothStep,
    /// Cubic Bezier-style curve with two interior control values.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First interior control value.
        c1: f32,
        /// Second interior control value.
        c2: f32,
    },
}

impl EasingFunction {
    /// Evaluate the curve at `t`, clamping the input to `[0, 1]` first.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match *self {
            Self::Linear => t,
            Self::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::CubicHermite { c1, c2 } => {
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
        }
    }
}
