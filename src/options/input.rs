use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Input", inline)]
#[serde(default)]
/// Touch handling and selection feedback parameters.
pub struct InputOptions {
    /// Rotation per viewport width of horizontal drag, in half turns.
    #[schemars(title = "Drag Factor", range(min = 0.05, max = 2.0), extend("step" = 0.05))]
    pub drag_factor: f32,
    /// Movement (px) from touch-down that turns a tap into a drag.
    #[schemars(title = "Selection Radius", range(min = 1.0, max = 200.0), extend("step" = 1.0))]
    pub selection_radius: f32,
    /// Duration of the touch-down pulse on the touched card, in ms.
    #[schemars(skip)]
    pub selection_scale_ms: u32,
    /// Relative growth of the touched card at the end of the pulse.
    #[schemars(skip)]
    pub selected_scale: f32,
    /// Curve of the touch-down pulse.
    #[schemars(skip)]
    pub selection_easing: EasingFunction,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            drag_factor: 0.25,
            selection_radius: 50.0,
            selection_scale_ms: 200,
            selected_scale: 0.2,
            selection_easing: EasingFunction::Linear,
        }
    }
}
