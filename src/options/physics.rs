use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Physics", inline)]
#[serde(default)]
/// Constants for the rotation integrator and overscroll behaviour.
pub struct PhysicsOptions {
    /// Friction coefficient; force is `-friction_coeff * velocity`.
    #[schemars(title = "Friction", range(min = 0.0, max = 50.0), extend("step" = 0.5))]
    pub friction_coeff: f32,
    /// Spring pulling the ring onto the nearest slot (0 disables it).
    #[schemars(title = "Snap Spring", range(min = 0.0, max = 100.0), extend("step" = 1.0))]
    pub spring_constant: f32,
    /// Mass of the ring.
    #[schemars(skip)]
    pub mass: f32,
    /// Angular speed (rad/s) below which the ring counts as stopped.
    #[schemars(skip)]
    pub velocity_threshold: f32,
    /// Longest integration substep, in seconds.
    #[schemars(skip)]
    pub min_step_time: f32,
    /// How far past either end the ring may be dragged, in slots.
    #[schemars(title = "Overscroll", range(min = 0.0, max = 3.0), extend("step" = 0.1))]
    pub overscroll_slots: f32,
    /// Rate of the exponential ease back from overscroll, per second.
    #[schemars(skip)]
    pub overscroll_return_rate: f32,
    /// Distance from a slot (in slots) at which the spring lets go.
    #[schemars(skip)]
    pub settle_epsilon: f32,
}

impl Default for PhysicsOptions {
    fn default() -> Self {
        Self {
            friction_coeff: 10.0,
            spring_constant: 0.0,
            mass: 5.0,
            velocity_threshold: 0.1_f32.to_radians(),
            min_step_time: 1.0 / 300.0,
            overscroll_slots: 1.0,
            overscroll_return_rate: 4.0,
            settle_epsilon: 1.0e-3,
        }
    }
}
