use std::f32::consts::TAU;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Layout", inline)]
#[serde(default)]
/// Ring geometry, culling window and card orientation.
pub struct LayoutOptions {
    /// Number of positions around the circle where a card can rest.
    #[schemars(title = "Slots", range(min = 1, max = 64))]
    pub slot_count: u32,
    /// Angle of slot 0, in radians.
    #[schemars(skip)]
    pub start_angle: f32,
    /// Number of slots shown before culling (0 disables culling).
    #[schemars(title = "Visible Slots", range(min = 0, max = 64))]
    pub visible_slot_count: u32,
    /// Number of cards that show a detail texture.
    #[schemars(title = "Visible Details", range(min = 0, max = 64))]
    pub visible_detail_count: u32,
    /// Off-screen cards kept loaded, split evenly ahead and behind.
    #[schemars(title = "Prefetch Cards", range(min = 0, max = 32))]
    pub prefetch_card_count: u32,
    /// Radius of the circle the cards are centered on.
    #[schemars(title = "Radius", range(min = 0.1, max = 20.0), extend("step" = 0.1))]
    pub radius: f32,
    /// Extra rotation of every card about the vertical axis, in radians.
    #[schemars(skip)]
    pub card_rotation: f32,
    /// Rotate cards to run along the tangent of the circle.
    #[schemars(title = "Face Tangent")]
    pub cards_face_tangent: bool,
    /// How strongly angular velocity tilts the cards.
    #[schemars(title = "Sway Sensitivity", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub sway_sensitivity: f32,
    /// Peak-to-peak sway limit, in radians.
    #[schemars(skip)]
    pub sway_range: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            slot_count: 10,
            start_angle: 0.0,
            visible_slot_count: 1,
            visible_detail_count: 3,
            prefetch_card_count: 0,
            radius: 1.0,
            card_rotation: 0.0,
            cards_face_tangent: false,
            sway_sensitivity: 0.0,
            sway_range: TAU / 3.0,
        }
    }
}
