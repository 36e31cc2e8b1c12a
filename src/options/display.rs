use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Fades, detail-texture placement and blending toggles.
pub struct DisplayOptions {
    /// Fade-in time for a freshly loaded texture, in ms.
    #[schemars(title = "Fade In (ms)", range(min = 0, max = 2000))]
    pub fade_in_duration_ms: u32,
    /// Cards over which distant textures ramp in (0 disables the ramp).
    #[schemars(title = "Rez-in Cards", range(min = 0.0, max = 10.0), extend("step" = 0.25))]
    pub rez_in_card_count: f32,
    /// Slots over which detail textures fade out past the last detail slot.
    #[schemars(title = "Detail Fade", range(min = 0.05, max = 4.0), extend("step" = 0.05))]
    pub detail_fade_rate: f32,
    /// Place detail textures below the card instead of above it.
    #[schemars(title = "Details Below Card")]
    pub draw_detail_below_card: bool,
    /// Center detail textures on the card instead of aligning left edges.
    #[schemars(title = "Center Details")]
    pub detail_textures_centered: bool,
    /// Draw a ruler from the card to its detail texture.
    #[schemars(title = "Ruler")]
    pub draw_ruler: bool,
    /// Ruler width in pixels.
    #[schemars(skip)]
    pub ruler_width: f32,
    /// Draw cards with blending (translucent card textures).
    #[schemars(title = "Blend Cards")]
    pub draw_cards_with_blending: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            fade_in_duration_ms: 250,
            rez_in_card_count: 0.0,
            detail_fade_rate: 0.5,
            draw_detail_below_card: false,
            detail_textures_centered: false,
            draw_ruler: false,
            ruler_width: 2.0,
            draw_cards_with_blending: false,
        }
    }
}
