//! Draw intent handed to the host renderer.
//!
//! The engine decides what is drawn, where, and how faded; the
//! [`Renderer`] owns every GPU concern. Cards are emitted back to front by
//! index (highest first), followed by the detail textures.

mod detail;
mod fade;

use glam::Mat4;

pub use detail::{
    layout_detail, project_to_pixels, DetailLayout, DetailOffsets, ScreenRect,
    RULER_PADDING,
};
pub use fade::{animated_alpha, ramp_alpha, FadeConstants, BLEND_CUTOFF};

use crate::camera::Viewport;
use crate::card::{GeometryHandle, TextureHandle};

/// Per-frame camera state, sent before any draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// World-to-eye matrix.
    pub view: Mat4,
    /// Eye-to-clip matrix.
    pub projection: Mat4,
    /// Surface size.
    pub viewport: Viewport,
}

/// Which texture(s) a card samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextureBinding {
    /// The host's shared loading texture only.
    Loading,
    /// The card's own texture only.
    Card(TextureHandle),
    /// Loading texture blended toward `to` by the draw's fade amount.
    Blend {
        /// Card texture, or `None` to blend loading onto itself.
        to: Option<TextureHandle>,
    },
}

impl TextureBinding {
    /// Binding for a card whose texture is `loaded` with the given fade.
    #[must_use]
    pub fn for_fade(loaded: Option<TextureHandle>, fade: f32) -> Self {
        if fade >= 1.0 || fade < BLEND_CUTOFF {
            match loaded {
                Some(handle) if fade >= 1.0 => Self::Card(handle),
                _ => Self::Loading,
            }
        } else {
            Self::Blend { to: loaded }
        }
    }
}

/// Which mesh a card is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometrySource {
    /// The card's own mesh.
    Card(GeometryHandle),
    /// The host's placeholder while geometry loads.
    Loading,
    /// The host's default mesh, or the unit quad if it has none.
    Default,
}

/// One card to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardDraw {
    /// Card index.
    pub index: usize,
    /// Card-to-world matrix.
    pub model: Mat4,
    /// Blend amount for the fragment stage.
    pub fade: FadeConstants,
    /// Texture binding.
    pub texture: TextureBinding,
    /// Mesh to draw.
    pub geometry: GeometrySource,
    /// Draw with alpha blending enabled.
    pub blended: bool,
}

/// One detail texture to draw in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetailDraw {
    /// Card index the detail belongs to.
    pub index: usize,
    /// Detail texture.
    pub texture: TextureHandle,
    /// Opacity for both the texture and ruler.
    pub alpha: f32,
    /// Where to draw.
    pub layout: DetailLayout,
}

/// Host-side consumer of draw intent.
pub trait Renderer {
    /// Called once per tick before any draw.
    fn begin_frame(&mut self, frame: &FrameInfo) {
        let _ = frame;
    }

    /// Draw one card.
    fn draw_card(&mut self, draw: &CardDraw);

    /// Draw one detail texture.
    fn draw_detail(&mut self, draw: &DetailDraw);
}

/// Renderer that records every draw, for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    /// Last frame info received.
    pub frame: Option<FrameInfo>,
    /// Card draws of the last frame.
    pub cards: Vec<CardDraw>,
    /// Detail draws of the last frame.
    pub details: Vec<DetailDraw>,
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self, frame: &FrameInfo) {
        self.frame = Some(*frame);
        self.cards.clear();
        self.details.clear();
    }

    fn draw_card(&mut self, draw: &CardDraw) {
        self.cards.push(*draw);
    }

    fn draw_detail(&mut self, draw: &DetailDraw) {
        self.details.push(*draw);
    }
}
