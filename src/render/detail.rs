//! Screen-space placement of detail textures and their rulers.
//!
//! Pixel coordinates here have their origin at the bottom-left of the
//! viewport with `y` growing upward, matching an orthographic projection of
//! `(0, width) × (0, height)`.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::camera::Viewport;
use crate::card::TextureHandle;
use crate::options::DisplayOptions;
use crate::picking::CARD_VERTICES;

/// Gap kept between the ruler and the card or screen edge, in pixels.
pub const RULER_PADDING: f32 = 5.0;

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Left edge.
    pub x0: f32,
    /// Bottom edge.
    pub y0: f32,
    /// Right edge.
    pub x1: f32,
    /// Top edge.
    pub y1: f32,
}

impl ScreenRect {
    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// Project `point` through `clip_from_model` into rounded pixel coordinates.
/// The returned `z` is the quad depth, `-(ndc_z + 1) / 2`.
///
/// Returns `None` when the point projects to infinity.
#[must_use]
pub fn project_to_pixels(
    clip_from_model: Mat4,
    point: Vec3,
    viewport: Viewport,
) -> Option<Vec3> {
    let clip = clip_from_model * Vec4::from((point, 1.0));
    if clip.w == 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(Vec3::new(
        ((ndc.x + 1.0) * 0.5 * viewport.width).round(),
        ((ndc.y + 1.0) * 0.5 * viewport.height).round(),
        -0.5 * (ndc.z + 1.0),
    ))
}

/// Where a card's detail texture and ruler go on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetailLayout {
    /// Detail texture quad.
    pub quad: ScreenRect,
    /// Ruler quad, when rulers are enabled.
    pub ruler: Option<ScreenRect>,
    /// Depth shared by both quads.
    pub depth: f32,
}

/// Host-provided offsets for one card's detail.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DetailOffsets {
    /// Offset of the texture relative to the ruler, `y` growing downward.
    pub texture: Vec2,
    /// Offset of the ruler relative to the card corner, `y` growing downward.
    pub line: Vec2,
}

/// Lay out the detail texture for a card drawn with `clip_from_model`.
///
/// The anchor is the card's top-left corner, or its lower bottom corner when
/// details go below cards. Returns `None` if either corner fails to project.
#[must_use]
pub fn layout_detail(
    clip_from_model: Mat4,
    texture: TextureHandle,
    offsets: DetailOffsets,
    viewport: Viewport,
    display: &DisplayOptions,
) -> Option<DetailLayout> {
    let below = display.draw_detail_below_card;
    let (left, right) = if below {
        (CARD_VERTICES[0], CARD_VERTICES[1])
    } else {
        (CARD_VERTICES[3], CARD_VERTICES[2])
    };
    let left = project_to_pixels(clip_from_model, left, viewport)?;
    let right = project_to_pixels(clip_from_model, right, viewport)?;

    let tex_w = texture.width as f32;
    let tex_h = texture.height as f32;

    let mut anchor = left;
    if below {
        anchor.y = left.y.min(right.y);
    }
    if display.detail_textures_centered {
        anchor.x += (right.x - left.x) * 0.5 - tex_w * 0.5;
    }

    let ruler = display.draw_ruler.then(|| {
        let half = display.ruler_width * 0.5;
        let top = if below { anchor.y } else { viewport.height };
        let bottom = if below { 0.0 } else { anchor.y };
        let x = offsets.line.x + anchor.x;
        ScreenRect {
            x0: x - half,
            y0: bottom + RULER_PADDING,
            x1: x + half,
            y1: top - RULER_PADDING - offsets.line.y,
        }
    });

    let top = if below { anchor.y } else { viewport.height };
    let x0 = offsets.line.x + anchor.x + offsets.texture.x;
    let y1 = top - offsets.texture.y - offsets.line.y;
    let quad = ScreenRect {
        x0,
        y0: y1 - tex_h,
        x1: x0 + tex_w,
        y1,
    };

    Some(DetailLayout {
        quad,
        ruler,
        depth: anchor.z,
    })
}
