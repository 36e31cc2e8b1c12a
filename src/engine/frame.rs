//! Per-frame pipeline for [`CarouselEngine`].
//!
//! Order matters: physics moves the ring, culling decides what is on
//! screen, reconciliation streams resources for exactly that set, and only
//! then is draw intent emitted.

use std::time::Duration;

use web_time::Instant;

use super::{CarouselEngine, Phase};
use crate::card::{Card, ResourceState};
use crate::host::{HostMessage, HostPort};
use crate::physics::Integrator;
use crate::render::{
    animated_alpha, layout_detail, ramp_alpha, CardDraw, DetailDraw,
    DetailOffsets, FadeConstants, FrameInfo, GeometrySource, Renderer,
    TextureBinding,
};
use crate::resources::reconcile;

/// Slack on the culling window so cards resting exactly on a slot edge are
/// not lost to rounding.
const CULL_EPSILON: f32 = 1.0e-4;

impl<P: HostPort> CarouselEngine<P> {
    /// Run one frame at `now`, emitting draw intent into `renderer`.
    ///
    /// Returns whether another frame should be scheduled.
    pub fn tick<R: Renderer + ?Sized>(&mut self, now: Instant, renderer: &mut R) -> bool {
        let _ = self.camera.refresh(self.viewport);

        let mut animating = self.pulse_window_open(now);

        let dt = self.lap(now);
        if !self.touch.is_dragging && self.physics_active {
            let bounds = self.bounds();
            let integrator = Integrator {
                options: &self.options.physics,
                ring: self.ring,
            };
            self.physics_active = integrator.advance(&mut self.motion, dt, &bounds);
            animating |= self.physics_active;
        }

        let visible = self.cull();
        let stats = reconcile(&mut self.cards, &self.port, now);
        log::trace!("tick: {visible} visible, {stats:?}");

        renderer.begin_frame(&FrameInfo {
            view: self.camera.view(),
            projection: self.camera.projection(),
            viewport: self.viewport,
        });
        animating |= self.draw_cards(now, renderer);
        animating |= self.draw_details(now, renderer);

        self.transition(animating);
        animating
    }

    /// Mark cards inside the visible window (widened by half the prefetch
    /// count on each side). Returns the number of visible cards.
    fn cull(&mut self) -> usize {
        let layout = &self.options.layout;
        if layout.visible_slot_count == 0 {
            for card in self.cards.iter_mut() {
                card.visible = true;
            }
            return self.cards.len();
        }

        let per_side = (layout.prefetch_card_count / 2) as f32;
        let first = self.ring.slot_position(-per_side) - CULL_EPSILON;
        let last = self
            .ring
            .slot_position(layout.visible_slot_count as f32 + per_side)
            - CULL_EPSILON;

        let ring = self.ring;
        let bias = self.motion.bias;
        let mut count = 0;
        for (i, card) in self.cards.iter_mut().enumerate() {
            let p = ring.card_position(i as f32, bias);
            card.visible = p >= first && p < last;
            count += usize::from(card.visible);
        }
        count
    }

    fn fade_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.options.display.fade_in_duration_ms))
    }

    /// Emit visible cards, highest index first. Returns whether any texture
    /// is still fading in.
    fn draw_cards<R: Renderer + ?Sized>(&self, now: Instant, renderer: &mut R) -> bool {
        let placement = self.placement(now);
        let display = &self.options.display;
        let fade_duration = self.fade_duration();

        let wedge = self.ring.wedge_angle(1.0);
        let rez_end = self
            .ring
            .slot_position(self.options.layout.visible_slot_count as f32);
        let rez_start = rez_end - display.rez_in_card_count * wedge;

        let mut fading = false;
        for index in (0..self.cards.len()).rev() {
            let Some(card) = self.cards.get(index).filter(|c| c.visible) else {
                continue;
            };
            let animated = animated_alpha(card.texture_timestamp, now, fade_duration);
            fading |= animated < 1.0;
            let positional = if display.rez_in_card_count > 0.0 {
                ramp_alpha(placement.card_position(index), rez_start, rez_end)
            } else {
                1.0
            };
            let fade = animated.min(positional);

            renderer.draw_card(&CardDraw {
                index,
                model: placement.card_matrix(index, card.transform, true),
                fade: FadeConstants::new(fade),
                texture: TextureBinding::for_fade(card.texture.handle(), fade),
                geometry: geometry_source(card),
                blended: display.draw_cards_with_blending,
            });
        }
        fading
    }

    /// Emit detail textures for visible cards, highest index first. Returns
    /// whether any detail texture is still fading in.
    fn draw_details<R: Renderer + ?Sized>(&self, now: Instant, renderer: &mut R) -> bool {
        let placement = self.placement(now);
        let display = &self.options.display;
        let fade_duration = self.fade_duration();
        let clip_from_world = self.camera.view_projection();

        let detail_slots = self.options.layout.visible_detail_count as f32 - 1.0;
        let fade_start = self.ring.slot_position(detail_slots);
        let fade_end = fade_start + self.ring.wedge_angle(display.detail_fade_rate);

        let mut fading = false;
        for index in (0..self.cards.len()).rev() {
            let Some(card) = self.cards.get(index).filter(|c| c.visible) else {
                continue;
            };
            let Some(texture) = card.detail_texture.handle() else {
                continue;
            };

            let animated =
                animated_alpha(card.detail_texture_timestamp, now, fade_duration);
            fading |= animated < 1.0;
            let positional =
                ramp_alpha(placement.card_position(index), fade_start, fade_end);
            let alpha = animated.min(positional);
            if alpha == 0.0 {
                continue;
            }

            let model = placement.card_matrix(index, card.transform, false);
            let offsets = DetailOffsets {
                texture: card.detail_texture_offset,
                line: card.detail_line_offset,
            };
            let Some(layout) = layout_detail(
                clip_from_world * model,
                texture,
                offsets,
                self.viewport,
                display,
            ) else {
                log::warn!("card {index} detail does not project, skipping");
                continue;
            };
            renderer.draw_detail(&DetailDraw {
                index,
                texture,
                alpha,
                layout,
            });
        }
        fading
    }

    /// Post lifecycle notifications on phase changes.
    ///
    /// The phase only moves once the host accepted the message, so a refused
    /// notification is posted again on the next tick and every
    /// `AnimationStarted` is eventually paired with an `AnimationFinished`.
    fn transition(&mut self, animating: bool) {
        let next = if animating {
            Phase::Animating
        } else {
            Phase::Idle
        };
        if next == self.phase {
            return;
        }

        let message = match next {
            Phase::Animating => HostMessage::AnimationStarted,
            Phase::Idle => HostMessage::AnimationFinished {
                angle_in_slots: self.ring.bias_to_rotation(self.motion.bias),
            },
        };
        match self.port.post(message) {
            Ok(()) => {
                log::debug!("phase -> {next:?}");
                self.phase = next;
            }
            Err(e) => log::debug!("{message:?} deferred: {e}"),
        }
    }
}

fn geometry_source(card: &Card) -> GeometrySource {
    match (card.geometry.state(), card.geometry.handle()) {
        (ResourceState::Loaded, Some(handle)) => GeometrySource::Card(handle),
        (ResourceState::Loading, _) => GeometrySource::Loading,
        _ => GeometrySource::Default,
    }
}
