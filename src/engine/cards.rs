//! Card creation and host completion setters for [`CarouselEngine`].
//!
//! Setters addressing an index outside the store are ignored.

use glam::Mat4;
use web_time::Instant;

use super::CarouselEngine;
use crate::card::{Card, GeometryHandle, TextureHandle};
use crate::host::HostPort;
use crate::render::DetailOffsets;

impl<P: HostPort> CarouselEngine<P> {
    /// Replace all cards with `count` fresh ones.
    pub fn create_cards(&mut self, count: usize) {
        log::debug!("creating {count} cards");
        self.cards.recreate(count);
    }

    /// Change the card count, keeping the state of surviving cards.
    pub fn resize(&mut self, count: usize) {
        self.cards.resize(count);
    }

    fn card_for_setter(&mut self, index: usize, what: &str) -> Option<&mut Card> {
        let len = self.cards.len();
        let card = self.cards.get_mut(index);
        if card.is_none() {
            log::debug!("ignoring {what} for card {index} of {len}");
        }
        card
    }

    /// Host reply to a texture request. `None` reports a failed load.
    pub fn set_texture(
        &mut self,
        index: usize,
        texture: Option<TextureHandle>,
        now: Instant,
    ) {
        let Some(card) = self.card_for_setter(index, "texture") else {
            return;
        };
        if card.texture.fulfil(texture) || texture.is_none() {
            card.texture_timestamp = Some(now);
        } else {
            log::debug!("card {index} texture arrived unrequested, dropped");
        }
    }

    /// Host reply to a detail texture request, with its placement offsets.
    pub fn set_detail_texture(
        &mut self,
        index: usize,
        offsets: DetailOffsets,
        texture: Option<TextureHandle>,
        now: Instant,
    ) {
        let Some(card) = self.card_for_setter(index, "detail texture") else {
            return;
        };
        card.detail_texture_offset = offsets.texture;
        card.detail_line_offset = offsets.line;
        if card.detail_texture.fulfil(texture) || texture.is_none() {
            card.detail_texture_timestamp = Some(now);
        } else {
            log::debug!("card {index} detail texture arrived unrequested, dropped");
        }
    }

    /// Host reply to a geometry request. `None` reports a failed load.
    pub fn set_geometry(&mut self, index: usize, geometry: Option<GeometryHandle>) {
        let Some(card) = self.card_for_setter(index, "geometry") else {
            return;
        };
        if !card.geometry.fulfil(geometry) && geometry.is_some() {
            log::debug!("card {index} geometry arrived unrequested, dropped");
        }
    }

    /// Custom card-space transform applied beneath the ring placement.
    pub fn set_card_transform(&mut self, index: usize, transform: Mat4) {
        if let Some(card) = self.card_for_setter(index, "transform") {
            card.transform = transform;
        }
    }
}
