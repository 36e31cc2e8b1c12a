//! Per-card state: resource slots, host-supplied offsets, visibility and
//! load timestamps.
//!
//! Cards are addressed by index; the index is the card's identity. The store
//! never owns the underlying GPU assets, it only records the opaque handles
//! the host hands over together with a tri-state loading status.

mod resource;

use glam::{Mat4, Vec2};
pub use resource::{
    GeometryHandle, ResourceKind, ResourceSlot, ResourceState, TextureHandle,
};
use web_time::Instant;

/// One card on the ring.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Primary card texture.
    pub texture: ResourceSlot<TextureHandle>,
    /// Screen-aligned detail texture shown next to the card.
    pub detail_texture: ResourceSlot<TextureHandle>,
    /// Custom card mesh.
    pub geometry: ResourceSlot<GeometryHandle>,
    /// Offset added to the detail texture, in screen pixels.
    pub detail_texture_offset: Vec2,
    /// Offset added to the detail ruler, in screen pixels.
    pub detail_line_offset: Vec2,
    /// Custom transform applied to the card geometry in card space.
    pub transform: Mat4,
    /// Whether the last cull pass kept this card.
    pub visible: bool,
    /// Last time the texture was loaded or invalidated.
    pub texture_timestamp: Option<Instant>,
    /// Last time the detail texture was loaded or invalidated.
    pub detail_texture_timestamp: Option<Instant>,
}

impl Default for Card {
    fn default() -> Self {
        Self {
            texture: ResourceSlot::default(),
            detail_texture: ResourceSlot::default(),
            geometry: ResourceSlot::default(),
            detail_texture_offset: Vec2::ZERO,
            detail_line_offset: Vec2::ZERO,
            transform: Mat4::IDENTITY,
            visible: false,
            texture_timestamp: None,
            detail_texture_timestamp: None,
        }
    }
}

impl Card {
    /// Load state of the given resource.
    #[must_use]
    pub fn state(&self, kind: ResourceKind) -> ResourceState {
        match kind {
            ResourceKind::Texture => self.texture.state(),
            ResourceKind::DetailTexture => self.detail_texture.state(),
            ResourceKind::Geometry => self.geometry.state(),
        }
    }

    /// Move the given resource to `Loading` after its request went out.
    pub(crate) fn mark_loading(&mut self, kind: ResourceKind) {
        match kind {
            ResourceKind::Texture => self.texture.mark_loading(),
            ResourceKind::DetailTexture => self.detail_texture.mark_loading(),
            ResourceKind::Geometry => self.geometry.mark_loading(),
        }
    }

    /// Drop the given resource after its invalidation went out. Textures
    /// restart their fade clock so the next load fades in again.
    pub(crate) fn invalidate(&mut self, kind: ResourceKind, now: Instant) {
        match kind {
            ResourceKind::Texture => {
                self.texture.invalidate();
                self.texture_timestamp = Some(now);
            }
            ResourceKind::DetailTexture => {
                self.detail_texture.invalidate();
                self.detail_texture_timestamp = Some(now);
            }
            ResourceKind::Geometry => self.geometry.invalidate(),
        }
    }
}

/// Index-addressed card storage.
#[derive(Debug, Clone, Default)]
pub struct CardStore {
    cards: Vec<Card>,
}

impl CardStore {
    /// Create a store holding `count` fresh cards.
    #[must_use]
    pub fn with_count(count: usize) -> Self {
        let mut store = Self::default();
        store.recreate(count);
        store
    }

    /// Number of active cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether there are no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card at `index`, if it exists.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Mutable card at `index`, if it exists.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Card> {
        self.cards.get_mut(index)
    }

    /// All cards in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    /// All cards in index order, mutably.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Card> {
        self.cards.iter_mut()
    }

    /// Indices of the cards that survived the last cull.
    pub fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cards
            .iter()
            .enumerate()
            .filter_map(|(i, card)| card.visible.then_some(i))
    }

    /// Replace every card with `count` default cards.
    pub fn recreate(&mut self, count: usize) {
        self.cards.clear();
        self.cards.resize_with(count, Card::default);
    }

    /// Change the card count, keeping the overlapping prefix and
    /// default-initializing any new indices.
    pub fn resize(&mut self, count: usize) {
        if count == self.cards.len() {
            return;
        }
        log::debug!("resizing card store {} -> {count}", self.cards.len());
        self.cards.resize_with(count, Card::default);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn loaded_store(count: usize, now: Instant) -> CardStore {
        let mut store = CardStore::with_count(count);
        for (i, card) in store.iter_mut().enumerate() {
            card.texture.mark_loading();
            let _ = card
                .texture
                .fulfil(Some(TextureHandle::new(i as u64, 64, 64)));
            card.texture_timestamp = Some(now);
            card.detail_line_offset = Vec2::new(i as f32, 1.0);
        }
        store
    }

    #[test]
    fn new_cards_start_invalid_and_hidden() {
        let store = CardStore::with_count(3);
        assert_eq!(store.len(), 3);
        for card in store.iter() {
            for kind in ResourceKind::ALL {
                assert_eq!(card.state(kind), ResourceState::Invalid);
            }
            assert!(!card.visible);
            assert_eq!(card.transform, Mat4::IDENTITY);
        }
    }

    #[test]
    fn resize_to_same_count_preserves_everything() {
        let now = Instant::now();
        let mut store = loaded_store(4, now);
        let before: Vec<Card> = store.iter().cloned().collect();
        store.resize(4);
        let after: Vec<Card> = store.iter().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn growing_keeps_prefix_and_defaults_the_rest() {
        let now = Instant::now();
        let mut store = loaded_store(2, now);
        store.resize(5);
        assert_eq!(store.len(), 5);
        assert_eq!(
            store.get(1).unwrap().texture.handle(),
            Some(TextureHandle::new(1, 64, 64))
        );
        assert_eq!(store.get(4).unwrap(), &Card::default());
    }

    #[test]
    fn shrinking_drops_the_tail() {
        let now = Instant::now() + Duration::from_millis(5);
        let mut store = loaded_store(6, now);
        store.resize(2);
        assert_eq!(store.len(), 2);
        assert!(store.get(2).is_none());
        assert_eq!(store.get(0).unwrap().texture_timestamp, Some(now));
    }

    #[test]
    fn recreate_resets_existing_cards() {
        let mut store = loaded_store(3, Instant::now());
        store.recreate(3);
        assert!(store.iter().all(|card| card == &Card::default()));
    }

    #[test]
    fn invalidating_texture_stamps_time_but_geometry_does_not() {
        let now = Instant::now();
        let mut card = Card::default();
        card.geometry.mark_loading();
        card.invalidate(ResourceKind::Geometry, now);
        assert_eq!(card.texture_timestamp, None);
        card.invalidate(ResourceKind::DetailTexture, now);
        assert_eq!(card.detail_texture_timestamp, Some(now));
    }

    #[test]
    fn visible_indices_follow_flags() {
        let mut store = CardStore::with_count(4);
        store.get_mut(1).unwrap().visible = true;
        store.get_mut(3).unwrap().visible = true;
        assert_eq!(store.visible_indices().collect::<Vec<_>>(), vec![1, 3]);
    }
}
