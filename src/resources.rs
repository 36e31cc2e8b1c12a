//! Per-tick reconciliation of card resources against visibility.
//!
//! Visible cards missing a resource get a request; hidden cards holding one
//! get an invalidation. A state only changes once its message was accepted,
//! so anything refused by a full channel is simply retried next tick.

use web_time::Instant;

use crate::card::{CardStore, ResourceKind, ResourceState};
use crate::host::{HostMessage, HostPort};

/// What one reconciliation pass sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Requests accepted by the host port.
    pub requested: usize,
    /// Invalidations accepted by the host port.
    pub invalidated: usize,
    /// Messages refused and left for the next tick.
    pub deferred: usize,
}

fn request(kind: ResourceKind, index: usize) -> HostMessage {
    match kind {
        ResourceKind::Texture => HostMessage::RequestTexture(index),
        ResourceKind::DetailTexture => HostMessage::RequestDetailTexture(index),
        ResourceKind::Geometry => HostMessage::RequestGeometry(index),
    }
}

fn invalidate(kind: ResourceKind, index: usize) -> HostMessage {
    match kind {
        ResourceKind::Texture => HostMessage::InvalidateTexture(index),
        ResourceKind::DetailTexture => {
            HostMessage::InvalidateDetailTexture(index)
        }
        ResourceKind::Geometry => HostMessage::InvalidateGeometry(index),
    }
}

/// Walk cards from the highest index down and post whatever requests or
/// invalidations their visibility calls for.
pub fn reconcile<P: HostPort + ?Sized>(
    cards: &mut CardStore,
    port: &P,
    now: Instant,
) -> ReconcileStats {
    let mut stats = ReconcileStats::default();

    for index in (0..cards.len()).rev() {
        let Some(card) = cards.get_mut(index) else {
            continue;
        };
        for kind in ResourceKind::ALL {
            let state = card.state(kind);
            let message = match (card.visible, state) {
                (true, ResourceState::Invalid) => request(kind, index),
                (false, ResourceState::Loading | ResourceState::Loaded) => {
                    invalidate(kind, index)
                }
                _ => continue,
            };

            match port.post(message) {
                Ok(()) => {
                    log::debug!("posted {message:?}");
                    if card.visible {
                        card.mark_loading(kind);
                        stats.requested += 1;
                    } else {
                        card.invalidate(kind, now);
                        stats.invalidated += 1;
                    }
                }
                Err(e) => {
                    log::debug!("{message:?} deferred: {e}");
                    stats.deferred += 1;
                }
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::card::TextureHandle;
    use crate::host::{channel_port, PostError};

    /// Port accepting a fixed number of posts, recording them.
    struct LimitedPort {
        budget: RefCell<usize>,
        log: RefCell<Vec<HostMessage>>,
    }

    impl LimitedPort {
        fn new(budget: usize) -> Self {
            Self {
                budget: RefCell::new(budget),
                log: RefCell::new(Vec::new()),
            }
        }
    }

    impl HostPort for LimitedPort {
        fn post(&self, message: HostMessage) -> Result<(), PostError> {
            let mut budget = self.budget.borrow_mut();
            if *budget == 0 {
                return Err(PostError::Full);
            }
            *budget -= 1;
            self.log.borrow_mut().push(message);
            Ok(())
        }

        fn post_blocking(&self, message: HostMessage) -> Result<(), PostError> {
            self.log.borrow_mut().push(message);
            Ok(())
        }
    }

    #[test]
    fn visible_invalid_cards_are_requested_highest_first() {
        let (port, inbox) = channel_port(16);
        let mut cards = CardStore::with_count(3);
        cards.get_mut(0).unwrap().visible = true;
        cards.get_mut(2).unwrap().visible = true;

        let stats = reconcile(&mut cards, &port, Instant::now());
        assert_eq!(stats.requested, 6);
        assert_eq!(
            inbox.drain(),
            vec![
                HostMessage::RequestTexture(2),
                HostMessage::RequestDetailTexture(2),
                HostMessage::RequestGeometry(2),
                HostMessage::RequestTexture(0),
                HostMessage::RequestDetailTexture(0),
                HostMessage::RequestGeometry(0),
            ]
        );
        for kind in ResourceKind::ALL {
            assert_eq!(cards.get(2).unwrap().state(kind), ResourceState::Loading);
            assert_eq!(cards.get(1).unwrap().state(kind), ResourceState::Invalid);
        }

        // Nothing new to say on a second pass.
        assert_eq!(reconcile(&mut cards, &port, Instant::now()), ReconcileStats::default());
    }

    #[test]
    fn hidden_cards_release_resources_and_stamp_time() {
        let (port, inbox) = channel_port(16);
        let mut cards = CardStore::with_count(1);
        let card = cards.get_mut(0).unwrap();
        card.texture.mark_loading();
        let _ = card.texture.fulfil(Some(TextureHandle::new(9, 4, 4)));
        card.geometry.mark_loading();

        let now = Instant::now();
        let stats = reconcile(&mut cards, &port, now);
        assert_eq!(stats.invalidated, 2);
        assert_eq!(
            inbox.drain(),
            vec![
                HostMessage::InvalidateTexture(0),
                HostMessage::InvalidateGeometry(0),
            ]
        );
        let card = cards.get(0).unwrap();
        assert_eq!(card.texture.handle(), None);
        assert_eq!(card.texture_timestamp, Some(now));
        assert_eq!(card.detail_texture_timestamp, None);
    }

    #[test]
    fn refused_posts_leave_state_for_retry() {
        let port = LimitedPort::new(1);
        let mut cards = CardStore::with_count(1);
        cards.get_mut(0).unwrap().visible = true;

        let stats = reconcile(&mut cards, &port, Instant::now());
        assert_eq!(stats.requested, 1);
        assert_eq!(stats.deferred, 2);
        let card = cards.get(0).unwrap();
        assert_eq!(card.state(ResourceKind::Texture), ResourceState::Loading);
        assert_eq!(card.state(ResourceKind::DetailTexture), ResourceState::Invalid);

        *port.budget.borrow_mut() = 8;
        let stats = reconcile(&mut cards, &port, Instant::now());
        assert_eq!(stats.requested, 2);
        assert_eq!(
            port.log.borrow().as_slice(),
            &[
                HostMessage::RequestTexture(0),
                HostMessage::RequestDetailTexture(0),
                HostMessage::RequestGeometry(0),
            ]
        );
    }
}
