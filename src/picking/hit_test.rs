//! Scene-level picking: which visible card does a ray hit first.

use glam::{Vec3, Vec4};

use super::ray::Ray;
use crate::card::CardStore;
use crate::layout::CardPlacement;

/// Unit card quad in card space, counter-clockwise from bottom-left.
pub const CARD_VERTICES: [Vec3; 4] = [
    Vec3::new(-1.0, -1.0, 0.0),
    Vec3::new(1.0, -1.0, 0.0),
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(-1.0, 1.0, 0.0),
];

/// Closest visible card hit by `ray`, testing cards in ascending index order
/// so equal distances resolve to the lower index.
#[must_use]
pub fn pick_card(
    ray: &Ray,
    cards: &CardStore,
    placement: &CardPlacement<'_>,
) -> Option<usize> {
    let mut best = f32::MAX;
    let mut hit = None;

    for index in cards.visible_indices() {
        let Some(card) = cards.get(index) else {
            continue;
        };
        let matrix = placement.card_matrix(index, card.transform, true);

        let mut corners = [Vec3::ZERO; 4];
        let mut degenerate = false;
        for (corner, vertex) in corners.iter_mut().zip(CARD_VERTICES) {
            let p = matrix * Vec4::from((vertex, 1.0));
            if p.w == 0.0 {
                degenerate = true;
                break;
            }
            *corner = p.truncate() / p.w;
        }
        if degenerate {
            log::warn!("card {index} has a degenerate transform, skipping");
            continue;
        }

        let [p0, p1, p2, p3] = corners;
        if let Some(t) = ray
            .hit_triangle(p0, p1, p2, best)
            .or_else(|| ray.hit_triangle(p2, p3, p0, best))
        {
            best = t;
            hit = Some(index);
        }
    }

    hit
}

#[cfg(test)]
mod tests {
    use glam::Mat4;

    use super::*;
    use crate::layout::SlotRing;
    use crate::options::LayoutOptions;

    fn placement(layout: &LayoutOptions) -> CardPlacement<'_> {
        CardPlacement {
            ring: SlotRing::from_options(layout),
            bias: 0.0,
            velocity: 0.0,
            layout,
            pulse: None,
        }
    }

    fn ray_from_front(x: f32, y: f32) -> Ray {
        Ray {
            origin: Vec3::new(x, y, 10.0),
            direction: Vec3::NEG_Z,
        }
    }

    #[test]
    fn front_card_is_picked() {
        // Slot 0 sits at +X, facing +Z.
        let layout = LayoutOptions {
            radius: 3.0,
            ..LayoutOptions::default()
        };
        let mut cards = CardStore::with_count(3);
        cards.get_mut(0).unwrap().visible = true;
        let hit = pick_card(&ray_from_front(3.0, 0.5), &cards, &placement(&layout));
        assert_eq!(hit, Some(0));
        assert_eq!(
            pick_card(&ray_from_front(0.0, 0.0), &cards, &placement(&layout)),
            None
        );
    }

    #[test]
    fn hidden_cards_are_ignored() {
        let layout = LayoutOptions::default();
        let cards = CardStore::with_count(2);
        assert_eq!(
            pick_card(&ray_from_front(1.0, 0.0), &cards, &placement(&layout)),
            None
        );
    }

    #[test]
    fn nearer_card_wins_and_ties_keep_lower_index() {
        let layout = LayoutOptions {
            radius: 0.0,
            ..LayoutOptions::default()
        };
        let mut cards = CardStore::with_count(3);
        for card in cards.iter_mut() {
            card.visible = true;
        }
        // With zero radius every card collapses onto the origin facing +Z.
        let same_depth = pick_card(&ray_from_front(0.2, 0.2), &cards, &placement(&layout));
        assert_eq!(same_depth, Some(0));

        cards.get_mut(2).unwrap().transform =
            Mat4::from_translation(Vec3::new(0.0, 0.0, 1.0));
        let with_front = pick_card(&ray_from_front(0.2, 0.2), &cards, &placement(&layout));
        assert_eq!(with_front, Some(2));
    }
}
