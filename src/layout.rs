//! Ring geometry: where each slot and card sits on the carousel circle and
//! the world matrix that places a card there.
//!
//! Angles are in radians around +Y. `bias` is the ring's current rotation
//! offset; a card's angle is its slot angle plus `bias`.

use std::f32::consts::TAU;

use glam::{Mat4, Vec3};

use crate::options::LayoutOptions;

/// Slot spacing on the circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotRing {
    slot_count: u32,
    start_angle: f32,
}

impl SlotRing {
    /// Ring with `slot_count` evenly spaced slots (at least one) starting at
    /// `start_angle`.
    #[must_use]
    pub fn new(slot_count: u32, start_angle: f32) -> Self {
        Self {
            slot_count: slot_count.max(1),
            start_angle,
        }
    }

    /// Ring described by the layout options.
    #[must_use]
    pub fn from_options(layout: &LayoutOptions) -> Self {
        Self::new(layout.slot_count, layout.start_angle)
    }

    /// Number of slots on a full turn.
    #[must_use]
    pub fn slot_count(&self) -> u32 {
        self.slot_count
    }

    /// Angle of slot 0.
    #[must_use]
    pub fn start_angle(&self) -> f32 {
        self.start_angle
    }

    /// Angle subtended by `slots` slots. `wedge_angle(slot_count)` is exactly
    /// one full turn.
    #[must_use]
    pub fn wedge_angle(&self, slots: f32) -> f32 {
        // Divide first so a whole ring lands on TAU without rounding error.
        TAU * (slots / self.slot_count as f32)
    }

    /// Fixed angle of slot position `p`, independent of the ring rotation.
    #[must_use]
    pub fn slot_position(&self, p: f32) -> f32 {
        self.start_angle + self.wedge_angle(p)
    }

    /// Angle of card `p` once the ring is rotated by `bias`.
    #[must_use]
    pub fn card_position(&self, p: f32, bias: f32) -> f32 {
        self.start_angle + bias + self.wedge_angle(p)
    }

    /// Ring rotation in slot units to the equivalent `bias`.
    #[must_use]
    pub fn rotation_to_bias(&self, slots: f32) -> f32 {
        -self.wedge_angle(slots)
    }

    /// `bias` to ring rotation in slot units.
    #[must_use]
    pub fn bias_to_rotation(&self, bias: f32) -> f32 {
        -bias * self.slot_count as f32 / TAU
    }
}

/// Standard logistic function.
#[must_use]
pub fn logistic(t: f32) -> f32 {
    1.0 / (1.0 + (-t).exp())
}

/// Sway tilt for a ring spinning at `velocity` rad/s. Zero at rest, saturates
/// at ±`range / 2`.
#[must_use]
pub fn sway_angle(velocity: f32, sensitivity: f32, range: f32) -> f32 {
    range * (logistic(-velocity * sensitivity) - 0.5)
}

/// Enlargement of the card being pressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    /// Index of the pressed card.
    pub index: usize,
    /// Uniform scale factor, `1.0` meaning unscaled.
    pub scale: f32,
}

/// Everything needed to compute per-card world matrices for one frame.
#[derive(Debug, Clone, Copy)]
pub struct CardPlacement<'a> {
    /// Slot geometry.
    pub ring: SlotRing,
    /// Current ring rotation.
    pub bias: f32,
    /// Current angular velocity, drives sway.
    pub velocity: f32,
    /// Radius, orientation and sway constants.
    pub layout: &'a LayoutOptions,
    /// Active selection pulse, if any.
    pub pulse: Option<Pulse>,
}

impl CardPlacement<'_> {
    /// Angle of card `index` on the rotated ring.
    #[must_use]
    pub fn card_position(&self, index: usize) -> f32 {
        self.ring.card_position(index as f32, self.bias)
    }

    /// World matrix of card `index`:
    /// `Ry(θ) · T(radius, 0, 0) · Ry(rotation + sway - θ?) · S(pulse) · custom`.
    ///
    /// `custom` is the card's own geometry transform. Sway is only applied
    /// when `with_sway` is set and the layout enables it.
    #[must_use]
    pub fn card_matrix(&self, index: usize, custom: Mat4, with_sway: bool) -> Mat4 {
        let theta = self.card_position(index);
        let layout = self.layout;

        let sway = if with_sway && layout.sway_sensitivity != 0.0 {
            sway_angle(self.velocity, layout.sway_sensitivity, layout.sway_range)
        } else {
            0.0
        };
        let facing = if layout.cards_face_tangent { 0.0 } else { theta };

        let mut matrix = Mat4::from_rotation_y(theta)
            * Mat4::from_translation(Vec3::new(layout.radius, 0.0, 0.0))
            * Mat4::from_rotation_y(layout.card_rotation + sway - facing);

        if let Some(pulse) = self.pulse.filter(|p| p.index == index) {
            matrix *= Mat4::from_scale(Vec3::splat(pulse.scale));
        }

        matrix * custom
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn full_wedge_is_exactly_tau() {
        for n in [1, 3, 7, 10, 12, 64] {
            let ring = SlotRing::new(n, 0.3);
            assert_eq!(ring.wedge_angle(n as f32), TAU, "slot_count {n}");
        }
    }

    #[test]
    fn card_minus_slot_position_is_bias() {
        let ring = SlotRing::new(10, 0.25);
        for bias in [-3.1_f32, -0.4, 0.0, 0.7] {
            for p in [0.0_f32, 1.0, 4.5, 9.0, 37.0] {
                let diff = ring.card_position(p, bias) - ring.slot_position(p);
                assert!((diff - bias).abs() < EPS, "p={p} bias={bias}");
            }
        }
    }

    #[test]
    fn rotation_units_round_trip() {
        let ring = SlotRing::new(10, 0.0);
        assert!((ring.rotation_to_bias(1.0) + TAU / 10.0).abs() < EPS);
        for slots in [-2.0_f32, 0.0, 1.0, 3.25] {
            let back = ring.bias_to_rotation(ring.rotation_to_bias(slots));
            assert!((back - slots).abs() < EPS);
        }
    }

    #[test]
    fn zero_slot_count_is_promoted_to_one() {
        let ring = SlotRing::new(0, 0.0);
        assert_eq!(ring.slot_count(), 1);
        assert_eq!(ring.wedge_angle(1.0), TAU);
    }

    #[test]
    fn sway_is_zero_at_rest_and_bounded() {
        assert_eq!(sway_angle(0.0, 1.0, TAU / 3.0), 0.0);
        let fast = sway_angle(1.0e4, 1.0, TAU / 3.0);
        assert!((fast + TAU / 6.0).abs() < 1e-4);
        assert!(sway_angle(-2.0, 1.0, 1.0) > 0.0);
    }

    #[test]
    fn card_zero_sits_on_radius() {
        let layout = LayoutOptions {
            radius: 2.0,
            ..LayoutOptions::default()
        };
        let placement = CardPlacement {
            ring: SlotRing::from_options(&layout),
            bias: 0.0,
            velocity: 0.0,
            layout: &layout,
            pulse: None,
        };
        let m = placement.card_matrix(0, Mat4::IDENTITY, true);
        let origin = m.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(2.0, 0.0, 0.0)).length() < EPS);
    }

    #[test]
    fn cards_keep_world_orientation_unless_tangent() {
        let layout = LayoutOptions {
            slot_count: 4,
            ..LayoutOptions::default()
        };
        let ring = SlotRing::from_options(&layout);
        let placement = CardPlacement {
            ring,
            bias: 0.0,
            velocity: 0.0,
            layout: &layout,
            pulse: None,
        };
        // Slot 1 sits a quarter turn round; facing is undone so the card
        // normal still points down +Z.
        let m = placement.card_matrix(1, Mat4::IDENTITY, false);
        let normal = m.transform_vector3(Vec3::Z);
        assert!((normal - Vec3::Z).length() < EPS);
        let centre = m.transform_point3(Vec3::ZERO);
        let expected = Mat4::from_rotation_y(FRAC_PI_2).transform_point3(Vec3::X);
        assert!((centre - expected).length() < EPS);

        let tangent = LayoutOptions {
            cards_face_tangent: true,
            ..layout.clone()
        };
        let placement = CardPlacement {
            ring,
            bias: 0.0,
            velocity: 0.0,
            layout: &tangent,
            pulse: None,
        };
        let normal = placement
            .card_matrix(2, Mat4::IDENTITY, false)
            .transform_vector3(Vec3::Z);
        let expected = Mat4::from_rotation_y(PI).transform_vector3(Vec3::Z);
        assert!((normal - expected).length() < EPS);
    }

    #[test]
    fn pulse_scales_only_its_card_and_custom_is_innermost() {
        let layout = LayoutOptions::default();
        let custom = Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0));
        let placement = CardPlacement {
            ring: SlotRing::from_options(&layout),
            bias: 0.0,
            velocity: 0.0,
            layout: &layout,
            pulse: Some(Pulse {
                index: 0,
                scale: 1.5,
            }),
        };
        let top = placement.card_matrix(0, custom, true).transform_point3(Vec3::ZERO);
        assert!((top - Vec3::new(1.0, 1.5, 0.0)).length() < EPS);

        let other = placement.card_matrix(1, custom, true);
        let unscaled = CardPlacement {
            pulse: None,
            ..placement
        }
        .card_matrix(1, custom, true);
        assert!(other.abs_diff_eq(unscaled, EPS));
    }
}
