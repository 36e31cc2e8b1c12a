//! Ring motion: friction and snap-spring integration plus overscroll
//! ease-back at the ends of the card list.
//!
//! All angles are radians of `bias`. The integrator is semi-implicit Euler
//! with a fixed maximum substep so behaviour does not depend on frame rate.

use crate::layout::SlotRing;
use crate::options::PhysicsOptions;

/// Margin within which an overscrolled ring snaps onto its boundary.
const BOUNDARY_SNAP: f32 = 1.0e-4;

/// Mutable kinematic state of the ring.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Motion {
    /// Ring rotation in radians.
    pub bias: f32,
    /// Angular velocity in rad/s.
    pub velocity: f32,
    /// Whether the ring is past an end and easing back.
    pub overscroll: bool,
}

/// Allowed range of `bias` for the current card count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiasBounds {
    /// Bias with the first card in slot 0. Upper end of the range.
    pub first: f32,
    /// Bias with the last detail-visible card in slot 0. Lower end.
    pub last: f32,
    /// How far past either end a drag may pull.
    pub slack: f32,
}

impl BiasBounds {
    /// Bounds for `card_count` cards of which `visible_detail_count` should
    /// still fit when scrolled to the end.
    #[must_use]
    pub fn new(
        ring: &SlotRing,
        card_count: usize,
        visible_detail_count: u32,
        overscroll_slots: f32,
    ) -> Self {
        let scrollable = card_count as f32 - visible_detail_count as f32;
        Self {
            first: ring.wedge_angle(0.0),
            last: -ring.wedge_angle(scrollable).max(0.0),
            slack: ring.wedge_angle(overscroll_slots),
        }
    }

    /// Whether `bias` lies inside `[last, first]`.
    #[must_use]
    pub fn contains(&self, bias: f32) -> bool {
        bias <= self.first && bias >= self.last
    }

    /// `bias` clamped to the overscroll range `[last - slack, first + slack]`.
    #[must_use]
    pub fn clamp_with_slack(&self, bias: f32) -> f32 {
        bias.clamp(self.last - self.slack, self.first + self.slack)
    }
}

/// Integrator bound to one set of physics constants and ring geometry.
#[derive(Debug, Clone, Copy)]
pub struct Integrator<'a> {
    /// Physical constants.
    pub options: &'a PhysicsOptions,
    /// Slot geometry, used by the snap spring.
    pub ring: SlotRing,
}

impl Integrator<'_> {
    /// Signed distance from `bias` to the nearest slot, in slot units, folded
    /// into `(-0.5, 0.5]`.
    #[must_use]
    pub fn slot_offset(&self, bias: f32) -> f32 {
        let position = bias / self.ring.wedge_angle(1.0);
        let fraction = position - position.floor();
        if fraction > 0.5 {
            fraction - 1.0
        } else {
            fraction
        }
    }

    fn spring_enabled(&self) -> bool {
        self.options.spring_constant > 0.0
    }

    /// Whether `bias` rests far enough from a slot for the spring to act.
    #[must_use]
    pub fn off_slot(&self, bias: f32) -> bool {
        self.spring_enabled()
            && self.slot_offset(bias).abs() > self.options.settle_epsilon
    }

    /// Whether `velocity` counts as motion.
    #[must_use]
    pub fn is_moving(&self, velocity: f32) -> bool {
        velocity.abs() > self.options.velocity_threshold
    }

    /// Integrate `dt` seconds of friction and spring forces. Returns whether
    /// the ring is still in motion.
    pub fn step(&self, motion: &mut Motion, dt: f32) -> bool {
        let opts = self.options;
        let substeps = if opts.min_step_time > 0.0 {
            (dt / opts.min_step_time).round().max(1.0)
        } else {
            1.0
        };
        let h = dt / substeps;
        let mass = opts.mass.max(f32::EPSILON);

        for _ in 0..substeps as u32 {
            let friction = -opts.friction_coeff * motion.velocity;
            let spring = -opts.spring_constant * self.slot_offset(motion.bias);
            motion.velocity += (friction + spring) / mass * h;
            motion.bias += motion.velocity * h;
        }

        let moving = self.is_moving(motion.velocity);
        if !self.spring_enabled() {
            return moving;
        }
        if moving || self.off_slot(motion.bias) {
            return true;
        }
        // Settled: land exactly on the slot.
        let wedge = self.ring.wedge_angle(1.0);
        motion.bias -= self.slot_offset(motion.bias) * wedge;
        motion.velocity = 0.0;
        false
    }

    /// Advance the ring by `dt` seconds: ease back when overscrolled,
    /// otherwise integrate, then clamp to the overscroll range. Returns
    /// whether another tick is needed.
    pub fn advance(&self, motion: &mut Motion, dt: f32, bounds: &BiasBounds) -> bool {
        if dt <= 0.0 {
            return true;
        }

        let mut animating = false;
        if motion.overscroll {
            let boundary = if motion.bias > bounds.first {
                Some(bounds.first)
            } else if motion.bias < bounds.last {
                Some(bounds.last)
            } else {
                None
            };
            match boundary {
                Some(target) => {
                    let rate = (self.options.overscroll_return_rate * dt * 2.0).min(1.0);
                    motion.bias -= rate * (motion.bias - target);
                    if (motion.bias - target).abs() < BOUNDARY_SNAP {
                        motion.bias = target;
                        motion.velocity = 0.0;
                    } else {
                        animating = true;
                    }
                }
                None => motion.overscroll = false,
            }
        } else {
            animating = self.step(motion, dt);
            if !bounds.contains(motion.bias) {
                log::trace!("overscroll at bias {}", motion.bias);
                motion.overscroll = true;
                motion.velocity = 0.0;
                animating = true;
            }
        }

        let clamped = bounds.clamp_with_slack(motion.bias);
        if clamped != motion.bias {
            motion.velocity = 0.0;
            motion.overscroll = true;
            motion.bias = clamped;
        }
        animating
    }
}
