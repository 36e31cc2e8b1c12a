//! Options and camera setters for [`CarouselEngine`].

use glam::Vec3;

use super::CarouselEngine;
use crate::camera::Viewport;
use crate::host::HostPort;
use crate::layout::SlotRing;
use crate::options::Options;

impl<P: HostPort> CarouselEngine<P> {
    /// Replace options and apply all changes to subsystems.
    pub fn set_options(&mut self, new: Options) {
        self.options = new;
        self.apply_options();
    }

    /// Push current option values to the ring and camera.
    pub fn apply_options(&mut self) {
        self.ring = SlotRing::from_options(&self.options.layout);
        let co = &self.options.camera;
        self.camera.set_lens(co.fovy, co.znear, co.zfar);
        log::debug!(
            "options applied: {} slots, {} visible",
            self.ring.slot_count(),
            self.options.layout.visible_slot_count
        );
    }

    /// Resize the drawing surface.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    /// Point the camera.
    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.camera.look_at(eye, target, up);
    }

    /// Jump the ring to a rotation given in slot units.
    pub fn set_carousel_rotation_angle(&mut self, slots: f32) {
        self.motion.bias = self.ring.rotation_to_bias(slots);
    }
}
