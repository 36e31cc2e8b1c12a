//! Read-only queries and ray helpers for [`CarouselEngine`].

use web_time::Instant;

use super::{CarouselEngine, Phase};
use crate::camera::{Camera, Viewport};
use crate::card::{Card, CardStore};
use crate::host::HostPort;
use crate::options::Options;
use crate::picking::{
    pick_card, PerspectiveProjector, Ray, RayError, RayProjector,
    UnprojectProjector,
};

// ── State ──

impl<P: HostPort> CarouselEngine<P> {
    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// All cards.
    #[must_use]
    pub fn cards(&self) -> &CardStore {
        &self.cards
    }

    /// Card at `index`.
    #[must_use]
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Number of cards.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Ring rotation in radians.
    #[must_use]
    pub fn bias(&self) -> f32 {
        self.motion.bias
    }

    /// Angular velocity in rad/s.
    #[must_use]
    pub fn velocity(&self) -> f32 {
        self.motion.velocity
    }

    /// Ring rotation in slot units.
    #[must_use]
    pub fn rotation_in_slots(&self) -> f32 {
        self.ring.bias_to_rotation(self.motion.bias)
    }

    /// Idle or animating, as last reported to the host.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the ring is being dragged.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.touch.is_dragging
    }

    /// Card pulsing under the current press.
    #[must_use]
    pub fn animated_selection(&self) -> Option<usize> {
        self.touch.animated_selection
    }

    /// Camera parameters.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        self.camera.camera()
    }

    /// Drawing surface size.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The host port.
    #[must_use]
    pub fn port(&self) -> &P {
        &self.port
    }
}

// ── Rays ──

impl<P: HostPort> CarouselEngine<P> {
    /// World ray through pixel `(x, y)`, built from the camera basis.
    pub fn ray_for_pixel(&self, x: f32, y: f32) -> Result<Ray, RayError> {
        PerspectiveProjector::new(self.camera.camera(), self.viewport)
            .ray_for_pixel(x, y)
    }

    /// World ray through pixel `(x, y)`, built by unprojecting through the
    /// current view and projection matrices.
    pub fn unproject_ray(&mut self, x: f32, y: f32) -> Result<Ray, RayError> {
        let _ = self.camera.refresh(self.viewport);
        UnprojectProjector::new(self.camera.view_projection(), self.viewport)?
            .ray_for_pixel(x, y)
    }

    /// Visible card under pixel `(x, y)` at time `now`.
    #[must_use]
    pub fn card_at(&self, x: f32, y: f32, now: Instant) -> Option<usize> {
        match self.ray_for_pixel(x, y) {
            Ok(ray) => pick_card(&ray, &self.cards, &self.placement(now)),
            Err(e) => {
                log::debug!("no ray for pixel ({x}, {y}): {e}");
                None
            }
        }
    }
}
