//! Touch dispatch for [`CarouselEngine`].

use glam::Vec2;
use web_time::Instant;

use super::CarouselEngine;
use crate::host::{HostMessage, HostPort};
use crate::input::InputEvent;

// ── Unified input handler ──

impl<P: HostPort> CarouselEngine<P> {
    /// Process a touch event that happened at `now`.
    ///
    /// Touch-down starts tracking a possible tap and pulses the card under the
    /// finger. Moving past the selection radius turns the gesture into a drag
    /// that rotates the ring. Lifting either selects the tapped card or hands
    /// the drag velocity to physics.
    ///
    /// # Example
    ///
    /// ```ignore
    /// engine.handle_input(InputEvent::TouchDown { x, y }, now);
    /// engine.handle_input(InputEvent::TouchMove { x: x - 80.0, y }, later);
    /// ```
    pub fn handle_input(&mut self, event: InputEvent, now: Instant) {
        match event {
            InputEvent::TouchDown { x, y } => self.touch_down(x, y, now),
            InputEvent::TouchMove { x, y } => self.touch_move(x, y, now),
            InputEvent::TouchUp { x, y } => self.touch_up(x, y, now),
            InputEvent::LongPress => self.long_press(now),
        }
    }

    fn touch_down(&mut self, x: f32, y: f32, now: Instant) {
        self.touch.begin(Vec2::new(x, y), now, self.motion.bias);
        self.motion.velocity = 0.0;
        self.touch.animated_selection = self.card_at(x, y, now);
        log::trace!(
            "touch down at ({x}, {y}) over {:?}",
            self.touch.animated_selection
        );
    }

    fn touch_move(&mut self, x: f32, y: f32, now: Instant) {
        let input = &self.options.input;
        let update = self.touch.drag(
            Vec2::new(x, y),
            self.viewport.width,
            input.drag_factor,
            input.selection_radius,
        );
        if update.cancelled_selection {
            log::trace!("touch left selection radius, dragging");
        }
        if update.rotation != 0.0 {
            self.motion.bias = self
                .bounds()
                .clamp_with_slack(self.motion.bias + update.rotation);
        }

        let dt = self.lap(now);
        self.touch.tracker.add(update.delta_angle, dt);
        self.motion.velocity = self.touch.tracker.average();
    }

    fn touch_up(&mut self, x: f32, y: f32, now: Instant) {
        // Hit test while the pressed card still carries its pulse scale.
        let tapped = self
            .touch
            .enable_selection
            .then(|| self.card_at(x, y, now));
        let was_tap = self.touch.end();
        if was_tap {
            self.motion.velocity = 0.0;
            if let Some(index) = tapped.flatten() {
                log::debug!("card {index} selected");
                self.notify(HostMessage::CardSelected(index));
            }
        } else {
            self.motion.velocity = self.touch.tracker.average();
        }

        let bounds = self.bounds();
        if !bounds.contains(self.motion.bias) {
            self.motion.overscroll = true;
            self.motion.velocity = 0.0;
        }
        let integrator = self.integrator();
        let active = self.motion.overscroll
            || integrator.is_moving(self.motion.velocity)
            || integrator.off_slot(self.motion.bias);
        self.physics_active = active;
        self.last_time = Some(now);
    }

    fn long_press(&mut self, now: Instant) {
        let Vec2 { x, y } = self.touch.last_position;
        if let Some(index) = self.card_at(x, y, now) {
            log::debug!("card {index} long-pressed");
            self.notify(HostMessage::CardLongPressed(index));
        }
        self.last_time = Some(now);
    }

    /// Blocking delivery for messages the host must not miss.
    fn notify(&self, message: HostMessage) {
        if let Err(e) = self.port.post_blocking(message) {
            log::warn!("{message:?} not delivered: {e}");
        }
    }
}
