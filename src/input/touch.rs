use glam::Vec2;
use web_time::Instant;

/// Running average of angular velocity samples taken during a drag.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VelocityTracker {
    sum: f32,
    count: u32,
}

impl VelocityTracker {
    /// Forget all samples.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record one `delta_angle / dt` sample. Non-positive `dt` is ignored.
    pub fn add(&mut self, delta_angle: f32, dt: f32) {
        if dt > 0.0 {
            self.sum += delta_angle / dt;
            self.count += 1;
        }
    }

    /// Mean of the recorded samples, zero with none.
    #[must_use]
    pub fn average(&self) -> f32 {
        if self.count > 0 {
            self.sum / self.count as f32
        } else {
            0.0
        }
    }

    /// Number of samples taken.
    #[must_use]
    pub fn samples(&self) -> u32 {
        self.count
    }
}

/// What a touch-move did to the gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragUpdate {
    /// Angle the finger swept since the last move, fed to the velocity
    /// tracker.
    pub delta_angle: f32,
    /// Rotation to apply to the ring, zero while still tracking a tap.
    pub rotation: f32,
    /// Whether this move ended tap tracking.
    pub cancelled_selection: bool,
}

/// Touch gesture state: where the finger went down, where it is now and
/// whether the gesture can still become a tap.
#[derive(Debug, Clone, Copy)]
pub struct TouchState {
    /// Finger-down position.
    pub touch_position: Vec2,
    /// Most recent finger position.
    pub last_position: Vec2,
    /// When the finger went down.
    pub touch_time: Option<Instant>,
    /// Ring bias when the finger went down.
    pub touch_bias: f32,
    /// Finger is down.
    pub is_dragging: bool,
    /// Gesture is still within the tap radius.
    pub enable_selection: bool,
    /// Card pulsing under the finger.
    pub animated_selection: Option<usize>,
    /// Drag velocity samples.
    pub tracker: VelocityTracker,
}

impl Default for TouchState {
    fn default() -> Self {
        Self {
            touch_position: Vec2::ZERO,
            last_position: Vec2::ZERO,
            touch_time: None,
            touch_bias: 0.0,
            is_dragging: false,
            enable_selection: false,
            animated_selection: None,
            tracker: VelocityTracker::default(),
        }
    }
}

impl TouchState {
    /// Start a new gesture at `position`.
    pub fn begin(&mut self, position: Vec2, now: Instant, bias: f32) {
        self.touch_position = position;
        self.last_position = position;
        self.touch_time = Some(now);
        self.touch_bias = bias;
        self.is_dragging = true;
        self.enable_selection = true;
        self.tracker.reset();
    }

    /// Follow the finger to `position`.
    ///
    /// The returned rotation is `drag_factor · Δx / width · π`, but is only
    /// applied once the gesture has left `selection_radius` on an earlier
    /// move. The move that leaves the radius itself does not rotate.
    pub fn drag(
        &mut self,
        position: Vec2,
        viewport_width: f32,
        drag_factor: f32,
        selection_radius: f32,
    ) -> DragUpdate {
        let delta_angle = if viewport_width > 0.0 {
            drag_factor * ((position.x - self.last_position.x) / viewport_width)
                * std::f32::consts::PI
        } else {
            0.0
        };

        let was_tracking = self.enable_selection;
        let rotation = if was_tracking { 0.0 } else { delta_angle };

        let inside = position.distance(self.touch_position) < selection_radius;
        self.enable_selection &= inside;
        self.last_position = position;

        DragUpdate {
            delta_angle,
            rotation,
            cancelled_selection: was_tracking && !self.enable_selection,
        }
    }

    /// End the gesture. Returns whether it was still a tap.
    pub fn end(&mut self) -> bool {
        let was_tap = self.enable_selection;
        self.enable_selection = false;
        self.is_dragging = false;
        was_tap
    }

    /// Time since the finger went down, if it ever did.
    #[must_use]
    pub fn since_touch(&self, now: Instant) -> Option<std::time::Duration> {
        self.touch_time.map(|t| now.saturating_duration_since(t))
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    #[test]
    fn tracker_averages_samples_and_skips_zero_dt() {
        let mut tracker = VelocityTracker::default();
        assert_eq!(tracker.average(), 0.0);
        tracker.add(1.0, 0.5);
        tracker.add(3.0, 1.0);
        tracker.add(9.0, 0.0);
        assert_eq!(tracker.samples(), 2);
        assert!((tracker.average() - 2.5).abs() < 1e-6);
        tracker.reset();
        assert_eq!(tracker.samples(), 0);
    }

    #[test]
    fn small_moves_keep_tap_and_do_not_rotate() {
        let mut touch = TouchState::default();
        touch.begin(Vec2::new(100.0, 100.0), Instant::now(), 0.0);
        let update = touch.drag(Vec2::new(120.0, 110.0), 1000.0, 0.25, 50.0);
        assert!((update.delta_angle - 0.25 * 0.02 * PI).abs() < 1e-6);
        assert_eq!(update.rotation, 0.0);
        assert!(!update.cancelled_selection);
        assert!(touch.enable_selection);
        assert!(touch.end());
        assert!(!touch.is_dragging);
    }

    #[test]
    fn leaving_radius_cancels_then_rotates() {
        let mut touch = TouchState::default();
        touch.begin(Vec2::new(500.0, 100.0), Instant::now(), 0.0);

        let first = touch.drag(Vec2::new(450.0, 100.0), 1000.0, 0.25, 50.0);
        assert!(first.cancelled_selection);
        assert_eq!(first.rotation, 0.0);

        let second = touch.drag(Vec2::new(350.0, 100.0), 1000.0, 0.25, 50.0);
        assert!(!second.cancelled_selection);
        assert!((second.rotation + 0.25 * 0.1 * PI).abs() < 1e-6);
        assert!(!touch.end());
    }

    #[test]
    fn zero_width_viewport_produces_no_rotation() {
        let mut touch = TouchState::default();
        touch.begin(Vec2::ZERO, Instant::now(), 0.0);
        touch.enable_selection = false;
        let update = touch.drag(Vec2::new(300.0, 0.0), 0.0, 0.25, 50.0);
        assert_eq!(update.delta_angle, 0.0);
        assert_eq!(update.rotation, 0.0);
    }
}
