//! Touch input: event types and the gesture state that turns finger motion
//! into ring rotation, velocity and taps.

/// Platform-agnostic touch events.
pub mod event;
/// Gesture tracking and drag velocity averaging.
pub(crate) mod touch;

pub use event::InputEvent;
pub use touch::{DragUpdate, TouchState, VelocityTracker};
