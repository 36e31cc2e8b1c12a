/// Platform-agnostic touch events.
///
/// The host's input plumbing forwards these to
/// [`CarouselEngine::handle_input`](crate::engine::CarouselEngine::handle_input)
/// together with the time they happened.
///
/// # Example
///
/// ```ignore
/// engine.handle_input(InputEvent::TouchDown { x: 120.0, y: 300.0 }, now);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Finger went down.
    TouchDown {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels, growing downward.
        y: f32,
    },
    /// Finger moved while down.
    TouchMove {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels, growing downward.
        y: f32,
    },
    /// Finger lifted.
    TouchUp {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels, growing downward.
        y: f32,
    },
    /// Platform long-press gesture at the last known position.
    LongPress,
}
