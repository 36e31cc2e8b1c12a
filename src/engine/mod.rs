//! The carousel engine: one owned value holding every piece of carousel
//! state, driven by host calls, touch events and frame ticks.

mod accessors;
mod cards;
mod frame;
mod input;
mod options;

use web_time::Instant;

use crate::camera::{Camera, CameraRig, Viewport};
use crate::card::CardStore;
use crate::host::HostPort;
use crate::input::TouchState;
use crate::layout::{CardPlacement, Pulse, SlotRing};
use crate::options::Options;
use crate::physics::{BiasBounds, Integrator, Motion};

/// Whether the engine is asking for continuous frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing is moving; frames are only needed on external change.
    #[default]
    Idle,
    /// Physics, a fade or the selection pulse needs more frames.
    Animating,
}

/// A 3D card carousel.
///
/// Owns the card store, ring motion, touch state and camera, and talks to
/// the host through `P`. Every operation takes `&mut self`; the engine is
/// meant to live on the thread that renders it.
///
/// ```ignore
/// let (port, inbox) = carousel::host::channel_port(64);
/// let mut engine = CarouselEngine::new(Options::default(), port);
/// engine.create_cards(30);
/// engine.set_viewport(1080.0, 1920.0);
/// let animating = engine.tick(Instant::now(), &mut renderer);
/// ```
#[derive(Debug)]
pub struct CarouselEngine<P: HostPort> {
    options: Options,
    ring: SlotRing,
    cards: CardStore,
    motion: Motion,
    physics_active: bool,
    phase: Phase,
    touch: TouchState,
    camera: CameraRig,
    viewport: Viewport,
    last_time: Option<Instant>,
    port: P,
}

impl<P: HostPort> CarouselEngine<P> {
    /// Engine with no cards, configured by `options`, reporting to `port`.
    pub fn new(options: Options, port: P) -> Self {
        let viewport = Viewport::default();
        let camera = Camera::from_options(&options.camera, viewport.aspect());
        Self {
            ring: SlotRing::from_options(&options.layout),
            options,
            cards: CardStore::default(),
            motion: Motion::default(),
            physics_active: false,
            phase: Phase::Idle,
            touch: TouchState::default(),
            camera: CameraRig::new(camera),
            viewport,
            last_time: None,
            port,
        }
    }

    // ── Internal helpers shared by the submodules ──

    fn integrator(&self) -> Integrator<'_> {
        Integrator {
            options: &self.options.physics,
            ring: self.ring,
        }
    }

    fn bounds(&self) -> BiasBounds {
        BiasBounds::new(
            &self.ring,
            self.cards.len(),
            self.options.layout.visible_detail_count,
            self.options.physics.overscroll_slots,
        )
    }

    /// Scale of the pressed card at `now`, while the press can still become
    /// a tap.
    fn pulse(&self, now: Instant) -> Option<Pulse> {
        if !self.touch.enable_selection {
            return None;
        }
        let index = self.touch.animated_selection?;
        let elapsed = self.touch.since_touch(now)?;
        let input = &self.options.input;
        let window = input.selection_scale_ms.max(1) as f32 / 1000.0;
        let progress = (elapsed.as_secs_f32() / window).min(1.0);
        Some(Pulse {
            index,
            scale: 1.0 + input.selection_easing.evaluate(progress) * input.selected_scale,
        })
    }

    /// Whether `now` is still inside the post-touch pulse window.
    fn pulse_window_open(&self, now: Instant) -> bool {
        self.touch.since_touch(now).is_some_and(|elapsed| {
            elapsed.as_millis() <= u128::from(self.options.input.selection_scale_ms)
        })
    }

    fn placement(&self, now: Instant) -> CardPlacement<'_> {
        CardPlacement {
            ring: self.ring,
            bias: self.motion.bias,
            velocity: self.motion.velocity,
            layout: &self.options.layout,
            pulse: self.pulse(now),
        }
    }

    /// Seconds since the frame clock last ran, restarting it at `now`.
    fn lap(&mut self, now: Instant) -> f32 {
        let dt = self
            .last_time
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f32());
        self.last_time = Some(now);
        dt
    }
}
