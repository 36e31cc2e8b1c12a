//! Headless carousel simulation.
//!
//! Drives the engine with a scripted fling on a simulated 60 Hz clock while
//! an in-process fake host answers resource requests. Useful for tuning
//! option presets: `carousel-sim [preset.toml]`, with `RUST_LOG=debug` for
//! the full message trace.

use std::{path::Path, process::ExitCode, time::Duration};

use carousel::{
    card::{GeometryHandle, TextureHandle},
    engine::CarouselEngine,
    host::{channel_port, ChannelPort, HostInbox, HostMessage},
    input::InputEvent,
    options::Options,
    render::{DetailOffsets, RecordingRenderer},
};
use glam::Vec2;
use web_time::Instant;

const FRAME: Duration = Duration::from_millis(16);
const CARD_COUNT: usize = 24;
const MAX_FRAMES: usize = 3_000;
const VIEWPORT: (f32, f32) = (1080.0, 1920.0);

/// Answer every pending request with a synthetic handle.
fn serve_host(
    engine: &mut CarouselEngine<ChannelPort>,
    inbox: &HostInbox,
    now: Instant,
) {
    log::trace!("{} host messages pending", engine.port().pending());
    for message in inbox.drain() {
        match message {
            HostMessage::RequestTexture(i) => {
                engine.set_texture(i, Some(TextureHandle::new(i as u64, 512, 512)), now);
            }
            HostMessage::RequestDetailTexture(i) => {
                let offsets = DetailOffsets {
                    texture: Vec2::new(0.0, 8.0),
                    line: Vec2::new(12.0, 0.0),
                };
                let handle = TextureHandle::new(1_000 + i as u64, 128, 48);
                engine.set_detail_texture(i, offsets, Some(handle), now);
            }
            HostMessage::RequestGeometry(i) => {
                engine.set_geometry(i, Some(GeometryHandle(i as u64)));
            }
            HostMessage::InvalidateTexture(i)
            | HostMessage::InvalidateDetailTexture(i)
            | HostMessage::InvalidateGeometry(i) => {
                log::debug!("host released resources of card {i}");
            }
            HostMessage::CardSelected(i) => log::info!("card {i} selected"),
            HostMessage::CardLongPressed(i) => log::info!("card {i} long-pressed"),
            HostMessage::AnimationStarted => log::info!("animation started"),
            HostMessage::AnimationFinished { angle_in_slots } => {
                log::info!("animation finished at {angle_in_slots:.3} slots");
            }
        }
    }
}

fn load_options() -> Result<Options, carousel::error::CarouselError> {
    match std::env::args().nth(1) {
        Some(path) => Options::load(Path::new(&path)),
        None => Ok(Options::default()),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let options = match load_options() {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let (port, inbox) = channel_port(256);
    let mut engine = CarouselEngine::new(options, port);
    engine.create_cards(CARD_COUNT);
    engine.set_viewport(VIEWPORT.0, VIEWPORT.1);

    let mut renderer = RecordingRenderer::default();
    let mut now = Instant::now();
    let y = VIEWPORT.1 * 0.5;

    // Settle the first frame so the initial textures are requested.
    let _ = engine.tick(now, &mut renderer);
    serve_host(&mut engine, &inbox, now);

    // Fling right-to-left across most of the screen.
    engine.handle_input(InputEvent::TouchDown { x: 900.0, y }, now);
    for step in 1..=8 {
        now += FRAME;
        let x = 900.0 - 90.0 * step as f32;
        engine.handle_input(InputEvent::TouchMove { x, y }, now);
        let _ = engine.tick(now, &mut renderer);
        serve_host(&mut engine, &inbox, now);
    }
    engine.handle_input(InputEvent::TouchUp { x: 180.0, y }, now);

    let mut frames = 0;
    loop {
        now += FRAME;
        frames += 1;
        let animating = engine.tick(now, &mut renderer);
        serve_host(&mut engine, &inbox, now);
        if !animating || frames >= MAX_FRAMES {
            break;
        }
    }

    log::info!(
        "settled after {frames} frames: rotation {:.3} slots, {} cards drawn, {} details",
        engine.rotation_in_slots(),
        renderer.cards.len(),
        renderer.details.len(),
    );
    ExitCode::SUCCESS
}
