// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Physics-driven 3D card carousel.
//!
//! Cards sit in slots around a vertical circle. Dragging rotates the ring,
//! friction (and an optional snap spring) bring it to rest, taps are
//! resolved by ray casting against the card quads, and each visible card's
//! textures and mesh are streamed from the host on demand.
//!
//! # Key entry points
//!
//! - [`engine::CarouselEngine`] - owns all carousel state; call
//!   [`tick`](engine::CarouselEngine::tick) once per frame
//! - [`host::HostPort`] - outbound notifications and resource requests
//! - [`render::Renderer`] - receives per-frame draw intent
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Frame pipeline
//!
//! Each tick refreshes the camera, advances ring physics, culls cards to the
//! visible window, reconciles resource requests with the host, emits card
//! and detail draws, and posts animation start/finish notifications when
//! the engine's need for frames changes.

pub mod camera;
pub mod card;
pub mod engine;
pub mod error;
pub mod host;
pub mod input;
pub mod layout;
pub mod options;
pub mod physics;
pub mod picking;
pub mod render;
pub mod resources;
pub mod util;
