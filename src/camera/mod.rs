//! Perspective camera for the carousel scene.
//!
//! Holds eye/target/up and projection parameters, and caches the view and
//! projection matrices behind a dirty flag.

/// Core camera struct, viewport and the matrix cache.
pub mod core;

pub use self::core::{Camera, CameraRig, Viewport};
