//! Ray-based card picking.
//!
//! Pixels become world rays through a [`RayProjector`]; rays are tested
//! against each visible card's quad, and the closest hit wins.

mod hit_test;
mod projector;
mod ray;

pub use hit_test::{pick_card, CARD_VERTICES};
pub use projector::{
    PerspectiveProjector, RayError, RayProjector, UnprojectProjector,
};
pub use ray::{Cylinder, Plane, Ray, EPSILON};
