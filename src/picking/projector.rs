//! Screen pixel to world ray construction.

use std::fmt;

use glam::{Mat4, Vec3, Vec4};

use super::ray::{Ray, EPSILON};
use crate::camera::{Camera, Viewport};

/// Why a pixel could not be turned into a ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayError {
    /// The projection·view matrix has no inverse.
    SingularMatrix,
    /// An unprojected point landed at infinity (`w == 0`).
    DegenerateProjection,
    /// The constructed direction had zero length.
    DegenerateDirection,
}

impl fmt::Display for RayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingularMatrix => write!(f, "projection matrix is singular"),
            Self::DegenerateProjection => {
                write!(f, "unprojected point has zero w")
            }
            Self::DegenerateDirection => write!(f, "ray direction is zero"),
        }
    }
}

impl std::error::Error for RayError {}

/// Strategy for turning a pixel coordinate into a world-space ray.
///
/// Pixel `y` grows downward; both strategies flip it so `y = 0` is the top
/// edge of the viewport.
pub trait RayProjector {
    /// Ray through pixel `(x, y)`.
    fn ray_for_pixel(&self, x: f32, y: f32) -> Result<Ray, RayError>;
}

/// Builds rays directly from the camera basis.
#[derive(Debug, Clone, Copy)]
pub struct PerspectiveProjector {
    eye: Vec3,
    target: Vec3,
    up: Vec3,
    fovy: f32,
    viewport: Viewport,
}

impl PerspectiveProjector {
    /// Projector for `camera` drawing into `viewport`.
    #[must_use]
    pub fn new(camera: &Camera, viewport: Viewport) -> Self {
        Self {
            eye: camera.eye,
            target: camera.target,
            up: camera.up,
            fovy: camera.fovy,
            viewport,
        }
    }
}

impl RayProjector for PerspectiveProjector {
    fn ray_for_pixel(&self, x: f32, y: f32) -> Result<Ray, RayError> {
        let Viewport { width, height } = self.viewport;
        let u = x / width;
        let v = 1.0 - y / height;

        let span = 2.0 * (self.fovy.to_radians() * 0.5).tan();
        let dir = (self.target - self.eye).normalize_or_zero();
        let du = span * dir.cross(self.up).normalize_or_zero() * self.viewport.aspect();
        let dv = span * du.cross(dir).normalize_or_zero();

        let direction =
            (dir - du * 0.5 - dv * 0.5 + du * u + dv * v).normalize_or_zero();
        if direction.length_squared() < EPSILON {
            return Err(RayError::DegenerateDirection);
        }
        Ok(Ray {
            origin: self.eye,
            direction,
        })
    }
}

/// Builds rays by unprojecting through the inverse of `projection · view`.
#[derive(Debug, Clone, Copy)]
pub struct UnprojectProjector {
    inverse: Mat4,
    viewport: Viewport,
}

impl UnprojectProjector {
    /// Projector for the combined `projection · view` matrix. Fails when the
    /// matrix cannot be inverted.
    pub fn new(view_projection: Mat4, viewport: Viewport) -> Result<Self, RayError> {
        let det = view_projection.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(RayError::SingularMatrix);
        }
        Ok(Self {
            inverse: view_projection.inverse(),
            viewport,
        })
    }

    fn unproject(&self, ndc: Vec4) -> Result<Vec3, RayError> {
        let world = self.inverse * ndc;
        if world.w == 0.0 {
            return Err(RayError::DegenerateProjection);
        }
        Ok(world.truncate() / world.w)
    }
}

impl RayProjector for UnprojectProjector {
    fn ray_for_pixel(&self, x: f32, y: f32) -> Result<Ray, RayError> {
        let ndc_x = 2.0 * x / self.viewport.width - 1.0;
        let ndc_y = 1.0 - 2.0 * y / self.viewport.height;

        let near = self.unproject(Vec4::new(ndc_x, ndc_y, -1.0, 1.0))?;
        let far = self.unproject(Vec4::new(ndc_x, ndc_y, 1.0, 1.0))?;

        let direction = (far - near).normalize_or_zero();
        if direction == Vec3::ZERO {
            return Err(RayError::DegenerateDirection);
        }
        Ok(Ray {
            origin: near,
            direction,
        })
    }
}
