use glam::{Mat4, Vec3};

use crate::options::CameraOptions;

/// Pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Viewport of `width` × `height` pixels.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height, or 1 for an empty surface.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Camera from the configured options at the given aspect ratio.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        Self {
            eye: Vec3::from_array(options.eye),
            target: Vec3::from_array(options.target),
            up: Vec3::from_array(options.up),
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// World-to-eye matrix.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Eye-to-clip matrix. Depth maps to `[-1, 1]` (GL convention), which the
    /// unprojecting ray caster relies on.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }
}

/// Camera plus its cached matrices.
///
/// Matrices are rebuilt lazily by [`CameraRig::refresh`] when the camera was
/// moved or the viewport aspect changed.
#[derive(Debug, Clone)]
pub struct CameraRig {
    camera: Camera,
    view: Mat4,
    projection: Mat4,
    dirty: bool,
}

impl CameraRig {
    /// Rig for `camera`; matrices are built on the first refresh.
    #[must_use]
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            dirty: true,
        }
    }

    /// Current camera parameters.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Move the camera. Takes effect on the next refresh.
    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.camera.eye = eye;
        self.camera.target = target;
        self.camera.up = up;
        self.dirty = true;
    }

    /// Change the lens. Takes effect on the next refresh.
    pub fn set_lens(&mut self, fovy: f32, znear: f32, zfar: f32) {
        self.camera.fovy = fovy;
        self.camera.znear = znear;
        self.camera.zfar = zfar;
        self.dirty = true;
    }

    /// Whether the cached matrices are stale.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Rebuild matrices if the camera moved or the aspect ratio differs from
    /// `viewport`. Returns whether anything was rebuilt.
    pub fn refresh(&mut self, viewport: Viewport) -> bool {
        let aspect = viewport.aspect();
        if !self.dirty && aspect == self.camera.aspect {
            return false;
        }
        self.camera.aspect = aspect;
        self.view = self.camera.build_view();
        self.projection = self.camera.build_projection();
        self.dirty = false;
        log::trace!(
            "camera refreshed: eye {:?} target {:?} aspect {aspect}",
            self.camera.eye,
            self.camera.target
        );
        true
    }

    /// Cached view matrix.
    #[must_use]
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Cached projection matrix.
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Cached `projection · view`.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig() -> CameraRig {
        CameraRig::new(Camera::from_options(&CameraOptions::default(), 1.0))
    }

    #[test]
    fn first_refresh_builds_matrices() {
        let mut rig = rig();
        assert!(rig.is_dirty());
        assert!(rig.refresh(Viewport::new(800.0, 400.0)));
        assert!(!rig.is_dirty());
        assert_eq!(rig.camera().aspect, 2.0);
        assert_eq!(rig.view(), rig.camera().build_view());
    }

    #[test]
    fn refresh_is_lazy_until_something_changes() {
        let mut rig = rig();
        let vp = Viewport::new(640.0, 480.0);
        let _ = rig.refresh(vp);
        assert!(!rig.refresh(vp));
        assert!(rig.refresh(Viewport::new(480.0, 640.0)));
        rig.look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        assert!(rig.refresh(Viewport::new(480.0, 640.0)));
        rig.set_lens(40.0, 0.5, 50.0);
        assert!(rig.is_dirty());
        assert!(rig.refresh(Viewport::new(480.0, 640.0)));
        assert_eq!(rig.camera().fovy, 40.0);
    }

    #[test]
    fn target_projects_to_screen_centre() {
        let mut rig = rig();
        let _ = rig.refresh(Viewport::new(100.0, 100.0));
        let clip = rig.view_projection() * rig.camera().target.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }

    #[test]
    fn empty_viewport_has_unit_aspect() {
        assert_eq!(Viewport::new(300.0, 0.0).aspect(), 1.0);
    }
}
