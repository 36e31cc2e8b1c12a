//! Ray primitives and analytic intersection tests.
//!
//! Every test takes the closest time found so far and only reports hits
//! strictly in front of the origin and strictly closer than that bound, so a
//! caller can fold a whole scene through one running `best`.

use glam::Vec3;

/// Tolerance for parallel and degenerate cases.
pub const EPSILON: f32 = 1.0e-6;

/// Half-line from `origin` along `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

/// Plane `normal · p + constant = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Plane normal.
    pub normal: Vec3,
    /// Negated distance term, `-(normal · point_on_plane)`.
    pub constant: f32,
}

impl Plane {
    /// Plane through `point` with the given normal.
    #[must_use]
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self {
            normal,
            constant: -point.dot(normal),
        }
    }
}

/// Infinite cylinder whose axis is parallel to Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    /// Any point on the axis; only `x` and `z` matter.
    pub center: Vec3,
    /// Cylinder radius.
    pub radius: f32,
}

impl Ray {
    /// Point at parameter `t`.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Möller–Trumbore test against triangle `p0 p1 p2`.
    #[must_use]
    pub fn hit_triangle(
        &self,
        p0: Vec3,
        p1: Vec3,
        p2: Vec3,
        closest: f32,
    ) -> Option<f32> {
        let e1 = p1 - p0;
        let e2 = p2 - p0;
        let s1 = self.direction.cross(e2);

        let det = s1.dot(e1);
        if det.abs() <= EPSILON {
            return None;
        }
        let inv = 1.0 / det;

        let d = self.origin - p0;
        let u = d.dot(s1) * inv;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let s2 = d.cross(e1);
        let v = self.direction.dot(s2) * inv;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = e2.dot(s2) * inv;
        accept(t, closest)
    }

    /// Intersection with `plane`, missing when the ray runs parallel to it.
    #[must_use]
    pub fn hit_plane(&self, plane: &Plane, closest: f32) -> Option<f32> {
        let denom = self.direction.dot(plane.normal);
        if denom.abs() <= EPSILON {
            return None;
        }
        let t = -(plane.constant + self.origin.dot(plane.normal)) / denom;
        accept(t, closest)
    }

    /// Nearest forward intersection with `cylinder`.
    #[must_use]
    pub fn hit_cylinder(&self, cylinder: &Cylinder, closest: f32) -> Option<f32> {
        let dir = self.direction;
        let pos = self.origin - cylinder.center;

        let a = dir.x * dir.x + dir.z * dir.z;
        if a < EPSILON {
            return None;
        }
        let b = 2.0 * (dir.x * pos.x + dir.z * pos.z);
        let c = pos.x * pos.x + pos.z * pos.z - cylinder.radius * cylinder.radius;

        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let denom = 2.0 * a;

        accept((-b - root) / denom, closest)
            .or_else(|| accept((-b + root) / denom, closest))
    }
}

fn accept(t: f32, closest: f32) -> Option<f32> {
    (t > 0.0 && t < closest).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const P0: Vec3 = Vec3::new(-1.0, -1.0, 0.0);
    const P1: Vec3 = Vec3::new(2.0, -1.0, 0.0);
    const P2: Vec3 = Vec3::new(-1.0, 2.0, 0.0);

    fn down_z(x: f32, y: f32) -> Ray {
        Ray {
            origin: Vec3::new(x, y, 1.0),
            direction: Vec3::NEG_Z,
        }
    }

    #[test]
    fn ray_through_centroid_hits_at_unit_distance() {
        // Centroid of P0 P1 P2 is the origin.
        let t = down_z(0.0, 0.0).hit_triangle(P0, P1, P2, f32::MAX).unwrap();
        assert!((t - 1.0).abs() < 1e-6);
    }

    #[test]
    fn offset_ray_misses_triangle() {
        assert!(down_z(5.0, 5.0).hit_triangle(P0, P1, P2, f32::MAX).is_none());
        assert!(down_z(1.5, 1.5).hit_triangle(P0, P1, P2, f32::MAX).is_none());
    }

    #[test]
    fn parallel_ray_misses_triangle() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 1.0),
            direction: Vec3::X,
        };
        assert!(ray.hit_triangle(P0, P1, P2, f32::MAX).is_none());
    }

    #[test]
    fn hits_behind_or_beyond_best_are_rejected() {
        let behind = Ray {
            origin: Vec3::new(0.0, 0.0, -1.0),
            direction: Vec3::NEG_Z,
        };
        assert!(behind.hit_triangle(P0, P1, P2, f32::MAX).is_none());
        assert!(down_z(0.0, 0.0).hit_triangle(P0, P1, P2, 0.5).is_none());
        // Equal to best is not closer.
        assert!(down_z(0.0, 0.0).hit_triangle(P0, P1, P2, 1.0).is_none());
    }

    #[test]
    fn plane_hit_and_parallel_miss() {
        let ground = Plane::from_point_normal(Vec3::new(0.0, -2.0, 0.0), Vec3::Y);
        let ray = Ray {
            origin: Vec3::new(3.0, 1.0, 0.0),
            direction: Vec3::NEG_Y,
        };
        let t = ray.hit_plane(&ground, f32::MAX).unwrap();
        assert!((t - 3.0).abs() < 1e-6);
        assert!((ray.at(t).y + 2.0).abs() < 1e-6);

        let skim = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::X,
        };
        assert!(skim.hit_plane(&ground, f32::MAX).is_none());
    }

    #[test]
    fn cylinder_reports_nearest_forward_root() {
        let cyl = Cylinder {
            center: Vec3::ZERO,
            radius: 1.0,
        };
        let outside = Ray {
            origin: Vec3::new(-5.0, 3.0, 0.0),
            direction: Vec3::X,
        };
        let t = outside.hit_cylinder(&cyl, f32::MAX).unwrap();
        assert!((t - 4.0).abs() < 1e-5);

        // From inside only the far wall is in front.
        let inside = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::Z,
        };
        let t = inside.hit_cylinder(&cyl, f32::MAX).unwrap();
        assert!((t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn cylinder_misses_axis_parallel_and_distant_rays() {
        let cyl = Cylinder {
            center: Vec3::new(2.0, 0.0, 0.0),
            radius: 0.5,
        };
        let vertical = Ray {
            origin: Vec3::new(2.0, 0.0, 0.0),
            direction: Vec3::Y,
        };
        assert!(vertical.hit_cylinder(&cyl, f32::MAX).is_none());

        let wide = Ray {
            origin: Vec3::new(-5.0, 0.0, 3.0),
            direction: Vec3::X,
        };
        assert!(wide.hit_cylinder(&cyl, f32::MAX).is_none());
    }
}
