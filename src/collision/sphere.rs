use glam::Vec3;

use super::raycast::{Ray, RayHit};

/// The ball's collision volume as seen by the rig.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallVolume {
    pub center: Vec3,
    pub radius: f32,
}

impl BallVolume {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        (point - self.center).length_squared() <= self.radius * self.radius
    }

    pub fn signed_distance(&self, point: Vec3) -> f32 {
        (point - self.center).length() - self.radius
    }

    /// True when `point` is inside the ball or within `margin` of its surface.
    pub fn is_touching(&self, point: Vec3, margin: f32) -> bool {
        self.signed_distance(point) < margin
    }

    /// Contact test for a point that moved from `from` to `to` this tick:
    /// touching at the end, or passing through the ball on the way.
    pub fn sweep_touches(&self, from: Vec3, to: Vec3, margin: f32) -> bool {
        if self.is_touching(to, margin) {
            return true;
        }
        let inflated = Self::new(self.center, self.radius + margin.max(0.0));
        inflated.ray_intersect(&Ray::swept(from, to)).is_some()
    }

    pub fn closest_surface_point(&self, point: Vec3) -> Vec3 {
        let dir = (point - self.center).normalize_or_zero();
        if dir.length_squared() < 0.0001 {
            return self.center + Vec3::Y * self.radius;
        }
        self.center + dir * self.radius
    }

    pub fn surface_normal(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize_or_zero()
    }

    pub fn ray_intersect(&self, ray: &Ray) -> Option<RayHit> {
        if ray.is_degenerate() {
            return None;
        }

        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;
        let discriminant = b * b - 4.0 * a * c;

        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let t = (-b - sqrt_d) / (2.0 * a);

        if t > ray.t_min && t < ray.t_max {
            let point = ray.at(t);
            let normal = self.surface_normal(point);
            return Some(RayHit { t, point, normal });
        }

        let t = (-b + sqrt_d) / (2.0 * a);
        if t > ray.t_min && t < ray.t_max {
            let point = ray.at(t);
            let normal = self.surface_normal(point);
            return Some(RayHit { t, point, normal });
        }

        None
    }
}
