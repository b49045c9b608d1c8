use glam::Vec3;

/// Half-line (or segment, when `t_max` is finite) with a unit direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub t_min: f32,
    pub t_max: f32,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self::with_range(origin, direction, 0.0001, f32::MAX)
    }

    pub fn with_range(origin: Vec3, direction: Vec3, t_min: f32, t_max: f32) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            t_min,
            t_max,
        }
    }

    /// The segment swept by a point moving from `from` to `to` in one tick.
    /// A stationary point gives a degenerate ray that hits nothing.
    pub fn swept(from: Vec3, to: Vec3) -> Self {
        let delta = to - from;
        let length = delta.length();
        if length < 0.0001 {
            return Self::with_range(from, Vec3::ZERO, 0.0, 0.0);
        }
        Self {
            origin: from,
            direction: delta / length,
            t_min: 0.0,
            t_max: length,
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    pub fn is_degenerate(&self) -> bool {
        self.direction.length_squared() < 0.0001
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub t: f32,
    pub point: Vec3,
    pub normal: Vec3,
}
