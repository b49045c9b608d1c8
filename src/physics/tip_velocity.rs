use glam::Vec3;

/// Finite-difference velocity of the cue tip, one sample per tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TipVelocityTracker {
    previous: Option<Vec3>,
    velocity: Vec3,
}

impl TipVelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, position: Vec3, dt: f32) -> Vec3 {
        self.velocity = match self.previous {
            Some(previous) if dt > f32::EPSILON => (position - previous) / dt,
            _ => Vec3::ZERO,
        };
        self.previous = Some(position);
        self.velocity
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Forget the last sample, e.g. after the rig teleported.
    pub fn reset(&mut self) {
        self.previous = None;
        self.velocity = Vec3::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn first_sample_and_zero_dt_report_rest() {
        let mut tracker = TipVelocityTracker::new();
        assert_eq!(tracker.update(Vec3::ONE, 0.016), Vec3::ZERO);
        assert_eq!(tracker.update(Vec3::new(5.0, 1.0, 1.0), 0.0), Vec3::ZERO);
    }

    #[test]
    fn tracks_displacement_over_dt() {
        let mut tracker = TipVelocityTracker::new();
        tracker.update(Vec3::ZERO, 0.1);
        let v = tracker.update(Vec3::new(0.0, 0.0, -1.5), 0.1);
        assert!(v.abs_diff_eq(Vec3::new(0.0, 0.0, -15.0), 1e-4));
        assert_abs_diff_eq!(tracker.speed(), 15.0, epsilon = 1e-4);

        tracker.reset();
        assert_eq!(tracker.update(Vec3::new(9.0, 9.0, 9.0), 0.1), Vec3::ZERO);
    }
}
