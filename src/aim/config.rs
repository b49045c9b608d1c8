use crate::error::{Result, RigError};

/// Aim tunables. Angles in degrees, speeds in degrees per second.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AimConfig {
    pub orbit_distance: f32,
    pub default_yaw: f32,
    pub default_pitch: f32,
    pub yaw_speed: f32,
    pub pitch_speed: f32,
    /// Yaw wraps instead of clamping when these span a full turn.
    pub yaw_limits: (f32, f32),
    pub pitch_limits: (f32, f32),
    pub cue_yaw_speed: f32,
    pub cue_pitch_speed: f32,
    pub cue_yaw_limits: (f32, f32),
    pub cue_pitch_limits: (f32, f32),
    /// Ball speed above which the rig detaches.
    pub detach_speed: f32,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            orbit_distance: 5.0,
            default_yaw: 0.0,
            default_pitch: 20.0,
            yaw_speed: 60.0,
            pitch_speed: 40.0,
            yaw_limits: (-180.0, 180.0),
            pitch_limits: (5.0, 60.0),
            cue_yaw_speed: 30.0,
            cue_pitch_speed: 30.0,
            cue_yaw_limits: (-45.0, 45.0),
            cue_pitch_limits: (-20.0, 45.0),
            detach_speed: 0.01,
        }
    }
}

impl AimConfig {
    pub fn with_orbit_distance(mut self, orbit_distance: f32) -> Self {
        self.orbit_distance = orbit_distance;
        self
    }

    pub fn with_defaults(mut self, yaw: f32, pitch: f32) -> Self {
        self.default_yaw = yaw;
        self.default_pitch = pitch;
        self
    }

    pub fn with_orbit_speeds(mut self, yaw_speed: f32, pitch_speed: f32) -> Self {
        self.yaw_speed = yaw_speed;
        self.pitch_speed = pitch_speed;
        self
    }

    pub fn with_pitch_limits(mut self, min: f32, max: f32) -> Self {
        self.pitch_limits = (min, max);
        self
    }

    pub fn with_yaw_limits(mut self, min: f32, max: f32) -> Self {
        self.yaw_limits = (min, max);
        self
    }

    pub fn with_detach_speed(mut self, detach_speed: f32) -> Self {
        self.detach_speed = detach_speed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.orbit_distance > 0.0) {
            return Err(RigError::invalid("aim.orbit_distance", "must be positive"));
        }
        let limits = [
            ("aim.yaw_limits", self.yaw_limits),
            ("aim.pitch_limits", self.pitch_limits),
            ("aim.cue_yaw_limits", self.cue_yaw_limits),
            ("aim.cue_pitch_limits", self.cue_pitch_limits),
        ];
        for (field, (min, max)) in limits {
            if !(min <= max) {
                return Err(RigError::invalid(field, "minimum exceeds maximum"));
            }
        }
        let speeds = [
            ("aim.yaw_speed", self.yaw_speed),
            ("aim.pitch_speed", self.pitch_speed),
            ("aim.cue_yaw_speed", self.cue_yaw_speed),
            ("aim.cue_pitch_speed", self.cue_pitch_speed),
            ("aim.detach_speed", self.detach_speed),
        ];
        for (field, speed) in speeds {
            if !(speed >= 0.0) {
                return Err(RigError::invalid(field, "must be non-negative"));
            }
        }
        Ok(())
    }
}
