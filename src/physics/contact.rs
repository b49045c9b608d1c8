use glam::Vec3;

use crate::error::{Result, RigError};
use crate::math::{flatten, DEGENERATE_EPSILON};

/// Tunables of the strike model.
///
/// One parameter set serves every shot; hosts that want a harder break or a
/// livelier jump scale the multipliers rather than swapping models.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactTunables {
    /// Floor on the strike speed, so a zero-charge tap still moves the ball.
    pub min_hit_speed: f32,
    pub force_multiplier: f32,
    /// Normalized offset below center past which the strike becomes a jump shot.
    pub jump_threshold: f32,
    pub jump_force_multiplier: f32,
    pub spin_strength: f32,
    /// Offsets with smaller magnitude produce no spin.
    pub flat_shot_deadzone: f32,
}

impl Default for ContactTunables {
    fn default() -> Self {
        Self {
            min_hit_speed: 5.0,
            force_multiplier: 1.0,
            jump_threshold: 0.25,
            jump_force_multiplier: 1.0,
            spin_strength: 10.0,
            flat_shot_deadzone: 0.05,
        }
    }
}

impl ContactTunables {
    pub fn with_min_hit_speed(mut self, min_hit_speed: f32) -> Self {
        self.min_hit_speed = min_hit_speed;
        self
    }

    pub fn with_force_multiplier(mut self, force_multiplier: f32) -> Self {
        self.force_multiplier = force_multiplier;
        self
    }

    pub fn with_jump(mut self, threshold: f32, force_multiplier: f32) -> Self {
        self.jump_threshold = threshold;
        self.jump_force_multiplier = force_multiplier;
        self
    }

    pub fn with_spin(mut self, strength: f32, deadzone: f32) -> Self {
        self.spin_strength = strength;
        self.flat_shot_deadzone = deadzone;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.min_hit_speed >= 0.0) {
            return Err(RigError::invalid("contact.min_hit_speed", "must be non-negative"));
        }
        if !(self.force_multiplier > 0.0) {
            return Err(RigError::invalid("contact.force_multiplier", "must be positive"));
        }
        if !(0.0..1.0).contains(&self.jump_threshold) {
            return Err(RigError::invalid("contact.jump_threshold", "must lie in [0, 1)"));
        }
        if !(self.jump_force_multiplier >= 0.0) {
            return Err(RigError::invalid("contact.jump_force_multiplier", "must be non-negative"));
        }
        if !(self.flat_shot_deadzone >= 0.0) {
            return Err(RigError::invalid("contact.flat_shot_deadzone", "must be non-negative"));
        }
        Ok(())
    }
}

/// Where the tip is and where it is heading at the moment of contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikeGeometry {
    pub tip: Vec3,
    pub ball_center: Vec3,
    pub ball_radius: f32,
    pub cue_forward: Vec3,
    pub strike_speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactEvent {
    pub contact_point: Vec3,
    /// `-1` at the bottom of the ball, `1` at the top.
    pub vertical_offset: f32,
    pub horizontal_direction: Vec3,
    pub strike_speed: f32,
}

/// What the rigid-body engine should apply to the struck ball.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikeImpulse {
    pub impulse: Vec3,
    /// World-space application point of `impulse`.
    pub contact_point: Vec3,
    pub angular_velocity: Vec3,
    /// Positive for topspin, negative for backspin.
    pub topspin: f32,
    pub jump_shot: bool,
    pub event: ContactEvent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContactPhysicsModel {
    tunables: ContactTunables,
}

impl ContactPhysicsModel {
    pub fn new(tunables: ContactTunables) -> Self {
        Self { tunables }
    }

    pub fn tunables(&self) -> &ContactTunables {
        &self.tunables
    }

    pub fn contact_event(&self, geometry: &StrikeGeometry) -> ContactEvent {
        let center = geometry.ball_center;
        let radius = geometry.ball_radius.max(0.0);

        let forward = non_zero_or(geometry.cue_forward.normalize_or_zero(), Vec3::NEG_Z);

        // A fast stroke can carry the tip into or through the ball; step back
        // along the cue so the approach side is measured, not the far side.
        let rel = geometry.tip - center;
        let along = rel.dot(forward);
        let lateral = (rel - forward * along).length();
        let tip = if along > -radius && lateral <= radius {
            geometry.tip - forward * (along + radius * 2.0)
        } else {
            geometry.tip
        };
        let dir = non_zero_or((center - tip).normalize_or_zero(), forward);
        let contact_point = center - dir * radius;

        let vertical_offset = if radius > DEGENERATE_EPSILON {
            ((contact_point.y - center.y) / radius).clamp(-1.0, 1.0)
        } else {
            0.0
        };

        let horizontal_direction = non_zero_or(
            flatten(geometry.cue_forward).normalize_or_zero(),
            non_zero_or(flatten(center - geometry.tip).normalize_or_zero(), Vec3::NEG_Z),
        );

        ContactEvent {
            contact_point,
            vertical_offset,
            horizontal_direction,
            strike_speed: geometry.strike_speed.max(0.0),
        }
    }

    pub fn resolve(&self, geometry: &StrikeGeometry) -> StrikeImpulse {
        let event = self.contact_event(geometry);
        let t = &self.tunables;
        let offset = event.vertical_offset;
        let horizontal = event.horizontal_direction;

        let total_power = event.strike_speed.max(t.min_hit_speed) * t.force_multiplier;

        let jump_shot = offset < -t.jump_threshold;
        let force_direction = if jump_shot {
            let span = (1.0 - t.jump_threshold).max(DEGENERATE_EPSILON);
            let lift = (-offset - t.jump_threshold) / span * t.jump_force_multiplier;
            (horizontal + Vec3::Y * lift).normalize_or_zero()
        } else {
            horizontal
        };

        let (angular_velocity, topspin) = if offset.abs() < t.flat_shot_deadzone {
            (Vec3::ZERO, 0.0)
        } else {
            let spin_axis = horizontal.cross(Vec3::Y).normalize_or_zero();
            (spin_axis * (-offset * t.spin_strength), offset * t.spin_strength)
        };

        if jump_shot {
            log::debug!("jump shot: offset {offset:.2}, power {total_power:.2}");
        }

        StrikeImpulse {
            impulse: force_direction * total_power,
            contact_point: event.contact_point,
            angular_velocity,
            topspin,
            jump_shot,
            event,
        }
    }
}

fn non_zero_or(v: Vec3, fallback: Vec3) -> Vec3 {
    if v == Vec3::ZERO {
        fallback
    } else {
        v
    }
}
