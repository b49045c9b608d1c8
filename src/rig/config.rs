use glam::Vec3;

use crate::aim::AimConfig;
use crate::ball::BallId;
use crate::error::{Result, RigError};
use crate::ik::ArmConfig;
use crate::physics::ContactTunables;
use crate::shot::ShotConfig;

/// Rest geometry of the rig, in root space (forward is −Z).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RigLayout {
    /// Shoulder position relative to the root.
    pub shoulder_offset: Vec3,
    /// Hand position at zero draw.
    pub hand_rest: Vec3,
    /// Cue tip relative to the hand.
    pub tip_offset: Vec3,
    /// Re-measure arm segment lengths from the rest pose of a supplied hierarchy.
    pub measure_arm: bool,
}

impl Default for RigLayout {
    fn default() -> Self {
        Self {
            shoulder_offset: Vec3::new(0.2, -0.15, 0.0),
            hand_rest: Vec3::new(0.0, 0.0, -1.5),
            tip_offset: Vec3::new(0.0, 0.0, -3.3),
            measure_arm: false,
        }
    }
}

impl RigLayout {
    pub fn validate(&self) -> Result<()> {
        if !self.hand_rest.is_finite() || !self.shoulder_offset.is_finite() {
            return Err(RigError::invalid("layout", "offsets must be finite"));
        }
        if !self.tip_offset.is_finite() || self.tip_offset.length_squared() < 1e-6 {
            return Err(RigError::invalid("layout.tip_offset", "must be a non-zero finite vector"));
        }
        Ok(())
    }
}

/// Everything needed to build a [`CueRig`](super::CueRig).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RigConfig {
    pub aim: AimConfig,
    pub arm: ArmConfig,
    pub shot: ShotConfig,
    pub contact: ContactTunables,
    pub layout: RigLayout,
    /// Balls the player may aim at; the first one starts selected.
    pub targets: Vec<BallId>,
}

impl RigConfig {
    pub fn with_aim(mut self, aim: AimConfig) -> Self {
        self.aim = aim;
        self
    }

    pub fn with_arm(mut self, arm: ArmConfig) -> Self {
        self.arm = arm;
        self
    }

    pub fn with_shot(mut self, shot: ShotConfig) -> Self {
        self.shot = shot;
        self
    }

    pub fn with_contact(mut self, contact: ContactTunables) -> Self {
        self.contact = contact;
        self
    }

    pub fn with_layout(mut self, layout: RigLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_targets(mut self, targets: impl IntoIterator<Item = BallId>) -> Self {
        self.targets = targets.into_iter().collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.aim.validate()?;
        self.arm.validate()?;
        self.shot.validate()?;
        self.contact.validate()?;
        self.layout.validate()
    }
}
