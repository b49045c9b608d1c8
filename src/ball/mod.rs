//! The boundary with the external physics engine: what it reports about a
//! ball each tick and where strikes are delivered.

mod bounds;

pub use bounds::{BallReset, OutOfBoundsConfig, OutOfBoundsMonitor};

use glam::Vec3;

use crate::collision::BallVolume;
use crate::physics::StrikeImpulse;

/// Host-side handle of a ball.
pub type BallId = u32;

/// Ball state as reported by the physics engine for the current tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BallSnapshot {
    pub id: BallId,
    pub center: Vec3,
    pub radius: f32,
    /// Linear speed, m/s.
    pub speed: f32,
    /// Set when the engine's own trigger saw the cue tip enter the ball.
    pub tip_contact: bool,
}

impl BallSnapshot {
    pub fn at_rest(id: BallId, center: Vec3, radius: f32) -> Self {
        Self {
            id,
            center,
            radius,
            speed: 0.0,
            tip_contact: false,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_tip_contact(mut self, tip_contact: bool) -> Self {
        self.tip_contact = tip_contact;
        self
    }

    pub fn volume(&self) -> BallVolume {
        BallVolume::new(self.center, self.radius)
    }
}

/// Receives strikes; the implementor applies and integrates them.
pub trait StrikeSink {
    fn apply_strike(&mut self, ball: BallId, strike: &StrikeImpulse);
}

/// Recording sink, handy for hosts that drain strikes after the tick.
impl StrikeSink for Vec<(BallId, StrikeImpulse)> {
    fn apply_strike(&mut self, ball: BallId, strike: &StrikeImpulse) {
        self.push((ball, *strike));
    }
}
