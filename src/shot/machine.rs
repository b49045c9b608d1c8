use glam::{Quat, Vec3};

use super::config::{ShotConfig, StrikeSpeedSource};
use super::cooldown::ContactCooldown;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotPhase {
    #[default]
    Idle,
    Charging,
    Striking,
    Returning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CancelReason {
    BallMoving,
    AimModeChanged,
    TargetChanged,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotEvent {
    /// The tip reached the ball outside the cooldown window.
    Contact { charged_power: f32, draw_distance: f32 },
    /// The stroke ran past its forward travel without touching anything.
    Miss,
    /// The hand is back at rest; ready for the next shot.
    Completed,
    Cancelled(CancelReason),
}

/// Drives the hand's draw distance through one shot.
///
/// Positive draw distances pull the hand back from its rest pose, negative
/// ones push it forward past it. The contact cooldown is measured against the
/// caller's clock, which keeps running while the machine is not updated.
#[derive(Debug, Clone)]
pub struct ShotStateMachine {
    config: ShotConfig,
    phase: ShotPhase,
    draw_distance: f32,
    charged_power: f32,
    cooldown: ContactCooldown,
}

impl ShotStateMachine {
    pub fn new(config: ShotConfig) -> Self {
        Self {
            cooldown: ContactCooldown::new(config.contact_cooldown),
            config,
            phase: ShotPhase::Idle,
            draw_distance: 0.0,
            charged_power: 0.0,
        }
    }

    pub fn config(&self) -> &ShotConfig {
        &self.config
    }

    pub fn phase(&self) -> ShotPhase {
        self.phase
    }

    pub fn draw_distance(&self) -> f32 {
        self.draw_distance
    }

    pub fn charged_power(&self) -> f32 {
        self.charged_power
    }

    /// Draw distance as a fraction of the maximum, `[0, 1]` while charging.
    pub fn draw_fraction(&self) -> f32 {
        (self.draw_distance / self.config.max_draw_distance).clamp(0.0, 1.0)
    }

    pub fn is_idle(&self) -> bool {
        self.phase == ShotPhase::Idle
    }

    /// Hand displacement from its rest pose: backward along the cue's forward axis.
    pub fn hand_offset(&self, cue_rotation: Quat) -> Vec3 {
        cue_rotation * Vec3::Z * self.draw_distance
    }

    /// Speed to report with a contact, picked by the configured source.
    pub fn strike_speed(&self, tip_speed: f32) -> f32 {
        match self.config.speed_source {
            StrikeSpeedSource::ChargedPower => self.charged_power,
            StrikeSpeedSource::TipVelocity => tip_speed,
        }
    }

    /// Advances one tick ending at time `now`. `touching` answers whether the
    /// tip would be in contact with the ball at the given draw distance; it is
    /// only consulted while striking.
    pub fn update<F>(&mut self, draw_held: bool, dt: f32, now: f32, mut touching: F) -> Option<ShotEvent>
    where
        F: FnMut(f32) -> bool,
    {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        match self.phase {
            ShotPhase::Idle => {
                if draw_held {
                    self.draw_distance = 0.0;
                    self.charged_power = 0.0;
                    self.enter(ShotPhase::Charging);
                }
                None
            }
            ShotPhase::Charging => {
                if draw_held {
                    let max = self.config.max_draw_distance;
                    self.draw_distance = (self.draw_distance + self.config.draw_rate * dt).clamp(0.0, max);
                    self.charged_power = self.draw_distance / max * self.config.power_multiplier;
                } else {
                    self.enter(ShotPhase::Striking);
                }
                None
            }
            ShotPhase::Striking => {
                self.draw_distance -= self.config.strike_rate * dt;
                if touching(self.draw_distance) {
                    if self.cooldown.try_accept(now) {
                        log::debug!(
                            "contact at draw {:.3}, power {:.2}",
                            self.draw_distance,
                            self.charged_power
                        );
                        self.enter(ShotPhase::Returning);
                        return Some(ShotEvent::Contact {
                            charged_power: self.charged_power,
                            draw_distance: self.draw_distance,
                        });
                    }
                    log::trace!("contact ignored during cooldown");
                }
                if self.draw_distance < -self.config.max_forward_travel {
                    log::debug!("stroke missed");
                    self.enter(ShotPhase::Returning);
                    return Some(ShotEvent::Miss);
                }
                None
            }
            ShotPhase::Returning => {
                let step = self.config.strike_rate * dt;
                self.draw_distance = if self.draw_distance > 0.0 {
                    (self.draw_distance - step).max(0.0)
                } else {
                    (self.draw_distance + step).min(0.0)
                };
                if self.draw_distance.abs() <= self.config.return_tolerance {
                    self.draw_distance = 0.0;
                    self.charged_power = 0.0;
                    self.enter(ShotPhase::Idle);
                    return Some(ShotEvent::Completed);
                }
                None
            }
        }
    }

    /// Forces the machine back to idle with the hand at rest. Returns an
    /// event only if a shot was actually in progress.
    pub fn cancel(&mut self, reason: CancelReason) -> Option<ShotEvent> {
        let in_progress = self.phase != ShotPhase::Idle || self.draw_distance != 0.0;
        self.draw_distance = 0.0;
        self.charged_power = 0.0;
        if !in_progress {
            return None;
        }
        log::debug!("shot cancelled: {reason:?}");
        self.phase = ShotPhase::Idle;
        Some(ShotEvent::Cancelled(reason))
    }

    fn enter(&mut self, phase: ShotPhase) {
        log::debug!("shot phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }
}
