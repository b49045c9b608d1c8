use glam::{Quat, Vec3};

use super::config::AimConfig;
use crate::input::InputSnapshot;
use crate::math::{clamp_or_wrap_degrees, look_rotation, spherical_offset};

/// Orbit and cue angles in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AimState {
    pub yaw: f32,
    pub pitch: f32,
    pub cue_yaw: f32,
    pub cue_pitch: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AimMode {
    #[default]
    Orbit,
    /// Fine aim: the root stays put and only the cue turns.
    LocalAim,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attachment {
    #[default]
    Attached,
    /// The ball is rolling; the rig is hidden and its angles are frozen.
    Detached,
}

/// What changed during one [`AimController::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimUpdate {
    pub mode: AimMode,
    pub mode_changed: bool,
    pub attachment: Attachment,
    pub attachment_changed: bool,
}

/// Root and hand orientation derived from the current angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimPose {
    pub root_position: Vec3,
    pub root_rotation: Quat,
    /// Local rotation of the hand relative to the root.
    pub hand_rotation: Quat,
}

impl AimPose {
    /// World-space direction the cue points along.
    pub fn cue_direction(&self) -> Vec3 {
        (self.root_rotation * self.hand_rotation) * Vec3::NEG_Z
    }
}

#[derive(Debug, Clone)]
pub struct AimController {
    config: AimConfig,
    state: AimState,
    mode: AimMode,
    attachment: Attachment,
}

impl AimController {
    pub fn new(config: AimConfig) -> Self {
        let mut controller = Self {
            config,
            state: AimState::default(),
            mode: AimMode::Orbit,
            attachment: Attachment::Attached,
        };
        controller.reset();
        controller
    }

    pub fn config(&self) -> &AimConfig {
        &self.config
    }

    pub fn state(&self) -> AimState {
        self.state
    }

    pub fn mode(&self) -> AimMode {
        self.mode
    }

    pub fn attachment(&self) -> Attachment {
        self.attachment
    }

    pub fn is_detached(&self) -> bool {
        self.attachment == Attachment::Detached
    }

    /// Restores the default orbit angles and centers the cue.
    pub fn reset(&mut self) {
        self.set_orbit_angles(self.config.default_yaw, self.config.default_pitch);
        self.set_cue_yaw(0.0);
        self.set_cue_pitch(0.0);
    }

    pub fn set_orbit_angles(&mut self, yaw: f32, pitch: f32) {
        let (yaw_min, yaw_max) = self.config.yaw_limits;
        let (pitch_min, pitch_max) = self.config.pitch_limits;
        self.state.yaw = clamp_or_wrap_degrees(yaw, yaw_min, yaw_max);
        self.state.pitch = pitch.clamp(pitch_min, pitch_max);
    }

    pub fn set_cue_yaw(&mut self, cue_yaw: f32) {
        let (min, max) = self.config.cue_yaw_limits;
        self.state.cue_yaw = cue_yaw.clamp(min, max);
    }

    pub fn set_cue_pitch(&mut self, cue_pitch: f32) {
        let (min, max) = self.config.cue_pitch_limits;
        self.state.cue_pitch = cue_pitch.clamp(min, max);
    }

    /// Applies one tick of input. While the ball moves faster than
    /// `detach_speed` nothing but the attachment changes.
    pub fn update(&mut self, input: &InputSnapshot, ball_speed: f32, dt: f32) -> AimUpdate {
        let attachment = if ball_speed > self.config.detach_speed {
            Attachment::Detached
        } else {
            Attachment::Attached
        };
        let attachment_changed = attachment != self.attachment;
        if attachment_changed {
            log::debug!("aim rig {attachment:?} (ball speed {ball_speed:.3})");
            self.attachment = attachment;
        }

        if attachment == Attachment::Detached {
            return AimUpdate {
                mode: self.mode,
                mode_changed: false,
                attachment,
                attachment_changed,
            };
        }

        let mode = if input.fine_aim {
            AimMode::LocalAim
        } else {
            AimMode::Orbit
        };
        let mode_changed = mode != self.mode;
        self.mode = mode;

        let dt = dt.max(0.0);
        let yaw_axis = input.yaw_axis();
        let pitch_axis = input.pitch_axis();
        match mode {
            AimMode::Orbit => {
                self.set_orbit_angles(
                    self.state.yaw + self.config.yaw_speed * yaw_axis * dt,
                    self.state.pitch + self.config.pitch_speed * pitch_axis * dt,
                );
            }
            AimMode::LocalAim => {
                self.set_cue_yaw(self.state.cue_yaw + self.config.cue_yaw_speed * yaw_axis * dt);
                self.set_cue_pitch(self.state.cue_pitch + self.config.cue_pitch_speed * pitch_axis * dt);
            }
        }

        AimUpdate {
            mode,
            mode_changed,
            attachment,
            attachment_changed,
        }
    }

    /// Places the root on its orbit around `target`, facing it.
    ///
    /// Positive cue yaw turns the cue to the right, positive cue pitch tips it
    /// down toward the table.
    pub fn pose(&self, target: Vec3) -> AimPose {
        let root_position = target
            + spherical_offset(self.config.orbit_distance, self.state.yaw, self.state.pitch);
        let root_rotation = look_rotation(target - root_position, Vec3::Y, Vec3::Z);
        let hand_rotation = Quat::from_rotation_y(-self.state.cue_yaw.to_radians())
            * Quat::from_rotation_x(-self.state.cue_pitch.to_radians());
        AimPose {
            root_position,
            root_rotation,
            hand_rotation,
        }
    }
}
