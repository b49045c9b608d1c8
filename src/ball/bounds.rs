use glam::{Vec3, Vec4};

use super::BallSnapshot;
use crate::dynamics::FlashTween;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutOfBoundsConfig {
    /// Below this height the ball counts as off the table.
    pub out_of_bounds_y: f32,
    pub return_position: Vec3,
    /// Top surface of the table. When set, the return height is measured from it.
    pub table_top: Option<f32>,
    pub height_above_table: f32,
    pub freeze_on_return: bool,
    pub flash_on_return: bool,
    pub flash_duration: f32,
    pub base_color: Vec4,
    pub flash_color: Vec4,
}

impl Default for OutOfBoundsConfig {
    fn default() -> Self {
        Self {
            out_of_bounds_y: 0.5,
            return_position: Vec3::new(0.0, 2.147, 2.0),
            table_top: None,
            height_above_table: 0.15,
            freeze_on_return: true,
            flash_on_return: true,
            flash_duration: 0.5,
            base_color: Vec4::ONE,
            flash_color: Vec4::new(1.0, 0.0, 0.0, 1.0),
        }
    }
}

impl OutOfBoundsConfig {
    pub fn with_table_top(mut self, table_top: f32) -> Self {
        self.table_top = Some(table_top);
        self
    }

    pub fn with_return_position(mut self, return_position: Vec3) -> Self {
        self.return_position = return_position;
        self
    }

    pub fn with_base_color(mut self, base_color: Vec4) -> Self {
        self.base_color = base_color;
        self
    }
}

/// Instruction for the physics engine to put a ball back on the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallReset {
    pub ball: super::BallId,
    pub position: Vec3,
    /// Zero linear and angular velocity as well.
    pub freeze: bool,
}

/// Watches one ball and returns it to the table when it drops off.
#[derive(Debug, Clone)]
pub struct OutOfBoundsMonitor {
    config: OutOfBoundsConfig,
    flash: FlashTween<Vec4>,
}

impl OutOfBoundsMonitor {
    pub fn new(config: OutOfBoundsConfig) -> Self {
        let flash = FlashTween::new(config.base_color, config.flash_color, config.flash_duration);
        Self { config, flash }
    }

    pub fn config(&self) -> &OutOfBoundsConfig {
        &self.config
    }

    pub fn is_out_of_bounds(&self, ball: &BallSnapshot) -> bool {
        ball.center.y < self.config.out_of_bounds_y
    }

    pub fn return_position(&self) -> Vec3 {
        match self.config.table_top {
            Some(top) => Vec3::new(
                self.config.return_position.x,
                top + self.config.height_above_table,
                self.config.return_position.z,
            ),
            None => self.config.return_position,
        }
    }

    /// Checks the fall-off height; returns the reset to apply, if any.
    pub fn check(&mut self, ball: &BallSnapshot) -> Option<BallReset> {
        if !self.is_out_of_bounds(ball) {
            return None;
        }
        Some(self.return_ball(ball.id))
    }

    /// Called by the host when the ball touched one of its out-of-bounds triggers.
    pub fn report_trigger(&mut self, ball: &BallSnapshot) -> BallReset {
        self.return_ball(ball.id)
    }

    fn return_ball(&mut self, id: super::BallId) -> BallReset {
        let position = self.return_position();
        if self.config.flash_on_return && !self.flash.is_running() {
            self.flash.start();
        }
        log::info!("ball {id} returned to table at {position:?}");
        BallReset {
            ball: id,
            position,
            freeze: self.config.freeze_on_return,
        }
    }

    /// Advances the flash and returns the tint to draw the ball with.
    pub fn update(&mut self, dt: f32) -> Vec4 {
        self.flash.update(dt)
    }

    pub fn is_flashing(&self) -> bool {
        self.flash.is_running()
    }
}
