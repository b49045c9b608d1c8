use glam::Vec2;

/// Everything the rig reads from the input layer, sampled once per tick.
///
/// `aim_axis.x` drives yaw and `aim_axis.y` drives pitch; both are clamped to
/// `[-1, 1]` before use. With `fine_aim` held the same axes steer the cue in
/// place instead of orbiting the rig.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputSnapshot {
    pub aim_axis: Vec2,
    pub fine_aim: bool,
    pub draw_held: bool,
    /// Edge: advance to the next selectable target this tick.
    pub cycle_target: bool,
    /// Edge: restore default aim angles this tick.
    pub reset_aim: bool,
}

impl InputSnapshot {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn with_aim(mut self, yaw: f32, pitch: f32) -> Self {
        self.aim_axis = Vec2::new(yaw, pitch);
        self
    }

    pub fn with_fine_aim(mut self, fine_aim: bool) -> Self {
        self.fine_aim = fine_aim;
        self
    }

    pub fn with_draw(mut self, draw_held: bool) -> Self {
        self.draw_held = draw_held;
        self
    }

    pub fn with_cycle_target(mut self) -> Self {
        self.cycle_target = true;
        self
    }

    pub fn with_reset_aim(mut self) -> Self {
        self.reset_aim = true;
        self
    }

    pub fn yaw_axis(&self) -> f32 {
        axis(self.aim_axis.x)
    }

    pub fn pitch_axis(&self) -> f32 {
        axis(self.aim_axis.y)
    }
}

fn axis(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}
