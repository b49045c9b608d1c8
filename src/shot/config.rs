use crate::error::{Result, RigError};

/// Where the speed reported with a contact comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrikeSpeedSource {
    /// Power accumulated while charging.
    #[default]
    ChargedPower,
    /// Measured tip speed at the moment of contact.
    TipVelocity,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotConfig {
    pub max_draw_distance: f32,
    /// Draw-back speed while charging, units per second.
    pub draw_rate: f32,
    /// Forward speed while striking and returning.
    pub strike_rate: f32,
    pub power_multiplier: f32,
    /// How far past the rest pose the stroke may travel before it counts as a miss.
    pub max_forward_travel: f32,
    /// Seconds after an accepted contact during which further contacts are ignored.
    pub contact_cooldown: f32,
    /// Extra distance around the ball surface that still counts as touching.
    pub contact_margin: f32,
    pub return_tolerance: f32,
    pub speed_source: StrikeSpeedSource,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            max_draw_distance: 2.0,
            draw_rate: 3.0,
            strike_rate: 15.0,
            power_multiplier: 10.0,
            max_forward_travel: 2.0,
            contact_cooldown: 0.5,
            contact_margin: 0.05,
            return_tolerance: 1e-4,
            speed_source: StrikeSpeedSource::ChargedPower,
        }
    }
}

impl ShotConfig {
    pub fn with_max_draw_distance(mut self, max_draw_distance: f32) -> Self {
        self.max_draw_distance = max_draw_distance;
        self
    }

    pub fn with_rates(mut self, draw_rate: f32, strike_rate: f32) -> Self {
        self.draw_rate = draw_rate;
        self.strike_rate = strike_rate;
        self
    }

    pub fn with_power_multiplier(mut self, power_multiplier: f32) -> Self {
        self.power_multiplier = power_multiplier;
        self
    }

    pub fn with_max_forward_travel(mut self, max_forward_travel: f32) -> Self {
        self.max_forward_travel = max_forward_travel;
        self
    }

    pub fn with_contact_cooldown(mut self, contact_cooldown: f32) -> Self {
        self.contact_cooldown = contact_cooldown;
        self
    }

    pub fn with_speed_source(mut self, speed_source: StrikeSpeedSource) -> Self {
        self.speed_source = speed_source;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("shot.max_draw_distance", self.max_draw_distance),
            ("shot.draw_rate", self.draw_rate),
            ("shot.strike_rate", self.strike_rate),
            ("shot.max_forward_travel", self.max_forward_travel),
            ("shot.return_tolerance", self.return_tolerance),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(RigError::invalid(field, "must be positive"));
            }
        }
        if self.strike_rate <= self.draw_rate {
            return Err(RigError::invalid("shot.strike_rate", "must exceed draw_rate"));
        }
        let non_negative = [
            ("shot.power_multiplier", self.power_multiplier),
            ("shot.contact_cooldown", self.contact_cooldown),
            ("shot.contact_margin", self.contact_margin),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(RigError::invalid(field, "must be non-negative"));
            }
        }
        Ok(())
    }
}
