/// Rejects contacts that arrive within `window` seconds of the last accepted one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactCooldown {
    window: f32,
    last_accepted: Option<f32>,
}

impl ContactCooldown {
    pub fn new(window: f32) -> Self {
        Self {
            window: window.max(0.0),
            last_accepted: None,
        }
    }

    pub fn is_ready(&self, now: f32) -> bool {
        match self.last_accepted {
            Some(last) => now - last >= self.window,
            None => true,
        }
    }

    /// Records the contact and returns true if it falls outside the window.
    pub fn try_accept(&mut self, now: f32) -> bool {
        if !self.is_ready(now) {
            return false;
        }
        self.last_accepted = Some(now);
        true
    }

    pub fn last_accepted(&self) -> Option<f32> {
        self.last_accepted
    }

    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}
