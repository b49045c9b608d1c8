use glam::{Vec3, Vec4};

/// Flashes per second while a tween is running.
pub const FLASH_RATE: f32 = 4.0;

pub trait Interpolatable: Clone + Copy {
    fn add(self, other: Self) -> Self;
    fn sub(self, other: Self) -> Self;
    fn scale(self, factor: f32) -> Self;

    fn lerp_to(self, other: Self, t: f32) -> Self {
        self.add(other.sub(self).scale(t))
    }
}

impl Interpolatable for f32 {
    fn add(self, other: Self) -> Self { self + other }
    fn sub(self, other: Self) -> Self { self - other }
    fn scale(self, factor: f32) -> Self { self * factor }
}

impl Interpolatable for Vec3 {
    fn add(self, other: Self) -> Self { self + other }
    fn sub(self, other: Self) -> Self { self - other }
    fn scale(self, factor: f32) -> Self { self * factor }
}

impl Interpolatable for Vec4 {
    fn add(self, other: Self) -> Self { self + other }
    fn sub(self, other: Self) -> Self { self - other }
    fn scale(self, factor: f32) -> Self { self * factor }
}

/// Ping-pongs a value between `original` and `flash` for a fixed duration,
/// then settles back on `original`. Advanced explicitly by the caller.
#[derive(Debug, Clone)]
pub struct FlashTween<T: Interpolatable> {
    original: T,
    flash: T,
    duration: f32,
    elapsed: f32,
    running: bool,
}

impl<T: Interpolatable> FlashTween<T> {
    pub fn new(original: T, flash: T, duration: f32) -> Self {
        Self {
            original,
            flash,
            duration: duration.max(0.0),
            elapsed: 0.0,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn update(&mut self, dt: f32) -> T {
        if self.running {
            self.elapsed += dt.max(0.0);
            if self.elapsed >= self.duration {
                self.running = false;
            }
        }
        self.value()
    }

    pub fn value(&self) -> T {
        if !self.running {
            return self.original;
        }
        self.original.lerp_to(self.flash, ping_pong(self.elapsed * FLASH_RATE, 1.0))
    }
}

/// Triangle wave in `[0, length]`.
fn ping_pong(t: f32, length: f32) -> f32 {
    let period = length * 2.0;
    let m = t.rem_euclid(period);
    length - (m - length).abs()
}
