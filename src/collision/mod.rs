mod raycast;
mod sphere;

pub use raycast::{Ray, RayHit};
pub use sphere::BallVolume;
