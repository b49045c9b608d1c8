//! Inverse Kinematics module
//!
//! Closed-form two-bone solver and the arm binding that writes its result into
//! scene node rotations.

pub mod arm;
pub mod solver;

pub use arm::{ArmConfig, ArmRig};
pub use solver::{ArmSegments, SolveResult, TwoBoneSolver};
