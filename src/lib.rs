//! # cue-rig
//!
//! A procedural cue rig for a pool game: a scene graph that positions a
//! jointed arm, closed-form two-bone IK keeping the arm attached to the hand,
//! a charge and strike state machine, and a contact model that turns where the
//! tip meets the ball into an impulse, jump lift and spin.
//!
//! The crate does no collision detection, integration or rendering. Each tick
//! the host hands in an [`InputSnapshot`] and the balls' [`BallSnapshot`]s;
//! strikes come back through a [`StrikeSink`] and the composed scene through
//! [`SceneGraph::instances`].
//!
//! ## Example
//! ```rust,no_run
//! use cue_rig::{BallSnapshot, CueRig, InputSnapshot, RigConfig, StrikeImpulse};
//! use glam::Vec3;
//!
//! let mut rig = CueRig::build(RigConfig::default().with_targets([0])).unwrap();
//! let balls = [BallSnapshot::at_rest(0, Vec3::new(0.0, 2.0, 0.0), 0.1)];
//! let mut strikes: Vec<(u32, StrikeImpulse)> = Vec::new();
//!
//! // Hold draw for a while, then let go.
//! for frame in 0..120 {
//!     let input = InputSnapshot::idle().with_draw(frame < 40);
//!     let report = rig.tick(&input, &balls, 1.0 / 60.0, &mut strikes);
//!     if let Some(strike) = report.strike {
//!         println!("impulse {:?}, topspin {}", strike.impulse, strike.topspin);
//!     }
//! }
//! ```

pub mod aim;
pub mod ball;
pub mod collision;
pub mod dynamics;
pub mod error;
pub mod ik;
pub mod input;
pub mod math;
pub mod physics;
pub mod rig;
pub mod scene;
pub mod shot;

pub use aim::{AimConfig, AimController, AimMode, AimPointer, Attachment, TargetCycle};
pub use ball::{BallId, BallReset, BallSnapshot, OutOfBoundsConfig, OutOfBoundsMonitor, StrikeSink};
pub use collision::{BallVolume, Ray, RayHit};
pub use dynamics::{FlashTween, Interpolatable};
pub use error::{Result, RigError};
pub use ik::{ArmConfig, ArmRig, ArmSegments, SolveResult, TwoBoneSolver};
pub use input::InputSnapshot;
pub use math::Transform;
pub use physics::{ContactEvent, ContactPhysicsModel, ContactTunables, StrikeGeometry, StrikeImpulse};
pub use rig::{CueRig, RigConfig, RigLayout, RigNodes, TickReport};
pub use scene::{NodeId, PrimitiveId, PrimitiveInstance, SceneGraph};
pub use shot::{CancelReason, ShotConfig, ShotEvent, ShotPhase, ShotStateMachine, StrikeSpeedSource};
