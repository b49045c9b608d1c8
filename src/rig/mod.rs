//! The cue rig controller: one instance of every component, stepped once per
//! tick.

mod config;
mod nodes;

pub use config::{RigConfig, RigLayout};
pub use nodes::RigNodes;

use glam::{Mat4, Quat, Vec3};

use crate::aim::{aim_pointer, AimController, AimPointer, AimPose, AimUpdate, Attachment, TargetCycle};
use crate::ball::{BallId, BallSnapshot, StrikeSink};
use crate::error::Result;
use crate::ik::{ArmRig, SolveResult};
use crate::input::InputSnapshot;
use crate::math::Transform;
use crate::physics::{ContactPhysicsModel, StrikeGeometry, StrikeImpulse, TipVelocityTracker};
use crate::scene::{NodeId, PrimitiveInstance, SceneGraph};
use crate::shot::{CancelReason, ShotEvent, ShotPhase, ShotStateMachine};

/// Summary of one [`CueRig::tick`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub target: Option<BallId>,
    pub phase: ShotPhase,
    /// Shot events in the order they happened this tick.
    pub events: Vec<ShotEvent>,
    /// The strike delivered to the sink, if contact was made.
    pub strike: Option<StrikeImpulse>,
    pub aim: Option<AimUpdate>,
    pub ik: Option<SolveResult>,
    pub pointer: Option<AimPointer>,
    pub tip: Option<Vec3>,
    pub detached: bool,
}

impl TickReport {
    pub fn contact(&self) -> bool {
        self.events.iter().any(|e| matches!(e, ShotEvent::Contact { .. }))
    }
}

#[derive(Debug, Clone)]
pub struct CueRig {
    config: RigConfig,
    graph: SceneGraph,
    nodes: RigNodes,
    arm: ArmRig,
    aim: AimController,
    shot: ShotStateMachine,
    contact: ContactPhysicsModel,
    targets: TargetCycle,
    tip_velocity: TipVelocityTracker,
    last_target: Option<BallId>,
    warned_missing_target: bool,
    time: f32,
}

impl CueRig {
    /// Builds the standard rig hierarchy and wires every component to it.
    pub fn build(config: RigConfig) -> Result<Self> {
        config.validate()?;
        let mut graph = SceneGraph::new();
        let nodes = RigNodes::build(&mut graph, &config.layout, config.arm.segments)?;
        Self::assemble(graph, nodes, config)
    }

    /// Wires the rig to a caller-supplied hierarchy under `root`.
    pub fn from_graph(graph: SceneGraph, root: NodeId, mut config: RigConfig) -> Result<Self> {
        config.validate()?;
        let nodes = RigNodes::discover(&graph, root)?;
        if config.layout.measure_arm {
            if let Some(segments) = nodes.measure_segments(&graph) {
                log::debug!("measured arm segments {segments:?}");
                config.arm.segments = segments;
            }
        }
        Self::assemble(graph, nodes, config)
    }

    fn assemble(mut graph: SceneGraph, nodes: RigNodes, config: RigConfig) -> Result<Self> {
        let arm = ArmRig::new(&graph, nodes.upper_arm, nodes.lower_arm, config.arm)?;
        let targets = TargetCycle::new(config.targets.iter().copied());
        if targets.is_empty() {
            log::warn!("cue rig built without selectable targets");
        }
        graph.compose(nodes.root, &Mat4::IDENTITY);
        graph.debug_dump(nodes.root);

        Ok(Self {
            aim: AimController::new(config.aim),
            shot: ShotStateMachine::new(config.shot),
            contact: ContactPhysicsModel::new(config.contact),
            last_target: targets.current(),
            targets,
            arm,
            graph,
            nodes,
            config,
            tip_velocity: TipVelocityTracker::new(),
            warned_missing_target: false,
            time: 0.0,
        })
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn nodes(&self) -> RigNodes {
        self.nodes
    }

    pub fn aim(&self) -> &AimController {
        &self.aim
    }

    pub fn shot(&self) -> &ShotStateMachine {
        &self.shot
    }

    pub fn targets(&self) -> &TargetCycle {
        &self.targets
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Render hand-off for the most recent composition.
    pub fn instances(&self) -> Vec<PrimitiveInstance> {
        self.graph.instances()
    }

    /// Cue tip in world space, from the live local transforms.
    pub fn tip_position(&self) -> Option<Vec3> {
        self.graph
            .evaluate_world(self.nodes.hand)
            .map(|m| m.transform_point3(self.config.layout.tip_offset))
    }

    pub fn select_target(&mut self, id: BallId) -> Result<()> {
        self.targets.select(id)?;
        self.sync_target();
        Ok(())
    }

    pub fn set_selectable_targets(&mut self, ids: impl IntoIterator<Item = BallId>) {
        self.targets.set_selectable(ids);
        self.sync_target();
    }

    pub fn reset_shot(&mut self) -> Option<ShotEvent> {
        let event = self.shot.cancel(CancelReason::Reset);
        self.snap_hand_to_rest();
        event
    }

    pub fn reset_aim(&mut self) -> Option<ShotEvent> {
        self.aim.reset();
        self.reset_shot()
    }

    /// Advances the rig by `dt` seconds.
    ///
    /// Order: target selection, aim (and attachment), pose and IK, one
    /// composition, shot update with contact probing, strike dispatch, aim
    /// pointer.
    pub fn tick<S: StrikeSink + ?Sized>(
        &mut self,
        input: &InputSnapshot,
        balls: &[BallSnapshot],
        dt: f32,
        sink: &mut S,
    ) -> TickReport {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.time += dt;
        let mut report = TickReport::default();

        if input.cycle_target {
            if let Some(id) = self.targets.next() {
                log::info!("target ball {id}");
            }
        }
        report.events.extend(self.sync_target());
        if input.reset_aim {
            report.events.extend(self.reset_aim());
        }

        report.target = self.targets.current();
        let Some(ball) = report
            .target
            .and_then(|id| balls.iter().find(|b| b.id == id))
            .copied()
        else {
            if !self.warned_missing_target {
                log::warn!("target ball {:?} not reported; cue rig idle", report.target);
                self.warned_missing_target = true;
            }
            report.phase = self.shot.phase();
            return report;
        };
        self.warned_missing_target = false;

        let aim = self.aim.update(input, ball.speed, dt);
        report.aim = Some(aim);
        if aim.attachment == Attachment::Detached {
            report.events.extend(self.shot.cancel(CancelReason::BallMoving));
        }
        if aim.mode_changed {
            report.events.extend(self.shot.cancel(CancelReason::AimModeChanged));
        }
        if aim.attachment_changed {
            self.set_rig_visible(aim.attachment == Attachment::Attached);
        }

        if aim.attachment == Attachment::Detached {
            self.snap_hand_to_rest();
            self.tip_velocity.reset();
            self.graph.compose(self.nodes.root, &Mat4::IDENTITY);
            report.detached = true;
            report.phase = self.shot.phase();
            return report;
        }

        let pose = self.aim.pose(ball.center);
        self.apply_pose(&pose);
        report.ik = match self.arm.apply(&mut self.graph, self.nodes.hand) {
            Ok(result) => result,
            Err(err) => {
                log::warn!("arm ik skipped: {err}");
                None
            }
        };
        self.graph.compose(self.nodes.root, &Mat4::IDENTITY);

        let event = self.update_shot(input.draw_held, dt, &ball, pose.hand_rotation);

        let tip = self.tip_position();
        let tip_speed = match tip {
            Some(tip) => self.tip_velocity.update(tip, dt).length(),
            None => 0.0,
        };
        report.tip = tip;

        if let (Some(ShotEvent::Contact { .. }), Some(tip)) = (event, tip) {
            let strike = self.contact.resolve(&StrikeGeometry {
                tip,
                ball_center: ball.center,
                ball_radius: ball.radius,
                cue_forward: pose.cue_direction(),
                strike_speed: self.shot.strike_speed(tip_speed),
            });
            log::info!(
                "strike ball {}: impulse {:?} spin {:?}",
                ball.id,
                strike.impulse,
                strike.angular_velocity
            );
            sink.apply_strike(ball.id, &strike);
            report.strike = Some(strike);
        }
        report.events.extend(event);

        let forward = Transform::from_position_rotation(pose.root_position, pose.root_rotation).forward();
        let range = self.config.aim.orbit_distance * 2.0;
        report.pointer = aim_pointer(pose.root_position, forward, &ball.volume(), range);
        report.phase = self.shot.phase();
        report
    }

    fn update_shot(
        &mut self,
        draw_held: bool,
        dt: f32,
        ball: &BallSnapshot,
        hand_rotation: Quat,
    ) -> Option<ShotEvent> {
        let graph = &self.graph;
        let hand = self.nodes.hand;
        let tip_offset = self.config.layout.tip_offset;
        let margin = self.shot.config().contact_margin;
        let volume = ball.volume();
        let reported = ball.tip_contact;
        let previous_draw = self.shot.draw_distance();

        let tip_at = |draw: f32| {
            let local = Transform::from_position_rotation(hand_rotation * Vec3::Z * draw, hand_rotation);
            graph
                .evaluate_world_with(hand, &local)
                .map(|world| world.transform_point3(tip_offset))
        };
        let touching = |draw: f32| {
            if reported {
                return true;
            }
            match (tip_at(previous_draw), tip_at(draw)) {
                (Some(from), Some(to)) => volume.sweep_touches(from, to, margin),
                _ => false,
            }
        };
        let event = self.shot.update(draw_held, dt, self.time, touching);

        let offset = self.shot.hand_offset(hand_rotation);
        if let Err(err) = self
            .graph
            .set_local(hand, Transform::from_position_rotation(offset, hand_rotation))
        {
            log::warn!("hand update skipped: {err}");
        }
        event
    }

    fn apply_pose(&mut self, pose: &AimPose) {
        let root = Transform::from_position_rotation(pose.root_position, pose.root_rotation);
        let hand = Transform::from_position_rotation(self.shot.hand_offset(pose.hand_rotation), pose.hand_rotation);
        let applied = self
            .graph
            .set_local(self.nodes.root, root)
            .and_then(|_| self.graph.set_local(self.nodes.hand, hand));
        if let Err(err) = applied {
            log::warn!("aim pose skipped: {err}");
        }
    }

    /// Cancels the shot when the selected ball changed since the last check.
    fn sync_target(&mut self) -> Option<ShotEvent> {
        let current = self.targets.current();
        if current == self.last_target {
            return None;
        }
        self.last_target = current;
        self.tip_velocity.reset();
        let event = self.shot.cancel(CancelReason::TargetChanged);
        self.snap_hand_to_rest();
        event
    }

    fn snap_hand_to_rest(&mut self) {
        if let Some(node) = self.graph.node_mut(self.nodes.hand) {
            node.local.position = Vec3::ZERO;
        }
    }

    fn set_rig_visible(&mut self, visible: bool) {
        if let Err(err) = self.graph.set_visible(self.nodes.root, visible) {
            log::warn!("rig visibility unchanged: {err}");
        }
    }
}
