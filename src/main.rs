use cue_rig::{
    BallId, BallSnapshot, CueRig, InputSnapshot, OutOfBoundsConfig, OutOfBoundsMonitor, RigConfig,
    ShotEvent, StrikeImpulse, StrikeSink,
};
use glam::Vec3;

const DT: f32 = 1.0 / 60.0;
const TABLE_TOP: f32 = 1.9;
const TABLE_HALF_EXTENTS: (f32, f32) = (1.2, 2.4);
const BALL_RADIUS: f32 = 0.1;
const BALL_MASS: f32 = 0.17;
const ROLLING_DRAG: f32 = 1.2;
const GRAVITY: f32 = 9.81;

/// Toy stand-in for a rigid-body engine: point masses sliding on a
/// rectangular table with linear drag, falling once they leave it.
struct Table {
    balls: Vec<Ball>,
}

struct Ball {
    id: BallId,
    position: Vec3,
    velocity: Vec3,
    spin: Vec3,
}

impl Table {
    fn rack() -> Self {
        let balls = [(0, 0.0, 0.8), (1, 0.0, -0.6), (2, 0.4, -1.2)]
            .into_iter()
            .map(|(id, x, z)| Ball {
                id,
                position: Vec3::new(x, TABLE_TOP + BALL_RADIUS, z),
                velocity: Vec3::ZERO,
                spin: Vec3::ZERO,
            })
            .collect();
        Self { balls }
    }

    fn step(&mut self, dt: f32) {
        for ball in &mut self.balls {
            let on_table = ball.position.x.abs() <= TABLE_HALF_EXTENTS.0
                && ball.position.z.abs() <= TABLE_HALF_EXTENTS.1;
            let resting_height = TABLE_TOP + BALL_RADIUS;

            if on_table && ball.position.y <= resting_height {
                ball.position.y = resting_height;
                ball.velocity.y = ball.velocity.y.max(0.0);
                let drag = (1.0 - ROLLING_DRAG * dt).max(0.0);
                ball.velocity.x *= drag;
                ball.velocity.z *= drag;
                ball.spin *= drag;
            } else {
                ball.velocity.y -= GRAVITY * dt;
            }
            ball.position += ball.velocity * dt;
            if ball.velocity.length() < 0.005 {
                ball.velocity = Vec3::ZERO;
            }
        }
    }

    fn snapshots(&self) -> Vec<BallSnapshot> {
        self.balls
            .iter()
            .map(|b| BallSnapshot::at_rest(b.id, b.position, BALL_RADIUS).with_speed(b.velocity.length()))
            .collect()
    }

    fn teleport(&mut self, id: BallId, position: Vec3, freeze: bool) {
        if let Some(ball) = self.balls.iter_mut().find(|b| b.id == id) {
            ball.position = position;
            if freeze {
                ball.velocity = Vec3::ZERO;
                ball.spin = Vec3::ZERO;
            }
        }
    }
}

impl StrikeSink for Table {
    fn apply_strike(&mut self, id: BallId, strike: &StrikeImpulse) {
        if let Some(ball) = self.balls.iter_mut().find(|b| b.id == id) {
            ball.velocity += strike.impulse / BALL_MASS * 0.05;
            ball.spin = strike.angular_velocity;
        }
    }
}

/// One scripted shot: how long to aim, how long to hold draw.
struct Shot {
    orbit: (f32, f32),
    fine_aim: (f32, f32),
    aim_frames: u32,
    draw_frames: u32,
}

fn script() -> [Shot; 3] {
    [
        Shot { orbit: (0.0, -0.5), fine_aim: (0.0, 0.0), aim_frames: 30, draw_frames: 20 },
        Shot { orbit: (0.6, 0.0), fine_aim: (0.0, 1.0), aim_frames: 45, draw_frames: 50 },
        Shot { orbit: (-0.4, 0.3), fine_aim: (0.3, -0.5), aim_frames: 40, draw_frames: 80 },
    ]
}

fn main() -> cue_rig::Result<()> {
    env_logger::init();

    let mut rig = CueRig::build(RigConfig::default().with_targets([0, 1, 2]))?;
    let mut table = Table::rack();
    let mut monitors: Vec<OutOfBoundsMonitor> = table
        .balls
        .iter()
        .map(|_| OutOfBoundsMonitor::new(OutOfBoundsConfig::default().with_table_top(TABLE_TOP)))
        .collect();

    for (n, shot) in script().iter().enumerate() {
        log::info!("shot {} at ball {:?}", n + 1, rig.targets().current());

        let mut frame = 0u32;
        let mut struck = false;
        let mut settled_frames = 0u32;
        while frame < 1200 {
            let input = if frame < shot.aim_frames {
                InputSnapshot::idle().with_aim(shot.orbit.0, shot.orbit.1)
            } else if frame < shot.aim_frames * 2 {
                InputSnapshot::idle()
                    .with_aim(shot.fine_aim.0, shot.fine_aim.1)
                    .with_fine_aim(true)
            } else {
                InputSnapshot::idle().with_draw(!struck && frame < shot.aim_frames * 2 + shot.draw_frames)
            };

            let snapshots = table.snapshots();
            let report = rig.tick(&input, &snapshots, DT, &mut table);
            for event in &report.events {
                match event {
                    ShotEvent::Contact { charged_power, .. } => {
                        struck = true;
                        log::info!("contact, power {charged_power:.2}");
                    }
                    ShotEvent::Miss => {
                        struck = true;
                        log::info!("missed");
                    }
                    other => log::debug!("{other:?}"),
                }
            }
            if let Some(strike) = report.strike {
                log::info!(
                    "jump={} topspin={:.2} impulse={:?}",
                    strike.jump_shot,
                    strike.topspin,
                    strike.impulse
                );
            }

            table.step(DT);
            for (monitor, snapshot) in monitors.iter_mut().zip(table.snapshots()) {
                if let Some(reset) = monitor.check(&snapshot) {
                    table.teleport(reset.ball, reset.position, reset.freeze);
                }
                let tint = monitor.update(DT);
                if monitor.is_flashing() {
                    log::trace!("ball {} tint {tint:?}", snapshot.id);
                }
            }

            let moving = table.snapshots().iter().any(|b| b.speed > 0.01);
            settled_frames = if struck && !moving { settled_frames + 1 } else { 0 };
            if settled_frames > 10 {
                break;
            }
            frame += 1;
        }

        let instances = rig.instances();
        log::info!(
            "shot {} done after {frame} frames; {} primitives, {} bytes for upload",
            n + 1,
            instances.len(),
            cue_rig::SceneGraph::instance_bytes(&instances).len()
        );

        rig.tick(
            &InputSnapshot::idle().with_cycle_target(),
            &table.snapshots(),
            DT,
            &mut table,
        );
    }

    for ball in &table.balls {
        log::info!("ball {} rests at {:?}", ball.id, ball.position);
    }
    Ok(())
}
