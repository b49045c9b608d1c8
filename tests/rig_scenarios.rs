use approx::assert_abs_diff_eq;
use cue_rig::{
    AimMode, BallSnapshot, CueRig, InputSnapshot, RigConfig, ShotConfig, ShotEvent, ShotPhase,
    StrikeImpulse, StrikeSpeedSource, TickReport,
};
use glam::Vec3;

const DT: f32 = 1.0 / 60.0;

type Strikes = Vec<(u32, StrikeImpulse)>;

fn cue_ball() -> BallSnapshot {
    BallSnapshot::at_rest(0, Vec3::new(0.0, 2.0, 0.0), 0.1)
}

fn rig_with(config: RigConfig) -> CueRig {
    CueRig::build(config.with_targets([0])).unwrap()
}

fn run(
    rig: &mut CueRig,
    input: InputSnapshot,
    ball: BallSnapshot,
    ticks: usize,
    strikes: &mut Strikes,
) -> Vec<TickReport> {
    (0..ticks).map(|_| rig.tick(&input, &[ball], DT, strikes)).collect()
}

fn events(reports: &[TickReport]) -> Vec<ShotEvent> {
    reports.iter().flat_map(|r| r.events.iter().copied()).collect()
}

#[test]
fn zero_charge_tap_hits_with_minimum_speed() {
    let mut rig = rig_with(RigConfig::default());
    let mut strikes = Strikes::new();

    run(&mut rig, InputSnapshot::idle().with_draw(true), cue_ball(), 1, &mut strikes);
    let reports = run(&mut rig, InputSnapshot::idle(), cue_ball(), 3, &mut strikes);

    assert!(reports.iter().any(TickReport::contact));
    assert_eq!(strikes.len(), 1);
    let (ball, strike) = strikes[0];
    assert_eq!(ball, 0);
    assert_abs_diff_eq!(strike.event.strike_speed, 0.0);
    assert_abs_diff_eq!(strike.impulse.length(), 5.0, epsilon = 1e-4);
    // Looking down at the ball puts the contact above center: flat topspin shot.
    assert!(!strike.jump_shot);
    assert!(strike.topspin > 0.0);
    assert_abs_diff_eq!(strike.impulse.y, 0.0, epsilon = 1e-5);
}

#[test]
fn charged_shot_reports_power_and_returns_to_idle() {
    let mut rig = rig_with(RigConfig::default());
    let mut strikes = Strikes::new();

    // One transition tick plus 30 charging ticks: 30 * 3 / 60 = 1.5 of draw.
    run(&mut rig, InputSnapshot::idle().with_draw(true), cue_ball(), 31, &mut strikes);
    assert_eq!(rig.shot().phase(), ShotPhase::Charging);
    assert_abs_diff_eq!(rig.shot().draw_fraction(), 0.75, epsilon = 1e-4);

    let reports = run(&mut rig, InputSnapshot::idle(), cue_ball(), 40, &mut strikes);
    let all = events(&reports);
    assert!(matches!(all[0], ShotEvent::Contact { charged_power, .. } if (charged_power - 7.5).abs() < 1e-3));
    assert_eq!(all[1], ShotEvent::Completed);
    assert_eq!(strikes.len(), 1);
    assert_abs_diff_eq!(strikes[0].1.impulse.length(), 7.5, epsilon = 1e-3);
    assert_eq!(rig.shot().phase(), ShotPhase::Idle);
}

#[test]
fn restrike_inside_cooldown_is_ignored() {
    let mut rig = rig_with(RigConfig::default());
    let mut strikes = Strikes::new();

    run(&mut rig, InputSnapshot::idle().with_draw(true), cue_ball(), 1, &mut strikes);
    let first = run(&mut rig, InputSnapshot::idle(), cue_ball(), 3, &mut strikes);
    assert!(first.iter().any(TickReport::contact));

    // The tip passes through the ball again well within 0.5 s.
    run(&mut rig, InputSnapshot::idle().with_draw(true), cue_ball(), 1, &mut strikes);
    let second = run(&mut rig, InputSnapshot::idle(), cue_ball(), 12, &mut strikes);

    assert!(!second.iter().any(TickReport::contact));
    assert!(events(&second).contains(&ShotEvent::Miss));
    assert_eq!(strikes.len(), 1);
}

#[test]
fn cooldown_keeps_running_while_the_ball_rolls() {
    let mut rig = rig_with(RigConfig::default());
    let mut strikes = Strikes::new();

    run(&mut rig, InputSnapshot::idle().with_draw(true), cue_ball(), 1, &mut strikes);
    run(&mut rig, InputSnapshot::idle(), cue_ball(), 3, &mut strikes);
    assert_eq!(strikes.len(), 1);

    let rolling = cue_ball().with_speed(2.0);
    let reports = run(&mut rig, InputSnapshot::idle(), rolling, 180, &mut strikes);
    assert!(reports.iter().all(|r| r.detached));

    run(&mut rig, InputSnapshot::idle().with_draw(true), cue_ball(), 1, &mut strikes);
    let reports = run(&mut rig, InputSnapshot::idle(), cue_ball(), 3, &mut strikes);

    assert!(rig.time() > 3.0);
    assert!(reports.iter().any(TickReport::contact));
    assert!(!events(&reports).contains(&ShotEvent::Miss));
    assert_eq!(strikes.len(), 2);
}

#[test]
fn tip_velocity_source_reports_stroke_speed() {
    let config = RigConfig::default()
        .with_shot(ShotConfig::default().with_speed_source(StrikeSpeedSource::TipVelocity));
    let mut rig = rig_with(config);
    let mut strikes = Strikes::new();

    run(&mut rig, InputSnapshot::idle(), cue_ball(), 2, &mut strikes);
    run(&mut rig, InputSnapshot::idle().with_draw(true), cue_ball(), 1, &mut strikes);
    run(&mut rig, InputSnapshot::idle(), cue_ball(), 3, &mut strikes);

    assert_eq!(strikes.len(), 1);
    assert_abs_diff_eq!(strikes[0].1.event.strike_speed, 15.0, epsilon = 1e-2);
    assert_abs_diff_eq!(strikes[0].1.impulse.length(), 15.0, epsilon = 1e-2);
}

#[test]
fn low_cue_with_reported_contact_jumps_the_ball() {
    let mut rig = rig_with(RigConfig::default());
    let mut strikes = Strikes::new();

    let tilt = InputSnapshot::idle().with_aim(0.0, 1.0).with_fine_aim(true);
    run(&mut rig, tilt, cue_ball(), 100, &mut strikes);
    assert_eq!(rig.aim().mode(), AimMode::LocalAim);
    assert_eq!(rig.aim().state().cue_pitch, 45.0);

    let touched = cue_ball().with_tip_contact(true);
    let hold = InputSnapshot::idle().with_fine_aim(true).with_draw(true);
    run(&mut rig, hold, touched, 20, &mut strikes);
    let reports = run(&mut rig, InputSnapshot::idle().with_fine_aim(true), touched, 2, &mut strikes);

    assert!(reports[1].contact());
    let strike = strikes[0].1;
    assert!(strike.event.vertical_offset < -0.25);
    assert!(strike.jump_shot);
    assert!(strike.impulse.y > 0.0);
    assert!(strike.topspin < 0.0);
}

#[test]
fn rolling_ball_detaches_and_reattaches_at_stored_angles() {
    let mut rig = rig_with(RigConfig::default());
    let mut strikes = Strikes::new();

    run(&mut rig, InputSnapshot::idle().with_aim(1.0, 0.5), cue_ball(), 30, &mut strikes);
    let stored = rig.aim().state();
    run(&mut rig, InputSnapshot::idle().with_draw(true), cue_ball(), 10, &mut strikes);

    let rolling = cue_ball().with_speed(1.5);
    let reports = run(&mut rig, InputSnapshot::idle().with_aim(-1.0, -1.0), rolling, 20, &mut strikes);
    assert!(reports.iter().all(|r| r.detached));
    assert!(events(&reports).iter().any(|e| matches!(e, ShotEvent::Cancelled(_))));
    assert!(rig.instances().is_empty());
    assert_eq!(rig.aim().state(), stored);

    let reports = run(&mut rig, InputSnapshot::idle(), cue_ball(), 1, &mut strikes);
    assert!(!reports[0].detached);
    assert_eq!(rig.aim().state(), stored);
    assert_eq!(rig.instances().len(), 3);
    let root = rig.graph().node(rig.nodes().root).unwrap().world_position();
    assert_abs_diff_eq!(root.distance(cue_ball().center), 5.0, epsilon = 1e-4);
}

#[test]
fn arm_stays_attached_to_the_hand_through_a_shot() {
    let mut rig = rig_with(RigConfig::default());
    let mut strikes = Strikes::new();
    let segment = rig.config().arm.segments.lower;

    let check = |rig: &CueRig| {
        let graph = rig.graph();
        let nodes = rig.nodes();
        let lower = graph.node(nodes.lower_arm).unwrap().world();
        let hand = graph.node(nodes.hand).unwrap().world_position();
        let end = lower.transform_point3(Vec3::NEG_Z * segment);
        assert!(end.abs_diff_eq(hand, 1e-3), "{end:?} vs {hand:?}");
    };

    for _ in 0..40 {
        let report = rig.tick(&InputSnapshot::idle().with_draw(true), &[cue_ball()], DT, &mut strikes);
        assert!(report.ik.unwrap().reachable);
        check(&rig);
    }
}

#[test]
fn mode_switch_cancels_charge() {
    let mut rig = rig_with(RigConfig::default());
    let mut strikes = Strikes::new();

    run(&mut rig, InputSnapshot::idle().with_draw(true), cue_ball(), 10, &mut strikes);
    let reports = run(
        &mut rig,
        InputSnapshot::idle().with_fine_aim(true),
        cue_ball(),
        1,
        &mut strikes,
    );
    assert_eq!(
        reports[0].events,
        vec![ShotEvent::Cancelled(cue_rig::CancelReason::AimModeChanged)]
    );
    assert_eq!(rig.shot().draw_distance(), 0.0);
}

#[test]
fn custom_hierarchy_measures_its_arm() {
    use cue_rig::{RigLayout, SceneGraph};

    let mut graph = SceneGraph::new();
    let root = graph.add_root("rig");
    let upper = graph.add_child(root, "shoulder_joint").unwrap();
    let lower = graph.add_child(upper, "elbow_joint").unwrap();
    let hand = graph.add_child(root, "grip").unwrap();
    graph.set_origin(lower, Vec3::new(0.0, 0.0, -0.9)).unwrap();
    graph.set_origin(hand, Vec3::new(0.0, -0.3, -1.3)).unwrap();

    let config = RigConfig::default()
        .with_layout(RigLayout {
            shoulder_offset: Vec3::ZERO,
            hand_rest: Vec3::new(0.0, -0.3, -1.3),
            measure_arm: true,
            ..Default::default()
        })
        .with_targets([0, 4]);
    let mut rig = CueRig::from_graph(graph, root, config).unwrap();

    assert_eq!(rig.nodes().hand, hand);
    let segments = rig.config().arm.segments;
    assert_abs_diff_eq!(segments.upper, 0.9, epsilon = 1e-5);
    assert_abs_diff_eq!(segments.lower, 0.5, epsilon = 1e-5);

    let mut strikes = Strikes::new();
    let report = rig.tick(&InputSnapshot::idle(), &[cue_ball()], DT, &mut strikes);
    assert!(report.ik.unwrap().reachable);

    rig.set_selectable_targets([4]);
    assert_eq!(rig.targets().current(), Some(4));
    let report = rig.tick(&InputSnapshot::idle(), &[cue_ball()], DT, &mut strikes);
    assert!(report.aim.is_none());
}
