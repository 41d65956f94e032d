//! Flagellum generation, reveal and tree timing tests.

use cell_animator::{
    config::FlagellumConfig,
    deformation::PhaseScale,
    flagellum::{Flagellum, FlagellumTree, TreeSchedule, TreeTargets, PHASE_RATIOS},
    timing::EnvelopePhase,
    AnimationError,
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn config() -> FlagellumConfig {
    FlagellumConfig::new(50.0, 15.0, 0.8, 10, 0.004, PhaseScale::default()).unwrap()
}

// ============================================================================
// Generation
// ============================================================================

#[test]
fn test_three_base_points_for_two_segments() {
    let mut rng = StdRng::seed_from_u64(1);
    let f = Flagellum::generate(Vec2::ZERO, Vec2::new(100.0, 0.0), config(), &mut rng).unwrap();
    assert_eq!(f.joints().len(), 3);
    assert_eq!(f.segment_count(), 2);
}

#[test]
fn test_endpoints_never_jitter() {
    for seed in 0..25 {
        let mut rng = StdRng::seed_from_u64(seed);
        let origin = Vec2::new(-40.0, 12.0);
        let target = Vec2::new(173.0, -260.0);
        let f = Flagellum::generate(origin, target, config(), &mut rng).unwrap();
        assert_eq!(f.joints()[0].position, Vec2::ZERO);
        assert_eq!(f.joints().last().unwrap().position, target);
        assert_eq!(f.tip(), origin + target);

        // Evaluated strip starts at the origin and ends on the tip
        for time in [0.0, 333.0, 9_999.0] {
            let frame = f.evaluate(Vec2::Y, target, 1.0, time);
            assert_eq!(frame.points[0], origin);
            assert_eq!(frame.head(), Some(origin + target));
        }
    }
}

#[test]
fn test_jitter_bounded_by_amplitude() {
    let mut rng = StdRng::seed_from_u64(3);
    let target = Vec2::new(0.0, 500.0);
    let f = Flagellum::generate(Vec2::ZERO, target, config(), &mut rng).unwrap();
    for joint in f.joints() {
        assert!(joint.position.x.abs() <= 15.0 + 1e-4);
    }
}

#[test]
fn test_rejects_bad_input() {
    let mut rng = StdRng::seed_from_u64(4);
    assert_eq!(
        Flagellum::generate(Vec2::ZERO, Vec2::ZERO, config(), &mut rng).unwrap_err(),
        AnimationError::ZeroLengthTarget
    );
    assert_eq!(
        FlagellumConfig::new(-1.0, 1.0, 0.5, 4, 1.0, PhaseScale::default()).unwrap_err(),
        AnimationError::NonPositiveSegmentLength(-1.0)
    );
    assert!(matches!(
        FlagellumConfig::new(10.0, 1.0, 3.2, 4, 1.0, PhaseScale::default()),
        Err(AnimationError::SkewLimitOutOfRange(_))
    ));
}

// ============================================================================
// Arc-length reveal
// ============================================================================

#[test]
fn test_reveal_grows_monotonically() {
    let mut rng = StdRng::seed_from_u64(5);
    let f = Flagellum::generate(Vec2::ZERO, Vec2::new(300.0, 120.0), config(), &mut rng).unwrap();
    let time = 420.0;
    let mut last = 0.0;
    for step in 1..=10 {
        let p = step as f64 / 10.0;
        let frame = f.evaluate(Vec2::X, Vec2::X, p, time);
        let total = f.path_length(Vec2::X, Vec2::X, p, time);
        let drawn = frame.drawn_length();
        assert!(drawn > last, "strip grows with progress");
        assert!(
            (drawn - total * p as f32).abs() < total * 0.03,
            "progress {} drew {} of {}",
            p,
            drawn,
            total
        );
        last = drawn;
    }
}

#[test]
fn test_partial_reveal_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(6);
    let f = Flagellum::generate(Vec2::ZERO, Vec2::new(250.0, 0.0), config(), &mut rng).unwrap();
    let a = f.evaluate(Vec2::X, Vec2::X, 0.4, 100.0);
    let b = f.evaluate(Vec2::X, Vec2::X, 0.4, 100.0);
    assert_eq!(a, b);
    assert_eq!(f.evaluate(Vec2::X, Vec2::X, -0.2, 100.0).points, vec![Vec2::ZERO]);
}

// ============================================================================
// Tree timing
// ============================================================================

#[test]
fn test_ratios_sum_to_window() {
    let total: f64 = PHASE_RATIOS.iter().sum();
    assert_eq!(total, 20.0);
    let s = TreeSchedule::new(1000.0, 3000.0);
    assert_eq!(s.trunk.start_in, 1000.0);
    assert_eq!(s.trunk.finish_out, 3000.0);
    assert_eq!(s.trunk.finish_in, 1100.0);
    assert_eq!(s.trunk.start_out, 2600.0);
    assert_eq!(s.branches.finish_out, s.trunk.start_out);
}

#[test]
fn test_inverted_window_clamped() {
    let s = TreeSchedule::new(500.0, 100.0);
    assert_eq!(s.trunk.finish_out, 500.0);
    assert!(s.trunk.is_terminal(501.0));
}

#[test]
fn test_tree_lifecycle() {
    let mut rng = StdRng::seed_from_u64(7);
    let targets = TreeTargets {
        origin: Vec2::new(100.0, 0.0),
        direction: Vec2::X,
        trunk_target: Vec2::new(400.0, 0.0),
        branch_targets: vec![
            Vec2::new(460.0, 50.0),
            Vec2::new(460.0, -50.0),
            Vec2::new(380.0, 90.0),
        ],
    };
    let mut tree = FlagellumTree::new(targets, 0.0, 4000.0, config(), &mut rng).unwrap();

    assert_eq!(tree.tick(100.0), EnvelopePhase::Appearing);
    assert!(tree.branches().is_empty());
    let growing = tree.evaluate(100.0);
    assert_eq!(growing.len(), 1);
    assert!(growing[0].head().unwrap().x < 400.0);

    assert_eq!(tree.tick(300.0), EnvelopePhase::Holding);
    assert_eq!(tree.branches().len(), 3);
    assert_eq!(tree.evaluate(300.0).len(), 4);

    tree.tick(3300.0);
    assert!(tree.branches().is_empty());
    assert_eq!(tree.tick(3300.0), EnvelopePhase::Disappearing);
    assert_eq!(tree.evaluate(3300.0).len(), 1);

    assert_eq!(tree.tick(4000.1), EnvelopePhase::Terminal);
    assert!(tree.evaluate(4000.1).is_empty());
}
