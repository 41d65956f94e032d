//! Membrane skeleton behaviour tests.
//!
//! Covers generation bounds, tessellation layout, purity of evaluation and
//! the spike lock installed by `thorn`.

use cell_animator::{
    config::{Annulus, MembraneConfig},
    deformation::PhaseScale,
    geometry::CurveMode,
    membrane::{MembraneShape, MembraneSkeleton},
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn closed_config() -> MembraneConfig {
    MembraneConfig::new(8, 0.002, 0.6, CurveMode::Bezier, None, PhaseScale::default()).unwrap()
}

fn regular(radius: f32, segments: usize) -> MembraneShape {
    MembraneShape::Regular {
        center: Vec2::ZERO,
        radius,
        segments,
    }
}

fn build(shape: &MembraneShape, config: MembraneConfig, seed: u64) -> MembraneSkeleton {
    let mut rng = StdRng::seed_from_u64(seed);
    MembraneSkeleton::build(shape, config, &mut rng).unwrap()
}

// ============================================================================
// Generation
// ============================================================================

#[test]
fn test_deformation_within_half_edge() {
    let points = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(80.0, -10.0),
        Vec2::new(120.0, 40.0),
        Vec2::new(60.0, 90.0),
        Vec2::new(-20.0, 50.0),
    ];
    for seed in 0..20 {
        let skeleton = build(&MembraneShape::Points(points.clone()), closed_config(), seed);
        for i in 0..points.len() {
            let edge = points[(i + 1) % points.len()] - points[i];
            let d = skeleton.deformation(i).unwrap();
            assert!(
                d.length <= edge.length() * 0.5 + 1e-4,
                "edge {} deformation {} exceeds half edge {}",
                i,
                d.length,
                edge.length() * 0.5
            );
            assert!(d.angle >= 0.0 && d.angle <= 0.6);
        }
    }
}

#[test]
fn test_annulus_keeps_control_points_in_band() {
    let radius = 50.0;
    let annulus = Annulus::around_origin(radius, 0.15);
    let config = MembraneConfig::new(6, 0.003, 0.7, CurveMode::Bezier, Some(annulus), PhaseScale::default())
        .unwrap();

    for seed in 0..10 {
        let skeleton = build(&regular(radius, 10), config, seed);
        for i in 0..skeleton.edge_count() {
            let d = skeleton.deformation(i).unwrap();
            let anchor = skeleton.anchor(i).unwrap();
            let direction = skeleton_direction(&skeleton, i);
            // Sweep the full swing of both handles
            for k in 0..=20 {
                let theta = -d.angle + 2.0 * d.angle * k as f32 / 20.0;
                let rot = Vec2::from_angle(-theta);
                for dir in [direction, -direction] {
                    let p = anchor + rot.rotate(dir) * d.length;
                    let r = p.length();
                    assert!(
                        r >= annulus.inner - 1e-2 && r <= annulus.outer + 1e-2,
                        "control point radius {} outside [{}, {}]",
                        r,
                        annulus.inner,
                        annulus.outer
                    );
                }
            }
        }
    }
}

/// Unit edge direction of a regular polygon skeleton, recovered from its outline
fn skeleton_direction(skeleton: &MembraneSkeleton, edge: usize) -> Vec2 {
    let n = skeleton.edge_count();
    let theta = |i: usize| i as f32 / n as f32 * std::f32::consts::TAU;
    (Vec2::from_angle(theta((edge + 1) % n)) - Vec2::from_angle(theta(edge))).normalize()
}

#[test]
fn test_same_seed_same_skeleton() {
    let a = build(&regular(100.0, 12), closed_config(), 42).evaluate(777.0);
    let b = build(&regular(100.0, 12), closed_config(), 42).evaluate(777.0);
    assert_eq!(a, b);
}

// ============================================================================
// Tessellation
// ============================================================================

#[test]
fn test_fan_indices_cover_samples() {
    let skeleton = build(&regular(100.0, 12), closed_config(), 1);
    let frame = skeleton.evaluate(0.0);
    let indices = frame.indices();
    assert_eq!(indices.len(), 3 * frame.sample_count());

    let mut hits = vec![0usize; frame.points.len()];
    for tri in indices.chunks(3) {
        assert_eq!(tri[0], 0, "every triangle fans from the center");
        hits[tri[1] as usize] += 1;
    }
    assert_eq!(hits[0], 0);
    assert!(hits[1..].iter().all(|&h| h == 1));
}

#[test]
fn test_spline_mode_same_sample_count() {
    let mut skeleton = build(&regular(100.0, 9), closed_config(), 2);
    let bezier = skeleton.evaluate(300.0);
    skeleton.set_render_options(7, CurveMode::Spline).unwrap();
    let spline = skeleton.evaluate(300.0);
    assert_eq!(bezier.sample_count(), 9 * 8);
    assert_eq!(spline.sample_count(), 9 * 7);
    // Both curve modes pass through the anchors
    for i in 0..9 {
        assert_eq!(spline.edge_samples(i).unwrap()[0], skeleton.anchor(i).unwrap());
    }
    assert!(skeleton.set_render_options(0, CurveMode::Bezier).is_err());
}

#[test]
fn test_evaluation_is_pure() {
    let skeleton = build(&regular(100.0, 12), closed_config(), 3);
    let first = skeleton.evaluate(12_345.6);
    let second = skeleton.evaluate(12_345.6);
    assert_eq!(first, second);
}

#[test]
fn test_boundary_moves_over_time() {
    let skeleton = build(&regular(100.0, 12), closed_config(), 4);
    assert_ne!(skeleton.evaluate(0.0), skeleton.evaluate(1500.0));
}

// ============================================================================
// Locks and sectors
// ============================================================================

#[test]
fn test_thorn_freezes_edge() {
    let mut skeleton = build(&regular(100.0, 12), closed_config(), 5);
    let window = skeleton.thorn(0, 0.0, 500.0).unwrap();
    assert!(window.start <= window.finish);
    assert!(window.finish > window.start, "non-flat edge holds for a while");

    let locks = skeleton.locks(0).unwrap();
    let lock = locks.outbound.unwrap();
    assert!(lock.start <= lock.finish);
    assert!(skeleton.locks(1).unwrap().inbound.is_some());

    let span = window.finish - window.start;
    let a = skeleton.evaluate(window.start + span * 0.25);
    let b = skeleton.evaluate(window.start + span * 0.75);
    assert!(a.edge_samples(0).is_some());
    assert_eq!(a.edge_samples(0), b.edge_samples(0));
}

#[test]
fn test_thorn_locks_each_handle_at_its_extreme() {
    let mut checked = 0;
    for seed in 0..50 {
        let mut skeleton = build(&regular(100.0, 12), closed_config(), seed);
        let window = skeleton.thorn(0, 0.0, 500.0).unwrap();
        let config = *skeleton.config();
        let scale = config.phase_scale;
        let (Some(out), Some(inc)) = (
            skeleton.locks(0).unwrap().outbound,
            skeleton.locks(1).unwrap().inbound,
        ) else {
            continue;
        };
        let def_out = *skeleton.deformation(0).unwrap();
        let def_in = *skeleton.deformation(1).unwrap();

        // Each handle freezes on, and is released from, its own extreme
        for phase in [out.start, out.finish] {
            let angle = def_out.angle_at(phase, &scale);
            assert!(
                (angle.abs() - def_out.angle.abs()).abs() < 1e-4,
                "seed {}: outbound handle at {} not extreme ({} vs {})",
                seed,
                phase,
                angle,
                def_out.angle
            );
        }
        for phase in [inc.start, inc.finish] {
            let angle = def_in.angle_at(phase, &scale);
            assert!(
                (angle.abs() - def_in.angle.abs()).abs() < 1e-4,
                "seed {}: inbound handle at {} not extreme ({} vs {})",
                seed,
                phase,
                angle,
                def_in.angle
            );
        }
        // Outward for both handles means opposite signs on the two ends
        assert!(def_out.angle_at(out.start, &scale) * def_in.angle_at(inc.start, &scale) < 0.0);

        // The returned window is where both handles are frozen
        let frequency = config.frequency;
        assert!((window.start * frequency - out.start.max(inc.start)).abs() < 1e-9);
        assert!((window.finish * frequency - out.finish.min(inc.finish)).abs() < 1e-9);
        checked += 1;
    }
    assert!(checked > 0, "no seed produced a lockable edge");
}

#[test]
fn test_thorn_hold_covers_duration() {
    let mut skeleton = build(&regular(100.0, 12), closed_config(), 6);
    let window = skeleton.thorn(3, 1000.0, 800.0).unwrap();
    assert!(window.start >= 1000.0 - 1e-6);
    assert!(window.finish - window.start >= 800.0 - 1e-6);
}

#[test]
fn test_repeated_thorn_extends_lock() {
    let mut skeleton = build(&regular(100.0, 12), closed_config(), 7);
    let first = skeleton.thorn(2, 0.0, 400.0).unwrap();
    let before = skeleton.locks(2).unwrap().outbound.unwrap();
    skeleton.thorn(2, first.start + 10.0, 2000.0).unwrap();
    let after = skeleton.locks(2).unwrap().outbound.unwrap();
    assert!(after.start <= before.start);
    assert!(after.finish >= before.finish);
}

#[test]
fn test_expired_locks_cleared() {
    let mut skeleton = build(&regular(100.0, 12), closed_config(), 8);
    let window = skeleton.thorn(4, 0.0, 100.0).unwrap();
    skeleton.clear_expired_locks(window.finish * 10.0 + 1.0);
    assert!(skeleton.locks(4).unwrap().outbound.is_none());
    assert!(skeleton.locks(5).unwrap().inbound.is_none());
}

#[test]
fn test_get_sector_finds_facing_edge() {
    let skeleton = build(&regular(100.0, 12), closed_config(), 9);
    // Segment 0 spans anchors 0 and 1, around the polygon vertex at 30 degrees
    let target = Vec2::from_angle(30f32.to_radians()) * 400.0;
    let sector = skeleton.get_sector(target, 0.0);
    assert_eq!(sector.edge, 0);
    assert!((sector.distance - sector.point.distance(target)).abs() < 1e-4);
    assert!(sector.point.length() > 80.0 && sector.point.length() < 120.0);
}

#[test]
fn test_attack_spike_faces_target() {
    let mut skeleton = build(&regular(100.0, 12), closed_config(), 10);
    let target = Vec2::new(-300.0, 10.0);
    let spike = skeleton.attack(target, 50.0, 600.0).unwrap();
    assert!(spike.start >= 50.0 - 1e-6);
    assert!(spike.normal.dot(target - spike.tip) > 0.0);
    assert!((spike.normal.length() - 1.0).abs() < 1e-4);
}
