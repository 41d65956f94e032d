//! Cell Animator - Entry point
//!
//! Drives one animated cell headless and reports what it produced.
//!
//! CLI Usage:
//!   cargo run                              # Animate 10 s at 60 fps
//!   cargo run -- -n 1200 --seed 7          # Custom frame count and seed
//!   cargo run -- --config data/parameters --export

use std::time::Instant;

use anyhow::Result;
use cell_animator::{
    config::Parameters,
    export::export_frame_json,
    timing::EnvelopePhase,
    CellVisual,
};
use glam::Vec2;

struct Options {
    frames: usize,
    fps: f64,
    seed: u64,
    config_dir: Option<String>,
    export: bool,
}

/// Parse CLI arguments
fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().collect();
    let mut options = Options {
        frames: 600,
        fps: 60.0,
        seed: 1,
        config_dir: None,
        export: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--frames" => {
                i += 1;
                if i < args.len() {
                    options.frames = args[i].parse().unwrap_or(600);
                }
            }
            "--fps" => {
                i += 1;
                if i < args.len() {
                    options.fps = args[i].parse().unwrap_or(60.0);
                }
            }
            "-s" | "--seed" => {
                i += 1;
                if i < args.len() {
                    options.seed = args[i].parse().unwrap_or(1);
                }
            }
            "-c" | "--config" => {
                i += 1;
                if i < args.len() {
                    options.config_dir = Some(args[i].clone());
                }
            }
            "--export" | "-e" => options.export = true,
            "--help" | "-h" => {
                println!("Cell Animator");
                println!();
                println!("Usage: cell-animator [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --frames N     Number of frames to animate (default: 600)");
                println!("  --fps F            Frames per second of the simulated clock (default: 60)");
                println!("  -s, --seed S       Generation seed (default: 1)");
                println!("  -c, --config DIR   Load parameter JSON files from DIR");
                println!("  -e, --export       Export the frame at peak spike extension to JSON");
                println!("  --help, -h         Show this help");
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }
    options
}

fn main() -> Result<()> {
    env_logger::init();
    let options = parse_args();

    let params = match &options.config_dir {
        Some(dir) => Parameters::load_from_dir(dir),
        None => Parameters::load_or_default(),
    };

    println!("=== Cell Animator ===\n");
    let mut cell = CellVisual::new(&params, Vec2::ZERO, options.seed)?;
    println!("Wall edges: {}", cell.wall().edge_count());
    println!("Nucleus: {}", if cell.nucleus().is_some() { "yes" } else { "no" });

    // Clock in milliseconds, advanced only here
    let frame_ms = 1000.0 / options.fps.max(1.0);
    let attack_frame = options.frames / 5;
    let attack_duration = frame_ms * options.frames as f64 * 0.5;

    let mut spike = None;
    let mut max_points = 0;
    let mut peak_strips = 0;
    let mut frozen_frames = 0;
    let mut last_spike_samples: Option<Vec<Vec2>> = None;
    let mut peak_frame = None;

    let start_time = Instant::now();
    for frame_idx in 0..options.frames {
        let time = frame_idx as f64 * frame_ms;

        if frame_idx == attack_frame {
            let target = cell.random_target(params.cell.radius * 3.0);
            let branches = vec![
                target + Vec2::new(60.0, 40.0),
                target + Vec2::new(60.0, -40.0),
                target + Vec2::new(-30.0, 70.0),
            ];
            let landed = cell.attack(target, branches, time, attack_duration)?;
            println!(
                "\nAttack at t={:.0} ms hit edge {}; spike held [{:.0}, {:.0}] ms",
                time, landed.edge, landed.start, landed.finish
            );
            spike = Some(landed);
        }

        cell.tick(time);
        let frame = cell.evaluate(time);

        max_points = max_points.max(frame.wall.points.len());
        peak_strips = peak_strips.max(frame.flagella.len());

        if let Some(s) = spike.as_ref() {
            if time > s.start && time < s.finish {
                let samples = frame.wall.edge_samples(s.edge).map(<[Vec2]>::to_vec);
                if samples.is_some() && last_spike_samples == samples {
                    frozen_frames += 1;
                }
                last_spike_samples = samples;
            }
            if peak_frame.is_none() && time >= (s.start + s.finish) * 0.5 {
                peak_frame = Some(frame.clone());
            }
        }

        if options.frames >= 10 && frame_idx % (options.frames / 10) == 0 {
            let phase = cell
                .attacks()
                .first()
                .map(|tree| tree.schedule().trunk.phase(time));
            println!(
                "  {:3.0}%: t={:7.0} ms, wall points={}, strips={}, tendril={:?}",
                frame_idx as f64 / options.frames as f64 * 100.0,
                time,
                frame.wall.points.len(),
                frame.flagella.len(),
                phase
            );
        }
    }
    let elapsed = start_time.elapsed();

    println!("\n=== Results ===");
    println!("Elapsed time: {:.2?}", elapsed);
    println!("Frames per second: {:.0}", options.frames as f32 / elapsed.as_secs_f32());
    println!("Max wall points: {}", max_points);
    println!("Peak visible strips: {}", peak_strips);

    println!("\n=== Checks ===");
    if frozen_frames > 0 {
        println!("✓ Spiked segment held still for {} frames", frozen_frames);
    } else {
        println!("⚠️  WARNING: Spiked segment never held still (flat edge or run too short)");
    }
    let end_time = options.frames as f64 * frame_ms;
    let finished = cell
        .attacks()
        .iter()
        .all(|tree| tree.schedule().trunk.phase(end_time) == EnvelopePhase::Terminal);
    if cell.attacks().is_empty() || finished {
        println!("✓ Tendrils finished");
    } else {
        println!("Tendrils still active at end of run");
    }

    if options.export {
        let frame = peak_frame.unwrap_or_else(|| cell.evaluate(end_time));
        let path = export_frame_json(&frame)?;
        println!("\nExported frame to {}", path.display());
    }

    Ok(())
}
