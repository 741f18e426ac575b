//! Renders one density curve and its placement plan side by side,
//! using the engine crates directly rather than the controller.
//!
//! Usage:
//!   cargo run --example preview
//!   cargo run --example preview -- --seed 7 --density 70 --accum

use dz_doc::{Algorithm, NoiseParams};
use dz_engine::{curve, plan};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();

    let seed: u64 = flag_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(414);
    let density: f32 = flag_value(&args, "--density")
        .and_then(|s| s.parse().ok())
        .unwrap_or(50.0);
    let algorithm = if args.iter().any(|a| a == "--accum") {
        Algorithm::Accumulation
    } else {
        Algorithm::Probability
    };

    let params = NoiseParams {
        seed,
        frequency: 1.0,
        amplitude: 40.0,
        density,
        algorithm,
        ..NoiseParams::default()
    };

    let start = 0.0;
    let end = 48.0;
    let placements = plan(start, end, &params);

    println!("seed {seed}, density {density}, {algorithm:?}");
    println!("{} events over {:.0} s", placements.len(), end - start);
    println!();

    // One row per second: curve value as a bar, markers where the
    // planner put events in that second.
    let mut next = placements.iter().peekable();
    for (t, v) in curve(start, end - 1.0, 48, &params) {
        let bar = "#".repeat((v * 24.0).round() as usize);
        let mut marks = String::new();
        while let Some(p) = next.peek() {
            if p.time < t + 1.0 {
                marks.push('*');
                next.next();
            } else {
                break;
            }
        }
        println!("{t:>4.0}s |{bar:<24}| {marks}");
    }
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}
