//! drizzle CLI — headless ambience generation demo.
//!
//! Usage:
//!   cargo cli
//!   cargo cli --seed 99 --length 120 --algorithm accum
//!
//! Builds a small demo session, runs one regeneration pass, and prints
//! each group's density curve next to the placements generated under
//! it. Curve and placements read the same noise field, so the shape of
//! one should be visible in the other.

use dz_master::{curve, Algorithm, Controller, NodePath, NoiseParams, Placement};
use std::env;

const ROW_WIDTH: usize = 64;

fn main() {
    let args: Vec<String> = env::args().collect();

    let seed: u64 = flag_value(&args, "--seed")
        .map(|s| {
            s.parse().unwrap_or_else(|_| {
                eprintln!("Bad --seed value: {}", s);
                std::process::exit(1);
            })
        })
        .unwrap_or(414);

    let length: f64 = flag_value(&args, "--length")
        .map(|s| {
            s.parse().unwrap_or_else(|_| {
                eprintln!("Bad --length value: {}", s);
                std::process::exit(1);
            })
        })
        .unwrap_or(60.0);

    let algorithm = match flag_value(&args, "--algorithm") {
        None | Some("prob") => Algorithm::Probability,
        Some("accum") => Algorithm::Accumulation,
        Some(other) => {
            eprintln!("Unknown algorithm {} (expected prob or accum)", other);
            std::process::exit(1);
        }
    };

    let mut ctrl = build_demo_session(seed, algorithm);
    ctrl.set_selection(0.0, length);
    ctrl.tick();

    let groups = ctrl.groups();
    let containers: usize = groups
        .iter()
        .filter_map(|(path, _)| ctrl.session().group(path))
        .map(|g| g.containers.len())
        .sum();

    println!("Session:   {} groups, {} containers", groups.len(), containers);
    println!("Selection: 0.0 .. {:.1} s", length);
    println!("Seed:      {}", seed);
    println!("Algorithm: {:?}", algorithm);
    println!("Events:    {}", ctrl.total_events());
    println!();

    for (path, _) in &groups {
        let Some(group) = ctrl.session().group(path) else {
            continue;
        };
        println!("{}", group.name);
        println!("  curve      |{}|", sparkline(&group.params, 0.0, length));
        for container in &group.containers {
            let placements = ctrl.placements(container.id);
            println!(
                "  {:<10} |{}| {} events",
                container.name,
                event_row(placements, 0.0, length),
                placements.len()
            );
        }
        println!();
    }
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn build_demo_session(seed: u64, algorithm: Algorithm) -> Controller {
    let mut ctrl = Controller::new();
    let forest = ctrl
        .add_folder(&NodePath::root(), "Forest")
        .expect("root is a folder");

    let birds = ctrl
        .add_group(
            &forest,
            "Birds",
            NoiseParams {
                seed,
                frequency: 0.8,
                amplitude: 60.0,
                density: 45.0,
                threshold: 20.0,
                algorithm,
                ..NoiseParams::default()
            },
        )
        .expect("folder path resolves");
    ctrl.add_container(&birds, "Songbird A").expect("group path resolves");
    let b = ctrl.add_container(&birds, "Songbird B").expect("group path resolves");
    ctrl.set_container_params(
        &birds,
        b,
        NoiseParams {
            seed: seed ^ 1,
            frequency: 1.2,
            amplitude: 40.0,
            density: 75.0,
            algorithm,
            ..NoiseParams::default()
        },
    );
    ctrl.set_container_override(&birds, b, true);

    let wind = ctrl
        .add_group(
            &forest,
            "Wind",
            NoiseParams {
                seed: seed.wrapping_add(7),
                frequency: 0.3,
                amplitude: 30.0,
                octaves: 2,
                density: 70.0,
                algorithm,
                ..NoiseParams::default()
            },
        )
        .expect("folder path resolves");
    ctrl.add_container(&wind, "Gusts").expect("group path resolves");

    ctrl
}

/// One character per column, ramped by the density curve's value.
fn sparkline(params: &NoiseParams, start: f64, end: f64) -> String {
    const RAMP: &[u8] = b" .:-=+*#%@";
    curve(start, end, ROW_WIDTH, params)
        .map(|(_, v)| {
            let step = (v * (RAMP.len() - 1) as f32).round() as usize;
            RAMP[step.min(RAMP.len() - 1)] as char
        })
        .collect()
}

/// One character per column, marking how many placements land in it.
fn event_row(placements: &[Placement], start: f64, end: f64) -> String {
    let mut counts = [0usize; ROW_WIDTH];
    let span = end - start;
    for p in placements {
        let col = ((p.time - start) / span * ROW_WIDTH as f64) as usize;
        counts[col.min(ROW_WIDTH - 1)] += 1;
    }
    counts
        .iter()
        .map(|&n| match n {
            0 => ' ',
            1 => '.',
            2 => 'x',
            _ => '#',
        })
        .collect()
}
