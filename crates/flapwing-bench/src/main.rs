// Headless run of the locomotion loop against the reference body and a scripted
// pilot. Prints a periodic line and a final summary with the state digest.

mod scenario;

use std::path::PathBuf;
use std::time::Instant;
use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use flapwing_core::{tilt_from_upright, vec3};
use flapwing_io::{config_hash, hex32, load_config};
use flapwing_locomotion::{FlightState, LocomotionConfig, LocomotionLoop};
use flapwing_sim::{ScriptedPilot, SimBody, GRAVITY};
use scenario::Scenario;

#[derive(Parser, Debug)]
#[command(name="flapwing-bench", version, about="Drive the flap-to-fly loop headless and report what it did")]
struct Args {
    /// Tick rate (Hz)
    #[arg(long, default_value_t = 90)]
    hz: u32,
    /// Number of ticks to run
    #[arg(long, default_value_t = 900)]
    ticks: u32,
    /// Config .json (defaults when absent)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = Scenario::Glide)]
    scenario: Scenario,
    /// Tracker jitter amplitude (m)
    #[arg(long, default_value_t = 0.0)]
    noise: f32,
    /// Jitter seed
    #[arg(long, default_value_t = 0xF1A9)]
    seed: u64,
    /// Print a status line every N ticks (0 = never)
    #[arg(long, default_value_t = 90)]
    print_every: u32,
    /// Pilot mass (kg)
    #[arg(long, default_value_t = 70.0)]
    mass: f32,
}

#[derive(Default)]
struct Tally {
    flapping: u32,
    gliding: u32,
    grounded: u32,
    coasting: u32,
    skipped: u32,
    flaps: u32,
    max_height: f32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if args.hz == 0 { bail!("--hz must be > 0"); }

    let cfg = match &args.config {
        Some(p) => load_config(p)?,
        None => LocomotionConfig::default(),
    };
    info!(hash = %hex32(config_hash(&cfg)?), scenario = ?args.scenario, hz = args.hz, ticks = args.ticks, "config");

    let dt = 1.0 / args.hz as f32;
    let pilot = ScriptedPilot::new(args.scenario.frame_at(0.0)).with_jitter(args.noise, args.seed);
    let body = SimBody::new(args.mass);
    let mut lp = LocomotionLoop::new(cfg, pilot, body)?;

    let mut tally = Tally::default();
    let t0 = Instant::now();
    for i in 0..args.ticks {
        let t = i as f32 * dt;
        lp.source_mut().set_frame(args.scenario.frame_at(t));
        let rep = lp.advance(dt);
        lp.body_mut().step(dt, GRAVITY);

        match rep.state {
            Some(FlightState::Flapping) => tally.flapping += 1,
            Some(FlightState::Gliding) => tally.gliding += 1,
            Some(FlightState::Grounded) => tally.grounded += 1,
            Some(FlightState::Coasting) => tally.coasting += 1,
            None => tally.skipped += 1,
        }
        if rep.flap_fired() { tally.flaps += 1; }
        let b = lp.body();
        tally.max_height = tally.max_height.max(b.height());

        if args.print_every > 0 && (i + 1) % args.print_every == 0 {
            println!(
                "[t={:6.2}s] state={:<9} h={:6.2}m v=({:6.2},{:6.2},{:6.2}) glide={:5.2}N tilt={:5.2}° turn={:?}",
                t + dt,
                rep.state.map_or("skipped".to_string(), |s| format!("{s:?}")),
                b.height(),
                b.velocity.x, b.velocity.y, b.velocity.z,
                lp.glide_force(),
                tilt_from_upright(b.rotation).to_degrees(),
                lp.turn_memory(),
            );
        }
    }
    let elapsed = t0.elapsed();

    let b = lp.body();
    let travelled = b.position - vec3(0.0, b.ground_y, 0.0);
    println!("---- {:?} x {} ticks @ {} Hz ----", args.scenario, args.ticks, args.hz);
    println!("states: flapping {} gliding {} grounded {} coasting {} skipped {}",
        tally.flapping, tally.gliding, tally.grounded, tally.coasting, tally.skipped);
    println!("flaps fired: {}  max height: {:.2} m", tally.flaps, tally.max_height);
    println!("final position: ({:.2}, {:.2}, {:.2})  speed {:.2} m/s",
        travelled.x, travelled.y, travelled.z, b.velocity.length());
    println!("wall time: {:.3} ms ({:.2} µs/tick)",
        elapsed.as_secs_f64() * 1e3,
        elapsed.as_secs_f64() * 1e6 / args.ticks.max(1) as f64);
    println!("digest: {}", hex32(lp.state_digest()));
    Ok(())
}
