use anyhow::Result;
use clap::Parser;
use std::{path::PathBuf, process::ExitCode};
use flapwing_io::{config_hash, hex32, load_config};

#[derive(Parser, Debug)]
#[command(name="cfg_check", version, about="Load and validate a locomotion config, print its hash")]
struct Opts {
    /// Config .json
    input: PathBuf,
}

fn main() -> ExitCode {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn run() -> Result<()> {
    let opts = Opts::parse();
    let cfg = load_config(&opts.input)?;
    println!("OK {}", opts.input.display());
    println!("  flap: threshold {} power {} cooldown {}s law {:?}",
        cfg.flap_threshold, cfg.flap_power, cfg.flap_cooldown_duration, cfg.flap_power_law);
    println!("  glide: factor {} min {} max reach {}m", cfg.glide_factor, cfg.min_glide_force, cfg.max_glide_distance);
    println!("  turn: law {:?} threshold {} bank {} ({:?}) steer {}",
        cfg.turn_law, cfg.turn_threshold, cfg.turn_bank, cfg.bank_axis, cfg.turn_steer);
    println!("  ground contact: {:?}  aero: {}", cfg.ground_contact, if cfg.aero.is_some() { "on" } else { "off" });
    println!("  hash: {}", hex32(config_hash(&cfg)?));
    Ok(())
}
