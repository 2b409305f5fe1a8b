use anyhow::Result;
use clap::Parser;
use std::{path::PathBuf, process::ExitCode};
use flapwing_io::{config_diff, load_config};

#[derive(Parser, Debug)]
#[command(name="cfg_diff", version, about="Diff two locomotion configs field by field")]
struct Opts {
    /// Left config .json
    left: PathBuf,
    /// Right config .json
    right: PathBuf,
    /// Epsilon for numeric differences (abs)
    #[arg(long, default_value_t = 1.0e-6)]
    eps: f64,
    /// Max differences to print before truncating
    #[arg(long, default_value_t = 50)]
    max: usize,
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::from(0),
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<bool> {
    let opts = Opts::parse();
    let l = load_config(&opts.left)?;
    let r = load_config(&opts.right)?;
    let diffs = config_diff(&l, &r, opts.eps)?;

    if diffs.is_empty() {
        println!("OK configs are equal within eps ({})", opts.eps);
        return Ok(true);
    }
    println!("DIFF {} field(s) (showing up to {}):", diffs.len(), opts.max);
    for d in diffs.iter().take(opts.max) { println!("  - {}", d); }
    Ok(false)
}
