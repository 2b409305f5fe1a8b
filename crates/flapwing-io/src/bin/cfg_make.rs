use anyhow::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use flapwing_io::{config_hash, hex32, write_config_json};
use flapwing_locomotion::LocomotionConfig;

#[derive(Parser, Debug)]
#[command(name="cfg_make", version, about="Write the default locomotion config as JSON")]
struct Opts {
    /// Output path
    #[arg(default_value = "flapwing.json")]
    out: PathBuf,

    /// Pretty-print JSON
    #[arg(long, action=ArgAction::SetTrue)]
    pretty: bool,
}

fn main() -> Result<()> {
    let opt = Opts::parse();
    let cfg = LocomotionConfig::default();
    write_config_json(&cfg, &opt.out, opt.pretty)?;
    println!("Config: {}", opt.out.display());
    println!("Hash:   {}", hex32(config_hash(&cfg)?));
    Ok(())
}
