#![doc = include_str!("../README.md")]

mod config;
mod render;
mod telemetry;

use std::io::{self, BufWriter, Write};

use clap::Parser;
use config::{CliArgs, CliConfig, Mode};
use telemetry::init_telemetry;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = CliConfig::try_from(args)?;

    init_telemetry()?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let epoch = config.generator.epoch;

    match &config.mode {
        Mode::Generate { count } => {
            let generator = config.generator.build()?;
            tracing::info!(
                worker_id = generator.worker_id(),
                datacenter_id = generator.datacenter_id(),
                epoch,
                count,
                "generating ids"
            );
            for _ in 0..*count {
                let id = generator.next_id()?;
                render::write_id(&mut out, id, epoch, config.format)?;
            }
        }
        Mode::Decode { ids } => {
            tracing::debug!(count = ids.len(), "decoding ids");
            for &id in ids {
                render::write_id(&mut out, id, epoch, config.format)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}
