#![doc = include_str!("../README.md")]

mod command;
mod config;
mod input;
mod telemetry;

use anyhow::bail;
use clap::Parser;
use command::LineCommand;
use config::{CliArgs, RunConfig};
use std::io::{self, Write};
use telemetry::init_telemetry;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = RunConfig::try_from(args)?;

    init_telemetry(config.map.silent)?;
    log_startup_info(&config);

    let items = input::read_items(config.input.as_deref())?;
    let op = LineCommand::new(config.program.clone(), config.args.clone());
    let mapped = poolmap::map(items.clone(), op, &config.map)?;

    let mut stdout = io::stdout().lock();
    for (item, slot) in items.iter().zip(mapped.iter()) {
        match slot {
            Ok(output) => writeln!(stdout, "{output}")?,
            Err(err) => eprintln!("{item}: {err}"),
        }
    }
    stdout.flush()?;

    if mapped.has_errors() {
        bail!("{} of {} items failed", mapped.failed(), mapped.len());
    }
    Ok(())
}

fn log_startup_info(_config: &RunConfig) {
    if cfg!(debug_assertions) {
        #[cfg(feature = "tracing")]
        tracing::debug!("Starting with full config: {:#?}", _config);
    } else {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Running `{}` with {} workers",
            _config.program,
            _config.map.workers
        );
    }
}
