//! Log output for the `poolmap` binary.
//!
//! Events go to stderr through `tracing_subscriber::fmt`, so stdout carries
//! nothing but the items' output. The filter comes from `RUST_LOG`; without it
//! the binary logs at `info`, or at `warn` when running silent.

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry(silent: bool) -> anyhow::Result<()> {
    let default_filter = if silent { "warn" } else { "info" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(false)
                .with_timer(ChronoLocal::rfc_3339())
                .with_file(true),
        )
        .try_init()?;

    Ok(())
}
