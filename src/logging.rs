use std::time::Instant;

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global `tracing` subscriber. `RUST_LOG` takes precedence.
pub fn init_logging(quiet: bool) {
    let level = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("polling_station_lookup={level}")));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// Log a message prefixed with elapsed time since `start`.
pub fn log_with_elapsed(start: Instant, message: &str) {
    let elapsed = start.elapsed().as_secs_f32();
    info!("[{elapsed:>8.2}s] {message}");
}
