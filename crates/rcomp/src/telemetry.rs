use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the process-wide subscriber for the `rcomp` binary.
///
/// Verbosity comes from `RUST_LOG` and only errors are shown when it is
/// unset. Records emitted through the `log` macros end up in the same
/// stderr stream as `tracing` events, leaving stdout to remote output.
/// Only the first call installs anything.
pub fn init() {
    let _ = LogTracer::init();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
