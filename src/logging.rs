//! Tracing setup for the `lintwrap` binary
//!
//! Library code only emits `tracing` events (every adapter notice carries a
//! `linter` field with the handler name); installing a subscriber is left to
//! the binary or the embedding application.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects between
/// `lintwrap=debug,info` and `lintwrap=info,warn`. Events are written to
/// stderr so findings on stdout stay machine-readable.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            if verbose {
                EnvFilter::try_new("lintwrap=debug,info")
            } else {
                EnvFilter::try_new("lintwrap=info,warn")
            }
        })
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_line_number(false)
                .with_file(false)
                .compact(),
        )
        .try_init()?;

    Ok(())
}
