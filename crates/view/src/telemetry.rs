//! Tracing setup for embedding hosts.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG` when set; defaults to debug output for the
/// `buildsense` crates otherwise. Call once at host startup.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "buildsense=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
