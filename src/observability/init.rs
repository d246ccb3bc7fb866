//! Tracing initialization and subscriber setup.
//!
//! Configures the tracing subscriber: an `EnvFilter` built from the
//! configured trace level (with `RUST_LOG` taking precedence when set) and a
//! compact fmt layer writing to stderr, keeping stdout free for the gallery
//! itself.

use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber.
///
/// # Filter Resolution
///
/// 1. `RUST_LOG`, if set in the environment
/// 2. `config.trace_level`, if set
/// 3. Default: `"warn"`
///
/// Idempotent: safe to call multiple times, only the first call takes effect.
pub fn init_tracing(config: &Config) {
    let fallback = config.trace_level.clone().unwrap_or_else(|| "warn".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let _ = subscriber.try_init();
}
