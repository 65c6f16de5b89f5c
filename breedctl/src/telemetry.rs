//! Tracing subscriber setup.
//!
//! Log output goes to stdout through the `fmt` layer. Verbosity is taken from `RUST_LOG`
//! (e.g. `RUST_LOG=breedctl=debug,sqlx=warn`), falling back to `info`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install the global subscriber. Fails if one is already installed.
pub fn init_telemetry() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry().with(env_filter).with(fmt::layer()).try_init()?;

    Ok(())
}
