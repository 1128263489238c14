//! Logging setup.
//!
//! Components only emit `tracing` events; the subscriber is installed once,
//! by the binary, from the configured filter.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the fmt subscriber for `filter` (an `EnvFilter` directive).
///
/// Returns an error if the directive is invalid or a subscriber is already set.
pub fn init(filter: &str) -> anyhow::Result<()> {
    let env = EnvFilter::try_new(filter)?;
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_directive() {
        assert!(init("weather_stats=loud").is_err());
    }
}
