//! Logging bootstrap on top of `tracing-subscriber`.

/// Default filter used when neither `RUST_LOG` nor an explicit filter is set.
pub const DEFAULT_FILTER: &str = "info,lucent_ui=debug";

/// Install the fmt subscriber with the default filter.
///
/// Honors `RUST_LOG` when it is set. Calling this more than once is harmless.
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Install the fmt subscriber with an explicit env-filter directive string.
pub fn init_with_filter(filter: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    if tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()
        .is_err()
    {
        tracing::trace!("tracing subscriber already installed");
    }
}
