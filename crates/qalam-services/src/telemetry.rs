//! Tracing subscriber setup for binaries and integration harnesses.

use tracing_subscriber::fmt::format::{DefaultFields, Format};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info,qalam=debug";

/// Installs the fmt subscriber, honouring `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    builder(filter).try_init().is_ok()
}

/// Installs the fmt subscriber with an explicit filter directive.
pub fn init_tracing_with(directives: &str) -> bool {
    builder(EnvFilter::new(directives)).try_init().is_ok()
}

// The EnvFilter is the only level control; a max level set afterwards
// would replace it.
fn builder(filter: EnvFilter) -> SubscriberBuilder<DefaultFields, Format, EnvFilter> {
    tracing_subscriber::fmt().with_env_filter(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_warn_filter_disables_debug() {
        let subscriber = builder(EnvFilter::new("warn")).finish();
        tracing::subscriber::with_default(subscriber, || {
            assert!(!tracing::enabled!(Level::DEBUG));
            assert!(!tracing::enabled!(Level::INFO));
            assert!(tracing::enabled!(Level::WARN));
        });
    }

    #[test]
    fn test_default_filter_targets_qalam_crates() {
        let subscriber = builder(EnvFilter::new(DEFAULT_FILTER)).finish();
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "qalam_services::config", Level::DEBUG));
            assert!(!tracing::enabled!(target: "qalam_services::audit", Level::TRACE));
            assert!(!tracing::enabled!(target: "hyper::proto", Level::DEBUG));
            assert!(tracing::enabled!(target: "hyper::proto", Level::INFO));
        });
    }

    #[test]
    fn test_second_init_is_harmless() {
        init_tracing_with("warn");
        assert!(!init_tracing());
    }
}
