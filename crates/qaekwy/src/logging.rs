//! `tracing` subscriber setup.

use std::sync::OnceLock;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "qaekwy=info";

static INIT: OnceLock<()> = OnceLock::new();

/// Installs a formatting subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// Safe to call multiple times - only the first call has effect.
pub fn init() {
    install(None);
}

/// Like [`init`], but with an explicit filter directive such as
/// `qaekwy=debug` (for example from `ClientConfig::log_filter`).
pub fn init_with_filter(directive: &str) {
    install(Some(directive));
}

fn install(directive: Option<&str>) {
    INIT.get_or_init(|| {
        let filter = match directive {
            Some(directive) => EnvFilter::try_new(directive).ok(),
            None => EnvFilter::try_from_default_env().ok(),
        }
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

        // Another subscriber may already be global; keep it.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .try_init();
    });
}
