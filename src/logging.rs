use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the global tracing subscriber. Events go to stderr so they never
/// interleave with menu output on stdout.
///
/// `RUST_LOG` takes precedence; otherwise only warnings are shown, or debug
/// events when `verbose` is set.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let default_directive = if verbose { "xpense=debug" } else { "xpense=warn" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
