use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or unparsable. Targets match by
/// prefix, so `pairwatch` covers both `pairwatch_core` and `pairwatch_cli`.
pub const DEFAULT_FILTER: &str = "pairwatch=info,tower_http=info";

/// Installs the global subscriber; logs go to stderr so stdout stays
/// reserved for command output.
///
/// Calling this twice is harmless: the second install is ignored.
pub fn init(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
