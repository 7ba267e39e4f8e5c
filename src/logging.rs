//! Logging setup
//!
//! The library only emits `tracing` events. The CLI installs a subscriber via
//! [`init`]; its filter is reloadable so that [`apply_external_verbosity`],
//! called on every connect, can raise or lower the two external logger
//! categories according to the `HBADMIN_DEBUG` environment flag.

use tracing::Level;

/// Environment flag that raises the external loggers to debug output
pub const DEBUG_ENV: &str = "HBADMIN_DEBUG";

/// Value of [`DEBUG_ENV`] that enables debug output
pub const DEBUG_ENV_ENABLED: &str = "true";

/// External logger categories: the HTTP client and the collaborator adapters
pub const EXTERNAL_TARGETS: [&str; 2] = ["ureq", "hbadmin::cluster"];

/// Verbosity of the external logger categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalVerbosity {
    Debug,
    Error,
}

impl ExternalVerbosity {
    /// Read the verbosity from the [`DEBUG_ENV`] environment variable
    pub fn from_env() -> Self {
        Self::from_flag(std::env::var(DEBUG_ENV).ok().as_deref())
    }

    /// Only the exact value `true` enables debug output
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some(DEBUG_ENV_ENABLED) => ExternalVerbosity::Debug,
            _ => ExternalVerbosity::Error,
        }
    }

    pub fn level(&self) -> Level {
        match self {
            ExternalVerbosity::Debug => Level::DEBUG,
            ExternalVerbosity::Error => Level::ERROR,
        }
    }
}

/// Build filter directives: `base` for everything, `external` for the external categories
pub fn filter_directives(base: Level, external: ExternalVerbosity) -> String {
    let external_level = external.level().to_string().to_lowercase();
    let mut directives = vec![base.to_string().to_lowercase()];
    directives.extend(
        EXTERNAL_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, external_level)),
    );
    directives.join(",")
}

#[cfg(feature = "cli")]
mod subscriber {
    use super::{filter_directives, ExternalVerbosity};
    use anyhow::{anyhow, Result};
    use std::sync::OnceLock;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

    struct FilterControl {
        base: Level,
        handle: reload::Handle<EnvFilter, Registry>,
    }

    static FILTER: OnceLock<FilterControl> = OnceLock::new();

    /// Install the global subscriber writing to stderr
    pub fn init(base: Level) -> Result<()> {
        let directives = filter_directives(base, ExternalVerbosity::from_env());
        let (filter, handle) = reload::Layer::new(EnvFilter::new(directives));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;

        FILTER
            .set(FilterControl { base, handle })
            .map_err(|_| anyhow!("Tracing subscriber already installed"))
    }

    pub fn reload(external: ExternalVerbosity) {
        if let Some(control) = FILTER.get() {
            let directives = filter_directives(control.base, external);
            if let Err(e) = control.handle.reload(EnvFilter::new(directives)) {
                tracing::warn!("failed to reload log filter: {}", e);
            }
        }
    }
}

#[cfg(feature = "cli")]
pub use subscriber::init;

/// Set the external logger categories to `verbosity`
///
/// Reloads the filter of the subscriber installed by `init` (`cli` feature).
/// Without one, only a debug event is emitted;
/// [`crate::AdminSession::external_verbosity`] keeps what a session applied.
pub fn apply_external_verbosity(verbosity: ExternalVerbosity) {
    tracing::debug!(?verbosity, "external logger verbosity");
    #[cfg(feature = "cli")]
    subscriber::reload(verbosity);
}
