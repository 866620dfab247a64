#![warn(missing_docs)]
//! One-call `tracing` setup for hashnav applications.
//!
//! On native targets events are printed with `tracing-subscriber`'s fmt layer and can be filtered
//! with the `RUST_LOG` environment variable. On wasm they go to the browser console through
//! `tracing-wasm`.
//!
//! ```rust
//! hashnav_logger::init(hashnav_logger::Level::DEBUG).expect("failed to init logger");
//! tracing::info!("router logs are visible now");
//! ```

pub use tracing::Level;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::prelude::*;

/// The environment variable read for filter directives on native targets.
pub const LOG_ENV: &str = "RUST_LOG";

/// An error that can occur while installing the logger.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Another global subscriber was installed first.
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled(#[from] SetGlobalDefaultError),
}

/// Install a global subscriber showing events at `level` and above.
///
/// On native targets, directives in [`LOG_ENV`] take precedence over `level`.
pub fn init(level: Level) -> Result<(), LoggerError> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));
        let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter);
        tracing::subscriber::set_global_default(tracing_subscriber::registry().with(fmt_layer))?;
    }

    #[cfg(target_arch = "wasm32")]
    {
        let config = tracing_wasm::WASMLayerConfigBuilder::default()
            .set_max_level(level)
            .build();
        let layer = tracing_wasm::WASMLayer::new(config);
        tracing::subscriber::set_global_default(tracing_subscriber::registry().with(layer))?;
    }

    Ok(())
}

/// Only show hashnav's own events at `level`; everything else at warnings and up.
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn default_directives(level: Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    format!("warn,hashnav_router={level},hashnav_history={level},hashnav_logger={level}")
}
